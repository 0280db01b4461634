use std::collections::BTreeMap;

use crate::scroll::progress::Generation;

/// Disposal token for one pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameTicket {
    id: u64,
    owner: Generation,
}

impl FrameTicket {
    pub fn owner(&self) -> Generation {
        self.owner
    }
}

/// Shared frame-callback queue.
///
/// Every callback is represented by a ticket. A ticket stays live until it is completed or its owner
/// is cancelled; callers check [`FrameScheduler::is_live`] before running the work it stands for.
#[derive(Clone, Debug, Default)]
pub struct FrameScheduler {
    next: u64,
    pending: BTreeMap<u64, Generation>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, owner: Generation) -> FrameTicket {
        self.next += 1;
        self.pending.insert(self.next, owner);
        FrameTicket { id: self.next, owner }
    }

    pub fn is_live(&self, ticket: &FrameTicket) -> bool {
        self.pending.get(&ticket.id) == Some(&ticket.owner)
    }

    /// Consume a ticket. Returns false if it was already completed or cancelled.
    pub fn complete(&mut self, ticket: &FrameTicket) -> bool {
        if !self.is_live(ticket) {
            return false;
        }
        self.pending.remove(&ticket.id);
        true
    }

    pub fn cancel_owner(&mut self, owner: Generation) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, o| *o != owner);
        before - self.pending.len()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
