use std::collections::BTreeMap;

use crate::{
    animation::property::Property, foundation::core::TargetId,
    timeline::evaluator::EvaluatedFrame,
};

/// Stable target ids mapped to whatever the rendering layer uses as a handle.
///
/// The registry is populated by the renderer as elements mount. Evaluation never looks targets up
/// in a document; values for ids that are not registered are dropped.
#[derive(Clone, Debug)]
pub struct TargetRegistry<H> {
    handles: BTreeMap<TargetId, H>,
}

impl<H> Default for TargetRegistry<H> {
    fn default() -> Self {
        Self {
            handles: BTreeMap::new(),
        }
    }
}

impl<H> TargetRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` for `id`, returning the handle it replaced.
    pub fn insert(&mut self, id: impl Into<TargetId>, handle: H) -> Option<H> {
        self.handles.insert(id.into(), handle)
    }

    pub fn remove(&mut self, id: &str) -> Option<H> {
        self.handles.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&H> {
        self.handles.get(id)
    }

    pub fn contains(&self, id: &TargetId) -> bool {
        self.handles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TargetId> + '_ {
        self.handles.keys()
    }

    /// Forward every registered value in `frame` to `sink`. Returns the number of values applied.
    pub fn apply<F>(&self, frame: &EvaluatedFrame, mut sink: F) -> usize
    where
        F: FnMut(&H, Property, f64),
    {
        let mut applied = 0;
        for (id, values) in &frame.targets {
            let Some(handle) = self.handles.get(id) else {
                continue;
            };
            for (&property, &value) in values {
                sink(handle, property, value);
                applied += 1;
            }
        }
        applied
    }

    /// Targets present in `frame` that have no handle.
    pub fn missing<'a>(&self, frame: &'a EvaluatedFrame) -> Vec<&'a TargetId> {
        frame
            .targets
            .keys()
            .filter(|id| !self.handles.contains_key(*id))
            .collect()
    }
}
