use crate::{
    engine::scheduler::FrameScheduler,
    foundation::{core::RegionId, error::ScrublineResult},
    responsive::{
        reveal::{RevealAnimation, RevealGroup},
        tier::Tier,
    },
    scroll::{
        pin::PinController,
        progress::{Generation, ProgressSource, SubscriptionId},
    },
};

/// Pin controller plus scrubbed timelines.
#[derive(Clone, Debug)]
pub struct PinnedVariant {
    pub owner: Generation,
    pub subscription: SubscriptionId,
    pub pin: PinController,
}

/// One-shot entry reveals.
#[derive(Clone, Debug)]
pub struct RevealVariant {
    pub owner: Generation,
    pub subscription: SubscriptionId,
    pub reveals: Vec<RevealAnimation>,
}

#[derive(Clone, Debug)]
pub enum Variant {
    Pinned(PinnedVariant),
    Reveal(RevealVariant),
}

impl Variant {
    pub fn owner(&self) -> Generation {
        match self {
            Self::Pinned(v) => v.owner,
            Self::Reveal(v) => v.owner,
        }
    }

    pub fn subscription(&self) -> SubscriptionId {
        match self {
            Self::Pinned(v) => v.subscription,
            Self::Reveal(v) => v.subscription,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TierSwitch {
    pub region: RegionId,
    pub from: Option<Tier>,
    pub to: Tier,
    pub disposed_subscriptions: usize,
    pub cancelled_frames: usize,
}

/// Picks the variant for a region's current tier and owns its lifetime.
#[derive(Clone, Debug)]
pub struct VariantSelector {
    region: RegionId,
    pinned_tiers: Vec<Tier>,
    tier: Option<Tier>,
    variant: Option<Variant>,
}

impl VariantSelector {
    pub fn new(region: RegionId, pinned_tiers: Vec<Tier>) -> Self {
        Self {
            region,
            pinned_tiers,
            tier: None,
            variant: None,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn variant(&self) -> Option<&Variant> {
        self.variant.as_ref()
    }

    pub fn variant_mut(&mut self) -> Option<&mut Variant> {
        self.variant.as_mut()
    }

    pub fn is_pinned_tier(&self, tier: Tier) -> bool {
        self.pinned_tiers.contains(&tier)
    }

    /// Switch to `tier`. Returns `None` when the tier is unchanged.
    ///
    /// The previous variant's subscriptions and frame tickets are disposed before the new variant
    /// subscribes. Reveal groups that already played stay revealed when moving between reveal tiers.
    pub fn select(
        &mut self,
        tier: Tier,
        groups: &[RevealGroup],
        source: &mut ProgressSource,
        scheduler: &mut FrameScheduler,
    ) -> ScrublineResult<Option<TierSwitch>> {
        if self.tier == Some(tier) && self.variant.is_some() {
            return Ok(None);
        }

        let revealed: Vec<String> = match &self.variant {
            Some(Variant::Reveal(v)) => v
                .reveals
                .iter()
                .filter(|r| r.is_triggered())
                .map(|r| r.group().id.clone())
                .collect(),
            _ => Vec::new(),
        };

        let (disposed_subscriptions, cancelled_frames) = self.teardown(source, scheduler);

        let owner = source.next_generation();
        let subscription = source.observe(&self.region, owner)?;
        let variant = if self.is_pinned_tier(tier) {
            Variant::Pinned(PinnedVariant {
                owner,
                subscription,
                pin: PinController::new(self.region.clone()),
            })
        } else {
            let reveals = groups
                .iter()
                .cloned()
                .map(|g| {
                    let carried = revealed.contains(&g.id);
                    let mut r = RevealAnimation::new(g);
                    if carried {
                        r.force_reveal();
                    }
                    r
                })
                .collect();
            Variant::Reveal(RevealVariant {
                owner,
                subscription,
                reveals,
            })
        };

        let switch = TierSwitch {
            region: self.region.clone(),
            from: self.tier,
            to: tier,
            disposed_subscriptions,
            cancelled_frames,
        };
        tracing::debug!(
            region = %self.region,
            from = ?switch.from,
            to = ?tier,
            disposed = disposed_subscriptions,
            "variant selected"
        );
        self.tier = Some(tier);
        self.variant = Some(variant);
        Ok(Some(switch))
    }

    /// Dispose the current variant. Returns `(subscriptions, frame tickets)` removed.
    pub fn teardown(
        &mut self,
        source: &mut ProgressSource,
        scheduler: &mut FrameScheduler,
    ) -> (usize, usize) {
        let Some(old) = self.variant.take() else {
            return (0, 0);
        };
        let owner = old.owner();
        (source.dispose_owner(owner), scheduler.cancel_owner(owner))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/responsive/selector.rs"]
mod tests;
