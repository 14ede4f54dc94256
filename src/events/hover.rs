//! Frame-over-frame hover tracking.

use crate::geo::FeatureId;
use std::collections::BTreeSet;

/// Identities under the pointer.
pub type HoverSet = BTreeSet<FeatureId>;

/// Result of one hover update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverTransition {
    /// Everything under the pointer now. Hover callbacks fire for all of
    /// these on every move, not just on entry.
    pub entered: HoverSet,
    /// The subset of `entered` that was not hovered on the previous move
    pub started: HoverSet,
    /// Hovered on the previous move but not any more
    pub exited: HoverSet,
}

impl HoverTransition {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Tracks which features were hovered on the previous pointer move.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    hovered: HoverSet,
}

impl HoverTracker {
    /// Creates a tracker with nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the hover set with `hits` and reports the transition.
    pub fn update(&mut self, hits: impl IntoIterator<Item = FeatureId>) -> HoverTransition {
        let current: HoverSet = hits.into_iter().collect();

        let exited = self.hovered.difference(&current).copied().collect();
        let started = current.difference(&self.hovered).copied().collect();

        let previous = std::mem::replace(&mut self.hovered, current.clone());
        if previous != current {
            log::trace!(
                "Hover set changed: {} -> {} features",
                previous.len(),
                current.len()
            );
        }

        HoverTransition {
            entered: current,
            started,
            exited,
        }
    }

    /// Identities hovered as of the last update.
    pub fn hovered(&self) -> &HoverSet {
        &self.hovered
    }

    /// Forgets the hover set without reporting exits.
    pub fn clear(&mut self) {
        self.hovered.clear();
    }
}
