//! Reveal monitor

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::bounds::Bounds;
use crate::error::RevealError;
use crate::settings::RevealSettings;
use crate::Result;

/// Document-order index of a reveal candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RevealId(pub usize);

impl std::fmt::Display for RevealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reveal-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct RevealMonitor {
    threshold: f64,
    observed: BTreeMap<RevealId, Bounds>,
    revealed: BTreeSet<RevealId>,
}

impl RevealMonitor {
    pub fn new(settings: RevealSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            threshold: settings.threshold,
            observed: BTreeMap::new(),
            revealed: BTreeSet::new(),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start watching an element, or update the bounds of one already
    /// watched. Returns false for an element that has already been revealed;
    /// it stays revealed and is not watched again.
    pub fn observe(&mut self, id: RevealId, bounds: Bounds) -> Result<bool> {
        validate_bounds(id, &bounds)?;

        if self.revealed.contains(&id) {
            return Ok(false);
        }
        self.observed.insert(id, bounds);
        Ok(true)
    }

    pub fn unobserve(&mut self, id: RevealId) -> bool {
        self.observed.remove(&id).is_some()
    }

    /// Re-evaluate every watched element against the visible area and
    /// return the ones revealed by this update, in document order.
    pub fn update(&mut self, visible: Bounds) -> Vec<RevealId> {
        let threshold = self.threshold;
        let newly: Vec<RevealId> = self
            .observed
            .iter()
            .filter(|(_, bounds)| bounds.visible_ratio(&visible) >= threshold)
            .map(|(id, _)| *id)
            .collect();

        for id in &newly {
            self.observed.remove(id);
            self.revealed.insert(*id);
            tracing::debug!(element = %id, "Element revealed");
        }

        if !newly.is_empty() {
            tracing::debug!(
                revealed = newly.len(),
                remaining = self.observed.len(),
                "Reveal update"
            );
        }

        newly
    }

    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.revealed.contains(&id)
    }

    pub fn is_observed(&self, id: RevealId) -> bool {
        self.observed.contains_key(&id)
    }

    pub fn revealed(&self) -> impl Iterator<Item = RevealId> + '_ {
        self.revealed.iter().copied()
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}

impl Default for RevealMonitor {
    fn default() -> Self {
        Self {
            threshold: RevealSettings::default().threshold,
            observed: BTreeMap::new(),
            revealed: BTreeSet::new(),
        }
    }
}

fn validate_bounds(id: RevealId, bounds: &Bounds) -> Result<()> {
    let values = [bounds.left, bounds.top, bounds.width, bounds.height];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(RevealError::InvalidBounds {
            element: id.0,
            reason: "non-finite coordinate".to_string(),
        });
    }
    if bounds.width < 0.0 || bounds.height < 0.0 {
        return Err(RevealError::InvalidBounds {
            element: id.0,
            reason: "negative size".to_string(),
        });
    }
    Ok(())
}
