use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Which way "further along" points for a threshold list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Boundaries of one tier; both None for a tier the collection does not know
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBounds {
    pub threshold: Option<f64>,
    pub next_threshold: Option<f64>,
}

/// An ordered, directioned list of threshold values with pure boundary queries.
///
/// Thresholds are stored in achievement order: strictly increasing for
/// ascending collections (milestones), strictly decreasing for descending
/// ones (cost-per-unit clubs). The last threshold is the terminal tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierCollection {
    thresholds: Vec<f64>,
    direction: Direction,
}

impl TierCollection {
    pub fn new(thresholds: Vec<f64>, direction: Direction) -> Result<Self> {
        if thresholds.is_empty() {
            bail!("tier collection requires at least one threshold");
        }
        let ordered = thresholds.windows(2).all(|pair| match direction {
            Direction::Ascending => pair[0] < pair[1],
            Direction::Descending => pair[0] > pair[1],
        });
        if !ordered {
            bail!("thresholds must be strictly ordered in achievement direction");
        }
        Ok(Self {
            thresholds,
            direction,
        })
    }

    pub fn ascending(thresholds: Vec<f64>) -> Result<Self> {
        Self::new(thresholds, Direction::Ascending)
    }

    pub fn descending(thresholds: Vec<f64>) -> Result<Self> {
        Self::new(thresholds, Direction::Descending)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn tiers(&self) -> &[f64] {
        &self.thresholds
    }

    fn position(&self, tier: f64) -> Option<usize> {
        self.thresholds.iter().position(|t| *t == tier)
    }

    /// The tier's own threshold and the adjacent one further along, or None
    /// past the terminal tier. Unknown tiers yield both None.
    pub fn bounds(&self, tier: f64) -> TierBounds {
        match self.position(tier) {
            Some(idx) => TierBounds {
                threshold: Some(self.thresholds[idx]),
                next_threshold: self.thresholds.get(idx + 1).copied(),
            },
            None => TierBounds {
                threshold: None,
                next_threshold: None,
            },
        }
    }

    pub fn is_terminal(&self, tier: f64) -> bool {
        match self.position(tier) {
            Some(idx) => idx + 1 == self.thresholds.len(),
            None => false,
        }
    }

    /// Membership per the direction rule: a value exactly at the threshold
    /// belongs to that tier, never to the adjacent one.
    pub fn is_value_in_tier(&self, value: f64, tier: f64) -> bool {
        let bounds = self.bounds(tier);
        let Some(threshold) = bounds.threshold else {
            return false;
        };
        match (self.direction, bounds.next_threshold) {
            (Direction::Ascending, Some(next)) => value >= threshold && value < next,
            (Direction::Ascending, None) => value >= threshold,
            (Direction::Descending, Some(next)) => value > next && value <= threshold,
            (Direction::Descending, None) => value >= 0.0 && value <= threshold,
        }
    }

    /// True when the value has reached the tier or any tier further along
    pub fn is_value_at_or_beyond(&self, value: f64, tier: f64) -> bool {
        if self.position(tier).is_none() {
            return false;
        }
        match self.direction {
            Direction::Ascending => value >= tier,
            Direction::Descending => value <= tier,
        }
    }

    /// The unique tier whose range contains the value, if any
    pub fn tier_for_value(&self, value: f64) -> Option<f64> {
        self.thresholds
            .iter()
            .copied()
            .find(|tier| self.is_value_in_tier(value, *tier))
    }

    /// The first tier in achievement order the value has not yet reached
    pub fn next_target(&self, value: f64) -> Option<f64> {
        self.thresholds
            .iter()
            .copied()
            .find(|tier| match self.direction {
                Direction::Ascending => value < *tier,
                Direction::Descending => value > *tier,
            })
    }
}
