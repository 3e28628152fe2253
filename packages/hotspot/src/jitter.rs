//! Display jitter for hotspot coordinates.

use rand::{Rng as _, SeedableRng as _};
use rand_xorshift::XorShiftRng;
use serde::{Deserialize, Serialize};

/// How hotspot coordinates are spread to avoid exact overlap on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jitter {
    /// No jitter: every hotspot sits exactly on its reference coordinate
    /// plus its road-type offset.
    None,
    /// Random jitter seeded from the operating system.
    #[default]
    Entropy,
    /// Reproducible jitter from a fixed seed.
    Seed(u64),
}

impl Jitter {
    /// Creates a fresh random source for one aggregation run.
    #[must_use]
    pub fn source(self) -> JitterSource {
        let rng = match self {
            Self::None => None,
            Self::Entropy => Some(XorShiftRng::from_entropy()),
            Self::Seed(seed) => Some(XorShiftRng::seed_from_u64(seed)),
        };
        JitterSource { rng }
    }
}

/// A stream of bounded random offsets.
pub struct JitterSource {
    rng: Option<XorShiftRng>,
}

impl JitterSource {
    /// Returns a uniform offset in `[-span / 2, span / 2)`, or `0` when
    /// jitter is disabled.
    pub fn offset(&mut self, span: f64) -> f64 {
        self.rng
            .as_mut()
            .map_or(0.0, |rng| (rng.r#gen::<f64>() - 0.5) * span)
    }
}
