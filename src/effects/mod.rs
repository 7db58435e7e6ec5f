//! Short-lived splash and ripple effects.
//!
//! Effects are static once spawned; they are inserted into the scene
//! immediately and removed, without any fade, when their time-to-live runs
//! out. Removal deadlines sit in a single [`ExpiryQueue`] polled once per
//! tick.

mod expiry;
mod pool;

pub use expiry::ExpiryQueue;
pub use pool::{EffectInfo, EffectPool, PoolStats};

/// Effect variant
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Rain drop hitting the water
    Splash,
    /// Pointer click on the water
    Ripple,
}

impl EffectKind {
    pub const ALL: [EffectKind; 2] = [EffectKind::Splash, EffectKind::Ripple];

    pub(crate) fn index(self) -> usize {
        match self {
            EffectKind::Splash => 0,
            EffectKind::Ripple => 1,
        }
    }
}

/// Generational handle to a spawned effect
///
/// Becomes stale once the effect expires, is evicted, or the pool is cleared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectHandle {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}
