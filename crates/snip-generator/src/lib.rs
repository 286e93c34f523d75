pub mod hash;

pub use hash::{HashGenerator, Seed};

use snip_core::ShortCode;

/// Trait for generating short code candidates for a URL.
///
/// Implementations are pure generators that don't interact with storage;
/// checking a candidate for collisions is the caller's job.
///
/// All per-request state lives in the returned `Seed`, so a single generator
/// can be shared by concurrent requests.
pub trait CodeGenerator: Send + Sync + 'static {
    type Seed: Send + Sync;

    /// Produces the first candidate for `url` together with the seed used to
    /// derive alternatives. The first candidate is deterministic.
    fn generate(&self, url: &str) -> (ShortCode, Self::Seed);

    /// Produces an alternative candidate derived from `seed`.
    ///
    /// Every call starts over from the seed, it never builds on the output of
    /// an earlier call.
    fn regenerate(&self, seed: &Self::Seed) -> ShortCode;
}
