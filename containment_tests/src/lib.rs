//! Helpers shared by the heavier tests of the containment cache.
//!
//! - [random] generates workloads from a seeded source of randomness, so failures are reproducible.
//! - [brute] answers the same questions as the cache by exhaustive search, to check answers against.

pub mod brute;
pub mod random;

/// Initialises a logger, if built with the `log` feature.
///
/// Safe to call from every test, as only the first call has effect.
pub fn init_logging() {
    #[cfg(feature = "log")]
    let _ = env_logger::builder().is_test(true).try_init();
}
