use rand::rngs::SmallRng;

use crate::*;
pub use random::*;

mod random;

/// Strategy for producing the opening grid of a session. The rng and uid
/// counter belong to the session so refills later continue both streams.
pub trait GridGenerator {
    fn generate(&self, settings: &GameSettings, rng: &mut SmallRng, uids: &mut UidCounter)
    -> Grid;
}
