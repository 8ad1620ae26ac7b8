use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    /// Lays out hazards for a game whose first reveal is at `first`.
    fn generate(self, config: GameConfig, first: Coord2) -> TruthGrid;
}
