use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

use crate::*;

/// Hazard layout of a game, decided lazily on the first reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Board {
    /// No hazards placed yet; the seed drives generation on the first reveal
    Pending { seed: u64 },
    /// Layout fixed, either generated or loaded
    Ready(TruthGrid),
}

impl Board {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn truth_grid(&self) -> Result<&TruthGrid> {
        match self {
            Self::Pending { .. } => Err(GameError::NotGenerated),
            Self::Ready(grid) => Ok(grid),
        }
    }
}

/// A single game from the first reveal to the last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    config: GameConfig,
    board: Board,
    visibility: Array2<Visibility>,
    marker_count: CellCount,
    first_move: Option<Coord2>,
    triggered_hazard: Option<Coord2>,
}

impl Engine {
    /// Fresh ungenerated game with a random seed.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    /// Fresh ungenerated game; the same seed and first reveal always lay out
    /// the same board.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            board: Board::Pending { seed },
            visibility: Array2::default(config.size.to_nd_index()),
            marker_count: 0,
            first_move: None,
            triggered_hazard: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_generated(&self) -> bool {
        self.board.is_ready()
    }

    pub fn marker_count(&self) -> CellCount {
        self.marker_count
    }

    /// How many hazards have not been marked yet, negative when the player
    /// placed more markers than there are hazards.
    pub fn hazards_left(&self) -> isize {
        (self.config.hazards as isize) - (self.marker_count as isize)
    }

    /// Cell whose reveal triggered generation.
    pub fn first_move(&self) -> Option<Coord2> {
        self.first_move
    }

    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.config.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn visibility_at(&self, coords: Coord2) -> Result<Visibility> {
        let coords = self.validate_coords(coords)?;
        Ok(self.visibility[coords.to_nd_index()])
    }

    pub fn visibility(&self) -> ArrayView2<'_, Visibility> {
        self.visibility.view()
    }

    /// What the player gets to see, facts only shown for revealed cells.
    pub fn visibility_snapshot(&self) -> Array2<DisplayCell> {
        match &self.board {
            Board::Pending { .. } => self.visibility.map(|&visibility| {
                DisplayCell::new(visibility, CellFact::SafeCount(0))
            }),
            Board::Ready(grid) => Zip::from(&self.visibility)
                .and(grid.cells())
                .map_collect(|&visibility, &fact| DisplayCell::new(visibility, fact)),
        }
    }

    pub fn export_truth_grid(&self) -> Result<&TruthGrid> {
        self.board.truth_grid()
    }

    /// Installs a previously generated layout, all cells hidden again.
    pub fn load_truth_grid(&mut self, grid: TruthGrid) -> Result<()> {
        let visibility = Array2::default(self.config.size.to_nd_index());
        self.load_game(grid, visibility)
    }

    /// Installs a previously generated layout together with the player's
    /// view of it, e.g. to resume a saved game.
    pub fn load_game(&mut self, grid: TruthGrid, visibility: Array2<Visibility>) -> Result<()> {
        let expected_dim = self.config.size.to_nd_index();
        let grid_dim = grid.cells().dim();
        let visibility_dim = visibility.dim();
        if [grid_dim.0, grid_dim.1] != expected_dim
            || [visibility_dim.0, visibility_dim.1] != expected_dim
        {
            return Err(GameError::InvalidBoardShape);
        }
        if grid.hazard_count() != self.config.hazards {
            return Err(GameError::HazardCountMismatch {
                expected: self.config.hazards,
                found: grid.hazard_count(),
            });
        }
        if !grid.is_consistent() {
            return Err(GameError::InconsistentTruthGrid);
        }

        let marker_count = visibility
            .iter()
            .filter(|&&cell| cell == Visibility::Marked)
            .count() as CellCount;
        let triggered_hazard = visibility
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
            .find(|&(coords, cell)| cell.is_revealed() && grid.contains_hazard(coords))
            .map(|(coords, _)| coords);

        log::debug!(
            "Loaded {:?} board with {} hazards, {} markers",
            self.config.size,
            grid.hazard_count(),
            marker_count
        );
        self.board = Board::Ready(grid);
        self.visibility = visibility;
        self.marker_count = marker_count;
        self.first_move = None;
        self.triggered_hazard = triggered_hazard;
        Ok(())
    }

    /// Flips a hidden cell to marked and back; revealed cells stay as they
    /// are.
    pub fn toggle_marker(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;
        use Visibility::*;

        let coords = self.validate_coords(coords)?;
        self.board.truth_grid()?;

        let cell = &mut self.visibility[coords.to_nd_index()];
        Ok(match *cell {
            Hidden => {
                *cell = Marked;
                self.marker_count = self.marker_count.saturating_add(1);
                Changed
            }
            Marked => {
                *cell = Hidden;
                self.marker_count = self.marker_count.saturating_sub(1);
                Changed
            }
            Revealed => NoChange,
        })
    }

    /// Opens a cell, laying out the board first if this is the opening move.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if let Board::Pending { seed } = self.board {
            let grid = RandomBoardGenerator::new(seed).generate(self.config, coords);
            self.board = Board::Ready(grid);
            self.first_move = Some(coords);
        }

        let Board::Ready(grid) = &self.board else {
            return Err(GameError::NotGenerated);
        };
        Ok(reveal_from(grid, &mut self.visibility, coords, &mut self.triggered_hazard))
    }

    /// Every safe cell revealed and no hazard revealed, markers are not
    /// required.
    pub fn is_won(&self) -> Result<bool> {
        let grid = self.board.truth_grid()?;
        Ok(self
            .visibility
            .iter()
            .zip(grid.cells().iter())
            .all(|(visibility, fact)| fact.is_hazard() != visibility.is_revealed()))
    }
}

/// Reveals `start` and floods outward through zero-count cells.
///
/// Marked cells are never entered, so their markers survive the flood.
fn reveal_from(
    grid: &TruthGrid,
    visibility: &mut Array2<Visibility>,
    start: Coord2,
    triggered_hazard: &mut Option<Coord2>,
) -> RevealOutcome {
    use RevealOutcome::*;

    match visibility[start.to_nd_index()] {
        Visibility::Marked => return Blocked,
        Visibility::Revealed => return Unchanged,
        Visibility::Hidden => {}
    }

    visibility[start.to_nd_index()] = Visibility::Revealed;

    let count = match grid[start] {
        CellFact::Hazard => {
            log::debug!("Hazard triggered at {:?}", start);
            if triggered_hazard.is_none() {
                *triggered_hazard = Some(start);
            }
            return HazardTriggered;
        }
        CellFact::SafeCount(count) => count,
    };
    log::debug!("Revealed cell at {:?}, hazard count: {}", start, count);

    if count == 0 {
        let mut to_visit: VecDeque<_> = grid
            .iter_neighbors(start)
            .filter(|&pos| visibility[pos.to_nd_index()] == Visibility::Hidden)
            .collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            // queued twice, or marked/opened meanwhile
            if visibility[visit_coords.to_nd_index()] != Visibility::Hidden {
                continue;
            }

            visibility[visit_coords.to_nd_index()] = Visibility::Revealed;
            log::trace!("Flood revealed cell at {:?}", visit_coords);

            // a zero never borders a hazard, so floods only reach safe cells
            if grid[visit_coords] == CellFact::SafeCount(0) {
                to_visit.extend(
                    grid.iter_neighbors(visit_coords)
                        .filter(|&pos| visibility[pos.to_nd_index()] == Visibility::Hidden),
                );
            }
        }
    }

    Revealed
}
