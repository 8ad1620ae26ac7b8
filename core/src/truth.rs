use core::fmt;
use core::ops::Index;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// The hidden layout of a board: where the hazards are and what every safe
/// cell counts.
///
/// Counts are derived from the hazard layout by [`TruthGrid::compute`];
/// hazards themselves only move during generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Array2<CellFact>", into = "Array2<CellFact>")]
pub struct TruthGrid {
    cells: Array2<CellFact>,
    hazard_count: CellCount,
}

impl TruthGrid {
    /// A board of `size` with no hazards, every cell counting zero.
    pub fn empty(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            hazard_count: 0,
        }
    }

    pub fn from_hazard_mask(hazard_mask: &Array2<bool>) -> Result<Self> {
        let cells = hazard_mask.map(|&is_hazard| {
            if is_hazard {
                CellFact::Hazard
            } else {
                CellFact::SafeCount(0)
            }
        });
        let mut grid = Self::try_from(cells)?;
        grid.compute();
        Ok(grid)
    }

    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in hazard_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            hazard_mask[coords.to_nd_index()] = true;
        }

        Self::from_hazard_mask(&hazard_mask)
    }

    /// Sets every non-hazard cell to the number of hazards among its
    /// neighbors. Hazard cells are left untouched.
    pub fn compute(&mut self) {
        let (rows, columns) = self.size();
        for row in 0..rows {
            for col in 0..columns {
                let coords = (row, col);
                if self[coords].is_hazard() {
                    continue;
                }
                let count = self.adjacent_hazard_count(coords);
                self.cells[coords.to_nd_index()] = CellFact::SafeCount(count);
            }
        }
    }

    /// Whether every safe cell holds the count its neighborhood implies.
    pub fn is_consistent(&self) -> bool {
        let (rows, columns) = self.size();
        (0..rows)
            .flat_map(|row| (0..columns).map(move |col| (row, col)))
            .all(|coords| match self[coords] {
                CellFact::Hazard => true,
                CellFact::SafeCount(count) => count == self.adjacent_hazard_count(coords),
            })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns)
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazard_count)
    }

    pub fn fact_at(&self, coords: Coord2) -> Result<CellFact> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn contains_hazard(&self, coords: Coord2) -> bool {
        self[coords].is_hazard()
    }

    pub fn adjacent_hazard_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(coords)
            .filter(|&pos| self.contains_hazard(pos))
            .count() as u8
    }

    pub fn cells(&self) -> ArrayView2<'_, CellFact> {
        self.cells.view()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        neighbors(coords, self.size())
    }

    /// Turns a safe cell into a hazard. Counts are stale until the next
    /// [`TruthGrid::compute`].
    pub(crate) fn place_hazard(&mut self, coords: Coord2) {
        if !self[coords].is_hazard() {
            self.cells[coords.to_nd_index()] = CellFact::Hazard;
            self.hazard_count += 1;
        }
    }

    /// Turns a hazard into a safe cell. Counts are stale until the next
    /// [`TruthGrid::compute`].
    pub(crate) fn clear_hazard(&mut self, coords: Coord2) {
        if self[coords].is_hazard() {
            self.cells[coords.to_nd_index()] = CellFact::SafeCount(0);
            self.hazard_count -= 1;
        }
    }
}

/// Fails with `InvalidBoardShape` when either axis does not fit a `Coord`.
impl TryFrom<Array2<CellFact>> for TruthGrid {
    type Error = GameError;

    fn try_from(cells: Array2<CellFact>) -> Result<Self> {
        let (rows, columns) = cells.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(columns).is_err() {
            return Err(GameError::InvalidBoardShape);
        }
        // at most 255 * 255 cells
        let hazard_count = cells.iter().filter(|fact| fact.is_hazard()).count() as CellCount;
        Ok(Self {
            cells,
            hazard_count,
        })
    }
}

impl From<TruthGrid> for Array2<CellFact> {
    fn from(grid: TruthGrid) -> Self {
        grid.cells
    }
}

impl Index<Coord2> for TruthGrid {
    type Output = CellFact;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Solution dump: one line per row, `B` for hazards and the count otherwise.
impl fmt::Display for TruthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.rows().into_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for (col, fact) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match fact {
                    CellFact::Hazard => f.write_str("B")?,
                    CellFact::SafeCount(count) => write!(f, "{count}")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_count(grid: &TruthGrid, (row, col): Coord2) -> u8 {
        let (rows, columns) = grid.size();
        let mut count = 0;
        for r in row.saturating_sub(1)..=row.saturating_add(1).min(rows - 1) {
            for c in col.saturating_sub(1)..=col.saturating_add(1).min(columns - 1) {
                if (r, c) != (row, col) && grid[(r, c)].is_hazard() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn single_hazard_in_corner() {
        let grid = TruthGrid::from_hazard_coords((3, 3), &[(2, 2)]).unwrap();

        use CellFact::*;
        for coords in [(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)] {
            assert_eq!(grid[coords], SafeCount(0));
        }
        for coords in [(1, 1), (1, 2), (2, 1)] {
            assert_eq!(grid[coords], SafeCount(1));
        }
        assert_eq!(grid[(2, 2)], Hazard);
        assert_eq!(grid.hazard_count(), 1);
        assert_eq!(grid.safe_cell_count(), 8);
    }

    #[test]
    fn counts_match_brute_force_including_edges() {
        let hazards = [(0, 0), (0, 4), (1, 2), (3, 0), (3, 3), (4, 4), (2, 4)];
        let grid = TruthGrid::from_hazard_coords((5, 5), &hazards).unwrap();

        for row in 0..5 {
            for col in 0..5 {
                match grid[(row, col)] {
                    CellFact::Hazard => assert!(hazards.contains(&(row, col))),
                    CellFact::SafeCount(count) => {
                        assert_eq!(count, brute_force_count(&grid, (row, col)), "({row}, {col})")
                    }
                }
            }
        }
    }

    #[test]
    fn compute_is_idempotent() {
        let mut grid = TruthGrid::from_hazard_coords((4, 6), &[(1, 1), (2, 4), (3, 5)]).unwrap();
        let before = grid.clone();
        grid.compute();
        grid.compute();
        assert_eq!(grid, before);
    }

    #[test]
    fn fully_surrounded_cell_counts_eight() {
        let ring: Vec<_> = neighbors((1, 1), (3, 3)).collect();
        let grid = TruthGrid::from_hazard_coords((3, 3), &ring).unwrap();
        assert_eq!(grid[(1, 1)], CellFact::SafeCount(8));
    }

    #[test]
    fn out_of_bounds_hazard_is_rejected() {
        assert_eq!(
            TruthGrid::from_hazard_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
        let grid = TruthGrid::empty((2, 2));
        assert_eq!(grid.fact_at((0, 2)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn relocation_helpers_track_hazard_count() {
        let mut grid = TruthGrid::empty((2, 3));
        grid.place_hazard((0, 0));
        grid.place_hazard((0, 0));
        grid.place_hazard((1, 2));
        assert_eq!(grid.hazard_count(), 2);
        assert!(!grid.is_consistent());

        grid.compute();
        assert!(grid.is_consistent());

        grid.clear_hazard((0, 0));
        grid.clear_hazard((1, 1));
        assert_eq!(grid.hazard_count(), 1);
    }

    #[test]
    fn display_renders_solution_rows() {
        let grid = TruthGrid::from_hazard_coords((2, 3), &[(0, 1)]).unwrap();
        assert_eq!(grid.to_string(), "1 B 1\n1 1 1");
    }

    #[test]
    fn oversized_arrays_are_rejected() {
        let cells = Array2::from_elem((257, 3), CellFact::SafeCount(0));
        assert_eq!(TruthGrid::try_from(cells), Err(GameError::InvalidBoardShape));

        let cells = Array2::from_elem((3, 256), CellFact::SafeCount(0));
        assert_eq!(TruthGrid::try_from(cells), Err(GameError::InvalidBoardShape));

        let cells = Array2::from_elem((255, 255), CellFact::Hazard);
        let grid = TruthGrid::try_from(cells).unwrap();
        assert_eq!(grid.size(), (255, 255));
        assert_eq!(grid.hazard_count(), 65025);
        assert_eq!(grid.safe_cell_count(), 0);
    }

    #[test]
    fn oversized_payload_fails_to_deserialize() {
        let cells = Array2::from_elem((257, 3), CellFact::SafeCount(0));
        let json = serde_json::to_string(&cells).unwrap();
        assert!(serde_json::from_str::<TruthGrid>(&json).is_err());
    }

    #[test]
    fn serde_recounts_hazards() {
        let grid = TruthGrid::from_hazard_coords((3, 2), &[(0, 0), (2, 1)]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: TruthGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        assert_eq!(back.hazard_count(), 2);
    }
}
