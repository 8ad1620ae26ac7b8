use super::*;

/// Generation strategy that places hazards uniformly at random, then moves
/// any hazard touching the first reveal elsewhere so the opening cell counts
/// zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig, first: Coord2) -> TruthGrid {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut grid = TruthGrid::empty(config.size);
        let total_cells = config.total_cells();

        let mut hazards = config.hazards;
        if hazards >= total_cells {
            log::warn!(
                "Board cannot fit {} hazards and a safe start, placing {} instead",
                hazards,
                total_cells.saturating_sub(1)
            );
            hazards = total_cells.saturating_sub(1);
        }

        let opening: Vec<Coord2> = neighbors(first, config.size).collect();
        let zero_opening = usize::from(hazards) + 1 + opening.len() <= usize::from(total_cells);
        if !zero_opening {
            log::warn!("Cannot make start cell zero, fallback to simple safe");
        }

        log::debug!(
            "Generating {:?} board with {} hazards, seed {}, first reveal at {:?}",
            config.size,
            hazards,
            self.seed,
            first
        );

        let mut random_cell =
            || -> Coord2 { (rng.random_range(0..config.size.0), rng.random_range(0..config.size.1)) };

        // rejection sampling, anything but the start cell
        while grid.hazard_count() < hazards {
            let coords = random_cell();
            if coords != first && !grid.contains_hazard(coords) {
                grid.place_hazard(coords);
            }
        }
        grid.compute();

        // move hazards out of the opening; replacements are drawn outside of
        // it so one pass is enough
        let mut relocated = 0;
        while zero_opening && grid[first] != CellFact::SafeCount(0) {
            for &pos in &opening {
                if !grid.contains_hazard(pos) {
                    continue;
                }
                grid.clear_hazard(pos);
                loop {
                    let coords = random_cell();
                    if coords != first
                        && !opening.contains(&coords)
                        && !grid.contains_hazard(coords)
                    {
                        grid.place_hazard(coords);
                        break;
                    }
                }
                relocated += 1;
            }
            grid.compute();
        }

        log::debug!(
            "Generated board with {} hazards, {} relocated from the opening",
            grid.hazard_count(),
            relocated
        );
        log::trace!("Solution:\n{}", grid);
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord2, hazards: CellCount, first: Coord2, seed: u64) -> TruthGrid {
        RandomBoardGenerator::new(seed).generate(GameConfig::new_unchecked(size, hazards), first)
    }

    #[test]
    fn opening_is_zero_and_count_is_exact() {
        for seed in 0..200 {
            let first = ((seed % 9) as Coord, (seed % 7) as Coord);
            let grid = generate((9, 9), 10, first, seed);
            assert_eq!(grid[first], CellFact::SafeCount(0), "seed {seed}");
            assert_eq!(grid.hazard_count(), 10, "seed {seed}");
            assert!(grid.is_consistent());
        }
    }

    #[test]
    fn densest_board_that_still_allows_zero_opening() {
        // corner start leaves 4 cells that must stay clear
        for seed in 0..50 {
            let grid = generate((4, 4), 12, (0, 0), seed);
            assert_eq!(grid[(0, 0)], CellFact::SafeCount(0));
            assert_eq!(grid.hazard_count(), 12);
        }
    }

    #[test]
    fn too_dense_falls_back_to_safe_start() {
        for seed in 0..50 {
            let grid = generate((3, 3), 8, (1, 1), seed);
            assert_eq!(grid[(1, 1)], CellFact::SafeCount(8));
            assert_eq!(grid.hazard_count(), 8);
        }
    }

    #[test]
    fn overfull_config_is_clamped() {
        let grid = generate((2, 2), 10, (0, 0), 7);
        assert_eq!(grid.hazard_count(), 3);
        assert!(!grid.contains_hazard((0, 0)));
    }

    #[test]
    fn same_seed_same_board() {
        let a = generate((16, 16), 40, (5, 5), 42);
        let b = generate((16, 16), 40, (5, 5), 42);
        assert_eq!(a, b);
    }
}
