use ndarray::Array2;

/// Single coordinate axis, used for row/column indices and board dimensions.
pub type Coord = u8;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Size of an `Array2` as board coordinates.
///
/// Callers must only pass grids whose axes were checked to fit a `Coord`.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, columns) = grid.dim();
    (rows as Coord, columns as Coord)
}

/// Whether `coords` lies within a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Up to eight neighbors of `center`, clipped to the board edges.
pub fn neighbors(center: Coord2, size: Coord2) -> Neighbors {
    Neighbors {
        center,
        size,
        next: 0,
    }
}

#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    size: Coord2,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&(d_row, d_col)) = OFFSETS.get(self.next) {
            self.next += 1;
            let row = self.center.0.checked_add_signed(d_row);
            let col = self.center.1.checked_add_signed(d_col);
            if let (Some(row), Some(col)) = (row, col) {
                if in_bounds((row, col), self.size) {
                    return Some((row, col));
                }
            }
        }
        None
    }
}
