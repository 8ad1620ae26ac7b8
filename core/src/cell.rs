use serde::{Deserialize, Serialize};

/// Ground truth for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellFact {
    Hazard,
    SafeCount(u8),
}

impl CellFact {
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Hazard)
    }
}

impl Default for CellFact {
    fn default() -> Self {
        Self::SafeCount(0)
    }
}

/// Player-facing state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Marked,
    Revealed,
}

impl Visibility {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a renderer should draw for a cell, combining visibility with the
/// fact underneath once it has been revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayCell {
    Hidden,
    Marker,
    Hazard,
    Count(u8),
}

impl DisplayCell {
    pub const fn new(visibility: Visibility, fact: CellFact) -> Self {
        match (visibility, fact) {
            (Visibility::Hidden, _) => Self::Hidden,
            (Visibility::Marked, _) => Self::Marker,
            (Visibility::Revealed, CellFact::Hazard) => Self::Hazard,
            (Visibility::Revealed, CellFact::SafeCount(count)) => Self::Count(count),
        }
    }

    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Marker)
    }
}

impl Default for DisplayCell {
    fn default() -> Self {
        Self::Hidden
    }
}
