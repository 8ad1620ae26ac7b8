//! Data handed between the engine and the collaborators around it: saved
//! boards for replaying a layout, and score submissions for the external
//! leaderboard.

use demineur_core::{Coord2, Difficulty, Engine, GameConfig, GameError, TruthGrid};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, ProtocolError>;

/// A generated layout, enough to start the same board again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedBoard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub config: GameConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_move: Option<Coord2>,
    pub grid: TruthGrid,
}

impl SavedBoard {
    pub fn from_engine(engine: &Engine, difficulty: Option<Difficulty>) -> Result<Self> {
        let grid = engine.export_truth_grid()?.clone();
        Ok(Self {
            difficulty,
            config: engine.config(),
            first_move: engine.first_move(),
            grid,
        })
    }

    /// Fresh game on the saved layout, every cell hidden.
    pub fn into_engine(self) -> Result<Engine> {
        let mut engine = Engine::new(self.config)?;
        engine.load_truth_grid(self.grid)?;
        log::debug!(
            "Restored saved board {:?}, first move was {:?}",
            self.config.size,
            self.first_move
        );
        Ok(engine)
    }
}

/// A finished, won game as filed with the score store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub player_name: String,
    pub elapsed_secs: u32,
    pub difficulty: Difficulty,
    /// Leaderboard the score is filed under, one per difficulty.
    pub grid_id: String,
}

impl ScoreSubmission {
    pub fn new(player_name: &str, elapsed_secs: u32, difficulty: Difficulty) -> Self {
        let player_name = match player_name.trim() {
            "" => DEFAULT_PLAYER_NAME,
            name => name,
        };
        Self {
            player_name: player_name.to_owned(),
            elapsed_secs,
            difficulty,
            grid_id: grid_id(difficulty),
        }
    }

    /// Only won games are filed.
    pub fn for_engine(
        engine: &Engine,
        player_name: &str,
        elapsed_secs: u32,
        difficulty: Difficulty,
    ) -> Result<Option<Self>> {
        Ok(engine
            .is_won()?
            .then(|| Self::new(player_name, elapsed_secs, difficulty)))
    }
}

pub fn grid_id(difficulty: Difficulty) -> String {
    format!("{}_grid", difficulty.label())
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T> {
    Ok(serde_json::from_str(payload)?)
}
