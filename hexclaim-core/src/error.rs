//! Error types for game construction and turn processing

use crate::player::Color;

/// Fatal game errors.
///
/// Soft no-ops (input out of turn, zero-weight captures) are never reported here.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("unknown spawn mode: {0:?} (expected \"fair\" or \"random\")")]
    UnknownSpawnMode(String),

    #[error("unknown color: {0:?}")]
    UnknownColor(String),

    #[error("no free colors left in the palette")]
    PaletteExhausted,

    #[error("no tiles available")]
    NoTilesAvailable,

    #[error("automated player {player} has no selectable direction")]
    NoSelectableDirection { player: Color },
}

pub type Result<T> = std::result::Result<T, GameError>;
