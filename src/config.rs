use crate::error::ChessError;
use crate::game::Game;
use crate::store::{RoomName, StoreConfig};
use std::path::PathBuf;

pub const STORE_DIR_ENV: &str = "CHESS_STORE_DIR";

/// Settings of one interactive session, assembled from the command line.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub room: RoomName,
    pub store: StoreConfig,
    /// Keep the session in memory only.
    pub ephemeral: bool,
    /// Starting position for rooms without a stored game.
    pub fen: Option<String>,
}

impl AppConfig {
    pub fn new(room: RoomName, store_dir: Option<PathBuf>) -> Self {
        Self {
            room,
            store: store_dir.map(|directory| StoreConfig { directory }).unwrap_or_default(),
            ephemeral: false,
            fen: None,
        }
    }

    pub fn initial_game(&self) -> Result<Game, ChessError> {
        match &self.fen {
            Some(fen) => Game::from_fen(fen),
            None => Ok(Game::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::Color;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.room.as_str(), "default");
        assert_eq!(config.store.directory, PathBuf::from("rooms"));
        assert_eq!(config.initial_game().unwrap().board(), Game::new().board());
    }

    #[test]
    fn test_store_dir_and_fen() {
        let mut config = AppConfig::new(RoomName::new("x").unwrap(), Some(PathBuf::from("/tmp/chess")));
        assert_eq!(config.store.directory, PathBuf::from("/tmp/chess"));

        config.fen = Some(String::from("4k3/8/8/8/8/8/8/4K3 b"));
        assert_eq!(config.initial_game().unwrap().turn(), Color::Black);

        config.fen = Some(String::from("not a fen"));
        assert!(matches!(config.initial_game(), Err(ChessError::Parse(_))));
    }
}
