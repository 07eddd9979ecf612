use super::{RoomName, SessionRecord, SessionStore, StoreConfig, StoreError};
use crate::chess_board::{ChessField, Color, Piece};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// One pretty-printed JSON file per room under the configured directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.directory).map_err(|source| StoreError::Io {
            path: config.directory.display().to_string(),
            source,
        })?;
        Ok(Self {
            directory: config.directory.clone(),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_of(&self, room: &RoomName) -> PathBuf {
        self.directory.join(format!("{}.json", room))
    }

    fn read_record(&self, room: &RoomName) -> Result<Option<SessionRecord>, StoreError> {
        let path = self.path_of(room);
        if !path.exists() {
            return Ok(None);
        }
        let f = fs::File::open(&path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let record = serde_json::from_reader(BufReader::new(f)).map_err(|source| StoreError::Serde {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Read session file {}", path.display());
        Ok(Some(record))
    }

    /// Writes next to the target and renames, so a crash never leaves half a file behind.
    fn write_record(&self, room: &RoomName, record: &SessionRecord) -> Result<(), StoreError> {
        let path = self.path_of(room);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            path: tmp.display().to_string(),
            source,
        };

        let f = fs::File::create(&tmp).map_err(io_err)?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, record).map_err(|source| StoreError::Serde {
            path: tmp.display().to_string(),
            source,
        })?;
        w.flush().map_err(io_err)?;
        drop(w);

        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Wrote session file {}", path.display());
        Ok(())
    }

    fn update<F: FnOnce(&mut SessionRecord)>(&self, room: &RoomName, apply: F) -> Result<(), StoreError> {
        let mut record = self.read_record(room)?.unwrap_or_else(SessionRecord::new);
        apply(&mut record);
        self.write_record(room, &record)
    }
}

impl SessionStore for JsonFileStore {
    fn load_board(&self, room: &RoomName) -> Result<Option<Vec<(ChessField, Piece)>>, StoreError> {
        match self.read_record(room)? {
            Some(record) => {
                record.verify(room)?;
                Ok(Some(record.snapshot()))
            }
            None => Ok(None),
        }
    }

    fn load_turn(&self, room: &RoomName) -> Result<Option<Color>, StoreError> {
        Ok(self.read_record(room)?.map(|record| record.turn))
    }

    fn save_board(&mut self, room: &RoomName, snapshot: &[(ChessField, Piece)]) -> Result<(), StoreError> {
        self.update(room, |record| record.set_pieces(snapshot))
    }

    fn save_turn(&mut self, room: &RoomName, color: Color) -> Result<(), StoreError> {
        self.update(room, |record| record.set_turn(color))
    }

    fn save_session(&mut self, room: &RoomName, snapshot: &[(ChessField, Piece)], turn: Color) -> Result<(), StoreError> {
        let mut record = SessionRecord::new();
        record.set_session(snapshot, turn);
        self.write_record(room, &record)
    }

    fn delete_session(&mut self, room: &RoomName) -> Result<(), StoreError> {
        let path = self.path_of(room);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("Deleted session file {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
