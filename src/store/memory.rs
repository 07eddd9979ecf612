use super::{RoomName, SessionRecord, SessionStore, StoreError};
use crate::chess_board::{ChessField, Color, Piece};
use std::collections::HashMap;

/// Keeps sessions in process memory only. Used for ephemeral play and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: HashMap<RoomName, SessionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, room: &RoomName) -> bool {
        self.rooms.contains_key(room)
    }
}

impl SessionStore for MemoryStore {
    fn load_board(&self, room: &RoomName) -> Result<Option<Vec<(ChessField, Piece)>>, StoreError> {
        match self.rooms.get(room) {
            Some(record) => {
                record.verify(room)?;
                Ok(Some(record.snapshot()))
            }
            None => Ok(None),
        }
    }

    fn load_turn(&self, room: &RoomName) -> Result<Option<Color>, StoreError> {
        Ok(self.rooms.get(room).map(|record| record.turn))
    }

    fn save_board(&mut self, room: &RoomName, snapshot: &[(ChessField, Piece)]) -> Result<(), StoreError> {
        self.rooms
            .entry(room.clone())
            .or_insert_with(SessionRecord::new)
            .set_pieces(snapshot);
        Ok(())
    }

    fn save_turn(&mut self, room: &RoomName, color: Color) -> Result<(), StoreError> {
        self.rooms
            .entry(room.clone())
            .or_insert_with(SessionRecord::new)
            .set_turn(color);
        Ok(())
    }

    fn save_session(&mut self, room: &RoomName, snapshot: &[(ChessField, Piece)], turn: Color) -> Result<(), StoreError> {
        let mut record = SessionRecord::new();
        record.set_session(snapshot, turn);
        self.rooms.insert(room.clone(), record);
        Ok(())
    }

    fn delete_session(&mut self, room: &RoomName) -> Result<(), StoreError> {
        self.rooms.remove(room);
        Ok(())
    }
}
