//! Save/Load functionality for persisting a game session
//!
//! Two encodings of the same [`SaveData`]: JSON, the portable save-game
//! format, and bincode for compact local snapshots. The character is stored
//! as its [`CharacterProperties`] snapshot, so the derived lifespan is
//! always recomputed on load.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use immortal_logic::character::CharacterProperties;

use crate::inventory::{Home, Inventory};
use crate::world::Unlocks;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Days elapsed since the save was created
    pub day: u32,
    /// Completed reincarnations
    pub lives: u32,
    pub character: CharacterProperties,
    pub inventory: Inventory,
    pub home: Home,
    /// Permanent unlocks, kept across lives
    pub unlocks: Unlocks,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

fn check_version(data: SaveData) -> Result<SaveData, SaveError> {
    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }
    Ok(data)
}

/// Write a save as pretty-printed JSON
pub fn write_json<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}

/// Read a JSON save, rejecting other format versions
pub fn read_json<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    check_version(serde_json::from_reader(reader)?)
}

/// Write a save as bincode
pub fn write_binary<W: Write>(writer: W, data: &SaveData) -> Result<(), SaveError> {
    bincode::serialize_into(writer, data)?;
    Ok(())
}

/// Read a bincode save, rejecting other format versions
pub fn read_binary<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    check_version(bincode::deserialize_from(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::session::GameSession;
    use immortal_logic::attributes::AttributeType;

    fn played_session() -> GameSession {
        let mut session = GameSession::new(SessionConfig {
            seed: Some(3),
            ..Default::default()
        });
        session.acquire_item("melon", 4).unwrap();
        session.acquire_item("autoFieldManual", 1).unwrap();
        session.use_item("autoFieldManual").unwrap();
        session.install_furniture("cauldron").unwrap();
        for _ in 0..30 {
            session.pass_day().unwrap();
        }
        session
            .character_mut()
            .increase_attribute(AttributeType::Spirituality, 12.0);
        session
    }

    #[test]
    fn test_json_roundtrip() {
        let session = played_session();
        let data = session.save_data();

        let mut buffer = Vec::new();
        write_json(&mut buffer, &data).expect("Save failed");
        let loaded = read_json(&buffer[..]).expect("Load failed");
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_binary_roundtrip() {
        let session = played_session();
        let data = session.save_data();

        let mut buffer = Vec::new();
        write_binary(&mut buffer, &data).expect("Save failed");
        println!("Save size: {} bytes", buffer.len());
        let loaded = read_binary(&buffer[..]).expect("Load failed");
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_version_mismatch() {
        let mut data = played_session().save_data();
        data.version = SAVE_VERSION + 1;
        let mut buffer = Vec::new();
        write_binary(&mut buffer, &data).unwrap();
        match read_binary(&buffer[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_binary_fails() {
        let data = played_session().save_data();
        let mut buffer = Vec::new();
        write_binary(&mut buffer, &data).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(matches!(read_binary(&buffer[..]), Err(SaveError::Bincode(_))));
    }

    #[test]
    fn test_garbage_json_fails() {
        assert!(matches!(
            read_json(&b"not a save"[..]),
            Err(SaveError::Json(_))
        ));
    }
}
