use std::path::Path;

use log::debug;
use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    config::StorageConfig,
    storage::{
        KeyValueStore,
        error::StorageError,
        schema::{self, columns::*, tables::*},
    },
};

fn open_in_memory() -> Result<rusqlite::Connection, rusqlite::Error> {
    Connection::open_in_memory()
}

fn open_from_file(path: &Path) -> Result<rusqlite::Connection, StorageError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(Connection::open(path)?)
}

pub fn open(config: &StorageConfig) -> Result<rusqlite::Connection, StorageError> {
    let db = if config.in_memory {
        open_in_memory()?
    } else {
        let path = config.path.as_deref().ok_or(StorageError::MissingPath)?;
        debug!("opening storage at {}", path.display());
        open_from_file(path)?
    };
    schema::init(&db)?;
    Ok(db)
}

/// Slot store backed by a single SQLite table.
pub struct SqliteStore {
    pub(crate) db: rusqlite::Connection,
}

impl SqliteStore {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        Ok(Self::from_existing_conn(open(config)?))
    }

    pub fn from_existing_conn(db: rusqlite::Connection) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .query_row(
                &format!("SELECT {VALUE} FROM {SLOTS} WHERE {KEY} = ?1"),
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.execute(
            &format!(
                "INSERT INTO {SLOTS} ({KEY}, {VALUE}) VALUES (?1, ?2)
                 ON CONFLICT({KEY}) DO UPDATE SET {VALUE} = excluded.{VALUE}"
            ),
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::{
        config::StorageConfig,
        storage::{
            KeyValueStore,
            db::{SqliteStore, open},
            error::StorageError,
            schema,
        },
    };

    fn in_memory() -> StorageConfig {
        StorageConfig {
            in_memory: true,
            path: None,
        }
    }

    #[test]
    fn open_in_memory_db_initializes_schema() {
        let db = open(&in_memory()).unwrap();

        let mut stmt = db
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();

        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        for table in schema::tables::ALL_TABLES {
            assert!(tables.contains(&table.to_string()));
        }
    }

    #[test]
    fn open_on_disk_without_path_fails() {
        let config = StorageConfig {
            in_memory: false,
            path: None,
        };

        let err = open(&config).unwrap_err();
        assert!(matches!(err, StorageError::MissingPath));
    }

    #[test]
    fn read_absent_slot() -> anyhow::Result<()> {
        let store = SqliteStore::new(&in_memory())?;
        assert_eq!(store.read("songs")?, None);
        Ok(())
    }

    #[test]
    fn write_overwrites_slot() -> anyhow::Result<()> {
        let mut store = SqliteStore::new(&in_memory())?;

        store.write("songs", "[]")?;
        store.write("songs", r#"[{"id":1}]"#)?;

        assert_eq!(store.read("songs")?.as_deref(), Some(r#"[{"id":1}]"#));

        let rows: i64 = store
            .db
            .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))?;
        assert_eq!(rows, 1);

        Ok(())
    }

    #[test]
    fn slots_survive_reopen() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path: PathBuf = dir.path().join("nested").join("favdeck.db");
        let config = StorageConfig {
            in_memory: false,
            path: Some(path.clone()),
        };

        {
            let mut store = SqliteStore::new(&config)?;
            store.write("songs", "[]")?;
        }

        let store = SqliteStore::new(&config)?;
        assert_eq!(store.read("songs")?.as_deref(), Some("[]"));
        assert!(path.exists());

        Ok(())
    }
}
