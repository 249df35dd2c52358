use rusqlite::Connection;

pub mod tables {
    pub const SLOTS: &str = "slots";

    pub const ALL_TABLES: &[&str] = &[SLOTS];
}

pub mod columns {
    pub const KEY: &str = "key";
    pub const VALUE: &str = "value";
}

pub use columns::*;
pub use tables::*;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS slots (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

pub fn init(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA)
}
