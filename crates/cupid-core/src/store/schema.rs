use rusqlite::Connection;

use crate::Result;

/// Idempotent schema. The `matches` table deliberately has no composite
/// uniqueness on (requester_id, candidate_id); the resolver checks before
/// insert and owns that invariant.
const DDL: &str = "
CREATE TABLE IF NOT EXISTS profiles (
    id          INTEGER PRIMARY KEY,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL DEFAULT '',
    age         INTEGER,
    gender      TEXT,
    city        TEXT,
    created_at  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS interests (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS user_interests (
    user_id      INTEGER NOT NULL,
    interest_id  INTEGER NOT NULL,
    PRIMARY KEY (user_id, interest_id)
);

CREATE TABLE IF NOT EXISTS exclusions (
    kind       TEXT NOT NULL,
    owner_id   INTEGER NOT NULL,
    target_id  INTEGER NOT NULL,
    PRIMARY KEY (kind, owner_id, target_id)
);

CREATE TABLE IF NOT EXISTS photos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL,
    url         TEXT NOT NULL,
    likes       INTEGER NOT NULL DEFAULT 0,
    is_profile  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS matches (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    requester_id   INTEGER NOT NULL,
    candidate_id   INTEGER NOT NULL,
    discovered_at  INTEGER NOT NULL,
    shown          INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_matches_cursor
    ON matches (requester_id, shown, discovered_at, id);
";

pub fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    conn.execute_batch(DDL)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init(&conn).unwrap();
    conn
}
