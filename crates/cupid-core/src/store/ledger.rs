//! Match Ledger accessors.
//!
//! The ledger is the system of record for "who has been offered to whom".
//! Rows are never deleted; the pair (requester, candidate) acts as permanent
//! de-duplication memory across sessions.

use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    domain::{MatchRecord, UserId},
    Result,
};

pub fn exists(conn: &Connection, requester: UserId, candidate: UserId) -> Result<bool> {
    let present: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM matches WHERE requester_id = ?1 AND candidate_id = ?2",
            params![requester.0, candidate.0],
            |row| row.get(0),
        )
        .optional()?;
    Ok(present.is_some())
}

pub fn insert(
    conn: &Connection,
    requester: UserId,
    candidate: UserId,
    discovered_at: i64,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO matches (requester_id, candidate_id, discovered_at, shown)
         VALUES (?1, ?2, ?3, 0)",
        params![requester.0, candidate.0, discovered_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The next deliverable row: oldest `discovered_at`, id ascending as the
/// deterministic tie-break.
pub fn oldest_unshown(conn: &Connection, requester: UserId) -> Result<Option<MatchRecord>> {
    let record = conn
        .query_row(
            "SELECT id, requester_id, candidate_id, discovered_at, shown
             FROM matches
             WHERE requester_id = ?1 AND shown = 0
             ORDER BY discovered_at, id
             LIMIT 1",
            params![requester.0],
            |row| {
                Ok(MatchRecord {
                    id: row.get(0)?,
                    requester: UserId(row.get(1)?),
                    candidate: UserId(row.get(2)?),
                    discovered_at: row.get(3)?,
                    shown: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(record)
}

/// Conditional claim. Zero rows affected means another caller already took
/// the row; the cursor loops to the next one.
pub fn mark_shown(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE matches SET shown = 1 WHERE id = ?1 AND shown = 0",
        params![id],
    )?;
    Ok(changed > 0)
}

pub fn count_for(conn: &Connection, requester: UserId) -> Result<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM matches WHERE requester_id = ?1",
        params![requester.0],
        |row| row.get(0),
    )?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema;

    #[test]
    fn exists_tracks_inserts_per_requester() {
        let conn = schema::test_conn();
        insert(&conn, UserId(1), UserId(2), 100).unwrap();
        assert!(exists(&conn, UserId(1), UserId(2)).unwrap());
        assert!(!exists(&conn, UserId(2), UserId(1)).unwrap());
        assert_eq!(count_for(&conn, UserId(1)).unwrap(), 1);
    }

    #[test]
    fn oldest_unshown_orders_by_time_then_id() {
        let conn = schema::test_conn();
        let _late = insert(&conn, UserId(1), UserId(20), 200).unwrap();
        let early = insert(&conn, UserId(1), UserId(10), 100).unwrap();
        // Same timestamp as `early`; larger id loses the tie-break.
        insert(&conn, UserId(1), UserId(30), 100).unwrap();

        let row = oldest_unshown(&conn, UserId(1)).unwrap().unwrap();
        assert_eq!(row.id, early);
        assert_eq!(row.candidate, UserId(10));
    }

    #[test]
    fn mark_shown_claims_exactly_once() {
        let conn = schema::test_conn();
        let id = insert(&conn, UserId(1), UserId(2), 100).unwrap();
        assert!(mark_shown(&conn, id).unwrap());
        assert!(!mark_shown(&conn, id).unwrap(), "second claim must lose");
        assert!(oldest_unshown(&conn, UserId(1)).unwrap().is_none());
    }
}
