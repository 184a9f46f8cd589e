use std::collections::HashSet;

use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    domain::{ExclusionKind, UserId},
    Result,
};

/// Add (owner, target) to an exclusion set. Returns false if the pair is
/// already present for that kind.
pub fn add(conn: &Connection, kind: ExclusionKind, owner: UserId, target: UserId) -> Result<bool> {
    if contains(conn, kind, owner, target)? {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO exclusions (kind, owner_id, target_id) VALUES (?1, ?2, ?3)",
        params![kind.as_str(), owner.0, target.0],
    )?;
    Ok(true)
}

pub fn contains(
    conn: &Connection,
    kind: ExclusionKind,
    owner: UserId,
    target: UserId,
) -> Result<bool> {
    let present: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM exclusions WHERE kind = ?1 AND owner_id = ?2 AND target_id = ?3",
            params![kind.as_str(), owner.0, target.0],
            |row| row.get(0),
        )
        .optional()?;
    Ok(present.is_some())
}

/// Targets in insertion order. An empty list is a valid result, distinct
/// from a store failure.
pub fn list_targets(conn: &Connection, kind: ExclusionKind, owner: UserId) -> Result<Vec<UserId>> {
    let mut stmt = conn.prepare(
        "SELECT target_id FROM exclusions
         WHERE kind = ?1 AND owner_id = ?2
         ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![kind.as_str(), owner.0], |row| row.get(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(UserId(row?));
    }
    Ok(out)
}

pub fn target_set(conn: &Connection, kind: ExclusionKind, owner: UserId) -> Result<HashSet<i64>> {
    let mut stmt =
        conn.prepare("SELECT target_id FROM exclusions WHERE kind = ?1 AND owner_id = ?2")?;
    let rows = stmt.query_map(params![kind.as_str(), owner.0], |row| row.get(0))?;
    let mut out = HashSet::new();
    for row in rows {
        out.insert(row?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema;

    #[test]
    fn add_rejects_duplicates_per_kind() {
        let conn = schema::test_conn();
        assert!(add(&conn, ExclusionKind::Favorite, UserId(1), UserId(2)).unwrap());
        assert!(!add(&conn, ExclusionKind::Favorite, UserId(1), UserId(2)).unwrap());
        // Same pair under the other kind is a separate entry.
        assert!(add(&conn, ExclusionKind::Blacklist, UserId(1), UserId(2)).unwrap());
    }

    #[test]
    fn list_preserves_insertion_order_and_kind_separation() {
        let conn = schema::test_conn();
        add(&conn, ExclusionKind::Favorite, UserId(1), UserId(30)).unwrap();
        add(&conn, ExclusionKind::Favorite, UserId(1), UserId(10)).unwrap();
        add(&conn, ExclusionKind::Blacklist, UserId(1), UserId(20)).unwrap();

        assert_eq!(
            list_targets(&conn, ExclusionKind::Favorite, UserId(1)).unwrap(),
            vec![UserId(30), UserId(10)]
        );
        assert_eq!(
            list_targets(&conn, ExclusionKind::Blacklist, UserId(1)).unwrap(),
            vec![UserId(20)]
        );
        assert!(list_targets(&conn, ExclusionKind::Blacklist, UserId(2))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn target_set_matches_contains() {
        let conn = schema::test_conn();
        add(&conn, ExclusionKind::Blacklist, UserId(1), UserId(5)).unwrap();
        assert!(contains(&conn, ExclusionKind::Blacklist, UserId(1), UserId(5)).unwrap());
        assert!(!contains(&conn, ExclusionKind::Favorite, UserId(1), UserId(5)).unwrap());
        assert_eq!(
            target_set(&conn, ExclusionKind::Blacklist, UserId(1)).unwrap(),
            [5].into_iter().collect()
        );
    }
}
