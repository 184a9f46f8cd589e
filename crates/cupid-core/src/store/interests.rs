use std::collections::HashSet;

use rusqlite::{params, Connection, OptionalExtension};

use crate::{domain::UserId, Result};

pub fn id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM interests WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Look up an interest by exact name, creating it if absent.
///
/// The lookup happens immediately before the insert; the UNIQUE constraint
/// on `name` is the backstop for the remaining race window.
pub fn ensure(conn: &Connection, name: &str) -> Result<i64> {
    if let Some(id) = id_by_name(conn, name)? {
        return Ok(id);
    }
    conn.execute("INSERT INTO interests (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// Attach an interest to a user. Returns false if the pair already exists.
pub fn attach(conn: &Connection, user: UserId, interest_id: i64) -> Result<bool> {
    let present: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM user_interests WHERE user_id = ?1 AND interest_id = ?2",
            params![user.0, interest_id],
            |row| row.get(0),
        )
        .optional()?;
    if present.is_some() {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO user_interests (user_id, interest_id) VALUES (?1, ?2)",
        params![user.0, interest_id],
    )?;
    Ok(true)
}

pub fn names_for_user(conn: &Connection, user: UserId) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT i.name FROM interests i
         JOIN user_interests ui ON ui.interest_id = i.id
         WHERE ui.user_id = ?1
         ORDER BY i.name",
    )?;
    let rows = stmt.query_map(params![user.0], |row| row.get(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn ids_for_user(conn: &Connection, user: UserId) -> Result<HashSet<i64>> {
    let mut stmt =
        conn.prepare("SELECT interest_id FROM user_interests WHERE user_id = ?1")?;
    let rows = stmt.query_map(params![user.0], |row| row.get(0))?;
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
    fn ensure_creates_once_and_is_stable() {
        let conn = schema::test_conn();
        let a = ensure(&conn, "hiking").unwrap();
        let b = ensure(&conn, "hiking").unwrap();
        assert_eq!(a, b);
        let c = ensure(&conn, "chess").unwrap();
        assert_ne!(a, c);
        assert_eq!(id_by_name(&conn, "hiking").unwrap(), Some(a));
        assert_eq!(id_by_name(&conn, "surfing").unwrap(), None);
    }

    #[test]
    fn attach_rejects_duplicate_pairs() {
        let conn = schema::test_conn();
        let id = ensure(&conn, "hiking").unwrap();
        assert!(attach(&conn, UserId(1), id).unwrap());
        assert!(!attach(&conn, UserId(1), id).unwrap());
        // Same interest, different user is fine.
        assert!(attach(&conn, UserId(2), id).unwrap());
    }

    #[test]
    fn user_interest_lookups() {
        let conn = schema::test_conn();
        let hiking = ensure(&conn, "hiking").unwrap();
        let chess = ensure(&conn, "chess").unwrap();
        attach(&conn, UserId(1), hiking).unwrap();
        attach(&conn, UserId(1), chess).unwrap();

        assert_eq!(
            names_for_user(&conn, UserId(1)).unwrap(),
            vec!["chess".to_string(), "hiking".to_string()]
        );
        assert_eq!(
            ids_for_user(&conn, UserId(1)).unwrap(),
            [hiking, chess].into_iter().collect()
        );
        assert!(names_for_user(&conn, UserId(2)).unwrap().is_empty());
    }
}
