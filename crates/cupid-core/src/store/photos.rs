use rusqlite::{params, Connection};

use crate::{
    domain::{Photo, UserId},
    Result,
};

pub fn add(conn: &Connection, photo: &Photo) -> Result<()> {
    conn.execute(
        "INSERT INTO photos (user_id, url, likes, is_profile) VALUES (?1, ?2, ?3, ?4)",
        params![photo.user_id.0, photo.url, photo.likes, photo.is_profile],
    )?;
    Ok(())
}

/// Most-liked photos first; id ascending breaks ties deterministically.
pub fn top_for_user(conn: &Connection, user: UserId, limit: usize) -> Result<Vec<Photo>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, url, likes, is_profile FROM photos
         WHERE user_id = ?1
         ORDER BY likes DESC, id ASC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![user.0, limit], |row| {
        Ok(Photo {
            user_id: UserId(row.get(0)?),
            url: row.get(1)?,
            likes: row.get(2)?,
            is_profile: row.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema;

    fn photo(user: i64, url: &str, likes: i64) -> Photo {
        Photo {
            user_id: UserId(user),
            url: url.to_string(),
            likes,
            is_profile: false,
        }
    }

    #[test]
    fn top_returns_most_liked_first() {
        let conn = schema::test_conn();
        add(&conn, &photo(1, "a", 3)).unwrap();
        add(&conn, &photo(1, "b", 9)).unwrap();
        add(&conn, &photo(1, "c", 5)).unwrap();
        add(&conn, &photo(2, "other", 100)).unwrap();

        let top = top_for_user(&conn, UserId(1), 2).unwrap();
        assert_eq!(
            top.iter().map(|p| p.url.as_str()).collect::<Vec<_>>(),
            vec!["b", "c"]
        );
        assert!(top_for_user(&conn, UserId(3), 3).unwrap().is_empty());
    }
}
