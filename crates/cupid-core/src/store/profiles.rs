use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{
    domain::{Gender, Profile, UserId},
    Result,
};

fn from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    let gender: Option<String> = row.get("gender")?;
    Ok(Profile {
        id: UserId(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        age: row.get("age")?,
        gender: gender.as_deref().and_then(Gender::parse),
        city: row.get("city")?,
    })
}

const COLUMNS: &str = "id, first_name, last_name, age, gender, city";

pub fn get(conn: &Connection, id: UserId) -> Result<Option<Profile>> {
    let profile = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM profiles WHERE id = ?1"),
            params![id.0],
            from_row,
        )
        .optional()?;
    Ok(profile)
}

/// Create a profile on first contact. Returns false if it already existed
/// (existing rows are left untouched).
pub fn create(conn: &Connection, profile: &Profile) -> Result<bool> {
    let changed = conn.execute(
        "INSERT INTO profiles (id, first_name, last_name, age, gender, city, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT (id) DO NOTHING",
        params![
            profile.id.0,
            profile.first_name,
            profile.last_name,
            profile.age,
            profile.gender.map(Gender::as_str),
            profile.city,
            Utc::now().timestamp_millis(),
        ],
    )?;
    Ok(changed > 0)
}

pub fn set_age(conn: &Connection, id: UserId, age: u16) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE profiles SET age = ?2 WHERE id = ?1",
        params![id.0, age],
    )?;
    Ok(changed > 0)
}

pub fn set_gender(conn: &Connection, id: UserId, gender: Gender) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE profiles SET gender = ?2 WHERE id = ?1",
        params![id.0, gender.as_str()],
    )?;
    Ok(changed > 0)
}

pub fn set_city(conn: &Connection, id: UserId, city: &str) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE profiles SET city = ?2 WHERE id = ?1",
        params![id.0, city],
    )?;
    Ok(changed > 0)
}

/// Demographic candidate pool: exact gender, inclusive age window, exact
/// city. Rows with unset age/gender/city never qualify.
pub fn query_candidates(
    conn: &Connection,
    requester: UserId,
    gender: Gender,
    age_min: u16,
    age_max: u16,
    city: &str,
) -> Result<Vec<Profile>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM profiles
         WHERE id != ?1
           AND gender = ?2
           AND age BETWEEN ?3 AND ?4
           AND city = ?5
         ORDER BY id"
    ))?;
    let rows = stmt.query_map(
        params![requester.0, gender.as_str(), age_min, age_max, city],
        from_row,
    )?;
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

    fn profile(id: i64, age: u16, gender: Gender, city: &str) -> Profile {
        Profile {
            id: UserId(id),
            first_name: format!("user{id}"),
            last_name: String::new(),
            age: Some(age),
            gender: Some(gender),
            city: Some(city.to_string()),
        }
    }

    #[test]
    fn create_then_get_round_trips() {
        let conn = schema::test_conn();
        let p = profile(7, 30, Gender::Female, "Springfield");
        assert!(create(&conn, &p).unwrap());
        assert_eq!(get(&conn, UserId(7)).unwrap(), Some(p));
        assert_eq!(get(&conn, UserId(8)).unwrap(), None);
    }

    #[test]
    fn create_is_first_write_wins() {
        let conn = schema::test_conn();
        let p = profile(7, 30, Gender::Female, "Springfield");
        assert!(create(&conn, &p).unwrap());
        let mut again = p.clone();
        again.age = Some(99);
        assert!(!create(&conn, &again).unwrap());
        assert_eq!(get(&conn, UserId(7)).unwrap().unwrap().age, Some(30));
    }

    #[test]
    fn field_updates_apply() {
        let conn = schema::test_conn();
        create(
            &conn,
            &Profile {
                id: UserId(1),
                first_name: "Ann".to_string(),
                last_name: String::new(),
                age: None,
                gender: None,
                city: None,
            },
        )
        .unwrap();

        assert!(set_age(&conn, UserId(1), 30).unwrap());
        assert!(set_gender(&conn, UserId(1), Gender::Male).unwrap());
        assert!(set_city(&conn, UserId(1), "Springfield").unwrap());
        // No such profile: reported, not silently ignored.
        assert!(!set_age(&conn, UserId(2), 30).unwrap());

        let p = get(&conn, UserId(1)).unwrap().unwrap();
        assert_eq!(p.age, Some(30));
        assert_eq!(p.gender, Some(Gender::Male));
        assert_eq!(p.city.as_deref(), Some("Springfield"));
    }

    #[test]
    fn candidate_query_applies_all_filters() {
        let conn = schema::test_conn();
        create(&conn, &profile(1, 30, Gender::Male, "Springfield")).unwrap();
        create(&conn, &profile(2, 28, Gender::Female, "Springfield")).unwrap();
        create(&conn, &profile(3, 50, Gender::Female, "Springfield")).unwrap();
        create(&conn, &profile(4, 28, Gender::Female, "Shelbyville")).unwrap();
        create(&conn, &profile(5, 28, Gender::Male, "Springfield")).unwrap();

        let pool =
            query_candidates(&conn, UserId(1), Gender::Female, 25, 35, "Springfield").unwrap();
        assert_eq!(
            pool.iter().map(|p| p.id.0).collect::<Vec<_>>(),
            vec![2],
            "age 50 (out of window), other city, and same gender are excluded"
        );
    }

    #[test]
    fn candidate_query_skips_incomplete_profiles() {
        let conn = schema::test_conn();
        let mut p = profile(2, 28, Gender::Female, "Springfield");
        p.age = None;
        create(&conn, &p).unwrap();

        let pool =
            query_candidates(&conn, UserId(1), Gender::Female, 25, 35, "Springfield").unwrap();
        assert!(pool.is_empty());
    }
}
