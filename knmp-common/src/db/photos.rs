//! Photo records and their person links

use super::models::{NewPhoto, Photo};
use crate::Result;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

#[derive(sqlx::FromRow)]
struct LinkedPhoto {
    person_id: i64,
    #[sqlx(flatten)]
    photo: Photo,
}

/// Create a photo row and link it to `person_id`
pub async fn insert_for_person(
    conn: &mut SqliteConnection,
    person_id: i64,
    new: &NewPhoto,
) -> Result<Photo> {
    let now = crate::time::now();

    let photo = sqlx::query_as::<_, Photo>(
        r#"
        INSERT INTO photos (file_path, description, alt_text, is_primary, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new.file_path)
    .bind(&new.description)
    .bind(&new.alt_text)
    .bind(new.is_primary)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("INSERT INTO person_photos (person_id, photo_id) VALUES (?, ?)")
        .bind(person_id)
        .bind(photo.id)
        .execute(&mut *conn)
        .await?;

    Ok(photo)
}

/// Mark the earliest linked photo primary if none is
///
/// No-op when the person has no photos or already has a primary one.
pub async fn ensure_primary_photo(conn: &mut SqliteConnection, person_id: i64) -> Result<()> {
    let has_primary: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM photos p JOIN person_photos pp ON pp.photo_id = p.id
            WHERE pp.person_id = ? AND p.is_primary = 1
        )
        "#,
    )
    .bind(person_id)
    .fetch_one(&mut *conn)
    .await?;

    if has_primary {
        return Ok(());
    }

    sqlx::query(
        r#"
        UPDATE photos SET is_primary = 1, updated_at = ?
        WHERE id = (
            SELECT MIN(pp.photo_id) FROM person_photos pp WHERE pp.person_id = ?
        )
        "#,
    )
    .bind(crate::time::now())
    .bind(person_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Photos linked to each of `person_ids`, in upload order
pub async fn for_persons(
    pool: &SqlitePool,
    person_ids: &[i64],
) -> Result<HashMap<i64, Vec<Photo>>> {
    let mut grouped: HashMap<i64, Vec<Photo>> = HashMap::new();
    if person_ids.is_empty() {
        return Ok(grouped);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT pp.person_id, p.* FROM photos p \
         JOIN person_photos pp ON pp.photo_id = p.id \
         WHERE pp.person_id IN (",
    );
    let mut ids = qb.separated(", ");
    for id in person_ids {
        ids.push_bind(*id);
    }
    qb.push(") ORDER BY p.id");

    let rows = qb.build_query_as::<LinkedPhoto>().fetch_all(pool).await?;
    for row in rows {
        grouped.entry(row.person_id).or_default().push(row.photo);
    }

    Ok(grouped)
}
