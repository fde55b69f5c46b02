//! Read-only reporting queries behind the staff dashboard

use super::models::{Gender, Status};
use crate::Result;
use sqlx::SqlitePool;

pub async fn total_count(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Record count per status; statuses with no records are omitted
pub async fn status_counts(pool: &SqlitePool) -> Result<Vec<(Status, i64)>> {
    let rows: Vec<(Status, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM persons GROUP BY status")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

/// Record count per gender, most common first
pub async fn gender_counts(pool: &SqlitePool) -> Result<Vec<(Gender, i64)>> {
    let rows: Vec<(Gender, i64)> = sqlx::query_as(
        "SELECT gender, COUNT(*) AS n FROM persons GROUP BY gender ORDER BY n DESC, gender",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// County with the most records, ignoring records without a county
pub async fn top_county(pool: &SqlitePool) -> Result<Option<(String, i64)>> {
    let row: Option<(String, i64)> = sqlx::query_as(
        r#"
        SELECT county, COUNT(*) AS n FROM persons
        WHERE county <> ''
        GROUP BY county
        ORDER BY n DESC, county
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// All recorded ages, ascending
pub async fn known_ages(pool: &SqlitePool) -> Result<Vec<i64>> {
    let ages: Vec<i64> =
        sqlx::query_scalar("SELECT age FROM persons WHERE age IS NOT NULL ORDER BY age")
            .fetch_all(pool)
            .await?;
    Ok(ages)
}
