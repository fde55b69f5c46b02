//! Person records
//!
//! Slugs are derived from the name on insert and never rewritten, so public
//! links stay valid across staff edits.

use super::contacts;
use super::escape_like;
use super::models::{NewPerson, Person, PersonUpdate, PersonWithRelations, SearchFilter, Status};
use super::photos;
use crate::pagination::{calculate_pagination, Pagination};
use crate::slug::{slugify, with_suffix};
use crate::{Error, Result};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashSet;

/// Columns covered by the free-text search
const SEARCH_COLUMNS: [&str; 6] = [
    "name",
    "last_seen_location",
    "description",
    "county",
    "sub_county",
    "ward",
];

/// Insert a new person with status `missing` and a fresh unique slug
///
/// Takes a connection so the insert can join a caller's transaction.
pub async fn insert(conn: &mut SqliteConnection, new: &NewPerson) -> Result<Person> {
    let slug = unique_slug(conn, &new.name).await?;
    let now = crate::time::now();

    let person = sqlx::query_as::<_, Person>(
        r#"
        INSERT INTO persons (
            slug, name, gender, age, last_seen_location, description,
            county, sub_county, ward, status, date_found, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&slug)
    .bind(&new.name)
    .bind(new.gender)
    .bind(new.age)
    .bind(&new.last_seen_location)
    .bind(&new.description)
    .bind(&new.county)
    .bind(&new.sub_county)
    .bind(&new.ward)
    .bind(Status::Missing)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    Ok(person)
}

/// First free slug among `stem`, `stem-2`, `stem-3`, ...
async fn unique_slug(conn: &mut SqliteConnection, name: &str) -> Result<String> {
    let stem = slugify(name);
    let pattern = format!("{}-%", escape_like(&stem));

    let taken: HashSet<String> = sqlx::query_scalar::<_, String>(
        "SELECT slug FROM persons WHERE slug = ? OR slug LIKE ? ESCAPE '\\'",
    )
    .bind(&stem)
    .bind(&pattern)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .collect();

    let mut n = 1;
    loop {
        let candidate = with_suffix(&stem, n);
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
        n += 1;
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(person)
}

pub async fn get_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(person)
}

/// Attach contacts and photos to a page of persons
///
/// One query per relation regardless of page length.
pub async fn with_relations(
    pool: &SqlitePool,
    persons: Vec<Person>,
) -> Result<Vec<PersonWithRelations>> {
    let ids: Vec<i64> = persons.iter().map(|p| p.id).collect();
    let mut contacts_by_person = contacts::for_persons(pool, &ids).await?;
    let mut photos_by_person = photos::for_persons(pool, &ids).await?;

    Ok(persons
        .into_iter()
        .map(|person| PersonWithRelations {
            contacts: contacts_by_person.remove(&person.id).unwrap_or_default(),
            photos: photos_by_person.remove(&person.id).unwrap_or_default(),
            person,
        })
        .collect())
}

/// Newest `limit` persons still missing
pub async fn latest_missing(pool: &SqlitePool, limit: i64) -> Result<Vec<Person>> {
    let persons = sqlx::query_as::<_, Person>(
        "SELECT * FROM persons WHERE status = ? ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(Status::Missing)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(persons)
}

fn push_search_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &SearchFilter) {
    qb.push(" WHERE status = ");
    qb.push_bind(Status::Missing);

    if let Some(query) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
        qb.push(" AND (");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(format!("LOWER({column}) LIKE "));
            qb.push_bind(pattern.clone());
            qb.push(" ESCAPE '\\'");
        }
        qb.push(")");
    }

    if let Some(gender) = filter.gender.as_deref().filter(|g| !g.is_empty()) {
        qb.push(" AND gender = ");
        qb.push_bind(gender.to_string());
    }

    if let Some(age_min) = filter.age_min {
        qb.push(" AND age >= ");
        qb.push_bind(age_min);
    }

    if let Some(age_max) = filter.age_max {
        qb.push(" AND age <= ");
        qb.push_bind(age_max);
    }
}

/// Filtered, paginated listing of missing persons, newest first
pub async fn search_missing(
    pool: &SqlitePool,
    filter: &SearchFilter,
    page: i64,
    page_size: i64,
) -> Result<(Vec<Person>, Pagination)> {
    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM persons");
    push_search_filters(&mut count_qb, filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let pagination = calculate_pagination(total, page, page_size);

    let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM persons");
    push_search_filters(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ");
    qb.push_bind(pagination.page_size);
    qb.push(" OFFSET ");
    qb.push_bind(pagination.offset);

    let persons = qb.build_query_as::<Person>().fetch_all(pool).await?;

    Ok((persons, pagination))
}

/// Every record regardless of status, newest first
pub async fn list_all(
    pool: &SqlitePool,
    page: i64,
    page_size: i64,
) -> Result<(Vec<Person>, Pagination)> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
        .fetch_one(pool)
        .await?;

    let pagination = calculate_pagination(total, page, page_size);

    let persons = sqlx::query_as::<_, Person>(
        "SELECT * FROM persons ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(pagination.page_size)
    .bind(pagination.offset)
    .fetch_all(pool)
    .await?;

    Ok((persons, pagination))
}

/// Apply a staff edit; the slug is left untouched
pub async fn update(pool: &SqlitePool, id: i64, changes: &PersonUpdate) -> Result<Person> {
    let person = sqlx::query_as::<_, Person>(
        r#"
        UPDATE persons SET
            name = ?, gender = ?, age = ?, last_seen_location = ?, description = ?,
            county = ?, sub_county = ?, ward = ?, status = ?, date_found = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&changes.name)
    .bind(changes.gender)
    .bind(changes.age)
    .bind(&changes.last_seen_location)
    .bind(&changes.description)
    .bind(&changes.county)
    .bind(&changes.sub_county)
    .bind(&changes.ward)
    .bind(changes.status)
    .bind(changes.date_found)
    .bind(crate::time::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    person.ok_or_else(|| Error::NotFound(format!("person {id}")))
}
