//! Contact records and their person links

use super::models::{Contact, NewContact};
use crate::phone::normalize_or_keep;
use crate::{Error, Result};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

#[derive(sqlx::FromRow)]
struct LinkedContact {
    person_id: i64,
    #[sqlx(flatten)]
    contact: Contact,
}

fn clean_email(email: Option<&str>) -> Option<&str> {
    email.map(str::trim).filter(|e| !e.is_empty())
}

/// Create a contact and link it to `person_id`
///
/// The phone number is stored in international form when it parses, as
/// entered otherwise. A blank email is stored as NULL.
pub async fn insert_for_person(
    conn: &mut SqliteConnection,
    person_id: i64,
    new: &NewContact,
) -> Result<Contact> {
    let now = crate::time::now();
    let email = clean_email(new.email.as_deref());

    let contact = sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts (name, phone_number, email, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new.name.trim())
    .bind(normalize_or_keep(&new.phone_number))
    .bind(email)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("INSERT INTO person_contacts (person_id, contact_id) VALUES (?, ?)")
        .bind(person_id)
        .bind(contact.id)
        .execute(&mut *conn)
        .await?;

    Ok(contact)
}

/// Staff edit of an existing contact, normalised the same way as on insert
pub async fn update(pool: &SqlitePool, id: i64, changes: &NewContact) -> Result<Contact> {
    let email = clean_email(changes.email.as_deref());

    let contact = sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts SET name = ?, phone_number = ?, email = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(changes.name.trim())
    .bind(normalize_or_keep(&changes.phone_number))
    .bind(email)
    .bind(crate::time::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    contact.ok_or_else(|| Error::NotFound(format!("contact {id}")))
}

/// Contacts linked to each of `person_ids`, in creation order
pub async fn for_persons(
    pool: &SqlitePool,
    person_ids: &[i64],
) -> Result<HashMap<i64, Vec<Contact>>> {
    let mut grouped: HashMap<i64, Vec<Contact>> = HashMap::new();
    if person_ids.is_empty() {
        return Ok(grouped);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT pc.person_id, c.* FROM contacts c \
         JOIN person_contacts pc ON pc.contact_id = c.id \
         WHERE pc.person_id IN (",
    );
    let mut ids = qb.separated(", ");
    for id in person_ids {
        ids.push_bind(*id);
    }
    qb.push(") ORDER BY c.id");

    let rows = qb.build_query_as::<LinkedContact>().fetch_all(pool).await?;
    for row in rows {
        grouped.entry(row.person_id).or_default().push(row.contact);
    }

    Ok(grouped)
}
