//! Final step: validate the draft and write it to the entity store
//!
//! The person, contacts, photos and link rows go in one transaction. Photo
//! files are copied into the media store as part of the same attempt and
//! removed again if the transaction does not commit.

use super::state::{ContactRow, DraftReport, StagedPhoto, WizardStep};
use super::WizardError;
use crate::storage::{MediaStore, PhotoStaging};
use knmp_common::db::{contacts, persons, photos, Gender, NewContact, NewPerson, NewPhoto, Person};
use knmp_common::validation::parse_age;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

pub const MISSING_BASIC_INFO: &str =
    "Please complete the required fields: name, gender, last seen location and description.";
pub const NO_VALID_CONTACT: &str =
    "Please provide at least one contact with both a name and a phone number.";

/// Draft contents checked and converted to store inputs
#[derive(Debug, Clone)]
pub struct ValidatedReport {
    pub person: NewPerson,
    pub contacts: Vec<NewContact>,
}

/// Check the draft and contact rows; incomplete rows are dropped
pub fn validate(draft: &DraftReport, rows: &[ContactRow]) -> Result<ValidatedReport, WizardError> {
    let basic_info_error = |message: &str| WizardError::Validation {
        step: WizardStep::BasicInfo,
        message: message.to_string(),
    };

    let basic = draft
        .basic
        .as_ref()
        .ok_or_else(|| basic_info_error(MISSING_BASIC_INFO))?;

    if !basic.missing_required().is_empty() {
        return Err(basic_info_error(MISSING_BASIC_INFO));
    }

    let gender = Gender::parse(&basic.gender)
        .ok_or_else(|| basic_info_error("Please select a gender."))?;
    let age = parse_age(&basic.age).map_err(|e| basic_info_error(&e.message))?;

    let contacts: Vec<NewContact> = rows
        .iter()
        .filter(|row| row.is_complete())
        .map(|row| NewContact {
            name: row.name.trim().to_string(),
            phone_number: row.phone_number.trim().to_string(),
            email: Some(row.email.trim().to_string()).filter(|e| !e.is_empty()),
        })
        .collect();

    if contacts.is_empty() {
        return Err(WizardError::Validation {
            step: WizardStep::Contacts,
            message: NO_VALID_CONTACT.to_string(),
        });
    }

    Ok(ValidatedReport {
        person: NewPerson {
            name: basic.name.trim().to_string(),
            gender,
            age,
            last_seen_location: basic.last_seen_location.trim().to_string(),
            description: basic.description.trim().to_string(),
            county: basic.county.trim().to_string(),
            sub_county: basic.sub_county.trim().to_string(),
            ward: basic.ward.trim().to_string(),
        },
        contacts,
    })
}

/// Write the report atomically and clear its staged files
///
/// On error nothing is left in the database or the media store; the staged
/// files are left for the caller to deal with.
pub async fn commit_report(
    db: &SqlitePool,
    staging: &PhotoStaging,
    media: &MediaStore,
    report: &ValidatedReport,
    staged: &[StagedPhoto],
) -> knmp_common::Result<Person> {
    let mut written = Vec::new();
    let mut tx = db.begin().await?;

    let result = write_report(&mut *tx, staging, media, report, staged, &mut written).await;
    let person = match result {
        Ok(person) => person,
        Err(e) => {
            drop(tx);
            media.discard(&written).await;
            return Err(e);
        }
    };

    if let Err(e) = tx.commit().await {
        media.discard(&written).await;
        return Err(e.into());
    }

    let staged_names: Vec<&str> = staged.iter().map(|p| p.staged_name.as_str()).collect();
    staging.delete_all(staged_names).await;

    info!(
        person_id = person.id,
        slug = %person.slug,
        contacts = report.contacts.len(),
        photos = staged.len(),
        "Committed missing person report"
    );

    Ok(person)
}

async fn write_report(
    conn: &mut SqliteConnection,
    staging: &PhotoStaging,
    media: &MediaStore,
    report: &ValidatedReport,
    staged: &[StagedPhoto],
    written: &mut Vec<String>,
) -> knmp_common::Result<Person> {
    let person = persons::insert(conn, &report.person).await?;

    for contact in &report.contacts {
        contacts::insert_for_person(conn, person.id, contact).await?;
    }

    for (i, photo) in staged.iter().enumerate() {
        let data = staging.read(&photo.staged_name).await?;
        let file_path = media.store_photo(&photo.original_name, &data).await?;
        written.push(file_path.clone());

        photos::insert_for_person(
            conn,
            person.id,
            &NewPhoto {
                file_path,
                description: photo.description.trim().to_string(),
                alt_text: photo.alt_text.trim().to_string(),
                is_primary: i == 0,
            },
        )
        .await?;
    }

    photos::ensure_primary_photo(conn, person.id).await?;

    Ok(person)
}
