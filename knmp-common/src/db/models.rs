//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Case status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Missing,
    FoundPending,
    FoundConfirmed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Missing, Status::FoundPending, Status::FoundConfirmed];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Missing => "missing",
            Status::FoundPending => "found_pending",
            Status::FoundConfirmed => "found_confirmed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Missing => "Missing",
            Status::FoundPending => "Found - Pending Confirmation",
            Status::FoundConfirmed => "Found - Confirmed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value.trim())
    }

    /// Any found state counts as resolved
    pub fn is_resolved(self) -> bool {
        self != Status::Missing
    }
}

/// Recorded gender, stored as `M` / `F`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Gender {
    #[sqlx(rename = "M")]
    #[serde(rename = "M")]
    Male,
    #[sqlx(rename = "F")]
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == value.trim())
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Person {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub gender: Gender,
    pub age: Option<i64>,
    pub last_seen_location: String,
    pub description: String,
    pub county: String,
    pub sub_county: String,
    pub ward: String,
    pub status: Status,
    pub date_found: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Photo {
    pub id: i64,
    /// Path relative to the media root, e.g. `missing_person_photos/<uuid>.jpg`
    pub file_path: String,
    pub description: String,
    pub alt_text: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Photo {
    /// Public URL under the `/media/` mount
    pub fn url(&self) -> String {
        format!("/media/{}", self.file_path)
    }
}

/// Person with eagerly loaded contacts and photos
#[derive(Debug, Clone, Serialize)]
pub struct PersonWithRelations {
    pub person: Person,
    pub contacts: Vec<Contact>,
    pub photos: Vec<Photo>,
}

impl PersonWithRelations {
    pub fn primary_photo(&self) -> Option<&Photo> {
        self.photos
            .iter()
            .find(|p| p.is_primary)
            .or_else(|| self.photos.first())
    }
}

/// Fields for a new person record
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub gender: Gender,
    pub age: Option<i64>,
    pub last_seen_location: String,
    pub description: String,
    pub county: String,
    pub sub_county: String,
    pub ward: String,
}

/// Staff edit of an existing person; the slug never changes
#[derive(Debug, Clone)]
pub struct PersonUpdate {
    pub name: String,
    pub gender: Gender,
    pub age: Option<i64>,
    pub last_seen_location: String,
    pub description: String,
    pub county: String,
    pub sub_county: String,
    pub ward: String,
    pub status: Status,
    pub date_found: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub file_path: String,
    pub description: String,
    pub alt_text: String,
    pub is_primary: bool,
}

/// Filters for the public missing-persons listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring over name, location, description and area fields
    pub query: Option<String>,
    /// Exact gender code
    pub gender: Option<String>,
    /// Inclusive lower age bound
    pub age_min: Option<i64>,
    /// Inclusive upper age bound
    pub age_max: Option<i64>,
}
