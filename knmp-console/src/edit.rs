//! Staff edit-report validation
//!
//! The edit form carries the person's fields plus one block per linked
//! contact, keyed by contact id (`contact_name_{id}`, `phone_number_{id}`,
//! `email_{id}`). Unlike the public wizard, every rule is enforced here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use knmp_common::db::{Gender, NewContact, PersonUpdate, PersonWithRelations, Status};
use knmp_common::validation::{parse_age, require, validate_phone_number, ValidationError};

/// A fully checked edit, ready for the entity store
#[derive(Debug, Clone)]
pub struct ValidatedEdit {
    pub person: PersonUpdate,
    /// Changes to contacts already linked to the person, by contact id
    pub contacts: Vec<(i64, NewContact)>,
}

/// `date_found` after a status change
///
/// A found state keeps an existing date or stamps `now`; `missing` clears it.
pub fn resolve_date_found(
    current: Option<DateTime<Utc>>,
    new_status: Status,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if new_status.is_resolved() {
        Some(current.unwrap_or(now))
    } else {
        None
    }
}

fn field_label(field: &str) -> &'static str {
    match field {
        "name" => "Name",
        "gender" => "Gender",
        "age" => "Age",
        "last_seen_location" => "Last seen location",
        "description" => "Description",
        "status" => "Status",
        "contact_name" => "Contact name",
        "phone_number" => "Phone number",
        _ => "Field",
    }
}

/// Message shown above the edit form
pub fn describe(error: &ValidationError) -> String {
    format!("{}: {}", field_label(error.field), error.message)
}

/// Check the submitted form against the stored record
///
/// Returns every problem found, not just the first.
pub fn validate_edit(
    form: &HashMap<String, String>,
    current: &PersonWithRelations,
    now: DateTime<Utc>,
) -> Result<ValidatedEdit, Vec<String>> {
    let value = |key: &str| form.get(key).map(|v| v.trim()).unwrap_or("");
    let mut errors = Vec::new();

    for field in ["name", "last_seen_location", "description"] {
        if let Err(e) = require(field, value(field)) {
            errors.push(describe(&e));
        }
    }

    let gender = Gender::parse(value("gender"));
    if gender.is_none() {
        errors.push(describe(&ValidationError::new("gender", "Please select a gender.")));
    }

    let age = parse_age(value("age")).unwrap_or_else(|e| {
        errors.push(describe(&e));
        None
    });

    let status = Status::parse(value("status"));
    if status.is_none() {
        errors.push(describe(&ValidationError::new("status", "Please select a status.")));
    }

    let mut contacts = Vec::new();
    for (position, contact) in current.contacts.iter().enumerate() {
        let name_key = format!("contact_name_{}", contact.id);
        let phone_key = format!("phone_number_{}", contact.id);
        let email_key = format!("email_{}", contact.id);
        if !form.contains_key(&name_key) && !form.contains_key(&phone_key) {
            continue;
        }

        let name = value(name_key.as_str());
        let phone = value(phone_key.as_str());
        let checks = [require("contact_name", name), validate_phone_number(phone)];
        let mut valid = true;
        for err in checks.into_iter().filter_map(Result::err) {
            errors.push(format!("Contact {}: {}", position + 1, describe(&err)));
            valid = false;
        }
        if valid {
            contacts.push((
                contact.id,
                NewContact {
                    name: name.to_string(),
                    phone_number: phone.to_string(),
                    email: Some(value(email_key.as_str()).to_string()),
                },
            ));
        }
    }

    let (Some(gender), Some(status)) = (gender, status) else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let person = PersonUpdate {
        name: value("name").to_string(),
        gender,
        age,
        last_seen_location: value("last_seen_location").to_string(),
        description: value("description").to_string(),
        county: value("county").to_string(),
        sub_county: value("sub_county").to_string(),
        ward: value("ward").to_string(),
        status,
        date_found: resolve_date_found(current.person.date_found, status, now),
    };

    Ok(ValidatedEdit { person, contacts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use knmp_common::db::{Contact, Person};

    fn record(status: Status, date_found: Option<DateTime<Utc>>) -> PersonWithRelations {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        PersonWithRelations {
            person: Person {
                id: 1,
                slug: "jane-doe".to_string(),
                name: "Jane Doe".to_string(),
                gender: Gender::Female,
                age: Some(30),
                last_seen_location: "Nairobi CBD".to_string(),
                description: "Red coat".to_string(),
                county: String::new(),
                sub_county: String::new(),
                ward: String::new(),
                status,
                date_found,
                created_at: created,
                updated_at: created,
            },
            contacts: vec![Contact {
                id: 7,
                name: "John Doe".to_string(),
                phone_number: "+254 712 345678".to_string(),
                email: None,
                created_at: created,
                updated_at: created,
            }],
            photos: Vec::new(),
        }
    }

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_form(status: &str) -> HashMap<String, String> {
        form(&[
            ("name", "Jane Doe"),
            ("gender", "F"),
            ("age", "31"),
            ("last_seen_location", "Nairobi CBD"),
            ("description", "Red coat"),
            ("county", "NAIROBI"),
            ("status", status),
        ])
    }

    #[test]
    fn test_resolve_date_found() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();

        assert_eq!(resolve_date_found(None, Status::FoundPending, now), Some(now));
        assert_eq!(
            resolve_date_found(Some(earlier), Status::FoundConfirmed, now),
            Some(earlier)
        );
        assert_eq!(resolve_date_found(Some(earlier), Status::Missing, now), None);
    }

    #[test]
    fn test_valid_edit_stamps_date_found() {
        let now = Utc::now();
        let edit = validate_edit(&valid_form("found_pending"), &record(Status::Missing, None), now)
            .unwrap();
        assert_eq!(edit.person.status, Status::FoundPending);
        assert_eq!(edit.person.date_found, Some(now));
        assert_eq!(edit.person.age, Some(31));
        assert_eq!(edit.person.county, "NAIROBI");
        assert!(edit.contacts.is_empty());
    }

    #[test]
    fn test_reports_every_error() {
        let mut f = valid_form("lost");
        f.insert("name".to_string(), " ".to_string());
        f.insert("gender".to_string(), "X".to_string());
        f.insert("age".to_string(), "200".to_string());

        let errors = validate_edit(&f, &record(Status::Missing, None), Utc::now()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.starts_with("Name:")));
        assert!(errors.iter().any(|e| e.starts_with("Age:")));
        assert!(errors.iter().any(|e| e.starts_with("Status:")));
    }

    #[test]
    fn test_contact_phone_enforced() {
        let mut f = valid_form("missing");
        f.insert("contact_name_7".to_string(), "John Doe".to_string());
        f.insert("phone_number_7".to_string(), "12345".to_string());

        let errors = validate_edit(&f, &record(Status::Missing, None), Utc::now()).unwrap_err();
        assert_eq!(errors, vec!["Contact 1: Phone number: Please enter a valid phone number."]);

        f.insert("phone_number_7".to_string(), "0722 000 111".to_string());
        let edit = validate_edit(&f, &record(Status::Missing, None), Utc::now()).unwrap();
        assert_eq!(edit.contacts.len(), 1);
        assert_eq!(edit.contacts[0].0, 7);
    }

    #[test]
    fn test_unlinked_contact_ids_ignored() {
        let mut f = valid_form("missing");
        f.insert("contact_name_99".to_string(), "Intruder".to_string());
        f.insert("phone_number_99".to_string(), "0712345678".to_string());

        let edit = validate_edit(&f, &record(Status::Missing, None), Utc::now()).unwrap();
        assert!(edit.contacts.is_empty());
    }
}
