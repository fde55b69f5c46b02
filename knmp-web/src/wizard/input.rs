//! Turning submitted form fields into a `WizardAction`
//!
//! Field naming follows the wizard form: `step` and `action` select the
//! transition, step 3 rows are `contact_name_{n}` / `phone_number_{n}` /
//! `email_{n}`, and step 2 metadata pairs with the uploaded files by 0-based
//! position as `photo_description_{i}` / `photo_alt_text_{i}`.

use super::state::{BasicInfo, ContactRow, PhotoUpload, WizardAction, WizardStep};
use std::collections::{BTreeSet, HashMap};

/// Value of `action` that steps back
pub const PREVIOUS_STEP_ACTION: &str = "previous_step";

/// A file part from the `photos` field
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Raw wizard submission: text fields plus any uploaded files, in order
#[derive(Debug, Clone, Default)]
pub struct StepInput {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl StepInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text field; a repeated name keeps the last value
    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn push_file(&mut self, file: UploadedFile) {
        self.files.push(file);
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn take(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    pub fn into_action(mut self) -> WizardAction {
        if self.field("action").map(str::trim) == Some(PREVIOUS_STEP_ACTION) {
            return WizardAction::PreviousStep;
        }

        let step = self
            .field("step")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .and_then(WizardStep::from_number);

        match step {
            Some(WizardStep::BasicInfo) => WizardAction::SubmitBasicInfo(BasicInfo {
                name: self.take("name"),
                age: self.take("age"),
                gender: self.take("gender"),
                last_seen_location: self.take("last_seen_location"),
                description: self.take("description"),
                county: self.take("county"),
                sub_county: self.take("sub_county"),
                ward: self.take("ward"),
            }),
            Some(WizardStep::Photos) => {
                let files = std::mem::take(&mut self.files);
                let uploads = files
                    .into_iter()
                    .enumerate()
                    .map(|(i, file)| PhotoUpload {
                        file_name: file.file_name,
                        content_type: file.content_type,
                        data: file.data,
                        description: self.take(&format!("photo_description_{}", i)),
                        alt_text: self.take(&format!("photo_alt_text_{}", i)),
                    })
                    .collect();
                WizardAction::SubmitPhotos(uploads)
            }
            Some(WizardStep::Contacts) => WizardAction::SubmitContacts(self.contact_rows()),
            None => WizardAction::Redisplay,
        }
    }

    /// Contact rows in ascending index order
    fn contact_rows(&mut self) -> Vec<ContactRow> {
        let indices: BTreeSet<u32> = self
            .fields
            .keys()
            .filter_map(|key| {
                ["contact_name_", "phone_number_", "email_"]
                    .iter()
                    .find_map(|prefix| key.strip_prefix(prefix))
                    .and_then(|n| n.parse::<u32>().ok())
            })
            .collect();

        indices
            .into_iter()
            .map(|n| ContactRow {
                name: self.take(&format!("contact_name_{}", n)),
                phone_number: self.take(&format!("phone_number_{}", n)),
                email: self.take(&format!("email_{}", n)),
            })
            .collect()
    }
}

impl FromIterator<(String, String)> for StepInput {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut input = StepInput::new();
        for (name, value) in iter {
            input.push_field(name, value);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: &[(&str, &str)]) -> StepInput {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_previous_step_wins_over_step() {
        let action = input(&[("action", "previous_step"), ("step", "3")]).into_action();
        assert!(matches!(action, WizardAction::PreviousStep));
    }

    #[test]
    fn test_basic_info_kept_verbatim() {
        let action = input(&[
            ("step", "1"),
            ("name", " Jane Doe "),
            ("gender", "F"),
            ("age", "abc"),
        ])
        .into_action();

        match action {
            WizardAction::SubmitBasicInfo(info) => {
                assert_eq!(info.name, " Jane Doe ");
                assert_eq!(info.age, "abc");
                assert_eq!(info.gender, "F");
                assert_eq!(info.ward, "");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_unknown_or_missing_step_redisplays() {
        assert!(matches!(input(&[("step", "7")]).into_action(), WizardAction::Redisplay));
        assert!(matches!(input(&[("step", "x")]).into_action(), WizardAction::Redisplay));
        assert!(matches!(input(&[]).into_action(), WizardAction::Redisplay));
    }

    #[test]
    fn test_photo_metadata_pairs_by_position() {
        let mut step = input(&[
            ("step", "2"),
            ("photo_description_0", "front"),
            ("photo_alt_text_1", "side view"),
        ]);
        for name in ["a.jpg", "b.jpg"] {
            step.push_file(UploadedFile {
                file_name: name.to_string(),
                content_type: "image/jpeg".to_string(),
                data: vec![1, 2, 3],
            });
        }

        match step.into_action() {
            WizardAction::SubmitPhotos(uploads) => {
                assert_eq!(uploads.len(), 2);
                assert_eq!(uploads[0].description, "front");
                assert_eq!(uploads[0].alt_text, "");
                assert_eq!(uploads[1].file_name, "b.jpg");
                assert_eq!(uploads[1].alt_text, "side view");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_contact_rows_sorted_numerically() {
        let action = input(&[
            ("step", "3"),
            ("contact_name_10", "Later"),
            ("phone_number_10", "0700000010"),
            ("contact_name_2", "First"),
            ("phone_number_2", "0700000002"),
            ("email_2", "first@example.com"),
            ("email_5", "orphan@example.com"),
        ])
        .into_action();

        match action {
            WizardAction::SubmitContacts(rows) => {
                let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["First", "", "Later"]);
                assert_eq!(rows[0].email, "first@example.com");
                assert!(!rows[1].is_complete());
            }
            other => panic!("unexpected action {:?}", other),
        }
    }
}
