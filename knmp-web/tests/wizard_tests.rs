//! Report wizard behaviour against a real database and staging directory

use knmp_common::config::{RootFolderInitializer, UploadConfig};
use knmp_common::db::{init_database, persons, Status};
use knmp_web::storage::{MediaStore, PhotoStaging};
use knmp_web::wizard::{
    BasicInfo, ContactRow, NoticeLevel, PhotoUpload, Wizard, WizardAction, WizardState, WizardStep,
    BASIC_INFO_FIRST,
};
use knmp_web::AppState;
use sqlx::SqlitePool;
use tempfile::TempDir;

const MIB: usize = 1024 * 1024;

async fn setup() -> (TempDir, AppState) {
    let temp_dir = TempDir::new().unwrap();
    let init = RootFolderInitializer::new(temp_dir.path().to_path_buf());
    init.ensure_directory_exists().unwrap();
    let db = init_database(&init.database_path()).await.unwrap();

    let state = AppState::new(
        db,
        PhotoStaging::new(init.staging_path()),
        MediaStore::new(init.media_path()),
        UploadConfig::default(),
    );
    (temp_dir, state)
}

fn jane_doe() -> BasicInfo {
    BasicInfo {
        name: "Jane Doe".to_string(),
        gender: "F".to_string(),
        last_seen_location: "Nairobi CBD".to_string(),
        description: "Last seen wearing a red coat".to_string(),
        ..BasicInfo::default()
    }
}

fn image(name: &str, size: usize) -> PhotoUpload {
    PhotoUpload {
        file_name: name.to_string(),
        content_type: "image/jpeg".to_string(),
        data: vec![0xAB; size],
        description: String::new(),
        alt_text: String::new(),
    }
}

fn john_doe() -> ContactRow {
    ContactRow {
        name: "John Doe".to_string(),
        phone_number: "0712345678".to_string(),
        email: String::new(),
    }
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

fn files_in(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn test_start_or_resume_defaults_to_step_one() {
    let state = Wizard::start_or_resume(None);
    assert_eq!(state.step, WizardStep::BasicInfo);
    assert!(state.draft.is_empty());

    let stored = WizardState { step: WizardStep::Contacts, ..WizardState::default() };
    assert_eq!(Wizard::start_or_resume(Some(stored.clone())), stored);
}

#[tokio::test]
async fn test_basic_info_advances_with_exact_fields() {
    let (_dir, state) = setup().await;
    let submitted = BasicInfo { age: "abc".to_string(), county: " Nairobi ".to_string(), ..jane_doe() };

    let outcome = state
        .wizard()
        .handle(WizardState::default(), WizardAction::SubmitBasicInfo(submitted.clone()))
        .await;

    assert_eq!(outcome.state.step, WizardStep::Photos);
    assert_eq!(outcome.state.draft.basic, Some(submitted));
    assert!(outcome.notices.is_empty());
}

#[tokio::test]
async fn test_photo_uploads_filtered_and_staged() {
    let (_dir, state) = setup().await;
    let wizard = state.wizard();
    let current = Wizard::submit_basic_info(WizardState::default(), jane_doe());

    let not_an_image = PhotoUpload {
        content_type: "application/pdf".to_string(),
        ..image("notes.pdf", 100)
    };
    let uploads = vec![
        image("first.jpg", MIB),
        image("huge.jpg", 5 * MIB + 1),
        not_an_image,
        image("second.png", 10),
    ];

    let outcome = wizard.handle(current, WizardAction::SubmitPhotos(uploads)).await;

    assert_eq!(outcome.state.step, WizardStep::Contacts);
    let photos = &outcome.state.draft.photos;
    let names: Vec<_> = photos.iter().map(|p| p.original_name.as_str()).collect();
    assert_eq!(names, vec!["first.jpg", "second.png"]);
    assert_ne!(photos[0].staged_name, photos[1].staged_name);
    assert_eq!(photos[0].size, MIB as u64);
    for photo in photos {
        assert!(photo.staged_name.starts_with("temp_"));
        assert!(state.staging.exists(&photo.staged_name));
    }

    assert_eq!(outcome.notices.len(), 2);
    assert!(outcome.notices.iter().all(|n| n.level == NoticeLevel::Error));
    assert!(outcome.notices[0].message.contains("huge.jpg"));
    assert!(outcome.notices[1].message.contains("valid image"));
}

#[tokio::test]
async fn test_photo_step_with_no_files_still_advances() {
    let (_dir, state) = setup().await;
    let current = Wizard::submit_basic_info(WizardState::default(), jane_doe());

    let outcome = state.wizard().handle(current, WizardAction::SubmitPhotos(Vec::new())).await;

    assert_eq!(outcome.state.step, WizardStep::Contacts);
    assert!(outcome.state.draft.photos.is_empty());
}

#[tokio::test]
async fn test_back_from_photos_deletes_staged_files() {
    let (_dir, state) = setup().await;
    let wizard = state.wizard();
    let current = Wizard::submit_basic_info(WizardState::default(), jane_doe());
    let (mut current, _) = wizard
        .submit_photos(current, vec![image("a.jpg", 10), image("b.jpg", 10)])
        .await;
    let staged = current.draft.staged_names();

    // Back from step 3 keeps the photos
    current = wizard.go_to_previous_step(current).await;
    assert_eq!(current.step, WizardStep::Photos);
    assert_eq!(current.draft.photos.len(), 2);

    // Back from step 2 discards them
    let outcome = wizard.handle(current, WizardAction::PreviousStep).await;
    assert_eq!(outcome.state.step, WizardStep::BasicInfo);
    assert!(outcome.state.draft.photos.is_empty());
    assert_eq!(outcome.state.draft.basic, Some(jane_doe()));
    for name in &staged {
        assert!(!state.staging.exists(name), "{name} should be deleted");
    }
    assert_eq!(files_in(state.staging.dir()), 0);

    // Already at step 1
    let again = wizard.go_to_previous_step(outcome.state).await;
    assert_eq!(again.step, WizardStep::BasicInfo);
}

#[tokio::test]
async fn test_missing_basic_fields_route_to_step_one() {
    let (_dir, state) = setup().await;
    let incomplete = BasicInfo { last_seen_location: String::new(), ..jane_doe() };
    let current = WizardState {
        step: WizardStep::Contacts,
        draft: knmp_web::wizard::DraftReport { basic: Some(incomplete), photos: Vec::new() },
    };

    let outcome = state
        .wizard()
        .handle(current, WizardAction::SubmitContacts(vec![john_doe()]))
        .await;

    assert_eq!(outcome.state.step, WizardStep::BasicInfo);
    assert!(outcome.committed.is_none());
    assert_eq!(outcome.notices[0].level, NoticeLevel::Error);
    assert_eq!(count(&state.db, "persons").await, 0);
}

#[tokio::test]
async fn test_no_complete_contact_routes_to_step_three_and_keeps_photos() {
    let (_dir, state) = setup().await;
    let wizard = state.wizard();
    let current = Wizard::submit_basic_info(WizardState::default(), jane_doe());
    let (current, _) = wizard.submit_photos(current, vec![image("a.jpg", 10)]).await;

    let rows = vec![
        ContactRow { phone_number: String::new(), ..john_doe() },
        ContactRow { name: "  ".to_string(), ..john_doe() },
    ];
    let outcome = wizard.handle(current, WizardAction::SubmitContacts(rows)).await;

    assert_eq!(outcome.state.step, WizardStep::Contacts);
    assert!(outcome.committed.is_none());
    assert_eq!(outcome.state.draft.photos.len(), 1);
    assert!(state.staging.exists(&outcome.state.draft.photos[0].staged_name));
    assert_eq!(count(&state.db, "persons").await, 0);
}

#[tokio::test]
async fn test_end_to_end_report() {
    let (_dir, state) = setup().await;
    let wizard = state.wizard();

    let outcome = wizard
        .handle(Wizard::start_or_resume(None), WizardAction::SubmitBasicInfo(jane_doe()))
        .await;
    assert_eq!(outcome.state.step, WizardStep::Photos);

    let outcome = wizard
        .handle(outcome.state, WizardAction::SubmitPhotos(vec![image("jane.jpg", MIB)]))
        .await;
    assert_eq!(outcome.state.draft.photos.len(), 1);
    let staged_name = outcome.state.draft.photos[0].staged_name.clone();

    let outcome = wizard
        .handle(outcome.state, WizardAction::SubmitContacts(vec![john_doe()]))
        .await;

    let committed = outcome.committed.expect("report should commit");
    assert_eq!(outcome.state, WizardState::default());
    assert_eq!(outcome.notices[0].level, NoticeLevel::Success);

    let person = persons::get_by_slug(&state.db, &committed.slug).await.unwrap().unwrap();
    assert_eq!(person.name, "Jane Doe");
    assert_eq!(person.status, Status::Missing);

    let entry = persons::with_relations(&state.db, vec![person]).await.unwrap().remove(0);
    assert_eq!(entry.contacts.len(), 1);
    assert_eq!(entry.contacts[0].name, "John Doe");
    assert_eq!(entry.contacts[0].phone_number, "+254 712 345678");
    assert_eq!(entry.photos.len(), 1);
    assert!(entry.photos[0].is_primary);
    assert!(entry.photos[0].file_path.starts_with("missing_person_photos/"));
    assert!(entry.photos[0].file_path.ends_with(".jpg"));

    let media_file = state.media.path_of(&entry.photos[0].file_path).unwrap();
    assert_eq!(std::fs::metadata(media_file).unwrap().len(), MIB as u64);
    assert!(!state.staging.exists(&staged_name));
}

#[tokio::test]
async fn test_resubmitting_after_commit_does_not_duplicate() {
    let (_dir, state) = setup().await;
    let wizard = state.wizard();
    let current = Wizard::submit_basic_info(WizardState::default(), jane_doe());
    let current = WizardState { step: WizardStep::Contacts, ..current };

    let first = wizard
        .handle(current, WizardAction::SubmitContacts(vec![john_doe()]))
        .await;
    assert!(first.committed.is_some());

    // The cleared state is what a second submission finds
    let second = wizard
        .handle(first.state, WizardAction::SubmitContacts(vec![john_doe()]))
        .await;

    assert!(second.committed.is_none());
    assert_eq!(second.state.step, WizardStep::BasicInfo);
    assert_eq!(second.notices[0].message, BASIC_INFO_FIRST);
    assert_eq!(count(&state.db, "persons").await, 1);
}

#[tokio::test]
async fn test_later_steps_require_basic_info() {
    let (_dir, state) = setup().await;

    let outcome = state
        .wizard()
        .handle(WizardState::default(), WizardAction::SubmitPhotos(vec![image("a.jpg", 10)]))
        .await;

    assert_eq!(outcome.state.step, WizardStep::BasicInfo);
    assert!(outcome.state.draft.photos.is_empty());
    assert_eq!(files_in(state.staging.dir()), 0);
}

#[tokio::test]
async fn test_redisplay_leaves_state_unchanged() {
    let (_dir, state) = setup().await;
    let current = Wizard::submit_basic_info(WizardState::default(), jane_doe());

    let outcome = state.wizard().handle(current.clone(), WizardAction::Redisplay).await;

    assert_eq!(outcome.state, current);
    assert!(outcome.notices.is_empty());
}

#[tokio::test]
async fn test_commit_failure_rolls_back_and_discards_photos() {
    let (_dir, state) = setup().await;
    let wizard = state.wizard();
    let current = Wizard::submit_basic_info(WizardState::default(), jane_doe());
    let (current, _) = wizard
        .submit_photos(current, vec![image("a.jpg", 10), image("b.jpg", 10)])
        .await;

    // Second staged file vanishes before the final step
    let lost = current.draft.photos[1].staged_name.clone();
    std::fs::remove_file(state.staging.dir().join(&lost)).unwrap();

    let outcome = wizard
        .handle(current, WizardAction::SubmitContacts(vec![john_doe()]))
        .await;

    assert!(outcome.committed.is_none());
    assert_eq!(outcome.state.step, WizardStep::Contacts);
    assert!(outcome.state.draft.photos.is_empty());
    assert_eq!(outcome.state.draft.basic, Some(jane_doe()));
    assert_eq!(outcome.notices[0].level, NoticeLevel::Error);

    // Nothing half-written survives
    assert_eq!(count(&state.db, "persons").await, 0);
    assert_eq!(count(&state.db, "contacts").await, 0);
    assert_eq!(count(&state.db, "photos").await, 0);
    assert_eq!(files_in(state.staging.dir()), 0);
    assert_eq!(files_in(&state.media.root().join("missing_person_photos")), 0);

    // Retrying from step 3 works
    let retry = wizard
        .handle(outcome.state, WizardAction::SubmitContacts(vec![john_doe()]))
        .await;
    assert!(retry.committed.is_some());
    assert_eq!(count(&state.db, "persons").await, 1);
}
