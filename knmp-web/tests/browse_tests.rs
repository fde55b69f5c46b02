//! Browse/search listing and stale-state sweeping

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use knmp_common::config::{RootFolderInitializer, UploadConfig};
use knmp_common::db::{init_database, persons, Gender, NewPerson};
use knmp_web::db::sessions;
use knmp_web::storage::{MediaStore, PhotoStaging};
use knmp_web::wizard::{StagedPhoto, WizardState, WizardStep};
use knmp_web::{build_router, sweep, AppState};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_with(uploads: UploadConfig) -> (TempDir, AppState) {
    let temp_dir = TempDir::new().unwrap();
    let init = RootFolderInitializer::new(temp_dir.path().to_path_buf());
    init.ensure_directory_exists().unwrap();
    let db = init_database(&init.database_path()).await.unwrap();

    let state = AppState::new(
        db,
        PhotoStaging::new(init.staging_path()),
        MediaStore::new(init.media_path()),
        uploads,
    );
    (temp_dir, state)
}

async fn add_person(state: &AppState, name: &str, gender: Gender, age: Option<i64>, location: &str) {
    let mut conn = state.db.acquire().await.unwrap();
    persons::insert(
        &mut conn,
        &NewPerson {
            name: name.to_string(),
            gender,
            age,
            last_seen_location: location.to_string(),
            description: "Description".to_string(),
            county: String::new(),
            sub_county: String::new(),
            ward: String::new(),
        },
    )
    .await
    .unwrap();
}

async fn listing(state: &AppState, query: &str) -> String {
    let app = build_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/missing-persons/{}", query))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_query_matches_location_case_insensitively() {
    let (_dir, state) = setup_with(UploadConfig::default()).await;
    add_person(&state, "Jane Doe", Gender::Female, Some(30), "Nairobi CBD").await;
    add_person(&state, "Otieno", Gender::Male, Some(40), "Kisumu").await;

    for query in ["?q=Nairobi", "?q=nairobi", "?q=NAIROBI"] {
        let html = listing(&state, query).await;
        assert!(html.contains("Jane Doe"), "{query}");
        assert!(!html.contains("Otieno"), "{query}");
    }
}

#[tokio::test]
async fn test_gender_and_age_filters() {
    let (_dir, state) = setup_with(UploadConfig::default()).await;
    add_person(&state, "Young Man", Gender::Male, Some(19), "Thika").await;
    add_person(&state, "Older Man", Gender::Male, Some(60), "Thika").await;
    add_person(&state, "Woman", Gender::Female, Some(25), "Thika").await;

    let html = listing(&state, "?gender=M&age_min=18&age_max=30").await;
    assert!(html.contains("Young Man"));
    assert!(!html.contains("Older Man"));
    assert!(!html.contains(">Woman<"));
}

#[tokio::test]
async fn test_malformed_bounds_and_page_are_ignored() {
    let (_dir, state) = setup_with(UploadConfig::default()).await;
    add_person(&state, "Jane Doe", Gender::Female, Some(30), "Nairobi").await;

    let html = listing(&state, "?age_min=abc&age_max=&page=zero").await;
    assert!(html.contains("Jane Doe"));
    assert!(html.contains("Page 1 of 1"));
}

#[tokio::test]
async fn test_listing_paginates_by_twelve() {
    let (_dir, state) = setup_with(UploadConfig::default()).await;
    for i in 0..13 {
        add_person(&state, &format!("Person {:02}", i), Gender::Male, None, "Nakuru").await;
    }

    let first = listing(&state, "?q=nakuru").await;
    assert!(first.contains("Page 1 of 2 (13 results)"));
    assert!(first.contains("Person 12"));
    assert!(!first.contains("Person 00"));
    assert!(first.contains("page=2&amp;q=nakuru"));

    let second = listing(&state, "?q=nakuru&page=2").await;
    assert!(second.contains("Person 00"));
}

#[tokio::test]
async fn test_sweep_removes_abandoned_state() {
    let uploads = UploadConfig {
        staged_max_age_secs: 0,
        ..UploadConfig::default()
    };
    let (_dir, state) = setup_with(uploads).await;

    let staged = state.staging.stage("a.jpg", b"x").await.unwrap();
    sessions::save_wizard_state(&state.db, Uuid::new_v4(), &WizardState::default())
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let report = sweep::sweep_once(&state).await.unwrap();

    assert_eq!(report.staged_files, 1);
    assert_eq!(report.sessions, 1);
    assert!(!state.staging.exists(&staged));
}

#[tokio::test]
async fn test_sweep_keeps_recent_state() {
    let (_dir, state) = setup_with(UploadConfig::default()).await;
    let id = Uuid::new_v4();

    let staged = state.staging.stage("a.jpg", b"x").await.unwrap();
    sessions::save_wizard_state(&state.db, id, &WizardState::default())
        .await
        .unwrap();

    let report = sweep::sweep_once(&state).await.unwrap();

    assert_eq!(report, sweep::SweepReport::default());
    assert!(state.staging.exists(&staged));
    assert!(sessions::load_wizard_state(&state.db, id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_sweep_keeps_photos_of_active_session() {
    let uploads = UploadConfig {
        staged_max_age_secs: 1,
        ..UploadConfig::default()
    };
    let (_dir, state) = setup_with(uploads).await;

    let referenced = state.staging.stage("a.jpg", b"x").await.unwrap();
    let orphaned = state.staging.stage("b.jpg", b"y").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    // The visitor is still posting, so the session row is fresh while the file is old
    let mut wizard_state = WizardState::default();
    wizard_state.step = WizardStep::Contacts;
    wizard_state.draft.photos.push(StagedPhoto {
        staged_name: referenced.clone(),
        original_name: "a.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        size: 1,
        description: String::new(),
        alt_text: String::new(),
    });
    let id = Uuid::new_v4();
    sessions::save_wizard_state(&state.db, id, &wizard_state).await.unwrap();

    let report = sweep::sweep_once(&state).await.unwrap();

    assert_eq!(report.staged_files, 1);
    assert_eq!(report.sessions, 0);
    assert!(state.staging.exists(&referenced));
    assert!(!state.staging.exists(&orphaned));
    assert!(sessions::load_wizard_state(&state.db, id).await.unwrap().is_some());
}
