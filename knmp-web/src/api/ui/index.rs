//! Landing page

use axum::extract::State;
use axum::response::Html;
use knmp_common::db::persons;

use super::layout::{page, person_card};
use crate::{AppState, WebResult};

/// Persons shown on the landing page
pub const LATEST_COUNT: i64 = 3;

/// GET /
pub async fn index_page(State(state): State<AppState>) -> WebResult<Html<String>> {
    let latest = persons::latest_missing(&state.db, LATEST_COUNT).await?;
    let latest = persons::with_relations(&state.db, latest).await?;

    let cards = if latest.is_empty() {
        "<p>No missing persons have been reported.</p>".to_string()
    } else {
        latest.iter().map(person_card).collect::<String>()
    };

    let body = format!(
        r#"<section class="card">
    <h1>Help bring them home</h1>
    <p>Report a missing person, or browse reports and share what you know.</p>
    <p>
        <a class="button" href="/report-missing-person/">Report a missing person</a>
        <a class="button secondary" href="/missing-persons/">Browse missing persons</a>
    </p>
</section>
<h2>Recently reported</h2>
<div class="grid">
{}
</div>"#,
        cards
    );

    Ok(page("Home", &body))
}
