//! Report wizard pages
//!
//! GET shows the visitor's current step. POST applies one step under the
//! visitor's session lock, then stores or clears the wizard state.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header;
use axum::response::Response;
use axum::Form;
use knmp_common::db::Gender;
use knmp_common::html::escape;
use tracing::debug;

use super::layout::{notices, render_page};
use crate::api::session::VisitorSession;
use crate::db::sessions;
use crate::wizard::{
    input::PREVIOUS_STEP_ACTION, CommittedReport, Notice, StepInput, UploadedFile, Wizard,
    WizardState, WizardStep,
};
use crate::{AppState, WebError, WebResult};

/// Multipart field carrying the photo files
pub const PHOTOS_FIELD: &str = "photos";

/// Description/alt text input pairs offered on step 2
const PHOTO_METADATA_SLOTS: usize = 5;

/// Contact rows offered on step 3
const CONTACT_ROWS: usize = 3;

/// GET /report-missing-person/
pub async fn report_page(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> WebResult<Response> {
    let session = VisitorSession::from_headers(&headers);

    let stored = if session.is_new {
        None
    } else {
        sessions::load_wizard_state(&state.db, session.id).await?
    };
    let wizard_state = Wizard::start_or_resume(stored);

    Ok(session.attach(axum::response::Html(render_wizard(&wizard_state, &[], None))))
}

/// POST /report-missing-person/
pub async fn report_submit(State(state): State<AppState>, request: Request) -> WebResult<Response> {
    let session = VisitorSession::from_headers(request.headers());
    let input = read_step_input(request, &state).await?;
    let action = input.into_action();

    let outcome = {
        let _guard = state.session_locks.lock(session.id).await;

        let stored = sessions::load_wizard_state(&state.db, session.id).await?;
        let current = Wizard::start_or_resume(stored);
        let outcome = state.wizard().handle(current, action).await;

        if outcome.committed.is_some() {
            sessions::delete_wizard_state(&state.db, session.id).await?;
        } else {
            sessions::save_wizard_state(&state.db, session.id, &outcome.state).await?;
        }
        outcome
    };

    debug!(
        session_id = %session.id,
        step = outcome.state.step.number(),
        notices = outcome.notices.len(),
        "Wizard request handled"
    );

    let html = render_wizard(&outcome.state, &outcome.notices, outcome.committed.as_ref());
    Ok(session.attach(axum::response::Html(html)))
}

/// Read a multipart or urlencoded wizard submission
async fn read_step_input(request: Request, state: &AppState) -> WebResult<StepInput> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if !is_multipart {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, state)
            .await
            .map_err(|e| WebError::BadRequest(e.body_text()))?;
        return Ok(pairs.into_iter().collect());
    }

    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|e| WebError::BadRequest(e.body_text()))?;

    let mut input = StepInput::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        match file_name {
            Some(file_name) if name == PHOTOS_FIELD => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| WebError::BadRequest(e.body_text()))?;

                // An empty file input still sends one nameless, empty part
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                input.push_file(UploadedFile {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| WebError::BadRequest(e.body_text()))?;
                input.push_field(name, value);
            }
        }
    }

    Ok(input)
}

fn step_indicator(current: WizardStep) -> String {
    let items: String = [WizardStep::BasicInfo, WizardStep::Photos, WizardStep::Contacts]
        .iter()
        .map(|step| {
            format!(
                r#"<li class="{}">{}. {}</li>"#,
                if *step == current { "active" } else { "" },
                step.number(),
                step.title()
            )
        })
        .collect();
    format!(r#"<ol class="steps">{}</ol>"#, items)
}

fn back_button() -> String {
    format!(
        r#"<button type="submit" class="secondary" name="action" value="{}" formnovalidate>Back</button>"#,
        PREVIOUS_STEP_ACTION
    )
}

fn text_field(name: &str, label: &str, value: &str, required: bool) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{value}"{required}></div>"#,
        name = name,
        label = label,
        value = escape(value),
        required = if required { " required" } else { "" },
    )
}

fn basic_info_form(state: &WizardState) -> String {
    let basic = state.draft.basic.clone().unwrap_or_default();

    let gender_options: String = Gender::ALL
        .iter()
        .map(|g| {
            format!(
                r#"<option value="{code}"{selected}>{label}</option>"#,
                code = g.code(),
                selected = if basic.gender.trim() == g.code() { " selected" } else { "" },
                label = g.label(),
            )
        })
        .collect();

    format!(
        r#"<form method="post" action="/report-missing-person/">
    <input type="hidden" name="step" value="1">
    {name}
    <div class="field"><label for="gender">Gender</label><select id="gender" name="gender" required><option value="">Select gender</option>{gender_options}</select></div>
    <div class="field"><label for="age">Age</label><input type="number" id="age" name="age" min="0" max="120" value="{age}"></div>
    {location}
    <div class="field"><label for="description">Description</label><textarea id="description" name="description" required placeholder="Physical appearance, clothing last seen wearing, circumstances of disappearance">{description}</textarea></div>
    {county}
    {sub_county}
    {ward}
    <button type="submit">Next: photos</button>
</form>"#,
        name = text_field("name", "Full name", &basic.name, true),
        gender_options = gender_options,
        age = escape(&basic.age),
        location = text_field("last_seen_location", "Last seen location", &basic.last_seen_location, true),
        description = escape(&basic.description),
        county = text_field("county", "County", &basic.county, false),
        sub_county = text_field("sub_county", "Sub county", &basic.sub_county, false),
        ward = text_field("ward", "Ward", &basic.ward, false),
    )
}

fn photos_form(state: &WizardState) -> String {
    let staged = if state.draft.photos.is_empty() {
        String::new()
    } else {
        let items: String = state
            .draft
            .photos
            .iter()
            .map(|p| format!("<li>{} ({} KB)</li>", escape(&p.original_name), p.size.div_ceil(1024)))
            .collect();
        format!("<p>Photos already added:</p><ul>{}</ul>", items)
    };

    let metadata: String = (0..PHOTO_METADATA_SLOTS)
        .map(|i| {
            format!(
                r#"<div class="field"><label>Photo {n}</label><input type="text" name="photo_description_{i}" placeholder="Brief description of the photo"><input type="text" name="photo_alt_text_{i}" placeholder="Alternative text for accessibility"></div>"#,
                n = i + 1,
                i = i,
            )
        })
        .collect();

    format!(
        r#"<form method="post" action="/report-missing-person/" enctype="multipart/form-data">
    <input type="hidden" name="step" value="2">
    {staged}
    <div class="field"><label for="photos">Photos (images up to 5MB each, optional)</label><input type="file" id="photos" name="{field}" accept="image/*" multiple></div>
    <p>Descriptions apply to the selected photos in order.</p>
    {metadata}
    {back}
    <button type="submit">Next: contacts</button>
</form>"#,
        staged = staged,
        field = PHOTOS_FIELD,
        metadata = metadata,
        back = back_button(),
    )
}

fn contacts_form() -> String {
    let rows: String = (1..=CONTACT_ROWS)
        .map(|n| {
            format!(
                r#"<fieldset class="card">
        <legend>Contact {n}</legend>
        <div class="field"><label for="contact_name_{n}">Name</label><input type="text" id="contact_name_{n}" name="contact_name_{n}" placeholder="Contact person name"{required}></div>
        <div class="field"><label for="phone_number_{n}">Phone number</label><input type="tel" id="phone_number_{n}" name="phone_number_{n}" placeholder="+254 700 000 000"{required}></div>
        <div class="field"><label for="email_{n}">Email (optional)</label><input type="email" id="email_{n}" name="email_{n}" placeholder="email@example.com"></div>
    </fieldset>"#,
                n = n,
                required = if n == 1 { " required" } else { "" },
            )
        })
        .collect();

    format!(
        r#"<form method="post" action="/report-missing-person/">
    <input type="hidden" name="step" value="3">
    {rows}
    {back}
    <button type="submit">Submit report</button>
</form>"#,
        rows = rows,
        back = back_button(),
    )
}

/// Render the wizard page for `state`
pub fn render_wizard(
    state: &WizardState,
    page_notices: &[Notice],
    committed: Option<&CommittedReport>,
) -> String {
    let content = match committed {
        Some(report) => format!(
            r#"<section class="card">
    <h2>Report received</h2>
    <p>The report for <strong>{name}</strong> is now published.</p>
    <p><a class="button" href="/missing-person/{slug}/">View the report</a>
    <a class="button secondary" href="/report-missing-person/">Report another person</a></p>
</section>"#,
            name = escape(&report.name),
            slug = escape(&report.slug),
        ),
        None => {
            let form = match state.step {
                WizardStep::BasicInfo => basic_info_form(state),
                WizardStep::Photos => photos_form(state),
                WizardStep::Contacts => contacts_form(),
            };
            format!("{}\n{}", step_indicator(state.step), form)
        }
    };

    let body = format!(
        r#"<h1>Report a missing person</h1>
{}
{}"#,
        notices(page_notices),
        content
    );

    render_page("Report a missing person", &body)
}
