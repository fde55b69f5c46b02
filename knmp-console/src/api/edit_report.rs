//! Edit-report page: staff correction of a record and its status

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use knmp_common::db::{contacts, persons, Gender, PersonWithRelations, Status};
use knmp_common::html::{encode_query_value, escape};
use serde::Deserialize;
use tracing::info;

use crate::api::layout;
use crate::edit::validate_edit;
use crate::{AppState, ConsoleError, ConsoleResult};

#[derive(Debug, Default, Deserialize)]
pub struct EditParams {
    pub saved: Option<String>,
}

async fn load_record(state: &AppState, slug: &str) -> ConsoleResult<PersonWithRelations> {
    let person = persons::get_by_slug(&state.db, slug)
        .await?
        .ok_or_else(|| ConsoleError::NotFound(slug.to_string()))?;

    persons::with_relations(&state.db, vec![person])
        .await?
        .pop()
        .ok_or_else(|| ConsoleError::NotFound(slug.to_string()))
}

/// Form values as stored, keyed like the submitted form
fn stored_values(entry: &PersonWithRelations) -> HashMap<String, String> {
    let p = &entry.person;
    let mut values: HashMap<String, String> = [
        ("name", p.name.clone()),
        ("gender", p.gender.code().to_string()),
        ("age", p.age.map(|a| a.to_string()).unwrap_or_default()),
        ("last_seen_location", p.last_seen_location.clone()),
        ("description", p.description.clone()),
        ("county", p.county.clone()),
        ("sub_county", p.sub_county.clone()),
        ("ward", p.ward.clone()),
        ("status", p.status.as_str().to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    for contact in &entry.contacts {
        values.insert(format!("contact_name_{}", contact.id), contact.name.clone());
        values.insert(format!("phone_number_{}", contact.id), contact.phone_number.clone());
        values.insert(
            format!("email_{}", contact.id),
            contact.email.clone().unwrap_or_default(),
        );
    }
    values
}

fn text_input(label: &str, name: &str, values: &HashMap<String, String>) -> String {
    format!(
        r#"<label>{label} <input type="text" name="{name}" value="{value}"></label>"#,
        label = label,
        name = escape(name),
        value = escape(values.get(name).map(String::as_str).unwrap_or("")),
    )
}

fn render_form(
    entry: &PersonWithRelations,
    values: &HashMap<String, String>,
    errors: &[String],
    saved: bool,
    show_logout: bool,
) -> String {
    let person = &entry.person;
    let selected = |key: &str, option: &str| {
        if values.get(key).map(String::as_str) == Some(option) {
            " selected"
        } else {
            ""
        }
    };

    let gender_options: String = Gender::ALL
        .iter()
        .map(|g| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                g.code(),
                selected("gender", g.code()),
                g.label()
            )
        })
        .collect();
    let status_options: String = Status::ALL
        .iter()
        .map(|s| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                s.as_str(),
                selected("status", s.as_str()),
                s.label()
            )
        })
        .collect();

    let contact_fields: String = entry
        .contacts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "<fieldset><legend>Contact {}</legend>{}{}{}</fieldset>",
                i + 1,
                text_input("Name", &format!("contact_name_{}", c.id), values),
                text_input("Phone number", &format!("phone_number_{}", c.id), values),
                text_input("Email", &format!("email_{}", c.id), values),
            )
        })
        .collect();

    let photos: String = entry
        .photos
        .iter()
        .map(|p| {
            format!(
                "<li>{}{}</li>",
                escape(&p.file_path),
                if p.is_primary { " (primary)" } else { "" }
            )
        })
        .collect();
    let photos = if photos.is_empty() {
        "<p>No photos.</p>".to_string()
    } else {
        format!("<ul>{}</ul>", photos)
    };

    let notice = if saved {
        r#"<div class="notice success" role="status">Changes saved.</div>"#
    } else {
        ""
    };
    let date_found = person
        .date_found
        .map(|d| format!("<p>Date found: {}</p>", d.format("%Y-%m-%d %H:%M")))
        .unwrap_or_default();
    let description = escape(values.get("description").map(String::as_str).unwrap_or(""));

    let body = format!(
        r#"<section class="card">
    <h1>Edit report: {name}</h1>
    <p>Reported {created}. Public slug: <code>{slug}</code></p>
    {date_found}
    {notice}
    {errors}
    <form method="post" action="/edit-report/{slug_attr}/">
        {name_input}
        <label>Gender <select name="gender">{gender_options}</select></label>
        {age_input}
        {location_input}
        <label>Description <textarea name="description">{description}</textarea></label>
        {county_input}
        {sub_county_input}
        {ward_input}
        <label>Status <select name="status">{status_options}</select></label>
        {contact_fields}
        <button type="submit">Save changes</button>
    </form>
    <h2>Photos</h2>
    {photos}
</section>"#,
        name = escape(&person.name),
        created = person.created_at.format("%Y-%m-%d %H:%M"),
        slug = escape(&person.slug),
        slug_attr = encode_query_value(&person.slug),
        date_found = date_found,
        notice = notice,
        errors = layout::error_list(errors),
        name_input = text_input("Name", "name", values),
        gender_options = gender_options,
        age_input = text_input("Age", "age", values),
        location_input = text_input("Last seen location", "last_seen_location", values),
        description = description,
        county_input = text_input("County", "county", values),
        sub_county_input = text_input("Sub-county", "sub_county", values),
        ward_input = text_input("Ward", "ward", values),
        status_options = status_options,
        contact_fields = contact_fields,
        photos = photos,
    );

    layout::render_page(&format!("Edit {}", person.name), &body, show_logout)
}

/// GET /edit-report/:slug/
pub async fn edit_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<EditParams>,
) -> ConsoleResult<Html<String>> {
    let entry = load_record(&state, &slug).await?;
    let saved = params.saved.as_deref() == Some("1");

    Ok(Html(render_form(
        &entry,
        &stored_values(&entry),
        &[],
        saved,
        state.auth_enabled(),
    )))
}

/// POST /edit-report/:slug/
///
/// Invalid input re-renders the form with the submitted values. A valid
/// edit redirects back to the page with a saved notice.
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> ConsoleResult<Response> {
    let entry = load_record(&state, &slug).await?;

    let edit = match validate_edit(&form, &entry, knmp_common::time::now()) {
        Ok(edit) => edit,
        Err(errors) => {
            let mut values = stored_values(&entry);
            values.extend(form);
            let page = render_form(&entry, &values, &errors, false, state.auth_enabled());
            return Ok(Html(page).into_response());
        }
    };

    let updated = persons::update(&state.db, entry.person.id, &edit.person).await?;
    for (contact_id, changes) in &edit.contacts {
        contacts::update(&state.db, *contact_id, changes).await?;
    }

    info!(
        slug = %updated.slug,
        status = updated.status.as_str(),
        "Report updated by staff"
    );

    Ok(Redirect::to(&format!("/edit-report/{}/?saved=1", encode_query_value(&updated.slug))).into_response())
}
