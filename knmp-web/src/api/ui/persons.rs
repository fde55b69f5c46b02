//! Browse/search listing and the person detail page

use axum::extract::{Path, Query, State};
use axum::response::Html;
use knmp_common::db::{persons, Gender};
use knmp_common::html::escape;

use super::layout::{age_text, page, person_card, status_badge};
use crate::browse::{BrowseParams, PAGE_SIZE};
use crate::{AppState, WebError, WebResult};

fn search_form(params: &BrowseParams) -> String {
    let value = |v: &Option<String>| escape(v.as_deref().unwrap_or(""));
    let selected_gender = params.gender.as_deref().unwrap_or("");

    let gender_options: String = Gender::ALL
        .iter()
        .map(|g| {
            format!(
                r#"<option value="{code}"{selected}>{label}</option>"#,
                code = g.code(),
                selected = if selected_gender == g.code() { " selected" } else { "" },
                label = g.label(),
            )
        })
        .collect();

    format!(
        r#"<form class="search-form" method="get" action="/missing-persons/">
    <div><label for="q">Search</label><input type="search" id="q" name="q" value="{q}" placeholder="Name, location, county..."></div>
    <div><label for="gender">Gender</label><select id="gender" name="gender"><option value="">Any</option>{gender_options}</select></div>
    <div><label for="age_min">Min age</label><input type="number" id="age_min" name="age_min" min="0" max="120" value="{age_min}"></div>
    <div><label for="age_max">Max age</label><input type="number" id="age_max" name="age_max" min="0" max="120" value="{age_max}"></div>
    <div><button type="submit">Search</button></div>
</form>"#,
        q = value(&params.q),
        gender_options = gender_options,
        age_min = value(&params.age_min),
        age_max = value(&params.age_max),
    )
}

/// GET /missing-persons/
///
/// Missing persons only, newest first, 12 per page.
pub async fn missing_persons_page(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> WebResult<Html<String>> {
    let filter = params.to_filter();
    let (found, pagination) =
        persons::search_missing(&state.db, &filter, params.page(), PAGE_SIZE).await?;
    let found = persons::with_relations(&state.db, found).await?;

    let results = if found.is_empty() {
        "<p>No missing persons match your search.</p>".to_string()
    } else {
        format!(
            r#"<div class="grid">{}</div>"#,
            found.iter().map(person_card).collect::<String>()
        )
    };

    let mut nav = String::new();
    if pagination.has_previous() {
        nav.push_str(&format!(
            r#"<a href="/missing-persons/?{}">&laquo; Previous</a>"#,
            escape(&params.page_query(pagination.page - 1))
        ));
    }
    nav.push_str(&format!(
        "<span>Page {} of {} ({} results)</span>",
        pagination.page,
        pagination.total_pages.max(1),
        pagination.total_results
    ));
    if pagination.has_next() {
        nav.push_str(&format!(
            r#"<a href="/missing-persons/?{}">Next &raquo;</a>"#,
            escape(&params.page_query(pagination.page + 1))
        ));
    }

    let body = format!(
        r#"<h1>Missing persons</h1>
{}
{}
<nav class="pagination">{}</nav>"#,
        search_form(&params),
        results,
        nav
    );

    Ok(page("Missing persons", &body))
}

/// GET /missing-person/:slug/
pub async fn missing_person_detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> WebResult<Html<String>> {
    let person = persons::get_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("missing person '{}'", slug)))?;
    let entry = persons::with_relations(&state.db, vec![person])
        .await?
        .pop()
        .ok_or_else(|| WebError::Internal("relations lookup returned no rows".to_string()))?;
    let person = &entry.person;

    let photos: String = entry
        .photos
        .iter()
        .map(|photo| {
            let alt = if photo.alt_text.is_empty() { &person.name } else { &photo.alt_text };
            let caption = if photo.description.is_empty() {
                String::new()
            } else {
                format!("<figcaption>{}</figcaption>", escape(&photo.description))
            };
            format!(
                r#"<figure><img src="{}" alt="{}">{}</figure>"#,
                escape(&photo.url()),
                escape(alt),
                caption
            )
        })
        .collect();

    let contacts: String = entry
        .contacts
        .iter()
        .map(|contact| {
            let email = contact
                .email
                .as_deref()
                .map(|e| format!(r#" &middot; <a href="mailto:{0}">{0}</a>"#, escape(e)))
                .unwrap_or_default();
            format!(
                r#"<li>{} &middot; <a href="tel:{}">{}</a>{}</li>"#,
                escape(&contact.name),
                escape(&contact.phone_number.replace(' ', "")),
                escape(&contact.phone_number),
                email
            )
        })
        .collect();

    let area: Vec<&str> = [&person.ward, &person.sub_county, &person.county]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();

    let found_line = person
        .date_found
        .map(|d| format!("<p><strong>Found:</strong> {}</p>", d.format("%d %B %Y")))
        .unwrap_or_default();

    let body = format!(
        r#"<article class="card person-detail">
    <h1>{name}</h1>
    {badge}
    <p><strong>Gender:</strong> {gender} &middot; <strong>Age:</strong> {age}</p>
    <p><strong>Last seen:</strong> {location}</p>
    <p><strong>Area:</strong> {area}</p>
    <p><strong>Reported:</strong> {reported}</p>
    {found_line}
    <h2>Description</h2>
    <p>{description}</p>
    <h2>Photos</h2>
    {photos}
    <h2>Contacts</h2>
    <ul>{contacts}</ul>
</article>"#,
        name = escape(&person.name),
        badge = status_badge(person),
        gender = person.gender.label(),
        age = age_text(person.age),
        location = escape(&person.last_seen_location),
        area = if area.is_empty() { "Not provided".to_string() } else { escape(&area.join(", ")) },
        reported = person.created_at.format("%d %B %Y"),
        found_line = found_line,
        description = escape(&person.description),
        photos = if photos.is_empty() { "<p>No photos provided.</p>".to_string() } else { photos },
        contacts = contacts,
    );

    Ok(page(&person.name, &body))
}
