//! Shared page chrome and fragments

use axum::response::Html;
use knmp_common::db::{Person, PersonWithRelations};
use knmp_common::html::escape;

use crate::wizard::Notice;

pub const SITE_NAME: &str = "Kenya National Missing Persons Database";

/// Full HTML document around `body`; `title` is escaped, `body` is not
pub fn render_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {site}</title>
    <link rel="icon" href="/static/images/favicon.svg" type="image/svg+xml">
    <link rel="stylesheet" href="/static/knmp.css">
</head>
<body>
    <header class="site-header">
        <a class="brand" href="/">KNMPDB</a>
        <nav>
            <a href="/missing-persons/">Missing persons</a>
            <a href="/report-missing-person/">Report a missing person</a>
            <a href="/about/">About</a>
        </nav>
    </header>
    <main>
{body}
    </main>
    <footer class="site-footer">
        <p>{site}</p>
        <a href="/about/">About</a>
        <a href="/privacy-policy/">Privacy policy</a>
        <a href="/terms-of-service/">Terms of service</a>
    </footer>
</body>
</html>
"#,
        title = escape(title),
        site = SITE_NAME,
        body = body,
    )
}

pub fn page(title: &str, body: &str) -> Html<String> {
    Html(render_page(title, body))
}

pub fn notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| {
            format!(
                r#"<div class="notice {}" role="status">{}</div>"#,
                n.level.css_class(),
                escape(&n.message)
            )
        })
        .collect()
}

pub fn status_badge(person: &Person) -> String {
    format!(
        r#"<span class="badge {}">{}</span>"#,
        person.status.as_str(),
        person.status.label()
    )
}

pub fn age_text(age: Option<i64>) -> String {
    age.map(|a| a.to_string()).unwrap_or_else(|| "Unknown".to_string())
}

/// Listing card linking to the detail page
pub fn person_card(entry: &PersonWithRelations) -> String {
    let person = &entry.person;
    let photo = match entry.primary_photo() {
        Some(photo) => format!(
            r#"<img src="{}" alt="{}">"#,
            escape(&photo.url()),
            escape(if photo.alt_text.is_empty() { &person.name } else { &photo.alt_text })
        ),
        None => r#"<div class="placeholder-photo">No photo</div>"#.to_string(),
    };

    format!(
        r#"<article class="card person-card">
    {photo}
    <h3><a href="/missing-person/{slug}/">{name}</a></h3>
    <p>{gender}, age {age}</p>
    <p>Last seen: {location}</p>
    {badge}
</article>"#,
        photo = photo,
        slug = escape(&person.slug),
        name = escape(&person.name),
        gender = person.gender.label(),
        age = age_text(person.age),
        location = escape(&person.last_seen_location),
        badge = status_badge(person),
    )
}
