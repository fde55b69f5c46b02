//! Dashboard: summary statistics and every record, newest first

use axum::extract::{Query, State};
use axum::response::Html;
use knmp_common::db::persons;
use knmp_common::html::escape;
use knmp_common::pagination::parse_page;
use serde::Deserialize;

use crate::api::layout;
use crate::stats::{format_median, DashboardStats};
use crate::{AppState, ConsoleResult};

/// Records per dashboard page
pub const PAGE_SIZE: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub page: Option<String>,
}

/// GET /
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> ConsoleResult<Html<String>> {
    let stats = DashboardStats::load(&state.db).await?;
    let page = parse_page(params.page.as_deref());
    let (records, pagination) = persons::list_all(&state.db, page, PAGE_SIZE).await?;

    let rows: String = records
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td><a href="/edit-report/{slug}/">{name}</a></td><td>{gender}</td><td>{age}</td><td>{county}</td><td><span class="badge {status}">{label}</span></td><td>{created}</td></tr>"#,
                slug = escape(&p.slug),
                name = escape(&p.name),
                gender = p.gender.label(),
                age = p.age.map(|a| a.to_string()).unwrap_or_default(),
                county = escape(&p.county),
                status = p.status.as_str(),
                label = p.status.label(),
                created = p.created_at.format("%Y-%m-%d %H:%M"),
            )
        })
        .collect();

    let mut nav = String::new();
    if pagination.has_previous() {
        nav.push_str(&format!(r#"<a href="/?page={}">Previous</a> "#, pagination.page - 1));
    }
    nav.push_str(&format!(
        "Page {} of {} ({} records)",
        pagination.page,
        pagination.total_pages.max(1),
        pagination.total_results
    ));
    if pagination.has_next() {
        nav.push_str(&format!(r#" <a href="/?page={}">Next</a>"#, pagination.page + 1));
    }

    let body = format!(
        r#"<h1>Dashboard</h1>
{stats}
<section class="card">
    <h2>All reports</h2>
    <table class="records">
        <thead><tr><th>Name</th><th>Gender</th><th>Age</th><th>County</th><th>Status</th><th>Reported</th></tr></thead>
        <tbody>{rows}</tbody>
    </table>
    <nav class="pagination">{nav}</nav>
</section>"#,
        stats = stats_panel(&stats),
        rows = rows,
        nav = nav,
    );

    Ok(Html(layout::render_page("Dashboard", &body, state.auth_enabled())))
}

fn stat(value: &str, label: &str) -> String {
    format!(
        r#"<div class="card"><div class="value">{}</div><div class="label">{}</div></div>"#,
        escape(value),
        label
    )
}

fn stats_panel(stats: &DashboardStats) -> String {
    let county = match &stats.top_county {
        Some((county, count)) => format!("{} ({})", county, count),
        None => "N/A".to_string(),
    };

    let mut tiles = vec![
        stat(&stats.total.to_string(), "Total reports"),
        stat(&stats.still_missing.to_string(), "Still missing"),
        stat(&stats.resolved.to_string(), "Resolved cases"),
        stat(&county, "County with most reports"),
        stat(&format_median(stats.median_age), "Median age"),
    ];

    if let [most, least] = stats.gender.as_slice() {
        tiles.push(stat(
            &format!("{} ({}, {}%)", most.gender.label(), most.count, most.percentage),
            "Most reported gender",
        ));
        tiles.push(stat(
            &format!("{} ({}, {}%)", least.gender.label(), least.count, least.percentage),
            "Least reported gender",
        ));
    }

    format!(r#"<section class="grid stats">{}</section>"#, tiles.concat())
}
