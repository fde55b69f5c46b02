//! Page chrome for the staff console

use axum::http::header;
use axum::response::IntoResponse;
use knmp_common::html::escape;
use knmp_common::KNMP_CSS;

pub const CONSOLE_NAME: &str = "KNMPDB Staff Console";

/// Full HTML document around `body`; `title` is escaped, `body` is not
///
/// `show_logout` adds the logout button to the header.
pub fn render_page(title: &str, body: &str, show_logout: bool) -> String {
    let logout = if show_logout {
        r#"<form method="post" action="/logout" class="inline"><button type="submit">Log out</button></form>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {console}</title>
    <link rel="stylesheet" href="/static/knmp.css">
</head>
<body>
    <header class="site-header">
        <a class="brand" href="/">{console}</a>
        <nav>
            <a href="/">Dashboard</a>
            {logout}
        </nav>
    </header>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        console = CONSOLE_NAME,
        logout = logout,
        body = body,
    )
}

/// GET /static/knmp.css
pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], KNMP_CSS)
}

/// `<ul>` of error messages, empty when there are none
pub fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!(r#"<div class="notice error" role="alert"><ul>{}</ul></div>"#, items)
}
