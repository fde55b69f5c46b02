//! Informational pages and the favicon redirect

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use super::layout::page;

/// GET /favicon.ico
///
/// Browsers ask for `/favicon.ico` regardless of the `<link rel="icon">`.
pub async fn favicon_redirect() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, "/static/images/favicon.svg")],
    )
        .into_response()
}

/// GET /about/
pub async fn about_page() -> Html<String> {
    page(
        "About",
        r#"<section class="card">
    <h1>About KNMPDB</h1>
    <p>The Kenya National Missing Persons Database is a public register where families and
    communities can report missing persons and share information that helps bring them home.</p>
    <p>Anyone can submit a report. Each report is published with the details and photos provided,
    along with the contacts to reach if the person is seen. Staff review reports and update their
    status when a person is found.</p>
    <p>If you have information about a missing person, please contact the people listed on the
    report or your nearest police station.</p>
</section>"#,
    )
}

/// GET /privacy-policy/
pub async fn privacy_policy_page() -> Html<String> {
    page(
        "Privacy policy",
        r#"<section class="card">
    <h1>Privacy policy</h1>
    <p>Reports, photos and contact details submitted through this site are published so the
    public can help locate the missing person. Do not submit information you are not willing to
    make public.</p>
    <p>Contact phone numbers and email addresses are shown on the report so that people with
    information can reach the family. To correct or remove a report, contact the site staff.</p>
    <p>We keep a session cookie while a report is being filled in. It is used only to remember
    your progress through the report form.</p>
</section>"#,
    )
}

/// GET /terms-of-service/
pub async fn terms_of_service_page() -> Html<String> {
    page(
        "Terms of service",
        r#"<section class="card">
    <h1>Terms of service</h1>
    <p>By submitting a report you confirm that the information is accurate to the best of your
    knowledge and that you have the right to share the photos you upload.</p>
    <p>False reports and misuse of contact information are prohibited. Staff may edit or remove
    reports that are inaccurate, abusive or no longer relevant.</p>
    <p>This site does not replace reporting a missing person to the police.</p>
</section>"#,
    )
}
