//! Minimal cookie handling for the session and staff cookies

/// Value of cookie `name` in a `Cookie` request header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}

/// `Set-Cookie` value for an HttpOnly, SameSite=Lax cookie on `/`
///
/// `max_age_secs` of `None` makes it a browser-session cookie.
pub fn set_cookie(name: &str, value: &str, max_age_secs: Option<u64>) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, value);
    if let Some(max_age) = max_age_secs {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    cookie
}

/// `Set-Cookie` value that removes cookie `name`
pub fn clear_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let header = "theme=dark; knmp_session=abc-123 ; other=\"quoted\"";
        assert_eq!(cookie_value(header, "knmp_session"), Some("abc-123"));
        assert_eq!(cookie_value(header, "other"), Some("quoted"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("", "knmp_session"), None);
        assert_eq!(cookie_value("flag", "flag"), None);
    }

    #[test]
    fn test_set_and_clear() {
        assert_eq!(
            set_cookie("a", "b", None),
            "a=b; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(set_cookie("a", "b", Some(60)).ends_with("; Max-Age=60"));
        assert!(clear_cookie("a").contains("Max-Age=0"));
    }
}
