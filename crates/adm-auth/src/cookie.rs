//! `Cookie` header parsing and `Set-Cookie` construction.

/// Find the value of cookie `name` in a `Cookie` request header.
///
/// Returns the first match. Values are returned as-is (no percent-decoding).
#[must_use]
pub fn find<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

/// `Set-Cookie` value for an active session.
#[must_use]
pub fn session(name: &str, value: &str, max_age_secs: u64) -> String {
    format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value that immediately expires the session.
#[must_use]
pub fn expired(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
