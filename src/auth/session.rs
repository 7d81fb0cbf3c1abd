use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};

/// Cookie carrying the signed username of the logged-in client.
pub const SESSION_COOKIE: &str = "session";

/// Derive the cookie signing key from the configured secret.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(&digest)
}

/// Username bound to this client's session, if the cookie is present and its
/// signature checks out.
pub fn current_user(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| decode_username(cookie.value()))
        .filter(|username| !username.is_empty())
}

pub fn establish(jar: SignedCookieJar, username: &str, secure: bool) -> SignedCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, encode_username(username)))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/");

    jar.add(cookie)
}

pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

// Hex keeps arbitrary usernames inside the cookie value grammar
fn encode_username(username: &str) -> String {
    username.bytes().map(|b| format!("{:02x}", b)).collect()
}

fn decode_username(value: &str) -> Option<String> {
    if value.len() % 2 != 0 {
        return None;
    }
    let bytes = (0..value.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(value.get(i..i + 2)?, 16).ok())
        .collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}
