use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha512};

const FLASH_COOKIE: &str = "flash";
const CSRF_COOKIE: &str = "csrf";
const CSRF_TOKEN_LEN: usize = 32;

/// Derives the cookie signing key. `Key::from` needs 64 bytes, which SHA-512 provides for any secret.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Returns the CSRF token bound to this browser, minting one if the cookie is absent or tampered with.
pub fn csrf_token(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(cookie) = jar.get(CSRF_COOKIE) {
        let token = cookie.value().to_string();
        return (jar, token);
    }

    let token: String =
        rand::rng().sample_iter(&Alphanumeric).take(CSRF_TOKEN_LEN).map(char::from).collect();
    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), token)
}

pub fn csrf_matches(jar: &SignedCookieJar, submitted: &str) -> bool {
    !submitted.is_empty() && jar.get(CSRF_COOKIE).is_some_and(|c| c.value() == submitted)
}

pub fn set_flash(jar: SignedCookieJar, message: impl AsRef<str>) -> SignedCookieJar {
    let value = urlencoding::encode(message.as_ref()).into_owned();
    let cookie = Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(5));
    jar.add(cookie)
}

/// Reads the pending flash message and clears it.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let message = urlencoding::decode(cookie.value()).ok().map(|m| m.into_owned());
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), message)
}
