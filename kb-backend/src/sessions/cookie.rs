//! Signed session cookie: `<token>.<base64url(HMAC-SHA256(secret, token))>`

use actix_web::cookie::{time, Cookie, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const SESSION_COOKIE: &str = "kb.sid";

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct CookieSigner {
    key: Vec<u8>,
}

impl CookieSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length")
    }

    pub fn sign(&self, token: &str) -> String {
        let mut mac = self.mac();
        mac.update(token.as_bytes());
        let sig = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{}.{}", token, sig)
    }

    /// Return the token if the signature checks out
    pub fn verify(&self, value: &str) -> Option<String> {
        let (token, sig) = value.rsplit_once('.')?;
        if token.is_empty() {
            return None;
        }
        let sig = URL_SAFE_NO_PAD.decode(sig).ok()?;

        let mut mac = self.mac();
        mac.update(token.as_bytes());
        mac.verify_slice(&sig).ok()?;
        Some(token.to_string())
    }
}

/// Cookie carrying a signed session value
pub fn session_cookie(signed_value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, signed_value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age_secs))
        .finish()
}

/// Cookie that tells the browser to drop the session
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish();
    cookie.make_removal();
    cookie
}
