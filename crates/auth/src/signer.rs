//! HMAC-SHA1 request digests for the Explorer API.

use crate::credentials::ApiCredentials;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Compute the request digest for a canonical filter message.
///
/// This is HMAC-SHA1 keyed by the UTF-8 bytes of `secret` over the UTF-8
/// bytes of `message`, returned as lowercase hex. A missing message signs
/// the same as an empty one.
pub fn digest(secret: &str, message: Option<&str>) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");

    mac.update(message.unwrap_or_default().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Request signer bound to a set of credentials.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self { credentials }
    }

    /// Sign a message and return the hex-encoded digest.
    pub fn sign(&self, message: &str) -> String {
        digest(self.credentials.expose_secret(), Some(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "my_secret_key";

    #[test]
    fn test_digest_known_vectors() {
        assert_eq!(
            digest(SECRET, Some("")),
            "4b4f493acb45332879e4812a98473fc98209fee6"
        );
        assert_eq!(
            digest(SECRET, Some("foo")),
            "155ce81b88766ccd779d515af9ab6081586f077f"
        );
    }

    #[test]
    fn test_missing_message_signs_as_empty() {
        assert_eq!(digest(SECRET, None), digest(SECRET, Some("")));
    }

    #[test]
    fn test_digest_is_deterministic() {
        let message = "mention_sources_types|type:policy|type:blog|timeframe|at";
        assert_eq!(digest(SECRET, Some(message)), digest(SECRET, Some(message)));
    }

    #[test]
    fn test_digest_changes_with_secret_or_message() {
        let base = digest(SECRET, Some("timeframe|at"));

        assert_ne!(base, digest("my_secret_kez", Some("timeframe|at")));
        assert_ne!(base, digest(SECRET, Some("timeframe|au")));
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let sig = digest(SECRET, Some("foo"));

        assert_eq!(sig.len(), 40);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signer_uses_credential_secret() {
        let creds = ApiCredentials::new("key", SECRET).unwrap();
        let signer = RequestSigner::new(&creds);

        assert_eq!(signer.sign("foo"), "155ce81b88766ccd779d515af9ab6081586f077f");
    }
}
