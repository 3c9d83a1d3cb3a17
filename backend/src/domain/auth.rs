//! Authentication primitives: login credentials, password digests and access
//! tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use pbkdf2::Pbkdf2;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::{EmailAddress, User};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was blank or malformed.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised (trimmed, lowercase).
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Test@Gmail.com", "password123").unwrap();
/// assert_eq!(creds.email().as_ref(), "test@gmail.com");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the user lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised when deriving or parsing a password digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordDigestError {
    /// The stored value was not a `pbkdf2-sha256` PHC string.
    #[error("password digest must be a pbkdf2-sha256 PHC string")]
    Malformed,
    /// Deriving a digest failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Algorithm identifier accepted in stored digests.
const PASSWORD_ALGORITHM: &str = "pbkdf2-sha256";

/// Random salt bytes per digest.
const PASSWORD_SALT_BYTES: usize = 16;

/// PBKDF2-HMAC-SHA256 password digest held in PHC string form.
///
/// # Examples
/// ```
/// use backend::domain::PasswordDigest;
///
/// let digest = PasswordDigest::hash("password123").unwrap();
/// assert!(digest.encode().starts_with("$pbkdf2-sha256$"));
/// assert!(digest.verify("password123"));
/// assert!(!digest.verify("password124"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    phc: String,
}

impl PasswordDigest {
    /// Derive a digest of `password` under a fresh random salt.
    pub fn hash(password: &str) -> Result<Self, PasswordDigestError> {
        let mut salt_bytes = [0_u8; PASSWORD_SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordDigestError::Hash(err.to_string()))?;
        let phc = Pbkdf2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordDigestError::Hash(err.to_string()))?
            .to_string();
        Ok(Self { phc })
    }

    /// Parse a stored PHC string.
    pub fn parse(encoded: &str) -> Result<Self, PasswordDigestError> {
        let parsed = PasswordHash::new(encoded).map_err(|_| PasswordDigestError::Malformed)?;
        if parsed.algorithm.as_str() != PASSWORD_ALGORITHM
            || parsed.salt.is_none()
            || parsed.hash.is_none()
        {
            return Err(PasswordDigestError::Malformed);
        }
        Ok(Self {
            phc: encoded.to_owned(),
        })
    }

    /// Whether `password` derives to this digest. The comparison runs in
    /// constant time.
    pub fn verify(&self, password: &str) -> bool {
        PasswordHash::new(&self.phc)
            .is_ok_and(|parsed| Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok())
    }

    /// PHC string for storage.
    pub fn encode(&self) -> String {
        self.phc.clone()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Number of random bytes in a freshly issued access token.
pub const ACCESS_TOKEN_BYTES: usize = 32;

/// Opaque bearer credential returned by login.
///
/// The raw value is only ever held in memory by the client; stores keep the
/// [`TokenFingerprint`].
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Issue a new random token.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; ACCESS_TOKEN_BYTES]);
        rand::thread_rng().fill_bytes(&mut bytes[..]);
        Self(Zeroizing::new(URL_SAFE_NO_PAD.encode(&bytes[..])))
    }

    /// Wrap a token presented by a client. Returns `None` when blank.
    pub fn from_presented(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token text.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Storage fingerprint of this token.
    pub fn fingerprint(&self) -> TokenFingerprint {
        let digest = Sha256::digest(self.0.as_bytes());
        TokenFingerprint(hex::encode(digest))
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Hex-encoded SHA-256 of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    /// Rebuild a fingerprint loaded from storage.
    pub fn from_hex(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AsRef<str> for TokenFingerprint {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Successful login: the user, their token and when it lapses.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Authenticated user.
    pub user: User,
    /// Token to present on subsequent requests.
    pub token: AccessToken,
    /// Instant after which the token no longer resolves.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[rstest]
    #[case("", "pw", LoginValidationError::InvalidEmail)]
    #[case("   ", "pw", LoginValidationError::InvalidEmail)]
    #[case("not-an-email", "pw", LoginValidationError::InvalidEmail)]
    #[case("user@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds =
            LoginCredentials::try_from_parts("user@example.com", " pw ").expect("valid inputs");
        assert_eq!(creds.password(), " pw ");
    }

    #[fixture]
    fn digest() -> PasswordDigest {
        PasswordDigest::hash("password123").expect("hashing succeeds")
    }

    #[rstest]
    #[case("password123", true)]
    #[case("Password123", false)]
    #[case("wrongpass", false)]
    #[case("", false)]
    fn digest_verifies_only_the_original_password(
        digest: PasswordDigest,
        #[case] attempt: &str,
        #[case] ok: bool,
    ) {
        assert_eq!(digest.verify(attempt), ok);
    }

    #[rstest]
    fn digests_use_fresh_salts(digest: PasswordDigest) {
        let again = PasswordDigest::hash("password123").expect("hashing succeeds");
        assert_ne!(digest.encode(), again.encode());
        assert!(again.verify("password123"));
    }

    #[rstest]
    fn digest_parses_its_encoding(digest: PasswordDigest) {
        let encoded = digest.encode();
        assert!(encoded.starts_with("$pbkdf2-sha256$"));
        let parsed = PasswordDigest::parse(&encoded).expect("encoded digest parses");
        assert!(parsed.verify("password123"));
    }

    #[rstest]
    #[case("no-separator")]
    #[case("salt$0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef")]
    #[case("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA")]
    #[case("$pbkdf2-sha256$i=1000,l=32$c2FsdHNhbHQ")]
    fn digest_rejects_foreign_encodings(#[case] encoded: &str) {
        assert_eq!(
            PasswordDigest::parse(encoded),
            Err(PasswordDigestError::Malformed)
        );
    }

    #[rstest]
    fn generated_tokens_are_url_safe_and_distinct() {
        let first = AccessToken::generate();
        let second = AccessToken::generate();

        assert_ne!(first, second);
        assert_eq!(first.expose().len(), 43);
        assert!(
            first
                .expose()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[rstest]
    fn fingerprint_is_stable_and_hides_the_token() {
        let token = AccessToken::from_presented("abc").expect("non-blank token");
        let fingerprint = token.fingerprint();

        assert_eq!(fingerprint, token.fingerprint());
        assert_eq!(
            fingerprint.as_ref(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_presented_tokens_are_ignored(#[case] raw: &str) {
        assert!(AccessToken::from_presented(raw).is_none());
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let token = AccessToken::from_presented("secret-token").expect("token");
        assert!(!format!("{token:?}").contains("secret-token"));
        let digest = PasswordDigest::hash("password123").expect("hashing succeeds");
        assert_eq!(format!("{digest:?}"), "PasswordDigest(<redacted>)");
    }
}
