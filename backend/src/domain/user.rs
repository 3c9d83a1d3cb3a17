//! User data model.
//!
//! Users are reference data: they are seeded at startup and never mutated by
//! the timesheet API.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The display name was blank once trimmed.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// The display name exceeds [`DISPLAY_NAME_MAX`] characters.
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong {
        /// Largest accepted length.
        max: usize,
    },
    /// The email address was not of the form `local@domain`.
    #[error("email address is malformed")]
    InvalidEmail,
    /// The avatar was not an absolute URL.
    #[error("avatar url must be an absolute URL")]
    InvalidAvatarUrl,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its hyphenated text form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already parsed UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Human readable name shown in the application header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalised email address used as the login identifier.
///
/// Input is trimmed and lowercased so lookups are case-insensitive.
///
/// # Examples
/// ```
/// use backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Test@Gmail.com ").expect("valid email");
/// assert_eq!(email.as_ref(), "test@gmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        let mut parts = normalised.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None)
                if !local.is_empty() && !domain.is_empty() && !normalised.contains(char::is_whitespace)
        );
        if !well_formed {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is stored normalised (trimmed, lowercase).
/// - `avatar_url`, when present, is an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "Shubham Pawar")]
    name: DisplayName,
    #[schema(value_type = String, example = "shubham@gmail.com")]
    email: EmailAddress,
    #[schema(
        rename = "avatarUrl",
        value_type = Option<String>,
        example = "https://ui-avatars.com/api/?name=Shubham+Pawar"
    )]
    avatar_url: Option<Url>,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, name: DisplayName, email: EmailAddress) -> Self {
        Self {
            id,
            name,
            email,
            avatar_url: None,
        }
    }

    /// Attach an avatar URL.
    pub fn with_avatar(mut self, avatar_url: Url) -> Self {
        self.avatar_url = Some(avatar_url);
        self
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        name: impl Into<String>,
        email: impl AsRef<str>,
        avatar_url: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let user = Self::new(UserId::new(id)?, DisplayName::new(name)?, EmailAddress::new(email)?);
        match avatar_url {
            Some(raw) => {
                let url = Url::parse(raw).map_err(|_| UserValidationError::InvalidAvatarUrl)?;
                Ok(user.with_avatar(url))
            }
            None => Ok(user),
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name shown in the application header.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Avatar image, if the user has one.
    pub fn avatar_url(&self) -> Option<&Url> {
        self.avatar_url.as_ref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: String,
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            avatar_url,
        } = value;
        Self {
            id: id.to_string(),
            name: name.into(),
            email: email.into(),
            avatar_url: avatar_url.map(String::from),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_strings(value.id, value.name, value.email, value.avatar_url.as_deref())
    }
}
