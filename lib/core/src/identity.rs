use serde::{Deserialize, Serialize};

/// Authenticated user identity, passed explicitly into every core
/// operation. There is no ambient current-user singleton: whoever calls
/// the service supplies the identity the operation runs as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Stable user identifier from the identity provider.
    pub uid: String,

    /// Email address from the identity provider.
    pub email: String,

    /// Opaque profile image URL from the media resolver, forwarded
    /// uninterpreted into check-in and post records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl UserContext {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            profile_image: None,
        }
    }

    /// Display name: the local part of the email address.
    ///
    /// This derivation decides display identity across check-in, post,
    /// and comment records, so all of them must go through here.
    pub fn username(&self) -> &str {
        self.email.split('@').next().unwrap_or("")
    }
}
