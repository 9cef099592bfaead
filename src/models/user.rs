use serde::{Deserialize, Serialize};

/// Credential record held by the identity backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}

/// Profile record under the store's `users` namespace. Kept separate from the
/// credential record on purpose: authentication can succeed while the profile
/// is missing, and that case must be treated as a hard stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub role: String,
}
