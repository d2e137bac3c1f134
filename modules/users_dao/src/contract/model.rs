use std::fmt;

use serde::{Deserialize, Serialize};

/// Profile attached to every user. Stored denormalized on the `user` row
/// (`profile_id`, `profile_info`), there is no separate profile table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i32,
    pub profile_info: String,
}

impl UserProfile {
    pub fn new(id: i32, profile_info: impl Into<String>) -> Self {
        Self {
            id,
            profile_info: profile_info.into(),
        }
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.profile_info)
    }
}

/// User entity as persisted in the `user` table.
///
/// `id` is `None` until the row has been inserted; the repository fills it
/// with the database-generated key. The password is stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i32>,
    pub login: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub user_name: String,
    pub email: String,
    pub active: bool,
    pub user_profile: UserProfile,
}

impl User {
    /// Build a user that has not been persisted yet.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        user_name: impl Into<String>,
        email: impl Into<String>,
        active: bool,
        user_profile: UserProfile,
    ) -> Self {
        Self {
            id: None,
            login: login.into(),
            password: password.into(),
            user_name: user_name.into(),
            email: email.into(),
            active,
            user_profile,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "User#{id}")?,
            None => f.write_str("User#new")?,
        }
        write!(
            f,
            " [login={}, name={}, email={}, active={}, profile={}]",
            self.login, self.user_name, self.email, self.active, self.user_profile
        )
    }
}
