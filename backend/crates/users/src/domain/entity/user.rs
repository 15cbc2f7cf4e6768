//! User Entity

use kernel::id::UserId;

/// A registered account
///
/// `auth_token` is the single live session token, or `None` when the user
/// is logged out. `image_filename` points into the flat image store.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
    pub auth_token: Option<String>,
    pub image_filename: Option<String>,
}

impl User {
    /// Whether this user is the one identified by `id`
    pub fn is(&self, id: UserId) -> bool {
        self.user_id == id
    }
}

/// Fields required to create an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Partial profile update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
}

impl ProfileChanges {
    /// Whether the update would change nothing
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.password_hash.is_none()
    }
}
