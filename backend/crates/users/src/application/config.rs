//! Users Module Configuration

/// Configuration shared by the user use cases
#[derive(Debug, Clone, Default)]
pub struct UsersConfig {
    /// Optional application-wide pepper mixed into password hashes
    pub password_pepper: Option<Vec<u8>>,
}

impl UsersConfig {
    pub fn new(password_pepper: Option<Vec<u8>>) -> Self {
        Self { password_pepper }
    }

    /// Pepper bytes for hashing, if configured
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
