/// Credentials for authenticating against a repository.
///
/// Two credential values are considered equal when they name the same
/// identity; the secret does not participate in equality.
#[derive(Clone, Debug)]
pub struct Credentials {
    user_id: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from an identity name and its password.
    pub fn with_password(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// The identity these credentials authenticate as.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The secret presented at login.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

impl Eq for Credentials {}
