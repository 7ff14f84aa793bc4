//! The signed-in user, as handed over by the external identity provider.
//!
//! reelpress never signs anyone in or out; it reads the session once at
//! startup and passes it around behind an `Arc`.

use crate::core::config::ResolvedConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<CurrentUser>,
    token: Option<String>,
}

impl Session {
    pub fn new(user: Option<CurrentUser>, token: Option<String>) -> Self {
        Self { user, token }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let user = config
            .user_id
            .as_ref()
            .filter(|id| !id.is_empty())
            .map(|id| CurrentUser {
                id: id.clone(),
                username: config.username.clone(),
            });
        Self::new(user, config.session_token.clone())
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Name for the title bar.
    pub fn display_name(&self) -> &str {
        match &self.user {
            Some(CurrentUser {
                username: Some(name),
                ..
            }) => name,
            Some(user) => &user.id,
            None => "guest",
        }
    }
}
