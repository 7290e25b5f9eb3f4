use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Student,
    Teacher,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub full_name: String,
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
}

fn default_level() -> u32 {
    1
}

impl Profile {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            xp: 0,
            level: default_level(),
            streak_days: 0,
            avatar_url: None,
            last_activity_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedInUser {
    pub id: Uuid,
    pub email: String,
    pub access_token: String,
    pub role: Option<AppRole>,
}

/// Per-user state passed explicitly to everything that talks to the backend.
///
/// Built when a user signs in and consumed by [`SessionContext::sign_out`].
/// An anonymous context carries no user and falls back to the publishable key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    user: Option<SignedInUser>,
    profile: Option<Profile>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in(
        id: Uuid,
        email: impl Into<String>,
        access_token: impl Into<String>,
        role: Option<AppRole>,
    ) -> Self {
        let user = SignedInUser {
            id,
            email: email.into(),
            access_token: access_token.into(),
            role,
        };
        info!(user_id = %user.id, role = ?user.role, "Session started");
        Self {
            user: Some(user),
            profile: None,
        }
    }

    /// Ends the session; cached profile and token go with it.
    pub fn sign_out(self) -> SessionContext {
        if let Some(user) = &self.user {
            info!(user_id = %user.id, "Session ended");
        }
        SessionContext::anonymous()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn role(&self) -> Option<AppRole> {
        self.user.as_ref().and_then(|u| u.role)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.access_token.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Replace the cached profile. Ignored for anonymous contexts.
    pub fn refresh_profile(&mut self, profile: Profile) {
        if self.user.is_some() {
            self.profile = Some(profile);
        }
    }
}
