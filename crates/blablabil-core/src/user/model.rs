//! User account model shared by the session layer and the API surface.

use serde::{Deserialize, Serialize};

/// A registered rider or driver as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier, opaque to the client.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Phone number in the form used for login.
    pub phone: String,
    /// Grants access to the admin surface.
    #[serde(default)]
    pub is_admin: bool,
    /// URL of the uploaded avatar, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Average review score. Absent for accounts with no reviews yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<RidePreferences>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a partial update in place. Fields absent from the update
    /// keep their current value.
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(profile_picture) = update.profile_picture {
            self.profile_picture = Some(profile_picture);
        }
        if let Some(date_of_birth) = update.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(bio) = update.bio {
            self.bio = Some(bio);
        }
        if let Some(preferences) = update.preferences {
            self.preferences = Some(preferences);
        }
    }
}

/// Partial user update. Doubles as the profile update payload, so only
/// fields that are set are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<RidePreferences>,
}

/// Ride comfort preferences shown on trip and profile pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RidePreferences {
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub pets: bool,
    #[serde(default = "default_true")]
    pub music: bool,
    #[serde(default = "default_true")]
    pub chatty: bool,
}

impl Default for RidePreferences {
    fn default() -> Self {
        Self {
            smoking: false,
            pets: false,
            music: true,
            chatty: true,
        }
    }
}

fn default_true() -> bool {
    true
}
