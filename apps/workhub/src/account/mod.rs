// Account pages: profile editing, curated links, CV uploads and sign-out.

pub mod handlers;
pub mod view;

use serde::Deserialize;

use crate::models::profile::ProfileUpdate;

/// Profile form as submitted. Blank optional fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl From<ProfileForm> for ProfileUpdate {
    fn from(form: ProfileForm) -> Self {
        ProfileUpdate {
            // always sent, so a blank name is rejected rather than ignored
            display_name: Some(form.display_name.trim().to_string()),
            headline: non_blank(&form.headline),
            location: non_blank(&form.location),
            website: non_blank(&form.website),
        }
    }
}
