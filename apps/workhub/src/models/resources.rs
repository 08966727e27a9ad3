use serde::{Deserialize, Serialize};

/// Curated external resource shown on the links page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsefulLink {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A CV file a candidate uploaded to the object store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    pub id: String,
    pub candidate_id: String,
    pub file_name: String,
    pub url: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCurriculum<'a> {
    pub candidate_id: &'a str,
    pub file_name: &'a str,
    pub url: &'a str,
}
