use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Repository record as returned by `GET /users/{user}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub star_count: u32,
    pub primary_language: Option<String>,
    pub topics: BTreeSet<String>,
    pub url: String,
}
