use serde::{Deserialize, Serialize};

/// GitLab visibility level, copied verbatim from source to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Internal,
    Public,
}

/// A GitLab group or subgroup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    /// Numeric group ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Last URL segment (e.g., "sub1")
    pub path: String,
    /// Slash-separated path from the top-level group (e.g., "teamA/sub1")
    pub full_path: String,
    pub visibility: Visibility,
}

/// A GitLab project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Numeric project ID
    pub id: u64,
    pub name: String,
    /// Last URL segment (e.g., "repo1")
    pub path: String,
    /// Full path including every parent group (e.g., "teamA/sub1/repo1")
    pub path_with_namespace: String,
    pub visibility: Visibility,
    /// Free-text description, `null` on the wire when never set
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /groups`.
#[derive(Debug, Serialize)]
pub(super) struct CreateGroupRequest<'a> {
    pub name: &'a str,
    pub path: &'a str,
    pub parent_id: u64,
    pub visibility: Visibility,
}

/// Body of `POST /projects`. No `Debug`: `import_url` carries credentials.
#[derive(Serialize)]
pub(super) struct CreateProjectRequest<'a> {
    pub name: &'a str,
    pub path: &'a str,
    pub namespace_id: u64,
    pub import_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub visibility: Visibility,
}
