use log::debug;
use url::Url;

use super::core::GitLabClient;
use crate::auth::Token;
use crate::error::Result;
use crate::providers::gitlab::links::{credentialed_clone_url, redact};
use crate::providers::gitlab::types::{CreateProjectRequest, Project};

impl GitLabClient {
    /// Fetch a project by its full path (e.g., "teamA/sub1/repo1").
    pub async fn fetch_project(&self, path_with_namespace: &str) -> Result<Project> {
        let url = self.endpoint(&format!(
            "projects/{}",
            urlencoding::encode(path_with_namespace)
        ))?;
        self.get_json(url).await
    }

    /// List the projects that belong directly to a group, all pages.
    ///
    /// Projects shared into the group from elsewhere and projects of subgroups
    /// are not included.
    pub async fn list_projects(&self, group_id: u64) -> Result<Vec<Project>> {
        self.get_all_pages(
            &format!("groups/{group_id}/projects"),
            &[("with_shared", "false")],
        )
        .await
    }

    /// Ask this instance to create a project that imports `source` from another instance.
    ///
    /// The call only triggers the import. GitLab clones the repository in the
    /// background after answering 201, and nothing here waits for it.
    ///
    /// # Arguments
    ///
    /// * `source` - Project as read from the source instance
    /// * `source_base_url` - Source instance base URL the clone URL is built from
    /// * `source_token` - Token the target uses to pull from the source
    /// * `namespace_id` - Target group the project is created in
    ///
    /// # Errors
    ///
    /// Any answer other than 201 is returned as `ApiError`; callers check
    /// `is_already_exists()` for the re-run case.
    pub async fn import_project(
        &self,
        source: &Project,
        source_base_url: &Url,
        source_token: &Token,
        namespace_id: u64,
    ) -> Result<Project> {
        let import_url =
            credentialed_clone_url(source_base_url, &source.path_with_namespace, source_token)?;
        debug!(
            "Importing {} from {}",
            source.path_with_namespace,
            redact(&import_url)
        );

        let url = self.endpoint("projects")?;
        let body = CreateProjectRequest {
            name: &source.name,
            path: &source.path,
            namespace_id,
            import_url: import_url.as_str(),
            description: source.description.as_deref(),
            visibility: source.visibility,
        };
        self.post_json(url, &body).await
    }
}
