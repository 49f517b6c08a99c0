use super::core::GitLabClient;
use crate::error::Result;
use crate::providers::gitlab::types::{CreateGroupRequest, Group};

impl GitLabClient {
    /// Fetch a group by its full path (e.g., "teamA/sub1").
    ///
    /// # Errors
    ///
    /// Returns `ApiError` with status 404 when the group does not exist.
    pub async fn fetch_group(&self, full_path: &str) -> Result<Group> {
        let url = self.endpoint(&format!("groups/{}", urlencoding::encode(full_path)))?;
        self.get_json(url).await
    }

    /// List the direct subgroups of a group, all pages.
    pub async fn list_subgroups(&self, group_id: u64) -> Result<Vec<Group>> {
        self.get_all_pages(&format!("groups/{group_id}/subgroups"), &[])
            .await
    }

    /// Create a subgroup under `parent_id` with the name, path and visibility of `source`.
    ///
    /// # Errors
    ///
    /// Any answer other than 201, conflicts included, is returned as `ApiError`.
    pub async fn create_subgroup(&self, source: &Group, parent_id: u64) -> Result<Group> {
        let url = self.endpoint("groups")?;
        let body = CreateGroupRequest {
            name: &source.name,
            path: &source.path,
            parent_id,
            visibility: source.visibility,
        };
        self.post_json(url, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Token;
    use crate::error::MigratorError;
    use crate::providers::gitlab::types::Visibility;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn group_json(id: u64, path: &str, full_path: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": path.to_uppercase(),
            "path": path,
            "full_path": full_path,
            "visibility": "private",
            "web_url": format!("https://gitlab.example.com/groups/{full_path}")
        })
    }

    fn page_query(page: usize) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
        ])
    }

    #[tokio::test]
    async fn test_fetch_group_decodes_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                Matcher::Regex(r"^/api/v4/groups/teamA(%2F|/)sub1$".to_string()),
            )
            .match_header("PRIVATE-TOKEN", "glpat-source")
            .with_status(200)
            .with_body(group_json(2, "sub1", "teamA/sub1").to_string())
            .create_async()
            .await;

        let client = GitLabClient::new(&server.url(), Token::from("glpat-source"), None).unwrap();
        let group = client.fetch_group("teamA/sub1").await.unwrap();

        assert_eq!(
            group,
            Group {
                id: 2,
                name: "SUB1".to_string(),
                path: "sub1".to_string(),
                full_path: "teamA/sub1".to_string(),
                visibility: Visibility::Private,
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_group_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v4/groups/missing")
            .with_status(404)
            .with_body(r#"{"message":"404 Group Not Found"}"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&server.url(), Token::from("t"), None).unwrap();
        let err = client.fetch_group("missing").await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("404 Group Not Found"));
    }

    #[tokio::test]
    async fn test_list_subgroups_full_page_then_empty() {
        let mut server = Server::new_async().await;
        let first_page: Vec<_> = (1..=100)
            .map(|i| group_json(100 + i, &format!("g{i}"), &format!("teamA/g{i}")))
            .collect();

        let page_1 = server
            .mock("GET", "/api/v4/groups/1/subgroups")
            .match_query(page_query(1))
            .with_status(200)
            .with_body(serde_json::Value::Array(first_page).to_string())
            .expect(1)
            .create_async()
            .await;
        let page_2 = server
            .mock("GET", "/api/v4/groups/1/subgroups")
            .match_query(page_query(2))
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let client = GitLabClient::new(&server.url(), Token::from("t"), None).unwrap();
        let groups = client.list_subgroups(1).await.unwrap();

        assert_eq!(groups.len(), 100);
        assert_eq!(groups[0].path, "g1");
        assert_eq!(groups[99].path, "g100");
        page_1.assert_async().await;
        page_2.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_subgroups_preserves_page_order() {
        let mut server = Server::new_async().await;
        let pages = [
            json!([group_json(2, "b", "teamA/b"), group_json(3, "a", "teamA/a")]),
            json!([group_json(4, "c", "teamA/c")]),
            json!([]),
        ];
        let mut mocks = Vec::new();
        for (index, body) in pages.iter().enumerate() {
            let mock = server
                .mock("GET", "/api/v4/groups/1/subgroups")
                .match_query(page_query(index + 1))
                .with_status(200)
                .with_body(body.to_string())
                .create_async()
                .await;
            mocks.push(mock);
        }

        let client = GitLabClient::new(&server.url(), Token::from("t"), None).unwrap();
        let paths: Vec<String> = client
            .list_subgroups(1)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.path)
            .collect();

        assert_eq!(paths, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_create_subgroup_copies_source_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v4/groups")
            .match_header("PRIVATE-TOKEN", "glpat-target")
            .match_body(Matcher::Json(json!({
                "name": "SUB1",
                "path": "sub1",
                "parent_id": 10,
                "visibility": "private"
            })))
            .with_status(201)
            .with_body(group_json(20, "sub1", "teamB/sub1").to_string())
            .create_async()
            .await;

        let source = Group {
            id: 2,
            name: "SUB1".to_string(),
            path: "sub1".to_string(),
            full_path: "teamA/sub1".to_string(),
            visibility: Visibility::Private,
        };

        let client = GitLabClient::new(&server.url(), Token::from("glpat-target"), None).unwrap();
        let created = client.create_subgroup(&source, 10).await.unwrap();

        assert_eq!(created.id, 20);
        assert_eq!(created.full_path, "teamB/sub1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_subgroup_conflict_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/v4/groups")
            .with_status(400)
            .with_body(r#"{"message":"Failed to save group {:path=>[\"has already been taken\"]}"}"#)
            .create_async()
            .await;

        let source = Group {
            id: 2,
            name: "SUB1".to_string(),
            path: "sub1".to_string(),
            full_path: "teamA/sub1".to_string(),
            visibility: Visibility::Public,
        };

        let client = GitLabClient::new(&server.url(), Token::from("t"), None).unwrap();
        let err = client.create_subgroup(&source, 10).await.unwrap_err();

        assert!(matches!(err, MigratorError::ApiError { status: 400, .. }));
    }
}
