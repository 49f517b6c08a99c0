use log::debug;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::auth::Token;
use crate::error::{MigratorError, Result};

pub(super) const PAGE_SIZE: usize = 100;
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// REST v4 client bound to one GitLab instance and one access token.
pub struct GitLabClient {
    client: Client,
    base_url: Url,
    api_url: Url,
    token: Token,
}

impl GitLabClient {
    pub fn new(base_url: &str, token: Token, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "gitlab-group-migrator/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| MigratorError::Config(format!("Failed to create HTTP client: {e}")))?;

        Self::with_http_client(client, base_url, token)
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn with_http_client(client: Client, base_url: &str, token: Token) -> Result<Self> {
        // Trailing slash so that joins keep a relative-root install like https://host/gitlab
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| MigratorError::Config(format!("Invalid base URL {base_url}: {e}")))?;

        let api_url = base_url
            .join("api/v4/")
            .map_err(|e| MigratorError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Resolves an API path such as `groups/12/subgroups` against `/api/v4/`.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| MigratorError::Config(format!("Invalid API URL for {path}: {e}")))
    }

    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(TOKEN_HEADER, self.token.as_str())
    }

    pub(super) async fn get_json<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("GET {url}");
        let response = self.auth_request(self.client.get(url)).send().await?;
        decode(response, StatusCode::OK).await
    }

    pub(super) async fn post_json<T>(&self, url: Url, body: &impl Serialize) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("POST {url}");
        let response = self
            .auth_request(self.client.post(url).json(body))
            .send()
            .await?;
        decode(response, StatusCode::CREATED).await
    }

    /// Walks `page=1, 2, ...` until the first empty page and concatenates the results.
    ///
    /// Any failing page fails the whole listing; partial results are dropped.
    pub(super) async fn get_all_pages<T>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut all_items = Vec::new();
        let mut page: usize = 1;

        loop {
            let mut url = self.endpoint(path)?;
            url.query_pairs_mut()
                .extend_pairs(extra)
                .append_pair("per_page", &PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());

            let items: Vec<T> = self.get_json(url).await?;
            if items.is_empty() {
                break;
            }

            all_items.extend(items);
            page += 1;
        }

        debug!("Fetched {} items from {path} in {page} requests", all_items.len());

        Ok(all_items)
    }
}

async fn decode<T>(response: Response, expected: StatusCode) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();

    if status != expected {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        return Err(MigratorError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
