use url::Url;

use crate::auth::Token;
use crate::error::{MigratorError, Result};

const IMPORT_USERNAME: &str = "oauth2";

/// Builds the clone URL the target instance pulls from during an import.
///
/// This is the only place a token is written into a URL. Never log the result;
/// use [`redact`] for that.
///
/// # Arguments
///
/// * `base_url` - Source GitLab instance base URL (e.g., <https://gitlab.com>)
/// * `path_with_namespace` - Project path (e.g., "group/project")
/// * `token` - Source access token
///
/// # Returns
///
/// `https://oauth2:<token>@gitlab.com/group/project.git`
pub fn credentialed_clone_url(
    base_url: &Url,
    path_with_namespace: &str,
    token: &Token,
) -> Result<Url> {
    let mut url = clone_url(base_url, path_with_namespace)?;

    if url.set_username(IMPORT_USERNAME).is_err()
        || url.set_password(Some(token.as_str())).is_err()
    {
        return Err(MigratorError::Config(format!(
            "Cannot embed credentials into {}",
            redact(&url)
        )));
    }

    Ok(url)
}

/// Drops the password from a URL so it can be logged.
pub fn redact(url: &Url) -> String {
    let mut redacted = url.clone();
    // Only fails for URLs that cannot carry credentials at all
    let _ = redacted.set_password(None);
    redacted.to_string()
}

fn clone_url(base_url: &Url, path_with_namespace: &str) -> Result<Url> {
    let raw = format!(
        "{}/{}.git",
        base_url.as_str().trim_end_matches('/'),
        path_with_namespace.trim_matches('/')
    );

    Url::parse(&raw).map_err(|e| MigratorError::Config(format!("Invalid clone URL {raw}: {e}")))
}
