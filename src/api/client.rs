/// HTTP calls against the expressions backend
///
/// Every call is a standalone async function taking the resolved
/// `ApiConfig`, so it can be handed to `Task::perform` from the update
/// loop. Calls carry no timeout or cancellation: a hung request simply
/// keeps its triggering control disabled until it resolves.

use reqwest::multipart::{Form, Part};

use crate::api::types::{Expression, MetadataUpdate, NewExpression};
use crate::config::ApiConfig;

/// Failure of one backend call.
///
/// `Clone` so results can ride inside application messages.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("server responded with status {0}")]
    Status(u16),
    /// The request never completed (connection refused, DNS, ...)
    #[error("network error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport(error.to_string())
    }
}

/// Turn a non-success response into an error, keeping only the status code
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status().as_u16()))
    }
}

/// Fetch the full expression collection
pub async fn fetch_expressions(config: ApiConfig) -> Result<Vec<Expression>, ApiError> {
    let response = reqwest::Client::new()
        .get(config.expressions_url())
        .send()
        .await?;

    let expressions = check_status(response)?.json::<Vec<Expression>>().await?;

    println!("📋 Fetched {} expressions", expressions.len());
    Ok(expressions)
}

/// Upload a new GIF plus its metadata as a multipart form.
/// Tags are sent as the raw comma-separated line; the backend splits them.
pub async fn create_expression(
    config: ApiConfig,
    upload: NewExpression,
) -> Result<Expression, ApiError> {
    let gif_part = Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str("image/gif")?;

    let form = Form::new()
        .part("gif", gif_part)
        .text("title", upload.title)
        .text("description", upload.description)
        .text("tags", upload.tags_raw);

    let response = reqwest::Client::new()
        .post(config.expressions_url())
        .multipart(form)
        .send()
        .await?;

    let expression = check_status(response)?.json::<Expression>().await?;

    println!("✅ Uploaded expression {}", expression.id);
    Ok(expression)
}

/// Replace the metadata of one record (full replace, no partial update)
pub async fn update_metadata(
    config: ApiConfig,
    id: String,
    update: MetadataUpdate,
) -> Result<(), ApiError> {
    let response = reqwest::Client::new()
        .put(config.expression_url(&id))
        .json(&update)
        .send()
        .await?;

    check_status(response)?;

    println!("💾 Saved metadata for {}", id);
    Ok(())
}

/// Remove one record and its stored files
pub async fn delete_expression(config: ApiConfig, id: String) -> Result<(), ApiError> {
    let response = reqwest::Client::new()
        .delete(config.expression_url(&id))
        .send()
        .await?;

    check_status(response)?;

    println!("🗑️  Deleted expression {}", id);
    Ok(())
}

/// Fetch the processed GIF bytes for one record
pub async fn download_gif(config: ApiConfig, id: String) -> Result<Vec<u8>, ApiError> {
    let response = reqwest::Client::new()
        .get(config.download_url(&id))
        .send()
        .await?;

    let bytes = check_status(response)?.bytes().await?;

    Ok(bytes.to_vec())
}

/// Fetch the processed GIF and write it to a local path chosen by the user
pub async fn download_gif_to(
    config: ApiConfig,
    id: String,
    destination: std::path::PathBuf,
) -> Result<(), ApiError> {
    let bytes = download_gif(config, id.clone()).await?;

    tokio::fs::write(&destination, bytes)
        .await
        .map_err(|error| ApiError::Transport(format!("failed to write file: {}", error)))?;

    println!("📥 Downloaded {} to {}", id, destination.display());
    Ok(())
}
