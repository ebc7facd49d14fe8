use reqwest::{RequestBuilder, Response};

use crate::error::{BackupError, Result};

/// Sends the request and turns any non-2xx status into [`BackupError::Status`].
pub async fn send_checked(request: RequestBuilder, context: &str) -> Result<Response> {
    let response = request.send().await?;

    if !response.status().is_success() {
        return Err(BackupError::Status {
            status: response.status(),
            context: context.to_string(),
        });
    }

    Ok(response)
}
