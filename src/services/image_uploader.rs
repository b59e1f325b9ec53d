use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to reach image host: {0}")]
    Transport(String),
    #[error("Image host rejected the upload with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Unexpected response from image host: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub endpoint_url: String,
    pub upload_preset: String,
}

/// Where the image host stored an upload. Both fields come from the same response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}

/// Pushes an encoded image to remote storage.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Makes exactly one attempt; failures are returned, never retried.
    async fn upload(&self, data_uri: &str) -> Result<UploadedImage, UploadError>;
}

/// Unsigned uploads to a Cloudinary-style endpoint using an upload preset.
pub struct CloudinaryUploader {
    client: Client,
    config: UploaderConfig,
}

impl CloudinaryUploader {
    pub fn new(config: UploaderConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, data_uri: &str) -> Result<UploadedImage, UploadError> {
        let form = [
            ("file", data_uri),
            ("upload_preset", self.config.upload_preset.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        serde_json::from_slice::<UploadedImage>(&body)
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Form, Json, Router, http::StatusCode, response::IntoResponse, routing::post};
    use std::collections::HashMap;
    use std::net::SocketAddr;

    async fn spawn_stub(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn uploader_for(addr: SocketAddr) -> CloudinaryUploader {
        CloudinaryUploader::new(UploaderConfig {
            endpoint_url: format!("http://{addr}/v1_1/demo/image/upload"),
            upload_preset: "recipes".to_string(),
        })
    }

    #[tokio::test]
    async fn test_successful_upload() {
        async fn accept(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
            if form.get("upload_preset").map(String::as_str) != Some("recipes")
                || !form.get("file").is_some_and(|f| f.starts_with("data:image/png;base64,"))
            {
                return (StatusCode::BAD_REQUEST, Json(serde_json::json!({}))).into_response();
            }
            Json(serde_json::json!({
                "secure_url": "https://res.example/demo/abc.png",
                "public_id": "abc",
                "bytes": 4,
            }))
            .into_response()
        }

        let addr = spawn_stub(Router::new().route("/v1_1/demo/image/upload", post(accept))).await;

        let uploaded = uploader_for(addr).upload("data:image/png;base64,AAAA").await.unwrap();
        assert_eq!(uploaded.secure_url, "https://res.example/demo/abc.png");
        assert_eq!(uploaded.public_id, "abc");
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        async fn reject() -> impl IntoResponse {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": { "message": "Upload preset not found" } })),
            )
        }

        let addr = spawn_stub(Router::new().route("/v1_1/demo/image/upload", post(reject))).await;

        let err = uploader_for(addr).upload("data:image/png;base64,AAAA").await.unwrap_err();
        match err {
            UploadError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Upload preset not found"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_is_malformed() {
        async fn garbage() -> impl IntoResponse {
            Json(serde_json::json!({ "url": "http://res.example/abc.png" }))
        }

        let addr = spawn_stub(Router::new().route("/v1_1/demo/image/upload", post(garbage))).await;

        let err = uploader_for(addr).upload("data:image/png;base64,AAAA").await.unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Bind then drop so the port is almost certainly closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = uploader_for(addr).upload("data:image/png;base64,AAAA").await.unwrap_err();
        assert!(matches!(err, UploadError::Transport(_)), "{err:?}");
    }
}
