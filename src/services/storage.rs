// src/services/storage.rs
//! Resume blob storage: S3 when configured, local filesystem otherwise.

use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("S3 upload failed: {0}")]
    S3(String),

    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
enum Backend {
    S3 { client: S3Client, bucket: String },
    Local { dir: PathBuf },
}

#[derive(Debug)]
pub struct StorageService {
    backend: Backend,
    public_base: String,
}

impl StorageService {
    /// Build from environment: AWS_S3_BUCKET selects S3, otherwise resumes
    /// are written under `resumes_dir` and served by this API.
    pub async fn from_env(resumes_dir: PathBuf) -> Self {
        let bucket = env::var("AWS_S3_BUCKET").ok().filter(|b| !b.is_empty());

        match bucket {
            Some(bucket) => {
                let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
                let client = S3Client::new(&config);
                let region = config
                    .region()
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "us-east-1".to_string());
                let public_base = env::var("RESUME_PUBLIC_BASE_URL").unwrap_or_else(|_| {
                    format!("https://{}.s3.{}.amazonaws.com", bucket, region)
                });

                info!(bucket = %bucket, "Using S3 resume storage");
                Self {
                    backend: Backend::S3 { client, bucket },
                    public_base,
                }
            }
            None => {
                let public_base = env::var("RESUME_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/api/resumes".to_string());

                info!(dir = %resumes_dir.display(), "Using local resume storage");
                Self {
                    backend: Backend::Local { dir: resumes_dir },
                    public_base,
                }
            }
        }
    }

    /// Local-only storage, used by tests.
    pub fn local(dir: PathBuf, public_base: String) -> Self {
        Self {
            backend: Backend::Local { dir },
            public_base,
        }
    }

    /// Store `data` under `key` and return the publicly resolvable URL.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        match &self.backend {
            Backend::S3 { client, bucket } => {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .content_type(content_type)
                    .body(ByteStream::from(data))
                    .send()
                    .await
                    .map_err(|e| StorageError::S3(e.to_string()))?;
            }
            Backend::Local { dir } => {
                let path = dir.join(key);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, &data).await?;
            }
        }

        Ok(self.public_url(key))
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), key)
    }
}

/// Content type for a resume file extension.
pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
