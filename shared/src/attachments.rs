use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, Client};
use lambda_http::tracing;
use std::fmt::Debug;
use std::time::Duration;

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait AttachmentStore: Debug {
    /// Time-limited URL granting direct write access to the attachment
    /// object, without further authentication.
    async fn presigned_upload_url(&self, attachment_id: &str) -> Result<String, String>;
    /// Public URL of the attachment object, stored on the todo item.
    fn attachment_url(&self, attachment_id: &str) -> String;
}

#[derive(Debug)]
pub struct S3AttachmentStore {
    bucket_name: String,
    url_expiration: u64,
    s3_client: Client,
}

impl S3AttachmentStore {
    pub fn new(bucket_name: String, url_expiration: u64, s3_client: Client) -> Self {
        Self {
            bucket_name,
            url_expiration,
            s3_client,
        }
    }
}

#[async_trait]
impl AttachmentStore for S3AttachmentStore {
    async fn presigned_upload_url(&self, attachment_id: &str) -> Result<String, String> {
        tracing::info!(
            "Generating presigned upload url for attachment {}",
            attachment_id
        );

        let presigning_config = PresigningConfig::expires_in(Duration::from_secs(
            self.url_expiration,
        ))
        .map_err(|e| format!("Invalid presigning expiration: {:?}", e))?;

        let presigned = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(attachment_id)
            .presigned(presigning_config)
            .await
            .map_err(|e| format!("Error presigning upload url: {:?}", e))?;

        tracing::info!(
            "Generate presigned upload url for attachment {} success",
            attachment_id
        );

        Ok(presigned.uri().to_string())
    }

    fn attachment_url(&self, attachment_id: &str) -> String {
        format!(
            "https://{}.s3.amazonaws.com/{}",
            self.bucket_name, attachment_id
        )
    }
}
