use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::Client as S3Client;

/// Object storage seam. Production uploads to a MinIO bucket through the
/// S3 API; tests substitute an in-memory fake.
#[axum::async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a file and return the public URL it will be served from.
    async fn upload(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<String, String>;
}

#[derive(Clone)]
pub struct S3BlobStore {
    client: S3Client,
    bucket: String,
    public_url: String,
}

impl S3BlobStore {
    pub async fn new(
        endpoint: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
        public_url: &str,
    ) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "minio");

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(endpoint)
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        let client = S3Client::from_conf(config);

        // Ensure bucket exists
        let _ = client.create_bucket().bucket(bucket).send().await;

        tracing::info!(endpoint = %endpoint, bucket = %bucket, "blob store initialized");

        Self {
            client,
            bucket: bucket.to_string(),
            public_url: public_url.to_string(),
        }
    }
}

#[axum::async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<String, String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body.into())
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| format!("upload failed: {e}"))?;

        Ok(format!("{}/{}/{}", self.public_url, self.bucket, key))
    }
}
