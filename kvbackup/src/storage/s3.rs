// File: kvbackup/src/storage/s3.rs
//! S3 implementation of [`ObjectStore`]
//!
//! Credentials come from the standard AWS provider chain (environment,
//! profile, instance metadata). The client is built on first use so runs
//! against local files never load AWS configuration.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use tokio::sync::OnceCell;
use tracing::debug;

use super::remote::{ObjectStore, ObjectStoreError, PutObject, Visibility};
use crate::config::S3Config;

pub struct S3ObjectStore {
    config: S3Config,
    client: OnceCell<Client>,
}

impl S3ObjectStore {
    pub fn new(config: S3Config) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| Self::build_client(&self.config))
            .await
    }

    async fn build_client(config: &S3Config) -> Client {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(ref endpoint) = config.endpoint_url {
            s3_config = s3_config.endpoint_url(endpoint);
        }
        if config.force_path_style {
            s3_config = s3_config.force_path_style(true);
        }

        debug!(
            region = %config.region,
            endpoint = ?config.endpoint_url,
            "S3 client initialized"
        );

        Client::from_conf(s3_config.build())
    }
}

fn canned_acl(visibility: Visibility) -> ObjectCannedAcl {
    match visibility {
        Visibility::Private => ObjectCannedAcl::Private,
        Visibility::PublicRead => ObjectCannedAcl::PublicRead,
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let result = self
            .client()
            .await
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                if let SdkError::ServiceError(ref service_err) = e {
                    if service_err.err().is_no_such_key() {
                        return Err(ObjectStoreError::NotFound);
                    }
                }
                return Err(ObjectStoreError::Other(format!(
                    "S3 get failed: {}",
                    DisplayErrorContext(&e)
                )));
            }
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| {
                ObjectStoreError::Other(format!("failed to read S3 response body: {}", e))
            })?
            .into_bytes()
            .to_vec();

        debug!(bucket = %bucket, key = %key, bytes = data.len(), "fetched object");
        Ok(data)
    }

    async fn put(&self, request: PutObject<'_>) -> Result<Option<String>, ObjectStoreError> {
        let result = self
            .client()
            .await
            .put_object()
            .bucket(request.bucket)
            .key(request.key)
            .body(ByteStream::from(request.body.to_vec()))
            .content_type(request.content_type)
            .content_md5(request.content_md5)
            .acl(canned_acl(request.visibility))
            .send()
            .await;

        match result {
            Ok(output) => Ok(output.version_id().map(str::to_string)),
            Err(e) => {
                if let SdkError::ServiceError(ref service_err) = e {
                    if service_err.err().code() == Some("NoSuchBucket") {
                        return Err(ObjectStoreError::NotFound);
                    }
                }
                Err(ObjectStoreError::Other(format!(
                    "S3 put failed: {}",
                    DisplayErrorContext(&e)
                )))
            }
        }
    }
}
