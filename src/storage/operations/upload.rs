use crate::error::{InvalidKeySnafu, Result};
use crate::storage::constants::FOLDER_SEPARATOR;
use crate::storage::operations::bucket::ensure_bucket;
use crate::storage::utils::name::validate_key;
use crate::storage::utils::path::object_path;
use opendal::Operator;
use snafu::ensure;

/// Trait for writing objects into a bucket.
pub trait Uploader {
    /// Store `body` under `key`, replacing any existing object.
    ///
    /// A key ending with '/' creates a folder marker and requires an empty body.
    ///
    /// # Arguments
    /// * `bucket` - Destination bucket
    /// * `key` - Object key
    /// * `body` - Object contents
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}

/// Implementation of Uploader for OpenDAL Operator.
pub struct OpenDalUploader {
    operator: Operator,
}

impl OpenDalUploader {
    /// Create a new uploader with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Uploader for OpenDalUploader {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        validate_key(key)?;
        ensure_bucket(&self.operator, bucket).await?;

        let path = object_path(bucket, key);
        if key.ends_with(FOLDER_SEPARATOR) {
            ensure!(
                body.is_empty(),
                InvalidKeySnafu {
                    key,
                    reason: "folder objects must have an empty body",
                }
            );
            self.operator.create_dir(&path).await?;
            log::info!("Created folder: {path}");
        } else {
            let size = body.len();
            self.operator.write(&path, body).await?;
            log::info!("Uploaded: {path} ({size} bytes)");
        }
        Ok(())
    }
}
