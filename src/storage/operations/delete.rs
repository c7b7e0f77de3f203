// Delete operation trait and implementation
use crate::error::Result;
use crate::storage::operations::bucket::ensure_bucket;
use crate::storage::utils::name::validate_key;
use crate::storage::utils::path::object_path;
use opendal::Operator;

/// Trait for deleting objects from a bucket.
pub trait Deleter {
    /// Delete a single object. Deleting a key that does not exist succeeds.
    ///
    /// # Arguments
    /// * `bucket` - Bucket holding the object
    /// * `key` - Object key
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Implementation of Deleter for OpenDAL Operator.
pub struct OpenDalDeleter {
    operator: Operator,
}

impl OpenDalDeleter {
    /// Create a new deleter with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Deleter for OpenDalDeleter {
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        validate_key(key)?;
        ensure_bucket(&self.operator, bucket).await?;

        let path = object_path(bucket, key);
        self.operator.delete(&path).await?;
        log::info!("Deleted: {path}");
        Ok(())
    }
}
