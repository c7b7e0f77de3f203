use crate::error::Result;
use crate::storage::ObjectSummary;
use crate::storage::operations::bucket::ensure_bucket;
use crate::storage::utils::path::{bucket_dir, key_in_bucket};
use futures::stream::TryStreamExt;
use opendal::Operator;

/// Trait for listing the objects of a bucket.
pub trait Lister {
    /// List every object of a bucket, folders included, sorted by key.
    ///
    /// # Arguments
    /// * `bucket` - Bucket to list
    ///
    /// # Returns
    /// * `Result<Vec<ObjectSummary>>` - Objects or detailed error information
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>>;
}

/// Implementation of Lister for OpenDAL Operator.
pub struct OpenDalLister {
    operator: Operator,
}

impl OpenDalLister {
    /// Create a new lister with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Lister for OpenDalLister {
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>> {
        ensure_bucket(&self.operator, bucket).await?;

        let dir = bucket_dir(bucket);
        let lister = self.operator.lister_with(&dir).recursive(true).await?;

        let mut objects: Vec<ObjectSummary> = lister
            .map_err(crate::error::Error::from)
            .try_filter_map(|entry| {
                let summary = key_in_bucket(entry.path(), &dir)
                    .map(|key| ObjectSummary::from_entry(key, &entry));
                futures::future::ready(Ok(summary))
            })
            .try_collect()
            .await?;

        objects.sort_by(|a, b| a.key.cmp(&b.key));
        objects.dedup_by(|a, b| a.key == b.key);
        Ok(objects)
    }
}
