// Bucket management operation trait and implementation
use crate::error::{
    BucketAlreadyExistsSnafu, BucketNotEmptySnafu, IllegalLocationConstraintSnafu,
    NoSuchBucketSnafu, Result,
};
use crate::storage::utils::name::validate_bucket_name;
use crate::storage::utils::path::{bucket_dir, top_level_name};
use futures::stream::TryStreamExt;
use opendal::Operator;
use snafu::ensure;

/// Trait for managing buckets, the top-level directories of the storage root.
pub trait BucketManager {
    /// List the names of all buckets, sorted.
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// Create an empty bucket.
    ///
    /// # Arguments
    /// * `name` - Bucket name; must satisfy the S3 naming rules
    /// * `region` - Requested location; empty means the configured region
    async fn create_bucket(&self, name: &str, region: &str) -> Result<()>;

    /// Delete a bucket. The bucket must exist and hold no objects.
    async fn delete_bucket(&self, name: &str) -> Result<()>;
}

/// Implementation of BucketManager for OpenDAL Operator.
pub struct OpenDalBucketManager {
    operator: Operator,
    region: Option<String>,
}

impl OpenDalBucketManager {
    /// Create a new bucket manager with the given OpenDAL operator.
    pub fn new(operator: Operator, region: Option<String>) -> Self {
        Self { operator, region }
    }

    /// Check whether the requested region is acceptable for this backend.
    fn check_region(&self, requested: &str) -> Result<()> {
        if let Some(configured) = &self.region {
            ensure!(
                requested.is_empty() || requested == configured,
                IllegalLocationConstraintSnafu {
                    requested,
                    configured: configured.as_str(),
                }
            );
        }
        Ok(())
    }

    /// Whether the bucket holds anything besides its own marker.
    async fn has_objects(&self, name: &str) -> Result<bool> {
        let dir = bucket_dir(name);
        let mut lister = self
            .operator
            .lister_with(&dir)
            .recursive(true)
            .limit(2)
            .await?;
        while let Some(entry) = lister.try_next().await? {
            if entry.path().trim_start_matches('/') != dir {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// List top-level directory names under the operator root.
pub(crate) async fn bucket_names(operator: &Operator) -> Result<Vec<String>> {
    let entries = operator.list("/").await?;
    let mut names: Vec<String> = entries
        .iter()
        .filter(|entry| entry.metadata().mode().is_dir())
        .filter_map(|entry| top_level_name(entry.path()))
        .map(str::to_string)
        .collect();
    names.sort();
    names.dedup();
    Ok(names)
}

/// Fail with `NoSuchBucket` unless the bucket exists.
///
/// Existence follows the same definition as the bucket listing, so a bucket
/// reported by `list_buckets` is always usable.
pub(crate) async fn ensure_bucket(operator: &Operator, name: &str) -> Result<()> {
    let names = bucket_names(operator).await?;
    ensure!(
        names.iter().any(|existing| existing == name),
        NoSuchBucketSnafu { bucket: name }
    );
    Ok(())
}

impl BucketManager for OpenDalBucketManager {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        bucket_names(&self.operator).await
    }

    async fn create_bucket(&self, name: &str, region: &str) -> Result<()> {
        validate_bucket_name(name)?;
        self.check_region(region)?;

        let names = bucket_names(&self.operator).await?;
        ensure!(
            !names.iter().any(|existing| existing == name),
            BucketAlreadyExistsSnafu { bucket: name }
        );

        self.operator.create_dir(&bucket_dir(name)).await?;
        log::info!("Created bucket: {name}");
        Ok(())
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        ensure_bucket(&self.operator, name).await?;
        ensure!(
            !self.has_objects(name).await?,
            BucketNotEmptySnafu { bucket: name }
        );

        self.operator.delete(&bucket_dir(name)).await?;
        log::info!("Deleted bucket: {name}");
        Ok(())
    }
}
