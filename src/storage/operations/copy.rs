use crate::error::{CopyOntoItselfSnafu, NoSuchKeySnafu, Result};
use crate::storage::constants::{DEFAULT_CHUNK_SIZE, FOLDER_SEPARATOR};
use crate::storage::operations::bucket::ensure_bucket;
use crate::storage::utils::name::validate_key;
use crate::storage::utils::path::{ensure_trailing_slash, object_path};
use opendal::{ErrorKind, Operator};
use snafu::ensure;

/// Trait for copying objects within or across buckets.
pub trait Copier {
    /// Copy a single object to a new location, replacing any object already there.
    ///
    /// # Arguments
    /// * `src_bucket` / `src_key` - Source object
    /// * `dest_bucket` / `dest_key` - Destination object
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()>;
}

/// Implementation of Copier for OpenDAL Operator.
pub struct OpenDalCopier {
    operator: Operator,
}

impl OpenDalCopier {
    /// Create a new copier with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Stream copy a single file in fixed-size ranges.
    async fn stream_copy(&self, src_path: &str, dest_path: &str) -> opendal::Result<u64> {
        let metadata = self.operator.stat(src_path).await?;
        let file_size = metadata.content_length();

        let mut writer = self.operator.writer(dest_path).await?;
        let mut total_bytes = 0u64;

        while total_bytes < file_size {
            let chunk_size = std::cmp::min(DEFAULT_CHUNK_SIZE as u64, file_size - total_bytes);
            let data = self
                .operator
                .read_with(src_path)
                .range(total_bytes..total_bytes + chunk_size)
                .await?;
            let data_len = data.len();
            if data_len == 0 {
                break;
            }

            writer.write(data).await?;
            total_bytes += data_len as u64;
        }

        writer.close().await?;
        Ok(total_bytes)
    }
}

impl Copier for OpenDalCopier {
    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()> {
        validate_key(src_key)?;
        validate_key(dest_key)?;
        ensure!(
            src_bucket != dest_bucket || src_key != dest_key,
            CopyOntoItselfSnafu {
                bucket: src_bucket,
                key: src_key,
            }
        );
        ensure_bucket(&self.operator, src_bucket).await?;
        ensure_bucket(&self.operator, dest_bucket).await?;

        let src_path = object_path(src_bucket, src_key);
        match self.operator.stat(&src_path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return NoSuchKeySnafu {
                    bucket: src_bucket,
                    key: src_key,
                }
                .fail();
            }
            Err(e) => return Err(e.into()),
        }

        // Folder markers carry no data; recreate the marker at the destination.
        if src_key.ends_with(FOLDER_SEPARATOR) {
            let dest_path = object_path(dest_bucket, &ensure_trailing_slash(dest_key));
            self.operator.create_dir(&dest_path).await?;
            log::info!("Copied folder: {src_path} → {dest_path}");
            return Ok(());
        }

        let dest_path = object_path(dest_bucket, dest_key);
        if self.operator.info().full_capability().copy {
            self.operator.copy(&src_path, &dest_path).await?;
            log::info!("Copied: {src_path} → {dest_path}");
        } else {
            let total_bytes = self.stream_copy(&src_path, &dest_path).await?;
            log::info!("Copied: {src_path} → {dest_path} ({total_bytes} bytes)");
        }
        Ok(())
    }
}
