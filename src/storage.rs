use crate::error::{Error, Result};
use async_trait::async_trait;
use opendal::Operator;
use serde::Serialize;
use std::str::FromStr;

pub mod constants;
mod operations;
mod utils;

use self::operations::bucket::OpenDalBucketManager;
use self::operations::copy::OpenDalCopier;
use self::operations::delete::OpenDalDeleter;
use self::operations::list::OpenDalLister;
use self::operations::upload::OpenDalUploader;
use self::operations::{BucketManager, Copier, Deleter, Lister, Uploader};
use self::utils::size::format_size;

pub use self::utils::error::IntoGatewayError;

/// Storage provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    Oss,
    S3,
    Fs,
    Memory,
    Hdfs,
}

impl FromStr for StorageProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "oss" => Ok(Self::Oss),
            "s3" | "minio" => Ok(Self::S3),
            "fs" => Ok(Self::Fs),
            "memory" => Ok(Self::Memory),
            "hdfs" => Ok(Self::Hdfs),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Unified storage configuration for different providers.
///
/// Buckets are the top-level directories of the configured root. For object
/// stores `container` is the physical bucket that hosts them.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub container: Option<String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub root_path: Option<String>,
    pub name_node: Option<String>,
}

impl StorageConfig {
    fn empty(provider: StorageProvider) -> Self {
        Self {
            provider,
            container: None,
            access_key_id: None,
            access_key_secret: None,
            endpoint: None,
            region: None,
            root_path: None,
            name_node: None,
        }
    }

    pub fn oss(
        container: String,
        access_key_id: String,
        access_key_secret: String,
        region: Option<String>,
    ) -> Self {
        Self {
            container: Some(container),
            access_key_id: Some(access_key_id),
            access_key_secret: Some(access_key_secret),
            region,
            ..Self::empty(StorageProvider::Oss)
        }
    }

    pub fn s3(
        container: String,
        access_key_id: String,
        secret_access_key: String,
        region: Option<String>,
    ) -> Self {
        Self {
            container: Some(container),
            access_key_id: Some(access_key_id),
            access_key_secret: Some(secret_access_key),
            region,
            ..Self::empty(StorageProvider::S3)
        }
    }

    pub fn fs(root_path: String) -> Self {
        Self {
            root_path: Some(root_path),
            ..Self::empty(StorageProvider::Fs)
        }
    }

    pub fn memory() -> Self {
        Self::empty(StorageProvider::Memory)
    }

    pub fn hdfs(name_node: String, root_path: String) -> Self {
        Self {
            root_path: Some(root_path),
            name_node: Some(name_node),
            ..Self::empty(StorageProvider::Hdfs)
        }
    }
}

/// One listed object of a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub size_display: String,
    pub last_modified: Option<String>,
    pub is_folder: bool,
}

impl ObjectSummary {
    fn from_entry(key: &str, entry: &opendal::Entry) -> Self {
        let meta = entry.metadata();
        let is_folder = meta.mode().is_dir() || key.ends_with(constants::FOLDER_SEPARATOR);
        let size = if is_folder { 0 } else { meta.content_length() };
        Self {
            key: key.to_string(),
            size,
            size_display: if is_folder {
                "-".to_string()
            } else {
                format_size(size)
            },
            last_modified: meta.last_modified().map(|t| t.to_rfc3339()),
            is_folder,
        }
    }
}

/// The remote object-storage calls the gateway delegates to.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<String>>;

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>>;

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<()>;

    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()>;
}

/// Unified storage client using OpenDAL
#[derive(Clone)]
pub struct StorageClient {
    operator: Operator,
    provider: StorageProvider,
    region: Option<String>,
}

impl StorageClient {
    pub async fn new(config: StorageConfig) -> Result<Self> {
        let operator = Self::build_operator(&config)?;
        Ok(Self {
            operator,
            provider: config.provider,
            region: config.region,
        })
    }

    pub fn provider(&self) -> StorageProvider {
        self.provider
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    fn build_operator(config: &StorageConfig) -> Result<Operator> {
        match &config.provider {
            StorageProvider::Oss => {
                let container = config.container.as_deref().unwrap_or_default();
                let mut builder = opendal::services::Oss::default().bucket(container);
                if let Some(access_key_id) = &config.access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }
                if let Some(access_key_secret) = &config.access_key_secret {
                    builder = builder.access_key_secret(access_key_secret);
                }
                if let Some(endpoint) = &config.endpoint {
                    builder = builder.endpoint(endpoint);
                }
                Ok(Operator::new(builder)?.finish())
            }
            StorageProvider::S3 => {
                let container = config.container.as_deref().unwrap_or_default();
                let mut builder = opendal::services::S3::default().bucket(container);
                if let Some(access_key_id) = &config.access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }
                if let Some(secret_access_key) = &config.access_key_secret {
                    builder = builder.secret_access_key(secret_access_key);
                }
                if let Some(region) = &config.region {
                    builder = builder.region(region);
                }
                if let Some(endpoint) = &config.endpoint {
                    builder = builder.endpoint(endpoint);
                }
                Ok(Operator::new(builder)?.finish())
            }
            StorageProvider::Fs => {
                let root = config
                    .root_path
                    .as_deref()
                    .unwrap_or(constants::DEFAULT_FS_ROOT);
                let builder = opendal::services::Fs::default().root(root);
                Ok(Operator::new(builder)?.finish())
            }
            StorageProvider::Memory => {
                #[cfg(feature = "memory")]
                {
                    let builder = opendal::services::Memory::default();
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "memory"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: "memory (feature disabled)".to_string(),
                    })
                }
            }
            StorageProvider::Hdfs => {
                #[cfg(feature = "hdfs")]
                {
                    let root = config.root_path.as_deref().unwrap_or("/");
                    let name_node = config.name_node.as_deref().unwrap_or_default();
                    let builder = opendal::services::Hdfs::default()
                        .root(root)
                        .name_node(name_node);
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "hdfs"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: "hdfs (feature disabled)".to_string(),
                    })
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        log::debug!("list_buckets provider={:?}", self.provider);
        let manager = OpenDalBucketManager::new(self.operator.clone(), self.region.clone());
        manager.list_buckets().await
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>> {
        log::debug!(
            "list_objects provider={:?} bucket={}",
            self.provider,
            bucket
        );
        let lister = OpenDalLister::new(self.operator.clone());
        lister.list_objects(bucket).await
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<()> {
        log::debug!(
            "create_bucket provider={:?} bucket={} region={}",
            self.provider,
            bucket,
            region
        );
        let manager = OpenDalBucketManager::new(self.operator.clone(), self.region.clone());
        manager.create_bucket(bucket, region).await
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        log::debug!(
            "delete_bucket provider={:?} bucket={}",
            self.provider,
            bucket
        );
        let manager = OpenDalBucketManager::new(self.operator.clone(), self.region.clone());
        manager.delete_bucket(bucket).await
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        log::debug!(
            "put_object provider={:?} bucket={} key={} size={}",
            self.provider,
            bucket,
            key,
            body.len()
        );
        let uploader = OpenDalUploader::new(self.operator.clone());
        uploader.put_object(bucket, key, body).await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        log::debug!(
            "delete_object provider={:?} bucket={} key={}",
            self.provider,
            bucket,
            key
        );
        let deleter = OpenDalDeleter::new(self.operator.clone());
        deleter.delete_object(bucket, key).await
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()> {
        log::debug!(
            "copy_object provider={:?} src={}/{} dest={}/{}",
            self.provider,
            src_bucket,
            src_key,
            dest_bucket,
            dest_key
        );
        let copier = OpenDalCopier::new(self.operator.clone());
        copier
            .copy_object(src_bucket, src_key, dest_bucket, dest_key)
            .await
    }
}
