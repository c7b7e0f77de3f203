//! The storage gateway: one method per user-facing operation.
//!
//! Every operation delegates to the [`ObjectStore`], then re-fetches the
//! affected listings so the returned [`ViewModel`] reflects current backend
//! state. Backend failures never escape; they are folded into the view's
//! `error` message.

use crate::error::{Error, InvalidKeySnafu, Operation, Result};
use crate::storage::constants::FOLDER_SEPARATOR;
use crate::storage::{ObjectStore, ObjectSummary};
use crate::wrap_err;
use serde::Serialize;
use snafu::ensure;
use std::future::Future;
use std::sync::Arc;

/// Per-request data handed to the renderer. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub buckets: Vec<String>,
    pub selected_bucket: Option<String>,
    pub objects: Vec<ObjectSummary>,
    pub error: Option<String>,
}

impl ViewModel {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn object_keys(&self) -> Vec<&str> {
        self.objects.iter().map(|o| o.key.as_str()).collect()
    }

    /// Record a failure unless an earlier one is already shown.
    fn note_error(&mut self, error: &Error) {
        if self.error.is_none() {
            self.error = Some(error.to_string());
        }
    }
}

#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn ObjectStore>,
}

impl Gateway {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub async fn list_buckets(&self) -> ViewModel {
        self.snapshot(None).await
    }

    pub async fn list_objects(&self, bucket: &str) -> ViewModel {
        self.snapshot(Some(bucket)).await
    }

    /// List only the objects of one bucket, without the bucket list.
    pub async fn list_files(&self, bucket: &str) -> ViewModel {
        let mut view = ViewModel {
            selected_bucket: Some(bucket.to_string()),
            ..ViewModel::default()
        };
        match wrap_err!(
            self.store.list_objects(bucket).await,
            BackendCallFailed {
                operation: Operation::ListObjects
            }
        ) {
            Ok(objects) => view.objects = objects,
            Err(e) => {
                log::warn!("{e}");
                view.note_error(&e);
            }
        }
        view
    }

    pub async fn create_bucket(&self, bucket: &str, region: &str) -> ViewModel {
        self.run(
            Operation::CreateBucket,
            None,
            self.store.create_bucket(bucket, region),
        )
        .await
    }

    pub async fn delete_bucket(&self, bucket: &str) -> ViewModel {
        self.run(Operation::DeleteBucket, None, self.store.delete_bucket(bucket))
            .await
    }

    /// Create a folder marker `<folder>/` holding no data.
    pub async fn create_folder(&self, bucket: &str, folder: &str) -> ViewModel {
        self.run(
            Operation::CreateFolder,
            Some(bucket),
            self.put_folder(bucket, folder),
        )
        .await
    }

    pub async fn upload_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> ViewModel {
        self.run(
            Operation::UploadObject,
            Some(bucket),
            self.store.put_object(bucket, key, body),
        )
        .await
    }

    pub async fn delete_object(&self, bucket: &str, key: &str) -> ViewModel {
        self.run(
            Operation::DeleteObject,
            Some(bucket),
            self.store.delete_object(bucket, key),
        )
        .await
    }

    pub async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> ViewModel {
        self.run(
            Operation::CopyObject,
            Some(dest_bucket),
            self.store
                .copy_object(src_bucket, src_key, dest_bucket, dest_key),
        )
        .await
    }

    /// Copy then delete the source. Not transactional: when the delete fails
    /// the source stays in place next to its copy.
    pub async fn move_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> ViewModel {
        let call = async {
            self.store
                .copy_object(src_bucket, src_key, dest_bucket, dest_key)
                .await?;
            self.store.delete_object(src_bucket, src_key).await
        };
        self.run(Operation::MoveObject, Some(dest_bucket), call).await
    }

    async fn put_folder(&self, bucket: &str, folder: &str) -> Result<()> {
        let name = folder.trim_matches(FOLDER_SEPARATOR);
        ensure!(
            !name.is_empty(),
            InvalidKeySnafu {
                key: folder,
                reason: "folder name must not be empty",
            }
        );
        let key = format!("{name}{FOLDER_SEPARATOR}");
        self.store.put_object(bucket, &key, Vec::new()).await
    }

    /// Perform one backend call, then re-list. The call's error wins over any
    /// listing error.
    async fn run(
        &self,
        operation: Operation,
        selected: Option<&str>,
        call: impl Future<Output = Result<()>>,
    ) -> ViewModel {
        let outcome = wrap_err!(call.await, BackendCallFailed { operation: operation });
        let mut view = self.snapshot(selected).await;
        if let Err(e) = outcome {
            log::warn!("{e}");
            view.error = Some(e.to_string());
        }
        view
    }

    /// Fetch the bucket list and, when a bucket is selected, its objects.
    async fn snapshot(&self, selected: Option<&str>) -> ViewModel {
        let mut view = ViewModel {
            selected_bucket: selected.map(str::to_string),
            ..ViewModel::default()
        };

        match wrap_err!(
            self.store.list_buckets().await,
            BackendCallFailed {
                operation: Operation::ListBuckets
            }
        ) {
            Ok(buckets) => view.buckets = buckets,
            Err(e) => {
                log::warn!("{e}");
                view.note_error(&e);
            }
        }

        if let Some(bucket) = selected {
            match wrap_err!(
                self.store.list_objects(bucket).await,
                BackendCallFailed {
                    operation: Operation::ListObjects
                }
            ) {
                Ok(objects) => view.objects = objects,
                Err(e) => {
                    log::warn!("{e}");
                    view.note_error(&e);
                }
            }
        }

        view
    }
}
