//! HTTP surfaces.
//!
//! - [`console`] - multi-bucket console (`/`, `/list_objects`, `/create_bucket`, ...)
//! - [`single_bucket`] - one fixed bucket (`/`, `/upload`, `/delete`)
//!
//! Both always answer with a rendered page (or a `303` redirect after a
//! successful single-bucket mutation); backend errors live inside the page.

pub mod console;
pub mod single_bucket;

use crate::cli::Surface;
use crate::error::{Error, MalformedUploadSnafu, Result};
use crate::gateway::Gateway;
use crate::render::Renderer;
use crate::storage::IntoGatewayError;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub renderer: Arc<Renderer>,
}

/// Build the router for the chosen surface.
pub fn create_router(
    state: AppState,
    surface: Surface,
    bucket: Option<String>,
    max_upload_bytes: usize,
) -> Result<Router> {
    log::info!("Creating {surface:?} router");
    let router = match surface {
        Surface::Console => console::router(state),
        Surface::SingleBucket => {
            let bucket = bucket.ok_or_else(|| Error::MissingEnvVar {
                key: "GATEWAY_BUCKET".to_string(),
            })?;
            single_bucket::router(single_bucket::BucketState {
                app: state,
                bucket: bucket.into(),
            })
        }
    };

    Ok(router
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http()))
}

/// A decoded multipart upload: plain text fields plus one file part.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub fields: HashMap<String, String>,
    pub file_name: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoGatewayError::into_error)?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                form.file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(IntoGatewayError::into_error)?;
                form.body = Some(bytes.to_vec());
            } else {
                let value = field.text().await.map_err(IntoGatewayError::into_error)?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    /// A required text field.
    pub fn field(&self, name: &str) -> Result<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| {
                MalformedUploadSnafu {
                    reason: format!("missing field '{name}'"),
                }
                .build()
            })
    }

    /// An optional text field; blank counts as absent.
    pub fn optional_field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// The uploaded file's name and contents.
    pub fn into_file(self) -> Result<(String, Vec<u8>)> {
        match (self.file_name, self.body) {
            (Some(name), Some(body)) if !name.is_empty() => Ok((name, body)),
            _ => MalformedUploadSnafu {
                reason: "missing file",
            }
            .fail(),
        }
    }
}
