use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snafu::Snafu;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Backend call that a gateway operation delegates to. Its display form is
/// embedded in user-facing error messages ("Error creating bucket: ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListBuckets,
    ListObjects,
    CreateBucket,
    DeleteBucket,
    CreateFolder,
    UploadObject,
    DeleteObject,
    CopyObject,
    MoveObject,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Operation::ListBuckets => "listing buckets",
            Operation::ListObjects => "listing files",
            Operation::CreateBucket => "creating bucket",
            Operation::DeleteBucket => "deleting bucket",
            Operation::CreateFolder => "creating folder",
            Operation::UploadObject => "uploading file",
            Operation::DeleteObject => "deleting file",
            Operation::CopyObject => "copying file",
            Operation::MoveObject => "moving file",
        };
        f.write_str(action)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Environment variable '{key}' is required but not found"))]
    MissingEnvVar { key: String },

    #[snafu(display("Unsupported storage provider: {provider}"))]
    UnsupportedProvider { provider: String },

    #[snafu(display("Invalid bucket name '{name}': {reason}"))]
    InvalidBucketName { name: String, reason: String },

    #[snafu(display("Invalid object key '{key}': {reason}"))]
    InvalidKey { key: String, reason: String },

    #[snafu(display("The specified bucket does not exist: {bucket}"))]
    NoSuchBucket { bucket: String },

    #[snafu(display("The specified key does not exist: {bucket}/{key}"))]
    NoSuchKey { bucket: String, key: String },

    #[snafu(display("The requested bucket name is not available: {bucket}"))]
    BucketAlreadyExists { bucket: String },

    #[snafu(display("The bucket you tried to delete is not empty: {bucket}"))]
    BucketNotEmpty { bucket: String },

    #[snafu(display(
        "The region '{requested}' is incompatible with the configured region '{configured}'"
    ))]
    IllegalLocationConstraint {
        requested: String,
        configured: String,
    },

    #[snafu(display("Cannot copy {bucket}/{key} onto itself"))]
    CopyOntoItself { bucket: String, key: String },

    #[snafu(display("Error {operation}: {source}"))]
    BackendCallFailed {
        operation: Operation,
        source: Box<Error>,
    },

    #[snafu(display("Failed to render page '{page}': {source}"))]
    Render {
        page: String,
        source: handlebars::RenderError,
    },

    #[snafu(display("Failed to register template '{name}': {source}"))]
    Template {
        name: String,
        source: Box<handlebars::TemplateError>,
    },

    #[snafu(display("Malformed upload request: {reason}"))]
    MalformedUpload { reason: String },

    #[snafu(display("Server error: {source}"))]
    Server { source: std::io::Error },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}

// Backend failures are rendered into the page by the gateway; anything that
// reaches this point is a bad request or a failure to produce the page at all.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::MalformedUpload { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        log::error!("request failed: {self}");
        (status, self.to_string()).into_response()
    }
}
