// Error conversion helpers and wrapping macro for Snafu-based errors
use crate::error::Error;

/// Convert different error types into our unified Error type.
pub trait IntoGatewayError {
    fn into_error(self) -> Error;
}

impl IntoGatewayError for Error {
    fn into_error(self) -> Error {
        self
    }
}

impl IntoGatewayError for opendal::Error {
    fn into_error(self) -> Error {
        self.into()
    }
}

impl IntoGatewayError for std::io::Error {
    fn into_error(self) -> Error {
        self.into()
    }
}

// A broken multipart body is the client's fault, never the backend's.
impl IntoGatewayError for axum::extract::multipart::MultipartError {
    fn into_error(self) -> Error {
        Error::MalformedUpload {
            reason: self.body_text(),
        }
    }
}

/// Macro to wrap a Result-producing expression into a Snafu variant with `source: Box<Error>`.
/// Example:
/// wrap_err!(store.delete_bucket(name).await, BackendCallFailed { operation: Operation::DeleteBucket })
#[macro_export]
macro_rules! wrap_err {
    ($expr:expr, $variant:ident { $($field:ident : $value:expr),* $(,)? }) => {{
        $expr.map_err(|e| {
            let src: $crate::error::Error = $crate::storage::IntoGatewayError::into_error(e);
            $crate::error::Error::$variant { $($field: $value),*, source: Box::new(src) }
        })
    }};
}
