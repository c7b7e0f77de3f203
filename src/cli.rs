use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Which HTTP surface the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Surface {
    /// Multi-bucket console: bucket management plus object operations.
    Console,
    /// Upload, list and delete files of one fixed bucket.
    SingleBucket,
}

#[derive(Parser, Debug)]
#[command(
    name = "storify-web",
    version,
    about = "A web console for browsing and managing object storage buckets"
)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "GATEWAY_LISTEN", default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,

    /// HTTP surface to serve
    #[arg(long, env = "GATEWAY_SURFACE", value_enum, default_value_t = Surface::Console)]
    pub surface: Surface,

    /// Bucket served by the single-bucket surface
    #[arg(long, env = "GATEWAY_BUCKET", required_if_eq("surface", "single-bucket"))]
    pub bucket: Option<String>,

    /// Largest accepted upload request body, in bytes
    #[arg(long, env = "GATEWAY_MAX_UPLOAD_BYTES", default_value_t = 100 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}
