// Buffer related constants
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

// Key separator used to simulate folders inside a bucket
pub const FOLDER_SEPARATOR: char = '/';

// S3 bucket naming limits
pub const MIN_BUCKET_NAME_LEN: usize = 3;
pub const MAX_BUCKET_NAME_LEN: usize = 63;

// Region offered by the create-bucket form when none is configured
pub const DEFAULT_REGION: &str = "eu-north-1";

// Filesystem default
pub const DEFAULT_FS_ROOT: &str = "./storage";
