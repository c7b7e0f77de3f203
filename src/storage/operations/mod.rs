// Storage operation traits and implementations
pub mod bucket;
pub mod copy;
pub mod delete;
pub mod list;
pub mod upload;

// Re-export all operation traits
pub use bucket::BucketManager;
pub use copy::Copier;
pub use delete::Deleter;
pub use list::Lister;
pub use upload::Uploader;
