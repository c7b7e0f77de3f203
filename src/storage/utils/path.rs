// Path helper utilities mapping (bucket, key) pairs onto operator paths
use crate::storage::constants::FOLDER_SEPARATOR;

/// Directory path that holds every object of a bucket.
pub fn bucket_dir(bucket: &str) -> String {
    ensure_trailing_slash(bucket)
}

/// Operator path of an object inside a bucket.
pub fn object_path(bucket: &str, key: &str) -> String {
    format!("{}{key}", bucket_dir(bucket))
}

/// Return a new String that guarantees a trailing '/'.
pub fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with(FOLDER_SEPARATOR) {
        path.to_string()
    } else {
        format!("{path}{FOLDER_SEPARATOR}")
    }
}

/// Strip the bucket directory from a listed entry path, yielding its key.
///
/// Returns `None` for the bucket marker itself and for entries outside the bucket.
pub fn key_in_bucket<'a>(entry_path: &'a str, bucket_dir: &str) -> Option<&'a str> {
    entry_path
        .trim_start_matches(FOLDER_SEPARATOR)
        .strip_prefix(bucket_dir)
        .filter(|key| !key.is_empty())
}

/// Name of a top-level directory entry, or `None` for the root itself.
pub fn top_level_name(entry_path: &str) -> Option<&str> {
    let name = entry_path.trim_matches(FOLDER_SEPARATOR);
    (!name.is_empty() && !name.contains(FOLDER_SEPARATOR)).then_some(name)
}
