// Bucket name and object key validation
use crate::error::{InvalidBucketNameSnafu, InvalidKeySnafu, Result};
use crate::storage::constants::{FOLDER_SEPARATOR, MAX_BUCKET_NAME_LEN, MIN_BUCKET_NAME_LEN};
use snafu::ensure;
use std::net::Ipv4Addr;

/// Validate a bucket name against the S3 naming rules.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| {
        InvalidBucketNameSnafu {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    };

    ensure!(
        (MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&name.len()),
        invalid("must be between 3 and 63 characters long")
    );
    ensure!(
        name.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'-'),
        invalid("may only contain lowercase letters, digits, '.' and '-'")
    );

    let bytes = name.as_bytes();
    let alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    ensure!(
        alnum(bytes[0]) && alnum(bytes[bytes.len() - 1]),
        invalid("must begin and end with a letter or digit")
    );
    ensure!(!name.contains(".."), invalid("must not contain '..'"));
    ensure!(
        name.parse::<Ipv4Addr>().is_err(),
        invalid("must not be formatted as an IP address")
    );

    Ok(())
}

/// Validate an object key.
pub fn validate_key(key: &str) -> Result<()> {
    ensure!(
        !key.is_empty(),
        InvalidKeySnafu {
            key,
            reason: "must not be empty",
        }
    );
    ensure!(
        !key.starts_with(FOLDER_SEPARATOR),
        InvalidKeySnafu {
            key,
            reason: "must not start with '/'",
        }
    );
    ensure!(
        !key
            .split(FOLDER_SEPARATOR)
            .any(|segment| segment == "." || segment == ".."),
        InvalidKeySnafu {
            key,
            reason: "must not contain '.' or '..' path segments",
        }
    );
    Ok(())
}
