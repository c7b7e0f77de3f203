use crate::*;
use axum::http::StatusCode;
use storify_web::error::Result;

pub fn tests(app: &TestApp, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        app,
        test_upload_file_then_listed,
        test_upload_file_with_explicit_key,
        test_upload_without_file_is_rejected,
        test_upload_to_missing_bucket_reports_error,
        test_upload_key_cannot_escape_bucket,
        test_delete_file_then_unlisted,
        test_create_folder_adds_marker,
        test_create_nested_folder
    ));
}

async fn test_upload_file_then_listed(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let content = TEST_FIXTURE.new_content(1..64 * 1024);

    let page = post_multipart(
        app.console(),
        "/upload_file",
        &[("bucket_name", bucket.as_str())],
        Some(("a.txt", content.as_slice())),
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert!(page.body.contains("a.txt"));
    let stored = app.operator().read(&format!("{bucket}/a.txt")).await?;
    assert_eq!(stored.to_vec(), content);
    Ok(())
}

async fn test_upload_file_with_explicit_key(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;

    let page = post_multipart(
        app.console(),
        "/upload_file",
        &[("bucket_name", bucket.as_str()), ("key", "reports/q1.csv")],
        Some(("local-name.csv", b"a,b\n1,2\n".as_slice())),
    )
    .await;

    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert_eq!(
        stored_keys(app.operator(), &bucket).await?,
        vec!["reports/q1.csv"]
    );
    Ok(())
}

async fn test_upload_without_file_is_rejected(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;

    let page = post_multipart(
        app.console(),
        "/upload_file",
        &[("bucket_name", bucket.as_str())],
        None,
    )
    .await;

    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(stored_keys(app.operator(), &bucket).await?.is_empty());
    Ok(())
}

async fn test_upload_to_missing_bucket_reports_error(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket_name();

    let page = post_multipart(
        app.console(),
        "/upload_file",
        &[("bucket_name", bucket.as_str())],
        Some(("a.txt", b"hello".as_slice())),
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Error uploading file"));
    assert!(!app.operator().exists(&format!("{bucket}/a.txt")).await?);
    Ok(())
}

async fn test_upload_key_cannot_escape_bucket(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let sibling = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let escaping = format!("../{sibling}/stolen.txt");

    for key in ["../x", "a/../../x", escaping.as_str()] {
        let page = post_multipart(
            app.console(),
            "/upload_file",
            &[("bucket_name", bucket.as_str()), ("key", key)],
            Some(("a.txt", b"hello".as_slice())),
        )
        .await;

        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Error uploading file"), "{}", page.body);
        assert!(page.body.contains("Invalid object key"), "{}", page.body);
    }
    assert!(stored_keys(app.operator(), &bucket).await?.is_empty());
    assert!(stored_keys(app.operator(), &sibling).await?.is_empty());
    Ok(())
}

async fn test_delete_file_then_unlisted(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let key = TEST_FIXTURE.new_key();
    app.operator()
        .write(&format!("{bucket}/{key}"), TEST_FIXTURE.new_content(1..1024))
        .await?;
    app.operator()
        .write(&format!("{bucket}/other.txt"), b"other".to_vec())
        .await?;

    let page = post_form(
        app.console(),
        "/delete_file",
        &[("bucket_name", bucket.as_str()), ("key", key.as_str())],
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert!(!page.body.contains(&key));
    assert!(page.body.contains("other.txt"));
    assert_eq!(stored_keys(app.operator(), &bucket).await?, vec!["other.txt"]);
    Ok(())
}

async fn test_create_folder_adds_marker(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;

    let page = post_form(
        app.console(),
        "/create_folder",
        &[("bucket_name", bucket.as_str()), ("folder_name", "docs")],
    )
    .await;

    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert!(page.body.contains("docs/"));
    assert_eq!(stored_keys(app.operator(), &bucket).await?, vec!["docs/"]);
    let meta = app.operator().stat(&format!("{bucket}/docs/")).await?;
    assert_eq!(meta.content_length(), 0);
    Ok(())
}

async fn test_create_nested_folder(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;

    let page = post_form(
        app.console(),
        "/create_folder",
        &[("bucket_name", bucket.as_str()), ("folder_name", "/a/b/")],
    )
    .await;

    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert!(
        stored_keys(app.operator(), &bucket)
            .await?
            .contains(&"a/b/".to_string())
    );
    Ok(())
}
