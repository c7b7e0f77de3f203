use crate::*;
use axum::http::StatusCode;
use storify_web::error::Result;

pub fn tests(app: &TestApp, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        app,
        test_copy_across_buckets,
        test_copy_within_bucket,
        test_copy_missing_source_reports_error,
        test_move_across_buckets,
        test_move_to_missing_bucket_keeps_source
    ));
}

async fn test_copy_across_buckets(app: TestApp) -> Result<()> {
    let src = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let dest = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let content = TEST_FIXTURE.new_content(1..256 * 1024);
    app.operator()
        .write(&format!("{src}/x"), content.clone())
        .await?;

    let page = post_form(
        app.console(),
        "/copy_file",
        &[
            ("src_bucket", src.as_str()),
            ("src_key", "x"),
            ("dest_bucket", dest.as_str()),
            ("dest_key", "y"),
        ],
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.has_error(), "unexpected error: {}", page.body);
    let copied = app.operator().read(&format!("{dest}/y")).await?;
    assert_eq!(copied.to_vec(), content);
    assert_eq!(stored_keys(app.operator(), &src).await?, vec!["x"]);
    Ok(())
}

async fn test_copy_within_bucket(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;
    app.operator()
        .write(&format!("{bucket}/x"), b"same bucket".to_vec())
        .await?;

    let page = post_form(
        app.console(),
        "/copy_file",
        &[
            ("src_bucket", bucket.as_str()),
            ("src_key", "x"),
            ("dest_bucket", bucket.as_str()),
            ("dest_key", "backup/x"),
        ],
    )
    .await;

    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert!(page.body.contains("backup/x"));
    let keys = stored_keys(app.operator(), &bucket).await?;
    assert!(keys.contains(&"x".to_string()));
    assert!(keys.contains(&"backup/x".to_string()));
    Ok(())
}

async fn test_copy_missing_source_reports_error(app: TestApp) -> Result<()> {
    let src = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let dest = TEST_FIXTURE.new_bucket(app.operator()).await?;

    let page = post_form(
        app.console(),
        "/copy_file",
        &[
            ("src_bucket", src.as_str()),
            ("src_key", "ghost"),
            ("dest_bucket", dest.as_str()),
            ("dest_key", "y"),
        ],
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Error copying file"));
    assert!(stored_keys(app.operator(), &dest).await?.is_empty());
    Ok(())
}

async fn test_move_across_buckets(app: TestApp) -> Result<()> {
    let src = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let dest = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let content = TEST_FIXTURE.new_content(1..64 * 1024);
    app.operator()
        .write(&format!("{src}/x"), content.clone())
        .await?;

    let page = post_form(
        app.console(),
        "/move_file",
        &[
            ("src_bucket", src.as_str()),
            ("src_key", "x"),
            ("dest_bucket", dest.as_str()),
            ("dest_key", "y"),
        ],
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert_eq!(stored_keys(app.operator(), &dest).await?, vec!["y"]);
    assert!(stored_keys(app.operator(), &src).await?.is_empty());
    let moved = app.operator().read(&format!("{dest}/y")).await?;
    assert_eq!(moved.to_vec(), content);
    Ok(())
}

async fn test_move_to_missing_bucket_keeps_source(app: TestApp) -> Result<()> {
    let src = TEST_FIXTURE.new_bucket(app.operator()).await?;
    let missing = TEST_FIXTURE.new_bucket_name();
    app.operator()
        .write(&format!("{src}/x"), b"stay".to_vec())
        .await?;

    let page = post_form(
        app.console(),
        "/move_file",
        &[
            ("src_bucket", src.as_str()),
            ("src_key", "x"),
            ("dest_bucket", missing.as_str()),
            ("dest_key", "y"),
        ],
    )
    .await;

    assert!(page.body.contains("Error moving file"));
    assert_eq!(stored_keys(app.operator(), &src).await?, vec!["x"]);
    Ok(())
}
