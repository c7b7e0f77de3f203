use crate::*;
use axum::http::StatusCode;
use storify_web::error::Result;
use storify_web::storage::ObjectStore;

pub fn tests(app: &TestApp, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        app,
        test_home_lists_buckets,
        test_create_bucket_then_listed,
        test_create_duplicate_bucket_reports_error,
        test_create_bucket_with_invalid_name,
        test_create_bucket_in_foreign_region,
        test_delete_bucket_then_unlisted,
        test_delete_non_empty_bucket_reports_error,
        test_list_objects_of_missing_bucket,
        test_missing_form_field_is_rejected
    ));
}

async fn test_home_lists_buckets(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;

    let page = get(app.console(), "/").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(&bucket), "home should list {bucket}");
    assert!(!page.has_error());
    Ok(())
}

async fn test_create_bucket_then_listed(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket_name();

    let page = post_form(
        app.console(),
        "/create_bucket",
        &[("bucket_name", bucket.as_str()), ("region", "us-east-1")],
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert!(page.body.contains(&bucket));
    assert!(app.client.list_buckets().await?.contains(&bucket));
    Ok(())
}

async fn test_create_duplicate_bucket_reports_error(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;

    let page = post_form(app.console(), "/create_bucket", &[("bucket_name", bucket.as_str())]).await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.has_error());
    assert!(page.body.contains("Error creating bucket"));
    Ok(())
}

async fn test_create_bucket_with_invalid_name(app: TestApp) -> Result<()> {
    let page = post_form(app.console(), "/create_bucket", &[("bucket_name", "No_Good")]).await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Error creating bucket"));
    assert!(page.body.contains("Invalid bucket name"));
    assert!(
        !app.client
            .list_buckets()
            .await?
            .contains(&"No_Good".to_string())
    );
    Ok(())
}

async fn test_create_bucket_in_foreign_region(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket_name();

    let page = post_form(
        app.console(),
        "/create_bucket",
        &[("bucket_name", bucket.as_str()), ("region", "ap-south-1")],
    )
    .await;

    assert!(page.has_error());
    assert!(!app.client.list_buckets().await?.contains(&bucket));
    Ok(())
}

async fn test_delete_bucket_then_unlisted(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;

    let page = post_form(app.console(), "/delete_bucket", &[("bucket_name", bucket.as_str())]).await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.has_error(), "unexpected error: {}", page.body);
    assert!(!page.body.contains(&bucket));
    assert!(!app.client.list_buckets().await?.contains(&bucket));
    Ok(())
}

async fn test_delete_non_empty_bucket_reports_error(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket(app.operator()).await?;
    app.operator()
        .write(&format!("{bucket}/keep.txt"), b"keep".to_vec())
        .await?;

    let page = post_form(app.console(), "/delete_bucket", &[("bucket_name", bucket.as_str())]).await;

    assert!(page.body.contains("Error deleting bucket"));
    assert!(app.client.list_buckets().await?.contains(&bucket));
    assert_eq!(stored_keys(app.operator(), &bucket).await?, vec!["keep.txt"]);
    Ok(())
}

async fn test_list_objects_of_missing_bucket(app: TestApp) -> Result<()> {
    let bucket = TEST_FIXTURE.new_bucket_name();

    let page = post_form(app.console(), "/list_objects", &[("bucket_name", bucket.as_str())]).await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Error listing files"));
    Ok(())
}

async fn test_missing_form_field_is_rejected(app: TestApp) -> Result<()> {
    let page = post_form(app.console(), "/delete_file", &[("bucket_name", "abc")]).await;

    assert!(page.status.is_client_error(), "got {}", page.status);
    Ok(())
}
