use super::{AppState, UploadForm};
use crate::error::Result;
use crate::gateway::ViewModel;
use crate::render::Page;
use axum::Router;
use axum::extract::{Form, Multipart, State};
use axum::response::Html;
use axum::routing::{get, post};
use serde::Deserialize;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/list_objects", post(list_objects))
        .route("/create_bucket", post(create_bucket))
        .route("/delete_bucket", post(delete_bucket))
        .route("/create_folder", post(create_folder))
        .route("/upload_file", post(upload_file))
        .route("/delete_file", post(delete_file))
        .route("/copy_file", post(copy_file))
        .route("/move_file", post(move_file))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct BucketForm {
    pub bucket_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateBucketForm {
    pub bucket_name: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Deserialize)]
pub struct FolderForm {
    pub bucket_name: String,
    pub folder_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectForm {
    pub bucket_name: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferForm {
    pub src_bucket: String,
    pub src_key: String,
    pub dest_bucket: String,
    pub dest_key: String,
}

fn page(state: &AppState, view: &ViewModel) -> Result<Html<String>> {
    state.renderer.render(Page::Console, view).map(Html)
}

async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let view = state.gateway.list_buckets().await;
    page(&state, &view)
}

async fn list_objects(
    State(state): State<AppState>,
    Form(form): Form<BucketForm>,
) -> Result<Html<String>> {
    let view = state.gateway.list_objects(&form.bucket_name).await;
    page(&state, &view)
}

async fn create_bucket(
    State(state): State<AppState>,
    Form(form): Form<CreateBucketForm>,
) -> Result<Html<String>> {
    let view = state
        .gateway
        .create_bucket(form.bucket_name.trim(), form.region.trim())
        .await;
    page(&state, &view)
}

async fn delete_bucket(
    State(state): State<AppState>,
    Form(form): Form<BucketForm>,
) -> Result<Html<String>> {
    let view = state.gateway.delete_bucket(&form.bucket_name).await;
    page(&state, &view)
}

async fn create_folder(
    State(state): State<AppState>,
    Form(form): Form<FolderForm>,
) -> Result<Html<String>> {
    let view = state
        .gateway
        .create_folder(&form.bucket_name, &form.folder_name)
        .await;
    page(&state, &view)
}

async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>> {
    let form = UploadForm::read(multipart).await?;
    let bucket = form.field("bucket_name")?.to_string();
    let key = form.optional_field("key").map(str::to_string);
    let (file_name, body) = form.into_file()?;

    let view = state
        .gateway
        .upload_object(&bucket, key.as_deref().unwrap_or(&file_name), body)
        .await;
    page(&state, &view)
}

async fn delete_file(
    State(state): State<AppState>,
    Form(form): Form<ObjectForm>,
) -> Result<Html<String>> {
    let view = state
        .gateway
        .delete_object(&form.bucket_name, &form.key)
        .await;
    page(&state, &view)
}

async fn copy_file(
    State(state): State<AppState>,
    Form(form): Form<TransferForm>,
) -> Result<Html<String>> {
    let view = state
        .gateway
        .copy_object(&form.src_bucket, &form.src_key, &form.dest_bucket, &form.dest_key)
        .await;
    page(&state, &view)
}

async fn move_file(
    State(state): State<AppState>,
    Form(form): Form<TransferForm>,
) -> Result<Html<String>> {
    let view = state
        .gateway
        .move_object(&form.src_bucket, &form.src_key, &form.dest_bucket, &form.dest_key)
        .await;
    page(&state, &view)
}
