use super::{AppState, UploadForm};
use crate::error::Result;
use crate::gateway::ViewModel;
use crate::render::Page;
use axum::Router;
use axum::extract::{Form, Multipart, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use serde::Deserialize;
use std::sync::Arc;

/// State for the surface bound to one bucket.
#[derive(Clone)]
pub struct BucketState {
    pub app: AppState,
    pub bucket: Arc<str>,
}

pub fn router(state: BucketState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/upload", get(upload_page).post(upload))
        .route("/delete", get(delete_page).post(delete))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub file_name: String,
}

fn page(state: &BucketState, page: Page, view: &ViewModel) -> Result<Html<String>> {
    state.app.renderer.render(page, view).map(Html)
}

/// Redirect home on success, otherwise re-render `failure_page` with the error.
fn redirect_or_render(state: &BucketState, failure_page: Page, view: ViewModel) -> Result<Response> {
    if view.is_ok() {
        Ok(Redirect::to("/").into_response())
    } else {
        Ok(page(state, failure_page, &view)?.into_response())
    }
}

async fn home(State(state): State<BucketState>) -> Result<Html<String>> {
    let view = state.app.gateway.list_files(&state.bucket).await;
    page(&state, Page::Files, &view)
}

async fn upload_page(State(state): State<BucketState>) -> Result<Html<String>> {
    let view = ViewModel {
        selected_bucket: Some(state.bucket.to_string()),
        ..ViewModel::default()
    };
    page(&state, Page::Upload, &view)
}

async fn upload(State(state): State<BucketState>, multipart: Multipart) -> Result<Response> {
    let (file_name, body) = UploadForm::read(multipart).await?.into_file()?;
    let view = state
        .app
        .gateway
        .upload_object(&state.bucket, &file_name, body)
        .await;
    redirect_or_render(&state, Page::Upload, view)
}

async fn delete_page(State(state): State<BucketState>) -> Result<Html<String>> {
    let view = state.app.gateway.list_files(&state.bucket).await;
    page(&state, Page::Delete, &view)
}

async fn delete(
    State(state): State<BucketState>,
    Form(form): Form<DeleteForm>,
) -> Result<Response> {
    let view = state
        .app
        .gateway
        .delete_object(&state.bucket, &form.file_name)
        .await;
    redirect_or_render(&state, Page::Delete, view)
}
