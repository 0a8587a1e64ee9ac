use axum::Json;
use axum::extract::Path;
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EditorError;
use crate::models::*;
use crate::state::AppState;
use crate::sync::engine::FormSyncEngine;

#[derive(Debug, Serialize, Deserialize)]
pub struct FormView {
    pub id: String,
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub path: String,
    pub value: Value,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", get(get_course))
        .route("/editor/{id}", put(navigate))
        .route("/editor/form", get(get_form).patch(update_field))
        .route("/editor/plans", post(add_plan))
        .route("/editor/plans/{index}/advantages", post(add_advantage))
        .route("/editor/contents", post(add_content_item))
        .route("/editor/coauthors", post(add_coauthor))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, EditorError> {
    state.store.ping().await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.store.courses().as_ref().clone())
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, EditorError> {
    let course = state.store.find(&id).await?.ok_or(EditorError::NotFound)?;
    Ok(Json(course))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<Json<Course>, EditorError> {
    let course = state.store.create(req).await?;
    Ok(Json(course))
}

async fn navigate(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.route.send_replace(Some(id));
    StatusCode::ACCEPTED
}

async fn get_form(State(state): State<AppState>) -> Result<Json<FormView>, EditorError> {
    state.editor.with_engine(|engine| form_view(engine)).map(Json)
}

async fn update_field(
    State(state): State<AppState>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<FormView>, EditorError> {
    edit(&state, |engine| engine.set_field(&update.path, update.value))
}

async fn add_plan(State(state): State<AppState>) -> Result<Json<FormView>, EditorError> {
    edit(&state, |engine| engine.add_plan().map(drop))
}

async fn add_advantage(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<FormView>, EditorError> {
    edit(&state, |engine| engine.add_advantage(index).map(drop))
}

async fn add_content_item(State(state): State<AppState>) -> Result<Json<FormView>, EditorError> {
    edit(&state, |engine| engine.add_content_item().map(drop))
}

async fn add_coauthor(State(state): State<AppState>) -> Result<Json<FormView>, EditorError> {
    edit(&state, |engine| engine.add_coauthor().map(drop))
}

fn edit(
    state: &AppState,
    op: impl FnOnce(&mut FormSyncEngine) -> Result<(), EditorError>,
) -> Result<Json<FormView>, EditorError> {
    state.editor.with_engine(|engine| {
        op(engine)?;
        form_view(engine)
    })
    .map(Json)
}

fn form_view(engine: &FormSyncEngine) -> Result<FormView, EditorError> {
    let id = engine.current_id().ok_or(EditorError::NoFormMounted)?;
    let form = engine.form().ok_or(EditorError::NoFormMounted)?;
    Ok(FormView {
        id: id.to_string(),
        value: form.value(),
    })
}
