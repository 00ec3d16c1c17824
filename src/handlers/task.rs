use axum::{
    extract::{Extension, Form, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use super::bounded;
use crate::app::AppState;
use crate::errors::AppResult;
use crate::models::{Identity, NewTaskForm, TaskIdForm};

// Unprotected: every task, no identity needed.
pub async fn all_tasks(State(state): State<AppState>) -> AppResult<Response> {
    let tasks = bounded("list tasks", state.deadlines.request, state.tasks.list_all()).await?;
    Ok(Json(tasks).into_response())
}

pub async fn my_tasks(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Response> {
    let tasks = bounded(
        "list assigned tasks",
        state.deadlines.request,
        state.tasks.list_mine(&identity.username),
    )
    .await?;
    Ok(Json(tasks).into_response())
}

pub async fn created_tasks(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Response> {
    let tasks = bounded(
        "list created tasks",
        state.deadlines.request,
        state.tasks.list_created(&identity.username),
    )
    .await?;
    Ok(Json(tasks).into_response())
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<NewTaskForm>,
) -> AppResult<Response> {
    let executor = form.executor();
    let task_id = bounded(
        "create task",
        state.deadlines.request,
        state.tasks.create(&identity.username, form.description, executor),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create task for {}: {}", identity.username, e);
        e
    })?;

    Ok((StatusCode::CREATED, Json(task_id)).into_response())
}

pub async fn assign_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<TaskIdForm>,
) -> AppResult<StatusCode> {
    bounded(
        "assign task",
        state.deadlines.request,
        state.tasks.assign(form.task_id, &identity.username),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to assign task {}: {}", form.task_id, e);
        e
    })?;
    Ok(StatusCode::OK)
}

pub async fn unassign_task(
    State(state): State<AppState>,
    Form(form): Form<TaskIdForm>,
) -> AppResult<StatusCode> {
    bounded("unassign task", state.deadlines.request, state.tasks.unassign(form.task_id))
        .await
        .map_err(|e| {
            tracing::error!("Failed to unassign task {}: {}", form.task_id, e);
            e
        })?;
    Ok(StatusCode::OK)
}

pub async fn complete_task(
    State(state): State<AppState>,
    Form(form): Form<TaskIdForm>,
) -> AppResult<StatusCode> {
    bounded("complete task", state.deadlines.request, state.tasks.complete(form.task_id))
        .await
        .map_err(|e| {
            tracing::error!("Failed to complete task {}: {}", form.task_id, e);
            e
        })?;
    Ok(StatusCode::OK)
}
