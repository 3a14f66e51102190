//! Bot Framework activity endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Activity, ActivityType, QnaForm, TaskModuleRequest};

/// Invoke name of a card action opening a task module
pub const TASK_FETCH_INVOKE: &str = "task/fetch";

/// Invoke name of a task module form submission
pub const TASK_SUBMIT_INVOKE: &str = "task/submit";

/// POST /api/messages
pub async fn receive_activity(
    State(state): State<AppState>,
    Json(activity): Json<Activity>,
) -> Result<Response, ApiError> {
    debug!(
        activity_type = ?activity.activity_type,
        conversation_id = %activity.conversation.id,
        "Received activity"
    );

    match activity.activity_type {
        ActivityType::Message => {
            let outcome = state.qna_service.reply(&activity).await?;
            info!(
                conversation_id = %activity.conversation.id,
                outcome = outcome.label(),
                "Replied to message"
            );
            Ok(StatusCode::OK.into_response())
        }
        ActivityType::Invoke => match activity.name.as_deref() {
            Some(TASK_FETCH_INVOKE) => fetch_task(state, &activity),
            Some(TASK_SUBMIT_INVOKE) => submit_task(state, activity).await,
            _ => Ok(StatusCode::OK.into_response()),
        },
        _ => Ok(StatusCode::OK.into_response()),
    }
}

/// Form carried under `value.data` of a task module invoke
fn task_form(activity: &Activity, invoke: &str) -> Result<QnaForm, ApiError> {
    let value = activity
        .value
        .clone()
        .ok_or_else(|| ApiError::bad_request(format!("{} carries no form data", invoke)))?;

    let request: TaskModuleRequest<QnaForm> = serde_json::from_value(value).map_err(|e| {
        warn!(invoke, error = %e, "Unreadable task module form");
        ApiError::bad_request(format!("Invalid form data: {}", e))
    })?;

    Ok(request.data)
}

fn fetch_task(state: AppState, activity: &Activity) -> Result<Response, ApiError> {
    let form = task_form(activity, TASK_FETCH_INVOKE)?;
    let response = state.qna_service.fetch_form(form);

    info!(user = %activity.from_aad_object_id(), "Opened edit form");
    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn submit_task(state: AppState, activity: Activity) -> Result<Response, ApiError> {
    let form = task_form(&activity, TASK_SUBMIT_INVOKE)?;

    let outcome = if form.is_edit() {
        state.qna_service.edit(form, &activity).await?
    } else {
        state.qna_service.add(form, &activity).await?
    };

    info!(
        user = %activity.from_aad_object_id(),
        outcome = outcome.label(),
        "Handled task module submission"
    );

    match outcome.into_task_module_response() {
        Some(response) => Ok((StatusCode::OK, Json(response)).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}
