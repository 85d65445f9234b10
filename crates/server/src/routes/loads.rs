use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use service::errors::ServiceError;
use service::load_service::{self, LoadView};

use crate::{errors::JsonApiError, routes::ServerState};

const NOT_FOUND_MSG: &str = "Нагрузка не найдена.";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Exact first name of the assigned teacher.
    pub teacher_first_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoadInput {
    pub teacher_id: i32,
    pub discipline_id: i32,
    pub hours: i32,
}

#[utoipa::path(
    get, path = "/api/loads", tag = "loads",
    params(ListParams),
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<LoadView>>, JsonApiError> {
    match load_service::list_loads(&state.db, params.teacher_first_name.as_deref()).await {
        Ok(list) => {
            info!(count = list.len(), "list loads");
            Ok(Json(list))
        }
        Err(e) => {
            error!(err = %e, "list loads failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    post, path = "/api/loads", tag = "loads",
    request_body = LoadInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Referenced entity missing"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<LoadInput>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<LoadView>), JsonApiError> {
    match load_service::create_load(&state.db, input.teacher_id, input.discipline_id, input.hours)
        .await
    {
        Ok(view) => {
            info!(id = view.id, hours = view.hours, "created load");
            let location = format!("/api/loads/{}", view.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(view)))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(e @ ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "create load failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    put, path = "/api/loads/{id}", tag = "loads",
    params(("id" = i32, Path, description = "Load ID")),
    request_body = LoadInput,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<LoadInput>,
) -> Result<Json<LoadView>, JsonApiError> {
    match load_service::update_load(&state.db, id, input.teacher_id, input.discipline_id, input.hours)
        .await
    {
        Ok(view) => {
            info!(id = view.id, "updated load");
            Ok(Json(view))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "update load failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/loads/{id}", tag = "loads",
    params(("id" = i32, Path, description = "Load ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    match load_service::delete_load(&state.db, id).await {
        Ok(true) => {
            info!(id, "deleted load");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "delete load failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string())))
        }
    }
}
