use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use service::errors::ServiceError;
use service::teacher_service::{self, TeacherView};

use crate::{errors::JsonApiError, routes::ServerState};

const NOT_FOUND_MSG: &str = "Преподаватель не найден.";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Exact department name to filter by.
    pub department_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherInput {
    pub first_name: String,
    pub last_name: String,
    pub position_id: i32,
    pub degree_id: i32,
    pub department_id: i32,
}

#[utoipa::path(
    get, path = "/api/teachers", tag = "teachers",
    params(ListParams),
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TeacherView>>, JsonApiError> {
    match teacher_service::list_teachers(&state.db, params.department_name.as_deref()).await {
        Ok(list) => {
            info!(count = list.len(), "list teachers");
            Ok(Json(list))
        }
        Err(e) => {
            error!(err = %e, "list teachers failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/api/teachers/{id}", tag = "teachers",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<TeacherView>, JsonApiError> {
    match teacher_service::get_teacher(&state.db, id).await {
        Ok(Some(view)) => Ok(Json(view)),
        Ok(None) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "get teacher failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Get Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    post, path = "/api/teachers", tag = "teachers",
    request_body = TeacherInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Referenced entity missing"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<TeacherInput>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<TeacherView>), JsonApiError> {
    match teacher_service::create_teacher(
        &state.db,
        &input.first_name,
        &input.last_name,
        input.position_id,
        input.degree_id,
        input.department_id,
    )
    .await
    {
        Ok(view) => {
            info!(id = view.id, "created teacher");
            let location = format!("/api/teachers/{}", view.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(view)))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(e @ ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "create teacher failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    put, path = "/api/teachers/{id}", tag = "teachers",
    params(("id" = i32, Path, description = "Teacher ID")),
    request_body = TeacherInput,
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
    Json(input): Json<TeacherInput>,
) -> Result<Json<TeacherView>, JsonApiError> {
    match teacher_service::update_teacher(
        &state.db,
        id,
        &input.first_name,
        &input.last_name,
        input.position_id,
        input.degree_id,
        input.department_id,
    )
    .await
    {
        Ok(view) => {
            info!(id = view.id, "updated teacher");
            Ok(Json(view))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "update teacher failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/teachers/{id}", tag = "teachers",
    params(("id" = i32, Path, description = "Teacher ID")),
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
    match teacher_service::delete_teacher(&state.db, id).await {
        Ok(true) => {
            info!(id, "deleted teacher");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "delete teacher failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string())))
        }
    }
}
