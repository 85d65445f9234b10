use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use service::department_service::{self, DepartmentQuery, DepartmentView};
use service::errors::ServiceError;

use crate::{errors::JsonApiError, routes::ServerState};

const NOT_FOUND_MSG: &str = "Кафедра не найдена.";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Inclusive lower bound on the founding date.
    pub founded_after: Option<NaiveDate>,
    /// Keep departments with at least this many teachers.
    pub min_teacher_count: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    pub name: String,
    pub founded_date: NaiveDate,
    #[serde(default)]
    pub head_id: Option<i32>,
}

#[utoipa::path(
    get, path = "/api/departments", tag = "departments",
    params(ListParams),
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DepartmentView>>, JsonApiError> {
    let query = DepartmentQuery {
        founded_after: params.founded_after,
        min_teacher_count: params.min_teacher_count,
    };
    match department_service::list_departments(&state.db, &query).await {
        Ok(list) => {
            info!(count = list.len(), "list departments");
            Ok(Json(list))
        }
        Err(e) => {
            error!(err = %e, "list departments failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    post, path = "/api/departments", tag = "departments",
    request_body = DepartmentInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<DepartmentInput>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<models::department::Model>), JsonApiError> {
    match department_service::create_department(
        &state.db,
        &input.name,
        input.founded_date,
        input.head_id,
    )
    .await
    {
        Ok(m) => {
            info!(id = m.id, name = %m.name, "created department");
            let location = format!("/api/departments/{}", m.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(m)))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "create department failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    put, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i32, Path, description = "Department ID")),
    request_body = DepartmentInput,
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
    Json(input): Json<DepartmentInput>,
) -> Result<Json<models::department::Model>, JsonApiError> {
    match department_service::update_department(
        &state.db,
        id,
        &input.name,
        input.founded_date,
        input.head_id,
    )
    .await
    {
        Ok(m) => {
            info!(id = m.id, "updated department");
            Ok(Json(m))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "update department failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i32, Path, description = "Department ID")),
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
    match department_service::delete_department(&state.db, id).await {
        Ok(true) => {
            info!(id, "deleted department");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "delete department failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string())))
        }
    }
}
