use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use service::discipline_service::{self, DisciplineQuery, DisciplineSummary};
use service::errors::ServiceError;

use crate::{errors::JsonApiError, routes::ServerState};

const NOT_FOUND_MSG: &str = "Дисциплина не найдена.";
const HEAD_NOT_FOUND_MSG: &str = "Дисциплины не найдены для указанного заведующего.";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Case-sensitive fragment of a teacher's first name.
    pub first_name: Option<String>,
    /// Case-sensitive fragment of a teacher's last name.
    pub last_name: Option<String>,
    /// Inclusive lower bound on total hours.
    pub min_hours: Option<i32>,
    /// Inclusive upper bound on total hours.
    pub max_hours: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DisciplineInput {
    pub name: String,
}

#[utoipa::path(
    get, path = "/api/disciplines", tag = "disciplines",
    params(ListParams),
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DisciplineSummary>>, JsonApiError> {
    let query = DisciplineQuery {
        first_name: params.first_name,
        last_name: params.last_name,
        min_hours: params.min_hours,
        max_hours: params.max_hours,
    };
    match discipline_service::list_disciplines(&state.db, &query).await {
        Ok(list) => {
            info!(count = list.len(), "list disciplines");
            Ok(Json(list))
        }
        Err(e) => {
            error!(err = %e, "list disciplines failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/api/disciplines/{id}", tag = "disciplines",
    params(("id" = i32, Path, description = "Discipline ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<DisciplineSummary>, JsonApiError> {
    match discipline_service::get_discipline(&state.db, id).await {
        Ok(Some(summary)) => Ok(Json(summary)),
        Ok(None) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "get discipline failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Get Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    post, path = "/api/disciplines", tag = "disciplines",
    request_body = DisciplineInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<DisciplineInput>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<models::discipline::Model>), JsonApiError> {
    match discipline_service::create_discipline(&state.db, &input.name).await {
        Ok(m) => {
            info!(id = m.id, name = %m.name, "created discipline");
            let location = format!("/api/disciplines/{}", m.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(m)))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "create discipline failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    put, path = "/api/disciplines/{id}", tag = "disciplines",
    params(("id" = i32, Path, description = "Discipline ID")),
    request_body = DisciplineInput,
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
    Json(input): Json<DisciplineInput>,
) -> Result<Json<models::discipline::Model>, JsonApiError> {
    match discipline_service::update_discipline(&state.db, id, &input.name).await {
        Ok(m) => {
            info!(id = m.id, "updated discipline");
            Ok(Json(m))
        }
        Err(e @ ServiceError::Validation(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(ServiceError::NotFound(_)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "update discipline failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/disciplines/{id}", tag = "disciplines",
    params(("id" = i32, Path, description = "Discipline ID")),
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
    match discipline_service::delete_discipline(&state.db, id).await {
        Ok(true) => {
            info!(id, "deleted discipline");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_MSG.into())))
        }
        Err(e) => {
            error!(err = %e, "delete discipline failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/api/disciplines/head/lastname/{head_last_name}", tag = "disciplines",
    params(("head_last_name" = String, Path, description = "Head of department last name")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "No disciplines for that head")
    )
)]
pub async fn by_head_last_name(
    State(state): State<ServerState>,
    Path(head_last_name): Path<String>,
) -> Result<Json<Vec<String>>, JsonApiError> {
    match discipline_service::disciplines_by_head_last_name(&state.db, &head_last_name).await {
        Ok(names) if names.is_empty() => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(HEAD_NOT_FOUND_MSG.into()),
        )),
        Ok(names) => {
            info!(count = names.len(), head = %head_last_name, "disciplines by head");
            Ok(Json(names))
        }
        Err(e) => {
            error!(err = %e, "disciplines by head failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Query Failed", Some(e.to_string())))
        }
    }
}
