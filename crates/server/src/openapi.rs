use axum::Json;
use utoipa::OpenApi;

use crate::routes::{departments, disciplines, loads, teachers};

#[derive(OpenApi)]
#[openapi(
    info(title = "University Records API", description = "CRUD over departments, teachers, disciplines and teaching loads"),
    paths(
        departments::list,
        departments::create,
        departments::update,
        departments::remove,
        teachers::list,
        teachers::get_by_id,
        teachers::create,
        teachers::update,
        teachers::remove,
        disciplines::list,
        disciplines::get_by_id,
        disciplines::create,
        disciplines::update,
        disciplines::remove,
        disciplines::by_head_last_name,
        loads::list,
        loads::create,
        loads::update,
        loads::remove,
    ),
    components(schemas(
        departments::DepartmentInput,
        teachers::TeacherInput,
        disciplines::DisciplineInput,
        loads::LoadInput,
    )),
    tags(
        (name = "departments", description = "Department management"),
        (name = "teachers", description = "Teacher management"),
        (name = "disciplines", description = "Discipline management"),
        (name = "loads", description = "Teaching load management"),
    )
)]
pub struct ApiDoc;

pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
