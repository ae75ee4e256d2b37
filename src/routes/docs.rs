use axum::Json;
use utoipa::OpenApi;

use crate::{
    dto::{candidate_dto::CreateCandidatePayload, comment_dto::CreateCommentPayload},
    models::{candidate::Candidate, comment::Comment, file::FileMeta},
    routes::{candidate_routes, health},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        candidate_routes::list_candidates,
        candidate_routes::create_candidate,
        candidate_routes::get_candidate,
        candidate_routes::list_files,
        candidate_routes::upload_file,
        candidate_routes::download_file,
        candidate_routes::list_comments,
        candidate_routes::add_comment,
    ),
    components(schemas(
        Candidate,
        FileMeta,
        Comment,
        CreateCandidatePayload,
        CreateCommentPayload
    )),
    info(title = "Candidate Tracker API")
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
