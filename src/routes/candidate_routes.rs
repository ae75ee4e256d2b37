use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::{
        candidate_dto::{CreateCandidatePayload, SearchQuery},
        comment_dto::CreateCommentPayload,
    },
    error::{Error, Result},
    models::{candidate::Candidate, comment::Comment, file::FileMeta},
    utils::upload::{
        content_disposition, content_type_for, ensure_allowed_extension, read_file_field,
    },
    AppState,
};

async fn require_candidate(state: &AppState, id: i64) -> Result<()> {
    if state.candidate_service.exists(id).await? {
        Ok(())
    } else {
        Err(Error::NotFound(format!("Candidate {} not found", id)))
    }
}

#[utoipa::path(
    get,
    path = "/api/candidates",
    params(SearchQuery),
    responses(
        (status = 200, description = "Candidates, newest first", body = [Candidate])
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let candidates = match query.keyword.as_deref() {
        Some(keyword) => state.candidate_service.search_candidates(keyword).await?,
        None => state.candidate_service.list_candidates().await?,
    };
    Ok(Json(candidates))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate created", body = Candidate),
        (status = 400, description = "Missing name or phone, or a tag containing a comma")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    let new = payload.into_new_candidate()?;
    let candidate = state.candidate_service.add_candidate(new).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = Candidate),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidate_service
        .get_candidate(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;
    Ok(Json(candidate))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/files",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Attachment metadata, newest first", body = [FileMeta]),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn list_files(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    require_candidate(&state, id).await?;
    let files = state.file_service.list_files(id).await?;
    Ok(Json(files))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/files",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 201, description = "Attachment stored", body = FileMeta),
        (status = 400, description = "No file part or extension not allowed"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn upload_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    require_candidate(&state, id).await?;

    let upload = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| Error::BadRequest("A 'file' part with a file name is required".into()))?;
    ensure_allowed_extension(&upload.file_name)?;

    let meta = state
        .file_service
        .save_file(id, &upload.file_name, &upload.data)
        .await?;
    Ok((StatusCode::CREATED, Json(meta)))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/files/{file_id}",
    params(
        ("id" = i64, Path, description = "Candidate ID"),
        ("file_id" = i64, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Raw attachment bytes"),
        (status = 404, description = "Attachment not found")
    )
)]
#[axum::debug_handler]
pub async fn download_file(
    State(state): State<AppState>,
    Path((id, file_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let file = state
        .file_service
        .get_file(id, file_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("File {} not found", file_id)))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&file.file_name).to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file.file_name)),
        ],
        file.file_data,
    ))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}/comments",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Comments, newest first", body = [Comment]),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    require_candidate(&state, id).await?;
    let comments = state.comment_service.list_comments(id).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/comments",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    request_body = CreateCommentPayload,
    responses(
        (status = 201, description = "Comment added", body = Comment),
        (status = 400, description = "Empty comment"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if payload.is_blank() {
        return Err(Error::BadRequest("comment text is required".into()));
    }
    require_candidate(&state, id).await?;

    let comment = state.comment_service.add_comment(id, &payload.text).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
