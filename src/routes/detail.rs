//! Candidate detail screen: attachments and comments.

use axum::{
    extract::{Multipart, Path, State},
    response::{Html, Redirect},
    Extension, Form,
};
use tracing::{info, warn};

use crate::{
    dto::comment_dto::CreateCommentPayload,
    error::Result,
    middleware::session::{Flash, SessionHandle},
    models::candidate::Candidate,
    utils::upload::{ensure_allowed_extension, read_file_field, ALLOWED_EXTENSIONS},
    views::{detail, layout::page},
    AppState,
};

pub(crate) async fn render(
    state: &AppState,
    candidate: Candidate,
    flash: Option<Flash>,
) -> Result<Html<String>> {
    let files = state.file_service.list_files(candidate.id).await?;
    let comments = state.comment_service.list_comments(candidate.id).await?;
    let content = detail::detail(&candidate, &files, &comments);
    Ok(Html(page(None, flash.as_ref(), &content)))
}

/// Sends the session back to the roster when `id` no longer resolves.
async fn ensure_candidate(state: &AppState, session: &SessionHandle, id: i64) -> Result<bool> {
    if state.candidate_service.exists(id).await? {
        return Ok(true);
    }
    warn!(candidate_id = id, "Detail action for unknown candidate");
    session.back_to_list();
    session.flash(Flash::error("候选人不存在"));
    Ok(false)
}

/// `POST /candidates/:id/files`
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    if !ensure_candidate(&state, &session, id).await? {
        return Ok(Redirect::to("/"));
    }

    let Some(upload) = read_file_field(&mut multipart).await? else {
        session.flash(Flash::warning("请先选择要上传的文件"));
        return Ok(Redirect::to("/"));
    };

    if ensure_allowed_extension(&upload.file_name).is_err() {
        session.flash(Flash::error(format!(
            "❌ 不支持的文件类型，仅支持：{}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
        return Ok(Redirect::to("/"));
    }

    state
        .file_service
        .save_file(id, &upload.file_name, &upload.data)
        .await?;
    session.flash(Flash::success(format!(
        "✅ 文件 '{}' 上传成功！",
        upload.file_name
    )));
    Ok(Redirect::to("/"))
}

/// `POST /candidates/:id/comments`
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<i64>,
    Form(payload): Form<CreateCommentPayload>,
) -> Result<Redirect> {
    if !ensure_candidate(&state, &session, id).await? {
        return Ok(Redirect::to("/"));
    }

    if payload.is_blank() {
        session.flash(Flash::info("备注内容不能为空"));
        return Ok(Redirect::to("/"));
    }

    let comment = state.comment_service.add_comment(id, &payload.text).await?;
    info!(candidate_id = id, comment_id = comment.id, "Comment added from detail page");
    session.flash(Flash::success("✅ 备注已添加"));
    Ok(Redirect::to("/"))
}
