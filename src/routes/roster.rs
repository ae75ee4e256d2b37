//! Roster, create and search screens, plus the navigation actions that move a
//! session between the listing and a candidate's detail page.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    dto::candidate_dto::{CandidateForm, CreateCandidatePayload, SearchQuery},
    error::{Error, Result},
    middleware::session::{Flash, NavState, SessionHandle},
    routes::detail,
    views::{
        candidates,
        layout::{page, Menu},
    },
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub menu: Option<Menu>,
}

/// `GET /`. Shows the detail screen while the session is viewing a candidate,
/// otherwise the selected sidebar mode.
pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Query(query): Query<MenuQuery>,
) -> Result<Html<String>> {
    let mut flash = session.take_flash();

    if let NavState::ViewingDetail(id) = session.nav() {
        match state.candidate_service.get_candidate(id).await? {
            Some(candidate) => return detail::render(&state, candidate, flash).await,
            None => {
                warn!(candidate_id = id, session_id = %session.id(), "Detail target vanished");
                session.back_to_list();
                flash = Some(Flash::error("候选人不存在"));
            }
        }
    }

    let menu = query.menu.unwrap_or_default();
    let content = match menu {
        Menu::Roster => {
            let all = state.candidate_service.list_candidates().await?;
            candidates::roster(&all)
        }
        Menu::Create => candidates::create_form(&CandidateForm::default()),
        Menu::Search => candidates::search(None, None),
    };
    Ok(Html(page(Some(menu), flash.as_ref(), &content)))
}

/// `POST /candidates` from the create form.
pub async fn create_candidate(
    State(state): State<AppState>,
    Form(form): Form<CandidateForm>,
) -> Result<Html<String>> {
    let payload = CreateCandidatePayload::from(form.clone());

    let flash = match payload.into_new_candidate() {
        Ok(new) => {
            let created = state.candidate_service.add_candidate(new).await?;
            info!(candidate_id = created.id, "Candidate added from form");
            let content = candidates::create_form(&CandidateForm::default());
            let flash = Flash::success(format!("✅ 成功添加候选人：{}", created.name));
            return Ok(Html(page(Some(Menu::Create), Some(&flash), &content)));
        }
        Err(Error::Validation(_)) => Flash::error("❌ 姓名和手机号为必填项！"),
        Err(Error::BadRequest(msg)) => Flash::error(format!("❌ {}", msg)),
        Err(other) => return Err(other),
    };

    let content = candidates::create_form(&form);
    Ok(Html(page(Some(Menu::Create), Some(&flash), &content)))
}

/// `GET /search`. Without a `keyword` parameter only the search box renders;
/// an empty keyword lists everyone.
pub async fn search(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>> {
    let flash = session.take_flash();
    let content = match query.keyword.as_deref() {
        Some(keyword) => {
            let results = state.candidate_service.search_candidates(keyword).await?;
            info!(keyword, hits = results.len(), "Candidate search");
            candidates::search(Some(keyword), Some(results.as_slice()))
        }
        None => candidates::search(None, None),
    };
    Ok(Html(page(Some(Menu::Search), flash.as_ref(), &content)))
}

/// `POST /candidates/:id/view`
pub async fn view_detail(
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<i64>,
) -> Redirect {
    session.view_detail(id);
    Redirect::to("/")
}

/// `POST /back`
pub async fn back_to_list(Extension(session): Extension<SessionHandle>) -> Redirect {
    session.back_to_list();
    Redirect::to("/")
}
