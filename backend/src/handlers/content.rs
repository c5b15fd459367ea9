//! CMS page handlers and HTML rendering endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::AdminUser;
use crate::content::{
    render_page, render_section, CreatePageRequest, PageQuery, PageWithSections, SectionInput,
    UpdatePageRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/content - Every page, or the one matching `?slug=`
pub async fn list_pages(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    match query.slug {
        Some(slug) => {
            let page = state.page_service.get_page_by_slug(&slug).await?;
            Ok(Json(page).into_response())
        }
        None => {
            let pages = state.page_service.list_pages().await?;
            Ok(Json(pages).into_response())
        }
    }
}

/// GET /api/content/:id
pub async fn get_page(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PageWithSections>, ApiError> {
    let page = state.page_service.get_page(id).await?;

    Ok(Json(page))
}

/// POST /api/content
pub async fn create_page(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(req): Json<CreatePageRequest>,
) -> Result<(StatusCode, Json<PageWithSections>), ApiError> {
    req.validate()?;
    let page = state.page_service.create_page(req).await?;

    Ok((StatusCode::CREATED, Json(page)))
}

/// PUT /api/content/:id - Supplied sections replace all existing ones
pub async fn update_page(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePageRequest>,
) -> Result<Json<PageWithSections>, ApiError> {
    req.validate()?;
    let page = state.page_service.update_page(id, req).await?;

    Ok(Json(page))
}

/// DELETE /api/content/:id - Sections go with the page
pub async fn delete_page(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.page_service.delete_page(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/pages/:slug/render - Published pages only
pub async fn render_published_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ApiError> {
    let page = state.page_service.get_published_page(&slug).await?;

    Ok(Html(render_page(&page)))
}

/// POST /api/content/preview - Render one section body without storing it
pub async fn preview_section(
    AdminUser(_admin): AdminUser,
    Json(input): Json<SectionInput>,
) -> Html<String> {
    let section = input.into_section(Uuid::nil(), 0);
    Html(render_section(&section))
}
