use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::Html,
    Form,
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::account::view::{CurriculaView, LinksView, ProfileView};
use crate::account::ProfileForm;
use crate::errors::AppError;
use crate::models::profile::{ProfileUpdate, UserRole};
use crate::notice::Notice;
use crate::services;
use crate::state::AppState;

/// GET /profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let user = state.current_user().await?;
    let profile = services::profiles::get_profile(state.transport.as_ref(), user.role, &user.id).await?;
    Ok(Html(ProfileView { notice: None, profile }.render()?))
}

/// POST /profile
/// A rejected update re-renders the stored profile with the error.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Form(form): Form<ProfileForm>,
) -> Result<Html<String>, AppError> {
    let user = state.current_user().await?;
    let transport = state.transport.as_ref();
    let update = ProfileUpdate::from(form);

    let view = match services::profiles::update_profile(transport, user.role, &user.id, &update).await {
        Ok(profile) => ProfileView {
            notice: Some(Notice::success("Profile saved.")),
            profile,
        },
        Err(e) => ProfileView {
            notice: Some(Notice::from(&e)),
            profile: services::profiles::get_profile(transport, user.role, &user.id).await?,
        },
    };
    Ok(Html(view.render()?))
}

/// GET /links
pub async fn handle_links(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let links = services::links::list_links(state.transport.as_ref()).await?;
    let view = LinksView::from(services::links::group_by_category(links));
    Ok(Html(view.render()?))
}

/// GET /curricula
pub async fn handle_list_curricula(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Candidate).await?;
    let curricula = services::curricula::list_curricula(state.transport.as_ref(), &user.id).await?;
    Ok(Html(CurriculaView::new(curricula, None).render()?))
}

struct UploadedFile {
    file_name: String,
    content_type: String,
    data: Bytes,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("curriculum.pdf").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Validation("Choose a PDF to upload.".to_string()))
}

/// POST /curricula (multipart, field `file`)
pub async fn handle_upload_curriculum(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let user = state.require_role(UserRole::Candidate).await?;
    let transport = state.transport.as_ref();

    let uploaded = match read_upload(multipart).await {
        Ok(file) => {
            services::curricula::upload_curriculum(
                transport,
                &state.config.storage_bucket,
                &user.id,
                &file.file_name,
                &file.content_type,
                file.data,
            )
            .await
        }
        Err(e) => Err(e),
    };
    let notice = match uploaded {
        Ok(cv) => Notice::success(format!("{} uploaded.", cv.file_name)),
        Err(e) => Notice::from(&e),
    };

    let curricula = services::curricula::list_curricula(transport, &user.id).await?;
    Ok(Html(CurriculaView::new(curricula, Some(notice)).render()?))
}

/// POST /session/clear
pub async fn handle_clear_session(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    if let Err(e) = state.session.clear().await {
        warn!("session cache could not be removed: {e}");
        return Err(e);
    }
    state.lists.reset(state.config.page_size).await;
    info!("session cleared");
    Ok(Html(Notice::info("You have been signed out.").render()?))
}
