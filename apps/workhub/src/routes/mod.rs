pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};

use crate::job_lists::JobListKind;
use crate::models::community::Board;
use crate::services::curricula::MAX_CURRICULUM_BYTES;
use crate::state::AppState;
use crate::{account, alerts, board, community, job_lists};

/// Room for multipart framing around the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = MAX_CURRICULUM_BYTES + 64 * 1024;

/// Same routes for applied jobs and favorites; the kind rides in an extension.
fn job_list_routes(kind: JobListKind) -> Router<AppState> {
    Router::new()
        .route("/", get(job_lists::handlers::handle_list_jobs))
        .route("/filters", post(job_lists::handlers::handle_filter_jobs))
        .route("/actions", post(job_lists::handlers::handle_job_action))
        .layer(Extension(kind))
}

fn community_routes(board: Board) -> Router<AppState> {
    Router::new()
        .route("/", get(community::handlers::handle_list_posts))
        .route("/:id", get(community::handlers::handle_thread))
        .route("/:id/comments", post(community::handlers::handle_post_comment))
        .route("/:id/actions", post(community::handlers::handle_thread_action))
        .layer(Extension(board))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job alerts
        .route("/alerts", get(alerts::handlers::handle_list_alerts))
        .route("/alerts/filters", post(alerts::handlers::handle_filter_alerts))
        .route("/alerts/actions", post(alerts::handlers::handle_alert_action))
        // Applied jobs and favorites
        .nest("/applications", job_list_routes(JobListKind::Applied))
        .nest("/favorites", job_list_routes(JobListKind::Favorites))
        // Job board
        .route(
            "/jobs",
            get(board::handlers::handle_list_board).post(board::handlers::handle_publish_job),
        )
        .route("/jobs/filters", post(board::handlers::handle_filter_board))
        .route("/jobs/actions", post(board::handlers::handle_board_action))
        .route("/jobs/:id", get(board::handlers::handle_job_detail))
        .route("/jobs/:id/apply", post(board::handlers::handle_apply))
        .route("/jobs/:id/favorite", post(board::handlers::handle_add_favorite))
        // Blogs and forums
        .nest("/blogs", community_routes(Board::Blog))
        .nest("/forums", community_routes(Board::Forum))
        // Account
        .route(
            "/profile",
            get(account::handlers::handle_get_profile).post(account::handlers::handle_update_profile),
        )
        .route("/links", get(account::handlers::handle_links))
        .route(
            "/curricula",
            get(account::handlers::handle_list_curricula)
                .post(account::handlers::handle_upload_curriculum)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/session/clear", post(account::handlers::handle_clear_session))
        .with_state(state)
}
