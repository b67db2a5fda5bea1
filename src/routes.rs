use std::path::Path as FsPath;
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, error, info};

use crate::form::{FeedForm, FeedFormInput};
use crate::models::{Feed, FeedId};
use crate::store::{FeedStore, StoreError};

pub struct AppState {
    pub store: Arc<dyn FeedStore>,
}

/// Builds the application router. Assets under `static_dir` are served at
/// `/static` with the prefix stripped.
pub fn router(state: Arc<AppState>, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/feeds", get(list_feeds).post(create_feed))
        .route("/feeds/new", get(new_feed))
        .route("/feeds/:id", get(show_feed))
        .route("/feeds/:id/edit", get(edit_feed).post(update_feed))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Template structs
#[derive(Template)]
#[template(path = "feeds/index.html")]
pub struct FeedsTemplate {
    pub feeds: Vec<Feed>,
}

#[derive(Template)]
#[template(path = "feeds/show.html")]
pub struct FeedTemplate {
    pub feed: Feed,
}

#[derive(Template)]
#[template(path = "feeds/new.html")]
pub struct NewFeedTemplate {
    pub form: FeedForm,
}

#[derive(Template)]
#[template(path = "feeds/edit.html")]
pub struct EditFeedTemplate {
    pub id: FeedId,
    pub form: FeedForm,
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => AppError::Internal(err.into()).into_response(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    NotFound,
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
            AppError::Internal(err) => {
                error!("Request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => {
                debug!(feed_id = id, "Feed not found");
                AppError::NotFound
            }
        }
    }
}

/// Parses a feed identifier from a path segment. Malformed and negative
/// values are reported as not found rather than as bad requests.
pub fn parse_feed_id(raw: &str) -> Option<FeedId> {
    raw.parse::<FeedId>().ok().filter(|id| *id >= 0)
}

fn feed_id_from_path(raw: &str) -> Result<FeedId, AppError> {
    parse_feed_id(raw).ok_or_else(|| {
        debug!(raw_id = raw, "Rejected feed id");
        AppError::NotFound
    })
}

/// An unreadable body (wrong content type, repeated fields) is treated as an
/// empty submission so it fails validation and the form is shown again.
fn form_input(body: Result<Form<FeedFormInput>, FormRejection>) -> FeedFormInput {
    match body {
        Ok(Form(input)) => input,
        Err(rejection) => {
            debug!("Unreadable form body: {}", rejection);
            FeedFormInput::default()
        }
    }
}

fn feed_location(id: FeedId) -> String {
    format!("/feeds/{}", id)
}

// Route handlers
pub async fn index() -> Redirect {
    Redirect::to("/feeds")
}

pub async fn list_feeds(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    HtmlTemplate(FeedsTemplate {
        feeds: state.store.list(),
    })
}

pub async fn new_feed() -> impl IntoResponse {
    HtmlTemplate(NewFeedTemplate {
        form: FeedForm::new(),
    })
}

pub async fn create_feed(
    State(state): State<Arc<AppState>>,
    body: Result<Form<FeedFormInput>, FormRejection>,
) -> Result<Response, AppError> {
    let form = FeedForm::from_input(form_input(body));
    if !form.is_valid() {
        return Ok(HtmlTemplate(NewFeedTemplate { form }).into_response());
    }

    let feed = state
        .store
        .create(form.to_new_feed())
        .map_err(|err| AppError::Internal(err.into()))?;
    info!(feed_id = feed.id, title = %feed.title, "Created feed");

    Ok(Redirect::to(&feed_location(feed.id)).into_response())
}

pub async fn show_feed(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = feed_id_from_path(&raw_id)?;
    let feed = state.store.get(id)?;
    Ok(HtmlTemplate(FeedTemplate { feed }))
}

pub async fn edit_feed(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = feed_id_from_path(&raw_id)?;
    let feed = state.store.get(id)?;
    Ok(HtmlTemplate(EditFeedTemplate {
        id,
        form: FeedForm::from_feed(&feed),
    }))
}

pub async fn update_feed(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: Result<Form<FeedFormInput>, FormRejection>,
) -> Result<Response, AppError> {
    let id = feed_id_from_path(&raw_id)?;

    let mut form = FeedForm::from_input(form_input(body));
    form.set_id(id);
    if !form.is_valid() {
        return Ok(HtmlTemplate(EditFeedTemplate { id, form }).into_response());
    }

    let feed = state.store.update(form.to_update(id))?;
    info!(feed_id = feed.id, title = %feed.title, "Updated feed");

    Ok(Redirect::to(&feed_location(id)).into_response())
}
