//! Request handlers.
//!
//! Each handler locks its session once through [`AppState::with_session`],
//! performs validation and mutation inside that closure, and answers with a
//! redirect or a rendered page. Validation failures re-render the
//! originating form; not-found conditions flash an error and redirect to the
//! list index.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Form,
};
use tracing::{debug, error, warn};

use super::types::{CompletedForm, ListForm, TodoForm};
use super::views;
use crate::error::TodoError;
use crate::session::{Session, SessionConfig, SessionId, SessionStore};
use crate::todo::{ListId, TodoId};
use crate::Result;

const LISTS_PATH: &str = "/lists";

/// Header set by background scripts.
const REQUESTED_WITH: &str = "x-requested-with";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            store: Arc::new(SessionStore::with_config(config)),
        }
    }

    /// Run `f` against the caller's session under the store's write lock.
    pub fn with_session<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut Session) -> Result<R>,
    ) -> Result<R> {
        self.store.update(id, f)?
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal failure surfaced as a 500.
#[derive(Debug)]
pub struct AppError(TodoError);

impl From<TodoError> for AppError {
    fn from(e: TodoError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

type HandlerResult = std::result::Result<Response, AppError>;

/// Whether the request came from a background script rather than navigation.
pub fn is_async_origin(headers: &HeaderMap) -> bool {
    headers
        .get(REQUESTED_WITH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

/// Path ids that fail to parse map to the never-assigned id `0`.
fn list_id(raw: &str) -> ListId {
    raw.parse().unwrap_or_default()
}

fn todo_id(raw: &str) -> TodoId {
    raw.parse().unwrap_or_default()
}

fn list_path(id: ListId) -> String {
    format!("{LISTS_PATH}/{id}")
}

/// `302 Found` pointing at `path`.
fn found(path: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, path)]).into_response()
}

/// Turn a not-found error into a flash message and a redirect to the index.
///
/// Any other error is passed through.
fn recover_not_found(session: &mut Session, err: TodoError) -> Result<Response> {
    if !err.is_not_found() {
        return Err(err);
    }
    warn!(error = %err, "Requested item missing");
    if let Some(message) = err.user_message() {
        session.flash.set_error(message);
    }
    Ok(found(LISTS_PATH))
}

/// Take the pending flash and add the validation message to it.
fn with_error(session: &mut Session, err: &TodoError) -> crate::session::Flash {
    let mut flash = session.flash.take();
    if let Some(message) = err.user_message() {
        flash.set_error(message);
    }
    flash
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// `GET /`
pub async fn root() -> Response {
    found(LISTS_PATH)
}

/// `GET /lists`
pub async fn index(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
) -> HandlerResult {
    let html = state.with_session(&sid, |session| {
        let flash = session.flash.take();
        Ok(views::lists_page(&session.lists, &flash))
    })?;
    Ok(Html(html).into_response())
}

/// `GET /lists/new`
pub async fn new_list(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
) -> HandlerResult {
    let html = state.with_session(&sid, |session| {
        let flash = session.flash.take();
        Ok(views::new_list_page(&flash, ""))
    })?;
    Ok(Html(html).into_response())
}

/// `POST /lists`
pub async fn create_list(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Form(form): Form<ListForm>,
) -> HandlerResult {
    let response = state.with_session(&sid, |session| {
        match session.lists.create(&form.list_name) {
            Ok(list) => {
                debug!(list_id = %list.id, "List created");
                session.flash.set_success("The list has been created.");
                Ok(found(LISTS_PATH))
            }
            Err(e @ TodoError::Validation(_)) => {
                debug!(error = %e, "List name rejected");
                let flash = with_error(session, &e);
                Ok(Html(views::new_list_page(&flash, form.list_name.trim())).into_response())
            }
            Err(e) => Err(e),
        }
    })?;
    Ok(response)
}

/// `GET /lists/{id}`
pub async fn show_list(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Path(id): Path<String>,
) -> HandlerResult {
    let id = list_id(&id);
    let response = state.with_session(&sid, |session| match session.lists.find(id) {
        Ok(list) => {
            let flash = session.flash.take();
            Ok(Html(views::list_page(list, &flash, "")).into_response())
        }
        Err(e) => recover_not_found(session, e),
    })?;
    Ok(response)
}

/// `GET /lists/{id}/edit`
pub async fn edit_list(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Path(id): Path<String>,
) -> HandlerResult {
    let id = list_id(&id);
    let response = state.with_session(&sid, |session| match session.lists.find(id) {
        Ok(list) => {
            let flash = session.flash.take();
            Ok(Html(views::edit_list_page(list, &flash, &list.name)).into_response())
        }
        Err(e) => recover_not_found(session, e),
    })?;
    Ok(response)
}

/// `POST /lists/{id}`
pub async fn update_list(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Path(id): Path<String>,
    Form(form): Form<ListForm>,
) -> HandlerResult {
    let id = list_id(&id);
    let response = state.with_session(&sid, |session| {
        match session.lists.rename(id, &form.list_name) {
            Ok(()) => {
                debug!(list_id = %id, "List renamed");
                session.flash.set_success("The list has been updated.");
                Ok(found(&list_path(id)))
            }
            Err(e @ TodoError::Validation(_)) => {
                debug!(list_id = %id, error = %e, "List name rejected");
                let flash = with_error(session, &e);
                let list = session.lists.find(id)?;
                Ok(Html(views::edit_list_page(list, &flash, form.list_name.trim())).into_response())
            }
            Err(e) => recover_not_found(session, e),
        }
    })?;
    Ok(response)
}

/// `POST /lists/{id}/delete`
///
/// Background requests receive the redirect target as a plain body instead
/// of a redirect.
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HandlerResult {
    let id = list_id(&id);
    let background = is_async_origin(&headers);

    let response = state.with_session(&sid, |session| match session.lists.delete(id) {
        Ok(_) => {
            debug!(list_id = %id, "List deleted");
            session.flash.set_success("The list has been deleted.");
            if background {
                Ok((StatusCode::OK, LISTS_PATH).into_response())
            } else {
                Ok(found(LISTS_PATH))
            }
        }
        Err(e) => {
            let redirect = recover_not_found(session, e)?;
            if background {
                Ok((StatusCode::NOT_FOUND, LISTS_PATH).into_response())
            } else {
                Ok(redirect)
            }
        }
    })?;
    Ok(response)
}

/// `POST /lists/{id}/todos`
pub async fn add_todo(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Path(id): Path<String>,
    Form(form): Form<TodoForm>,
) -> HandlerResult {
    let id = list_id(&id);
    let response = state.with_session(&sid, |session| {
        let list = match session.lists.find_mut(id) {
            Ok(list) => list,
            Err(e) => return recover_not_found(session, e),
        };

        match list.add_todo(&form.todo) {
            Ok(todo) => {
                debug!(list_id = %id, todo_id = %todo.id, "Todo added");
                session.flash.set_success("The todo has been added.");
                Ok(found(&list_path(id)))
            }
            Err(e @ TodoError::Validation(_)) => {
                debug!(list_id = %id, error = %e, "Todo name rejected");
                let flash = with_error(session, &e);
                let list = session.lists.find(id)?;
                Ok(Html(views::list_page(list, &flash, form.todo.trim())).into_response())
            }
            Err(e) => Err(e),
        }
    })?;
    Ok(response)
}

/// `POST /lists/{id}/todos/{todo_id}/delete`
///
/// Background requests receive `204 No Content`.
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Path((id, todo)): Path<(String, String)>,
    headers: HeaderMap,
) -> HandlerResult {
    let id = list_id(&id);
    let todo = todo_id(&todo);
    let background = is_async_origin(&headers);

    let response = state.with_session(&sid, |session| {
        let deleted = session
            .lists
            .find_mut(id)
            .and_then(|list| list.delete_todo(todo));

        match deleted {
            Ok(_) => {
                debug!(list_id = %id, todo_id = %todo, "Todo deleted");
                session.flash.set_success("The todo item has been deleted.");
                if background {
                    Ok(StatusCode::NO_CONTENT.into_response())
                } else {
                    Ok(found(&list_path(id)))
                }
            }
            Err(e) => {
                let redirect = recover_not_found(session, e)?;
                if background {
                    Ok(StatusCode::NOT_FOUND.into_response())
                } else {
                    Ok(redirect)
                }
            }
        }
    })?;
    Ok(response)
}

/// `POST /lists/{id}/todos/{todo_id}`
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Path((id, todo)): Path<(String, String)>,
    Form(form): Form<CompletedForm>,
) -> HandlerResult {
    let id = list_id(&id);
    let todo = todo_id(&todo);
    let completed = form.is_completed();

    let response = state.with_session(&sid, |session| {
        let updated = session
            .lists
            .find_mut(id)
            .and_then(|list| list.set_todo_completed(todo, completed));

        match updated {
            Ok(()) => {
                debug!(list_id = %id, todo_id = %todo, completed, "Todo updated");
                session.flash.set_success("The todo has been updated.");
                Ok(found(&list_path(id)))
            }
            Err(e) => recover_not_found(session, e),
        }
    })?;
    Ok(response)
}

/// `POST /lists/{id}/complete_all`
pub async fn complete_all(
    State(state): State<AppState>,
    Extension(sid): Extension<SessionId>,
    Path(id): Path<String>,
) -> HandlerResult {
    let id = list_id(&id);
    let response = state.with_session(&sid, |session| match session.lists.find_mut(id) {
        Ok(list) => {
            list.complete_all();
            debug!(list_id = %id, "All todos completed");
            session.flash.set_success("All todos have been completed.");
            Ok(found(&list_path(id)))
        }
        Err(e) => recover_not_found(session, e),
    })?;
    Ok(response)
}
