//! HTTP integration tests.
//!
//! These tests drive the full router with axum's test utilities, carrying
//! the session cookie from one request to the next like a browser would.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use session_todos::{create_router_with_state, AppState, ListId, Lists, SessionId, TodoId};
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";

/// A browser-like client holding one session cookie.
struct Client {
    app: Router,
    state: AppState,
    cookie: Option<String>,
}

impl Client {
    fn new() -> Self {
        let state = AppState::new();
        Self::with_state(state)
    }

    fn with_state(state: AppState) -> Self {
        Self {
            app: create_router_with_state(state.clone()),
            state,
            cookie: None,
        }
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set) = response.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn post(&mut self, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn post_background(&mut self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM)
            .header("X-Requested-With", "XMLHttpRequest")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn get_text(&mut self, uri: &str) -> String {
        let response = self.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        response_text(response).await
    }

    /// Snapshot of this client's lists, read straight from the store.
    fn lists(&self) -> Lists {
        let cookie = self.cookie.as_deref().expect("no session yet");
        let (_, token) = cookie.split_once('=').unwrap();
        let id: SessionId = token.parse().unwrap();
        self.state.store.get(&id).unwrap().unwrap().lists
    }
}

/// Helper to extract body as string.
async fn response_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&body).to_string()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(response), to);
}

/// Create a session holding one list (id 1) with the given todos.
async fn client_with_list(todos: &[&str]) -> Client {
    let mut client = Client::new();
    client.post("/lists", "list_name=Groceries").await;
    for todo in todos {
        let response = client.post("/lists/1/todos", &format!("todo={todo}")).await;
        assert_redirect(&response, "/lists/1");
    }
    client
}

// ============================================================================
// Health & Routing Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint_has_no_session() {
    let mut client = Client::new();
    let response = client.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(response_text(response).await, "OK");
    assert_eq!(client.state.store.count(), 0);
}

#[tokio::test]
async fn test_create_list_answers_302_found() {
    let mut client = Client::new();
    let response = client.post("/lists", "list_name=Groceries").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(&response), "/lists");
}

#[tokio::test]
async fn test_delete_script_is_served() {
    let mut client = Client::new();
    let response = client.get("/javascripts/application.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.contains("javascript"));

    let script = response_text(response).await;
    assert!(script.contains("form.delete"));
    assert!(script.contains("204"));
}

#[tokio::test]
async fn test_pages_load_delete_script() {
    let mut client = client_with_list(&["Milk"]).await;
    let page = client.get_text("/lists/1").await;

    assert!(page.contains(r#"<script src="/javascripts/application.js"></script>"#));
    assert!(page.contains("jquery"));
    assert!(page.contains(r#"class="delete""#));
}

#[tokio::test]
async fn test_root_redirects_to_lists() {
    let mut client = Client::new();
    let response = client.get("/").await;
    assert_redirect(&response, "/lists");
}

#[tokio::test]
async fn test_not_found_route() {
    let mut client = Client::new();
    let response = client.get("/nonexistent").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_method_not_allowed() {
    let mut client = Client::new();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/lists")
        .body(Body::empty())
        .unwrap();
    let response = client.send(request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_first_request_sets_cookie_once() {
    let mut client = Client::new();

    let first = client.get("/lists").await;
    let set_cookie = first
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("todo_session="));
    assert!(set_cookie.contains("HttpOnly"));

    let second = client.get("/lists").await;
    assert!(second.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(client.state.store.count(), 1);
}

#[tokio::test]
async fn test_unknown_cookie_gets_fresh_session() {
    let mut client = Client::new();
    client.cookie = Some(format!("todo_session={}", SessionId::generate()));

    let response = client.get("/lists").await;
    assert!(response.headers().get(header::SET_COOKIE).is_some());
    assert!(client.lists().is_empty());
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let state = AppState::new();
    let mut alice = Client::with_state(state.clone());
    let mut bob = Client::with_state(state);

    alice.post("/lists", "list_name=Alice").await;
    bob.get("/lists").await;

    let page = bob.get_text("/lists").await;
    assert!(!page.contains("Alice"));
    assert_eq!(alice.lists().len(), 1);
    assert!(bob.lists().is_empty());
}

// ============================================================================
// List Tests
// ============================================================================

#[tokio::test]
async fn test_create_list_and_view_index() {
    let mut client = Client::new();

    let response = client.post("/lists", "list_name=Groceries").await;
    assert_redirect(&response, "/lists");

    let page = client.get_text("/lists").await;
    assert!(page.contains("Groceries"));
    assert!(page.contains("0 / 0"));
    assert!(!page.contains(r#"class="complete""#));
    assert!(page.contains("The list has been created."));

    // Flash is shown once
    let page = client.get_text("/lists").await;
    assert!(!page.contains("The list has been created."));
}

#[tokio::test]
async fn test_new_list_form() {
    let mut client = Client::new();
    let page = client.get_text("/lists/new").await;
    assert!(page.contains(r#"name="list_name""#));
    assert!(page.contains(r#"action="/lists""#));
}

#[tokio::test]
async fn test_create_list_name_too_short() {
    let mut client = Client::new();

    let response = client.post("/lists", "list_name=+++").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response_text(response).await;
    assert!(page.contains("List name must be between 1 and 100 characters."));
    assert!(client.lists().is_empty());
}

#[tokio::test]
async fn test_create_list_name_too_long() {
    let mut client = Client::new();
    let name = "a".repeat(101);

    let response = client.post("/lists", &format!("list_name={name}")).await;
    let page = response_text(response).await;
    assert!(page.contains("List name must be between 1 and 100 characters."));
    // Entered value is kept in the form
    assert!(page.contains(&name));
    assert!(client.lists().is_empty());
}

#[tokio::test]
async fn test_create_list_missing_field() {
    let mut client = Client::new();
    let response = client.post("/lists", "").await;
    let page = response_text(response).await;
    assert!(page.contains("List name must be between 1 and 100 characters."));
}

#[tokio::test]
async fn test_create_duplicate_list() {
    let mut client = Client::new();
    client.post("/lists", "list_name=Groceries").await;

    let response = client.post("/lists", "list_name=Groceries").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response_text(response).await;
    assert!(page.contains("List name must be unique."));
    assert_eq!(client.lists().len(), 1);
}

#[tokio::test]
async fn test_list_names_are_escaped() {
    let mut client = Client::new();
    client
        .post("/lists", "list_name=%3Cscript%3Ealert(1)%3C%2Fscript%3E")
        .await;

    let page = client.get_text("/lists").await;
    assert!(page.contains("&lt;script&gt;"));
    assert!(!page.contains("<script>"));
}

#[tokio::test]
async fn test_show_list() {
    let mut client = client_with_list(&["Milk"]).await;

    let page = client.get_text("/lists/1").await;
    assert!(page.contains("Groceries"));
    assert!(page.contains("Milk"));
    assert!(page.contains("The todo has been added."));
}

#[tokio::test]
async fn test_show_missing_list_redirects_with_error() {
    let mut client = Client::new();

    for uri in ["/lists/99", "/lists/abc", "/lists/99/edit"] {
        let response = client.get(uri).await;
        assert_redirect(&response, "/lists");

        let page = client.get_text("/lists").await;
        assert!(page.contains("The specified list was not found."));
    }
}

#[tokio::test]
async fn test_edit_and_rename_list() {
    let mut client = client_with_list(&[]).await;

    let page = client.get_text("/lists/1/edit").await;
    assert!(page.contains(r#"value="Groceries""#));

    let response = client.post("/lists/1", "list_name=Shopping").await;
    assert_redirect(&response, "/lists/1");
    assert_eq!(client.lists().find(ListId::from_raw(1)).unwrap().name, "Shopping");

    let page = client.get_text("/lists/1").await;
    assert!(page.contains("The list has been updated."));
}

#[tokio::test]
async fn test_rename_to_existing_name_rerenders_form() {
    let mut client = client_with_list(&[]).await;
    client.post("/lists", "list_name=Work").await;

    let response = client.post("/lists/1", "list_name=Work").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response_text(response).await;
    assert!(page.contains("List name must be unique."));
    assert!(page.contains("Editing 'Groceries'"));
    assert_eq!(client.lists().find(ListId::from_raw(1)).unwrap().name, "Groceries");
}

#[tokio::test]
async fn test_rename_missing_list() {
    let mut client = Client::new();
    let response = client.post("/lists/5", "list_name=Anything").await;
    assert_redirect(&response, "/lists");
}

#[tokio::test]
async fn test_delete_list() {
    let mut client = client_with_list(&[]).await;

    let response = client.post("/lists/1/delete", "").await;
    assert_redirect(&response, "/lists");
    assert!(client.lists().is_empty());

    let page = client.get_text("/lists").await;
    assert!(page.contains("The list has been deleted."));
}

#[tokio::test]
async fn test_delete_list_background_returns_target() {
    let mut client = client_with_list(&[]).await;

    let response = client.post_background("/lists/1/delete").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "/lists");
    assert!(client.lists().is_empty());
}

#[tokio::test]
async fn test_delete_missing_list() {
    let mut client = client_with_list(&[]).await;

    let response = client.post("/lists/7/delete", "").await;
    assert_redirect(&response, "/lists");
    assert_eq!(client.lists().len(), 1);

    let response = client.post_background("/lists/7/delete").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_ids_never_reassigned() {
    let mut client = Client::new();
    for name in ["one", "two", "three"] {
        client.post("/lists", &format!("list_name={name}")).await;
    }
    client.post("/lists/2/delete", "").await;
    client.post("/lists", "list_name=four").await;

    let ids: Vec<u64> = client.lists().iter().map(|l| l.id.as_u64()).collect();
    assert_eq!(ids, vec![1, 3, 4]);

    let response = client.get("/lists/2").await;
    assert_redirect(&response, "/lists");
}

// ============================================================================
// Todo Tests
// ============================================================================

#[tokio::test]
async fn test_add_empty_todo_rerenders_list() {
    let mut client = client_with_list(&[]).await;

    let response = client.post("/lists/1/todos", "todo=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response_text(response).await;
    assert!(page.contains("Todo name must be between 1 and 100 characters."));
    assert!(page.contains("Groceries"));
    assert!(client.lists().find(ListId::from_raw(1)).unwrap().is_empty());
}

#[tokio::test]
async fn test_add_todo_to_missing_list() {
    let mut client = Client::new();
    let response = client.post("/lists/3/todos", "todo=Milk").await;
    assert_redirect(&response, "/lists");
}

#[tokio::test]
async fn test_delete_todo_background() {
    let mut client = client_with_list(&["Milk", "Eggs"]).await;

    let response = client.post_background("/lists/1/todos/1/delete").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response_text(response).await.is_empty());

    let lists = client.lists();
    let list = lists.find(ListId::from_raw(1)).unwrap();
    assert_eq!(list.len(), 1);
    assert!(list.find_todo(TodoId::from_raw(1)).is_err());
}

#[tokio::test]
async fn test_delete_last_todo_background() {
    let mut client = client_with_list(&["Milk"]).await;

    let response = client.post_background("/lists/1/todos/1/delete").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let lists = client.lists();
    let list = lists.find(ListId::from_raw(1)).unwrap();
    assert!(list.is_empty());
    assert!(!list.is_complete());

    // The list itself survives and a new todo does not reuse the id.
    client.post("/lists/1/todos", "todo=Eggs").await;
    let lists = client.lists();
    let list = lists.find(ListId::from_raw(1)).unwrap();
    assert!(list.find_todo(TodoId::from_raw(2)).is_ok());

    let page = client.get_text("/lists").await;
    assert!(page.contains("0 / 1"));
}

#[tokio::test]
async fn test_delete_todo_redirects() {
    let mut client = client_with_list(&["Milk"]).await;

    let response = client.post("/lists/1/todos/1/delete", "").await;
    assert_redirect(&response, "/lists/1");

    let page = client.get_text("/lists/1").await;
    assert!(page.contains("The todo item has been deleted."));
}

#[tokio::test]
async fn test_delete_missing_todo() {
    let mut client = client_with_list(&["Milk"]).await;

    let response = client.post_background("/lists/1/todos/9/delete").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let page = client.get_text("/lists").await;
    assert!(page.contains("The specified todo was not found."));
}

#[tokio::test]
async fn test_toggle_todo() {
    let mut client = client_with_list(&["Milk"]).await;
    let todo = |client: &Client| {
        client
            .lists()
            .find(ListId::from_raw(1))
            .unwrap()
            .find_todo(TodoId::from_raw(1))
            .unwrap()
            .completed
    };

    let response = client.post("/lists/1/todos/1", "completed=true").await;
    assert_redirect(&response, "/lists/1");
    assert!(todo(&client));

    client.post("/lists/1/todos/1", "completed=false").await;
    assert!(!todo(&client));

    client.post("/lists/1/todos/1", "completed=true").await;
    // Missing field means not completed
    client.post("/lists/1/todos/1", "").await;
    assert!(!todo(&client));
}

#[tokio::test]
async fn test_toggle_missing_todo() {
    let mut client = client_with_list(&["Milk"]).await;

    let response = client.post("/lists/1/todos/42", "completed=true").await;
    assert_redirect(&response, "/lists");

    let page = client.get_text("/lists").await;
    assert!(page.contains("The specified todo was not found."));
}

#[tokio::test]
async fn test_complete_all() {
    let mut client = client_with_list(&["Milk", "Eggs", "Bread"]).await;

    let response = client.post("/lists/1/complete_all", "").await;
    assert_redirect(&response, "/lists/1");

    let lists = client.lists();
    let list = lists.find(ListId::from_raw(1)).unwrap();
    assert!(list.is_complete());
    assert_eq!(list.completed_count(), 3);

    let page = client.get_text("/lists/1").await;
    assert!(page.contains("All todos have been completed."));

    let page = client.get_text("/lists").await;
    assert!(page.contains("3 / 3"));
    assert!(page.contains(r#"class="complete""#));
}

#[tokio::test]
async fn test_index_puts_complete_lists_last() {
    let mut client = Client::new();
    client.post("/lists", "list_name=Finished").await;
    client.post("/lists/1/todos", "todo=done").await;
    client.post("/lists/1/complete_all", "").await;
    client.post("/lists", "list_name=Pending").await;

    let page = client.get_text("/lists").await;
    let pending = page.find("Pending").unwrap();
    let finished = page.find("Finished").unwrap();
    assert!(pending < finished);
}
