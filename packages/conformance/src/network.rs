//! In-memory stand-in for the SNAI network HTTP API.
//!
//! Mirrors the live server's status codes and error bodies closely enough
//! for the client to be exercised end to end: credentials are read from
//! the JSON body, inactive agents cannot act, unknown posts are 404, and
//! every failure carries `{"success": false, "error": …}`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use snai_api::ErrorResponse;

/// Listing size when the caller sends no `limit`.
const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

/// A request as it arrived, before routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub method: String,
    /// Path and query string.
    pub uri: String,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
struct FakeAgent {
    id: String,
    name: String,
    handle: String,
    description: String,
    api_key: String,
    active: bool,
    karma: i64,
    post_count: u64,
    comment_count: u64,
    last_active: Option<u64>,
}

impl FakeAgent {
    fn profile(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "handle": self.handle,
            "description": self.description,
            "active": self.active,
            "karma": self.karma,
            "postCount": self.post_count,
            "commentCount": self.comment_count,
        })
    }
}

#[derive(Debug, Clone)]
struct FakePost {
    id: u64,
    title: String,
    content: String,
    author: String,
    hive: String,
    votes: i64,
    voters: HashMap<String, i64>,
    comments: Vec<Value>,
}

#[derive(Debug, Default)]
struct Inner {
    agents: HashMap<String, FakeAgent>,
    /// API key → agent id.
    keys: HashMap<String, String>,
    /// Newest first.
    posts: Vec<FakePost>,
    next_agent: u64,
    next_post: u64,
    next_comment: u64,
    clock: u64,
}

impl Inner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn create_agent(&mut self, name: &str, handle: &str, description: &str) -> FakeAgent {
        self.next_agent += 1;
        let agent = FakeAgent {
            id: format!("agent_{}", self.next_agent),
            name: name.to_string(),
            handle: handle.trim_start_matches('@').to_string(),
            description: description.to_string(),
            api_key: format!("snai_live_conformance{:06}", self.next_agent),
            active: false,
            karma: 10,
            post_count: 0,
            comment_count: 0,
            last_active: None,
        };
        self.keys.insert(agent.api_key.clone(), agent.id.clone());
        self.agents.insert(agent.id.clone(), agent.clone());
        agent
    }

    /// Resolve the `api_key` body field to an active agent's id.
    fn active_agent(&self, body: &Value) -> Result<String, Response> {
        let Some(api_key) = str_field(body, "api_key") else {
            return Err(fail(StatusCode::BAD_REQUEST, "Missing api_key"));
        };
        let Some(agent_id) = self.keys.get(api_key) else {
            return Err(fail(StatusCode::UNAUTHORIZED, "Invalid API key"));
        };
        match self.agents.get(agent_id) {
            Some(agent) if agent.active => Ok(agent_id.clone()),
            _ => Err(fail(StatusCode::NOT_FOUND, "Agent not found or not active")),
        }
    }
}

/// Shared state of the fake network. Tests hold an `Arc` to it to seed
/// data and inspect what the client sent.
#[derive(Debug, Default)]
pub struct NetworkState {
    inner: Mutex<Inner>,
    seen: Mutex<Vec<SeenRequest>>,
    fail_next: Mutex<Option<(u16, String)>>,
}

impl NetworkState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("network state poisoned")
    }

    /// Create an agent directly, skipping the HTTP layer. Returns
    /// `(agent_id, api_key)`.
    pub fn seed_agent(&self, name: &str, handle: &str, active: bool) -> (String, String) {
        let mut inner = self.lock();
        let agent = inner.create_agent(name, handle, "seeded by the conformance suite");
        if active {
            if let Some(stored) = inner.agents.get_mut(&agent.id) {
                stored.active = true;
            }
        }
        (agent.id, agent.api_key)
    }

    /// Answer the next request, whatever it is, with `status` and a raw
    /// text body instead of routing it.
    pub fn fail_next(&self, status: u16, body: &str) {
        *self.fail_next.lock().expect("fail_next poisoned") = Some((status, body.to_string()));
    }

    pub fn seen_requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("seen poisoned").clone()
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.seen.lock().expect("seen poisoned").last().cloned()
    }

    pub fn post_count(&self) -> usize {
        self.lock().posts.len()
    }

    pub fn is_active(&self, agent_id: &str) -> bool {
        self.lock().agents.get(agent_id).is_some_and(|a| a.active)
    }

    pub fn last_active(&self, agent_id: &str) -> Option<u64> {
        self.lock().agents.get(agent_id).and_then(|a| a.last_active)
    }
}

/// Build the router for the fake network.
pub fn build_router(state: Arc<NetworkState>) -> Router {
    Router::new()
        .route("/api/stats", get(stats))
        .route("/api/v1/agents", get(list_agents))
        .route("/api/v1/agents/register", post(register))
        .route("/api/v1/agents/activate", post(activate))
        .route("/api/v1/agents/heartbeat", post(heartbeat))
        .route("/api/v1/agents/post", post(create_post))
        .route("/api/v1/agents/comment", post(create_comment))
        .route("/api/v1/agents/vote", post(vote))
        .route("/api/v1/agents/{id}", get(get_agent))
        .route("/api/v1/posts", get(list_posts))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            record_request,
        ))
        .with_state(state)
}

async fn record_request(
    State(state): State<Arc<NetworkState>>,
    request: Request,
    next: Next,
) -> Response {
    let seen = SeenRequest {
        method: request.method().to_string(),
        uri: request.uri().to_string(),
        user_agent: header_value(request.headers(), header::USER_AGENT),
        content_type: header_value(request.headers(), header::CONTENT_TYPE),
        authorization: header_value(request.headers(), header::AUTHORIZATION),
    };
    state.seen.lock().expect("seen poisoned").push(seen);

    let injected = state.fail_next.lock().expect("fail_next poisoned").take();
    if let Some((status, body)) = injected {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, body).into_response();
    }

    next.run(request).await
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn stats(State(state): State<Arc<NetworkState>>) -> Response {
    let inner = state.lock();
    let comments: usize = inner.posts.iter().map(|p| p.comments.len()).sum();
    let online = inner.agents.values().filter(|a| a.last_active.is_some()).count();
    ok(json!({
        "agents": inner.agents.len(),
        "coreAgents": 0,
        "registeredAgents": inner.agents.len(),
        "posts": inner.posts.len(),
        "comments": comments,
        "users": 0,
        "online": online,
    }))
}

async fn register(
    State(state): State<Arc<NetworkState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let (Some(name), Some(handle), Some(description)) = (
        str_field(&body, "name"),
        str_field(&body, "handle"),
        str_field(&body, "description"),
    ) else {
        return fail(StatusCode::BAD_REQUEST, "Missing name, handle, or description");
    };

    let mut inner = state.lock();
    if inner
        .agents
        .values()
        .any(|a| a.name.eq_ignore_ascii_case(name))
    {
        return reject(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Name already taken").with_hint("Choose a different agent name"),
        );
    }

    let agent = inner.create_agent(name, handle, description);
    let host = header_value(&headers, header::HOST).unwrap_or_else(|| "localhost".into());
    tracing::debug!("fake network: registered {} (@{})", agent.name, agent.handle);

    // The live server uses these legacy field spellings.
    ok(json!({
        "success": true,
        "agent": {
            "id": agent.id,
            "name": agent.name,
            "api_key": agent.api_key,
            "portal_url": format!("http://{host}/activate?agent={}", agent.id),
            "status": "pending_activation",
        },
        "message": "Agent registered! Visit the portal URL and enter your API key to activate.",
    }))
}

async fn activate(State(state): State<Arc<NetworkState>>, Json(body): Json<Value>) -> Response {
    let agent_id = str_field(&body, "agentId").or_else(|| str_field(&body, "agent_id"));
    let api_key = str_field(&body, "apiKey").or_else(|| str_field(&body, "api_key"));
    let (Some(agent_id), Some(api_key)) = (agent_id, api_key) else {
        return fail(StatusCode::BAD_REQUEST, "Missing agent_id or api_key");
    };

    let mut inner = state.lock();
    if inner.keys.get(api_key).map(String::as_str) != Some(agent_id) {
        return fail(StatusCode::UNAUTHORIZED, "Invalid API key");
    }
    let Some(agent) = inner.agents.get_mut(agent_id) else {
        return fail(StatusCode::NOT_FOUND, "Agent not found");
    };

    let message = if agent.active {
        "Agent is already active"
    } else {
        agent.active = true;
        "Agent activated successfully!"
    };
    ok(json!({
        "success": true,
        "message": message,
        "agent": { "id": agent.id, "name": agent.name, "handle": agent.handle, "active": true },
    }))
}

async fn list_agents(State(state): State<Arc<NetworkState>>) -> Response {
    let inner = state.lock();
    let mut agents: Vec<&FakeAgent> = inner.agents.values().filter(|a| a.active).collect();
    agents.sort_by(|a, b| b.karma.cmp(&a.karma).then_with(|| a.id.cmp(&b.id)));
    let agents: Vec<Value> = agents.iter().map(|a| a.profile()).collect();
    ok(json!({ "success": true, "count": agents.len(), "agents": agents }))
}

async fn get_agent(State(state): State<Arc<NetworkState>>, Path(id): Path<String>) -> Response {
    match state.lock().agents.get(&id) {
        Some(agent) => ok(json!({ "success": true, "agent": agent.profile() })),
        None => fail(StatusCode::NOT_FOUND, "Agent not found"),
    }
}

async fn heartbeat(State(state): State<Arc<NetworkState>>, Json(body): Json<Value>) -> Response {
    let mut inner = state.lock();
    let agent_id = match inner.active_agent(&body) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let now = inner.tick();
    let Some(agent) = inner.agents.get_mut(&agent_id) else {
        return fail(StatusCode::NOT_FOUND, "Agent not found or not active");
    };
    agent.last_active = Some(now);
    ok(json!({
        "success": true,
        "agent": { "id": agent.id, "name": agent.name, "karma": agent.karma },
    }))
}

async fn create_post(State(state): State<Arc<NetworkState>>, Json(body): Json<Value>) -> Response {
    let mut inner = state.lock();
    let agent_id = match inner.active_agent(&body) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let (Some(title), Some(content)) = (str_field(&body, "title"), str_field(&body, "content"))
    else {
        return fail(StatusCode::BAD_REQUEST, "Missing api_key, title, or content");
    };
    let hive = str_field(&body, "hive").unwrap_or("c/general").to_string();

    inner.next_post += 1;
    let id = inner.next_post;
    let now = inner.tick();
    let Some(agent) = inner.agents.get_mut(&agent_id) else {
        return fail(StatusCode::NOT_FOUND, "Agent not found or not active");
    };
    agent.post_count += 1;
    agent.karma += 5;
    agent.last_active = Some(now);
    let author = agent.name.clone();

    let post = FakePost {
        id,
        title: title.chars().take(200).collect(),
        content: content.chars().take(2000).collect(),
        author,
        hive,
        votes: 1,
        voters: HashMap::new(),
        comments: Vec::new(),
    };
    let reply = json!({
        "success": true,
        "post": { "id": post.id, "title": post.title, "hive": post.hive },
    });
    inner.posts.insert(0, post);
    ok(reply)
}

async fn create_comment(
    State(state): State<Arc<NetworkState>>,
    Json(body): Json<Value>,
) -> Response {
    let mut inner = state.lock();
    let agent_id = match inner.active_agent(&body) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let (Some(post_id), Some(content)) = (
        body.get("post_id").and_then(Value::as_u64),
        str_field(&body, "content"),
    ) else {
        return fail(StatusCode::BAD_REQUEST, "Missing api_key, post_id, or content");
    };

    inner.next_comment += 1;
    let comment_id = inner.next_comment;
    let author = inner
        .agents
        .get(&agent_id)
        .map(|a| a.name.clone())
        .unwrap_or_default();
    let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) else {
        return fail(StatusCode::NOT_FOUND, "Post not found");
    };
    post.comments.push(json!({
        "id": comment_id,
        "author": author,
        "content": content.chars().take(1000).collect::<String>(),
    }));

    if let Some(agent) = inner.agents.get_mut(&agent_id) {
        agent.comment_count += 1;
        agent.karma += 2;
    }
    ok(json!({
        "success": true,
        "comment": { "id": comment_id, "post_id": post_id },
    }))
}

async fn vote(State(state): State<Arc<NetworkState>>, Json(body): Json<Value>) -> Response {
    let mut inner = state.lock();
    let agent_id = match inner.active_agent(&body) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let (Some(post_id), Some(direction)) = (
        body.get("post_id").and_then(Value::as_u64),
        body.get("direction").and_then(Value::as_i64),
    ) else {
        return fail(StatusCode::BAD_REQUEST, "Missing api_key, post_id, or direction");
    };
    let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) else {
        return fail(StatusCode::NOT_FOUND, "Post not found");
    };

    let old = post.voters.get(&agent_id).copied().unwrap_or(0);
    let new = direction.signum();
    if old != new {
        post.votes += new - old;
        post.voters.insert(agent_id, new);
    }
    ok(json!({
        "success": true,
        "post": { "id": post.id, "votes": post.votes },
    }))
}

async fn list_posts(
    State(state): State<Arc<NetworkState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT);
    let community = params.get("community");

    let inner = state.lock();
    let posts: Vec<Value> = inner
        .posts
        .iter()
        .filter(|p| community.map_or(true, |c| &p.hive == c))
        .take(limit)
        .map(|p| {
            json!({
                "id": p.id,
                "title": p.title,
                "content": p.content.chars().take(500).collect::<String>(),
                "author": p.author,
                "hive": p.hive,
                "votes": p.votes,
                "comment_count": p.comments.len(),
            })
        })
        .collect();
    ok(json!({
        "success": true,
        "count": posts.len(),
        "total": inner.posts.len(),
        "posts": posts,
    }))
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn ok(body: Value) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

/// `{"success": false, "error": …, "hint"?: …}`
#[derive(Serialize)]
struct Failure {
    success: bool,
    #[serde(flatten)]
    envelope: ErrorResponse,
}

fn fail(status: StatusCode, error: &str) -> Response {
    reject(status, ErrorResponse::new(error))
}

fn reject(status: StatusCode, envelope: ErrorResponse) -> Response {
    let body = Failure {
        success: false,
        envelope,
    };
    (status, Json(body)).into_response()
}

/// A non-empty string field of a JSON body.
fn str_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
