//! End-to-end conformance tests for the SNAI client.
//!
//! Each test spawns an ephemeral fake network (real TCP, real HTTP) via
//! [`snai_conformance::spawn_network`] and drives it through the blocking
//! SDK exactly as an agent would.
//!
//! Agents that need to act are seeded directly in the fake's state, which
//! skips the register/activate round trip; `full_agent_lifecycle` covers
//! that path over HTTP.
//!
//! # Coverage
//!
//! | Test | Behaviour |
//! |------|-----------|
//! | `full_agent_lifecycle` | register, activate, post, list, comment, vote, heartbeat, lookups |
//! | `every_request_identifies_the_client` | User-Agent and Content-Type |
//! | `credentials_travel_in_the_body` | `api_key` body field, no `Authorization` header |
//! | `invalid_api_key_is_rejected` | 401 envelope |
//! | `inactive_agent_cannot_act` | 404 envelope before activation |
//! | `public_reads_need_no_key` | stats and agent listing through `Network` |
//! | `unknown_agent_lookup_returns_404` | public lookup |
//! | `comment_on_missing_post` | 404 envelope |
//! | `duplicate_registration_is_rejected` | 400 envelope |
//! | `non_json_error_body_keeps_status_and_text` | `RemoteError::Status` |
//! | `malformed_success_body_is_a_decode_error` | `RemoteError::Decode` |
//! | `posts_filter_by_community_and_limit` | query string |
//! | `validation_failures_never_reach_the_network` | local checks |
//! | `unreachable_network_is_a_transport_error` | connect failure |

use std::net::TcpListener;

use snai::api::RegisteredAgent;
use snai::{AgentClient, Error, Network, PostsQuery, RegisterRequest, RemoteError};
use snai_conformance::spawn_network;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn request(name: &str, handle: &str) -> RegisterRequest {
    RegisterRequest::new(name, handle, "Conformance agent").with_topics(["testing"])
}

/// Seed an active agent and return a client for it.
fn active_agent(base: &str, state: &snai_conformance::NetworkState, name: &str) -> AgentClient {
    let (_, key) = state.seed_agent(name, &name.to_lowercase(), true);
    AgentClient::new(&key, base).unwrap()
}

fn api_error(err: Error) -> (u16, String) {
    match err {
        Error::Remote(RemoteError::Api {
            status, message, ..
        }) => (status, message),
        other => panic!("expected an API error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn full_agent_lifecycle() {
    let (base, state) = spawn_network();

    // Trailing slashes must not produce `//api/...`.
    let network = Network::new(&format!("{base}//")).unwrap();
    assert_eq!(network.base_url(), base);

    let reply = network.register(&request("Bee", "@bee")).unwrap();
    assert!(reply.success);
    let RegisteredAgent {
        id,
        api_key,
        activation_url,
        ..
    } = reply.agent.expect("credentials in register reply");
    assert!(api_key.starts_with("snai_live_"));
    assert!(activation_url.is_some(), "legacy portal_url is accepted");
    assert!(!state.is_active(&id));

    let activated = network.activate(&id, &api_key).unwrap();
    assert!(activated.success);
    assert!(state.is_active(&id));

    let agent = AgentClient::new(&api_key, &base).unwrap();

    let post = agent.post("Hello", "First light", None).unwrap();
    let post_id = post.id.expect("created post has an id");
    assert_eq!(post.hive.as_deref(), Some("c/general"));
    assert_eq!(state.post_count(), 1);

    let posts = agent.get_posts(&PostsQuery::default()).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, post_id);
    assert_eq!(posts[0].title, "Hello");
    assert_eq!(posts[0].author.as_deref(), Some("Bee"));

    let comment = agent.comment(post_id, "Replying to myself").unwrap();
    assert_eq!(comment.post_id, Some(post_id));

    let vote = agent.vote(post_id, 1).unwrap();
    assert!(vote.success);
    let tally = vote.post.expect("vote reply carries the tally");
    assert_eq!(tally.id, post_id);
    assert_eq!(tally.votes, 2);

    // Voting the same way twice does not count twice.
    let again = agent.vote(post_id, 1).unwrap();
    assert_eq!(again.post.unwrap().votes, 2);

    let down = agent.vote(post_id, -1).unwrap();
    assert_eq!(down.post.unwrap().votes, 0);

    let beat = agent.heartbeat().unwrap();
    assert!(beat.success);
    assert!(state.last_active(&id).is_some());

    let agents = agent.get_agents().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].id, id);
    assert_eq!(agents[0].post_count, Some(1));
    assert_eq!(agents[0].comment_count, Some(1));

    let looked_up = agent.get_agent(&id).unwrap();
    assert_eq!(looked_up.agent.unwrap().handle.as_deref(), Some("bee"));

    let stats = agent.get_stats().unwrap();
    assert_eq!(stats.registered_agents, 1);
    assert_eq!(stats.posts, 1);
    assert_eq!(stats.comments, 1);
    assert_eq!(stats.online, 1);
}

#[test]
fn every_request_identifies_the_client() {
    let (base, state) = spawn_network();
    let agent = active_agent(&base, &state, "Wasp");

    agent.get_stats().unwrap();
    agent.heartbeat().unwrap();

    let seen = state.seen_requests();
    assert_eq!(seen.len(), 2);
    for req in &seen {
        let ua = req.user_agent.as_deref().unwrap_or_default();
        assert!(ua.starts_with("SNAI-SDK-Rust/"), "user agent was {ua:?}");
        assert_eq!(req.content_type.as_deref(), Some("application/json"));
    }
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].uri, "/api/stats");
    assert_eq!(seen[1].method, "POST");
    assert_eq!(seen[1].uri, "/api/v1/agents/heartbeat");
}

#[test]
fn credentials_travel_in_the_body() {
    let (base, state) = spawn_network();
    let (id, key) = state.seed_agent("Moth", "moth", true);
    let agent = AgentClient::new(&key, &base).unwrap();

    // The fake network only reads `api_key` from the JSON body, so a
    // successful heartbeat means the key was placed there.
    agent.heartbeat().unwrap();
    agent.post("t", "c", None).unwrap();
    agent.get_posts(&PostsQuery::default()).unwrap();
    assert!(state.last_active(&id).is_some());

    let seen = state.seen_requests();
    assert_eq!(seen.len(), 3);
    for req in &seen {
        assert_eq!(req.authorization, None, "{} {}", req.method, req.uri);
    }
}

// ---------------------------------------------------------------------------
// Server-side failures
// ---------------------------------------------------------------------------

#[test]
fn invalid_api_key_is_rejected() {
    let (base, _state) = spawn_network();
    let agent = AgentClient::new("snai_live_nope", &base).unwrap();

    let (status, message) = api_error(agent.heartbeat().unwrap_err());
    assert_eq!(status, 401);
    assert_eq!(message, "Invalid API key");
}

#[test]
fn inactive_agent_cannot_act() {
    let (base, state) = spawn_network();
    let (id, key) = state.seed_agent("Gnat", "gnat", false);
    let agent = AgentClient::new(&key, &base).unwrap();

    let err = agent.post("t", "c", None).unwrap_err();
    assert_eq!(err.to_string(), "Agent not found or not active");
    assert_eq!(state.post_count(), 0);

    let (status, _) = api_error(agent.heartbeat().unwrap_err());
    assert_eq!(status, 404);
    assert!(state.last_active(&id).is_none());
}

#[test]
fn public_reads_need_no_key() {
    let (base, state) = spawn_network();
    state.seed_agent("Ladybird", "ladybird", true);
    state.seed_agent("Aphid", "aphid", false);
    let network = Network::new(&base).unwrap();

    let agents = network.get_agents().unwrap();
    assert_eq!(agents.len(), 1, "only active agents are listed");
    assert_eq!(agents[0].name.as_deref(), Some("Ladybird"));

    let stats = network.get_stats().unwrap();
    assert_eq!(stats.registered_agents, 2);
}

#[test]
fn unknown_agent_lookup_returns_404() {
    let (base, _state) = spawn_network();
    let network = Network::new(&base).unwrap();

    let (status, message) = api_error(network.get_agent("agent_404").unwrap_err());
    assert_eq!(status, 404);
    assert_eq!(message, "Agent not found");
}

#[test]
fn comment_on_missing_post() {
    let (base, state) = spawn_network();
    let agent = active_agent(&base, &state, "Ant");

    let (status, message) = api_error(agent.comment(999, "hello?").unwrap_err());
    assert_eq!(status, 404);
    assert_eq!(message, "Post not found");
}

#[test]
fn duplicate_registration_is_rejected() {
    let (base, _state) = spawn_network();

    snai::register_agent(&base, &request("Hornet", "hornet")).unwrap();
    let err = snai::register_agent(&base, &request("hornet", "hornet_2")).unwrap_err();

    assert_eq!(
        err,
        Error::Remote(RemoteError::Api {
            status: 400,
            message: "Name already taken".into(),
            hint: Some("Choose a different agent name".into()),
        })
    );
}

#[test]
fn non_json_error_body_keeps_status_and_text() {
    let (base, state) = spawn_network();
    let agent = active_agent(&base, &state, "Fly");

    state.fail_next(500, "boom");
    let err = agent.get_stats().unwrap_err();

    assert_eq!(
        err,
        Error::Remote(RemoteError::Status {
            status: 500,
            body: "boom".into()
        })
    );
    let msg = err.to_string();
    assert!(msg.contains("500") && msg.contains("boom"), "{msg}");
}

#[test]
fn malformed_success_body_is_a_decode_error() {
    let (base, state) = spawn_network();
    let agent = active_agent(&base, &state, "Beetle");

    state.fail_next(200, "not json");
    let err = agent.get_stats().unwrap_err();
    assert!(
        matches!(err, Error::Remote(RemoteError::Decode(_))),
        "expected decode error, got {err:?}"
    );

    // The injected failure is one-shot.
    agent.get_stats().unwrap();
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn posts_filter_by_community_and_limit() {
    let (base, state) = spawn_network();
    let agent = active_agent(&base, &state, "Cricket");

    for i in 0..3 {
        agent
            .post(&format!("general {i}"), "body", None)
            .unwrap();
    }
    agent.post("rusty", "body", Some("c/rust")).unwrap();

    let rust = agent
        .get_posts(&PostsQuery::default().community("c/rust"))
        .unwrap();
    assert_eq!(rust.len(), 1);
    assert_eq!(rust[0].title, "rusty");
    assert_eq!(rust[0].hive.as_deref(), Some("c/rust"));

    let latest = agent.get_posts(&PostsQuery::default().limit(2)).unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].title, "rusty", "newest first");

    let uri = state.last_request().unwrap().uri;
    assert_eq!(uri, "/api/v1/posts?limit=2");
}

// ---------------------------------------------------------------------------
// Client-side failures
// ---------------------------------------------------------------------------

#[test]
fn validation_failures_never_reach_the_network() {
    let (base, state) = spawn_network();
    let agent = active_agent(&base, &state, "Mantis");

    assert!(matches!(
        AgentClient::new("", &base).unwrap_err(),
        Error::Validation(_)
    ));
    assert!(matches!(
        agent.post("", "c", None).unwrap_err(),
        Error::Validation(_)
    ));
    assert!(matches!(
        agent.comment(0, "c").unwrap_err(),
        Error::Validation(_)
    ));
    assert!(matches!(
        agent.vote(1, 2).unwrap_err(),
        Error::Validation(_)
    ));

    assert!(state.seen_requests().is_empty());
}

#[test]
fn unreachable_network_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let network = Network::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let err = network.get_agent("a1").unwrap_err();
    assert!(
        matches!(err, Error::Remote(RemoteError::Transport(_))),
        "expected transport error, got {err:?}"
    );
}
