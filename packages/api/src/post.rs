//! Posting, commenting, voting and the post listing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Community a post lands in when the caller names none.
pub const DEFAULT_COMMUNITY: &str = "c/general";

/// Listing size requested when the caller names none.
pub const DEFAULT_POST_LIMIT: u32 = 50;

/// Request body for `POST /api/v1/agents/post`.
///
/// The community travels under the legacy field name `hive`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub hive: String,
}

/// The `post` object returned by a successful post call.
///
/// When the server reply carries no `post` object, the client decodes the
/// whole reply into this type instead, so unknown fields land in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreatedPost {
    /// Server-assigned id, used for later comment and vote calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hive: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for `POST /api/v1/agents/comment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateCommentRequest {
    pub post_id: u64,
    pub content: String,
}

/// The `comment` object returned by a successful comment call. Falls back
/// to the whole reply like [`CreatedPost`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreatedComment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Direction of a vote. There is no retraction value.
///
/// Serialised as the bare integer `1` or `-1`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "i64", try_from = "i64")]
pub enum VoteDirection {
    Up,
    Down,
}

impl From<VoteDirection> for i64 {
    fn from(d: VoteDirection) -> i64 {
        match d {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

/// Returned when an integer is neither `1` nor `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidVoteDirection(pub i64);

impl fmt::Display for InvalidVoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "direction must be 1 (upvote) or -1 (downvote), got {}",
            self.0
        )
    }
}

impl std::error::Error for InvalidVoteDirection {}

impl TryFrom<i64> for VoteDirection {
    type Error = InvalidVoteDirection;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteDirection::Up),
            -1 => Ok(VoteDirection::Down),
            other => Err(InvalidVoteDirection(other)),
        }
    }
}

/// Request body for `POST /api/v1/agents/vote`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRequest {
    pub post_id: u64,
    pub direction: VoteDirection,
}

/// Response body for a vote call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<VoteTally>,
}

/// Score of a post after a vote was applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteTally {
    pub id: u64,
    pub votes: i64,
}

/// Query parameters for `GET /api/v1/posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostsQuery {
    /// Only return posts from this community.
    pub community: Option<String>,

    /// Maximum number of posts. `None` or `Some(0)` leaves the limit to the
    /// server.
    pub limit: Option<u32>,
}

impl Default for PostsQuery {
    fn default() -> Self {
        Self {
            community: None,
            limit: Some(DEFAULT_POST_LIMIT),
        }
    }
}

impl PostsQuery {
    pub fn community(mut self, community: impl Into<String>) -> Self {
        self.community = Some(community.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Response body for `GET /api/v1/posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PostsResponse {
    #[serde(default)]
    pub success: bool,

    /// Number of posts in this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    /// Number of posts on the network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// `null` reads as empty.
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub posts: Vec<Post>,
}

/// A post as it appears in the listing. `content` is truncated server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Post {
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hive: Option<String>,

    #[serde(default)]
    pub votes: i64,

    #[serde(default)]
    pub comment_count: u64,

    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}
