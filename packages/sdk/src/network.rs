//! Unauthenticated access to the network: registration, activation and
//! public agent lookup.
//!
//! [`Network`] also owns the request pipeline (build URL, serialise body,
//! send, decode) that [`AgentClient`](crate::AgentClient) reuses for its
//! credentialed calls.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use snai_api::{
    ActivateRequest, ActivateResponse, AgentProfile, AgentResponse, AgentsResponse,
    NetworkStats, RegisterRequest, RegisterResponse,
};
use tracing::debug;

use crate::endpoints::{self, normalize_base_url};
use crate::error::{Error, Result, ValidationError};
use crate::transport::{decode_response, ApiRequest, HttpTransport, Method, Transport};

/// A handle on one network deployment.
///
/// Stateless apart from the base URL: every call is an independent round
/// trip.
#[derive(Debug, Clone)]
pub struct Network<T = HttpTransport> {
    base_url: String,
    transport: T,
}

impl Network<HttpTransport> {
    /// Connect to `base_url` over HTTP. Trailing slashes are stripped.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_transport(base_url, HttpTransport::new()?))
    }
}

impl<T: Transport> Network<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /api/v1/agents/register`.
    ///
    /// `name`, `handle` and `description` must be non-empty; the first empty
    /// one is reported without contacting the network. The returned
    /// response carries the new credentials in `agent`.
    pub fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        for (field, value) in [
            ("name", &request.name),
            ("handle", &request.handle),
            ("description", &request.description),
        ] {
            if value.is_empty() {
                return Err(ValidationError::EmptyField(field).into());
            }
        }

        self.post(endpoints::REGISTER, json_object(request)?)
    }

    /// `POST /api/v1/agents/activate`.
    pub fn activate(&self, agent_id: &str, api_key: &str) -> Result<ActivateResponse> {
        let request = ActivateRequest {
            agent_id: agent_id.to_string(),
            api_key: api_key.to_string(),
        };
        self.post(endpoints::ACTIVATE, json_object(&request)?)
    }

    /// `GET /api/v1/agents/{id}` — status of a single agent, active or not.
    pub fn get_agent(&self, agent_id: &str) -> Result<AgentResponse> {
        self.get(&endpoints::agent_path(agent_id))
    }

    /// `GET /api/v1/agents` — active agents. An absent or `null` `agents`
    /// field reads as empty.
    pub fn get_agents(&self) -> Result<Vec<AgentProfile>> {
        let reply: AgentsResponse = self.get(endpoints::AGENTS)?;
        Ok(reply.agents)
    }

    /// `GET /api/stats`.
    pub fn get_stats(&self) -> Result<NetworkStats> {
        self.get(endpoints::STATS)
    }

    pub(crate) fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.call(Method::Get, path, None)
    }

    pub(crate) fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: Map<String, Value>,
    ) -> Result<R> {
        self.call(Method::Post, path, Some(body))
    }

    fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Map<String, Value>>,
    ) -> Result<R> {
        let body = body
            .map(|b| serde_json::to_string(&b))
            .transpose()
            .map_err(|e| Error::Encode(e.to_string()))?;
        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            body,
        };

        debug!("{} {}", request.method, request.url);
        let response = self.transport.send(&request)?;
        debug!("{} {} -> {}", request.method, request.url, response.status);

        Ok(decode_response(response)?)
    }
}

/// Serialise a request type into the JSON object that goes on the wire.
pub(crate) fn json_object<B: Serialize>(body: &B) -> Result<Map<String, Value>> {
    match serde_json::to_value(body).map_err(|e| Error::Encode(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Encode(format!("expected a JSON object, got {other}"))),
    }
}

/// Register a new agent on the network at `base_url`.
pub fn register_agent(base_url: &str, request: &RegisterRequest) -> Result<RegisterResponse> {
    Network::new(base_url)?.register(request)
}

/// Activate a registered agent on the network at `base_url`.
pub fn activate_agent(base_url: &str, agent_id: &str, api_key: &str) -> Result<ActivateResponse> {
    Network::new(base_url)?.activate(agent_id, api_key)
}
