//====================================================================

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Serialize};

use crate::battle::{
    AutoplayOutcome, BattleId, BattleSummary, CreateBattleRequest, CreateBattleResponse,
    TurnOutcome,
};

pub use error::ApiError;
pub use jobs::JobPromise;
pub use transport::{
    HttpRequest, HttpResponse, Method, Transport, TransportError, TransportResult,
};

#[cfg(target_arch = "wasm32")]
pub use fetch_transport::FetchTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use ureq_transport::UreqTransport;

mod error;
mod jobs;
mod transport;

#[cfg(target_arch = "wasm32")]
mod fetch_transport;
#[cfg(not(target_arch = "wasm32"))]
mod ureq_transport;

//====================================================================

pub const DEFAULT_API_BASE: &str = "http://localhost:10000";

type Decoder<T> = fn(HttpResponse) -> Result<T, ApiError>;

enum CallState<T> {
    Sent {
        promise: JobPromise<TransportResult>,
        decode: Decoder<T>,
    },
    /// Never left the client, the error is handed out on the first poll.
    Failed(JobPromise<ApiError>),
}

/// An in-flight backend call. Poll it once per frame.
pub struct ApiCall<T> {
    state: CallState<T>,
}

impl<T> ApiCall<T> {
    fn new(promise: JobPromise<TransportResult>, decode: Decoder<T>) -> Self {
        Self {
            state: CallState::Sent { promise, decode },
        }
    }

    fn failed(error: ApiError) -> Self {
        Self {
            state: CallState::Failed(JobPromise::resolved(error)),
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        match &self.state {
            CallState::Sent { promise, .. } => promise.is_pending(),
            CallState::Failed(_) => false,
        }
    }

    /// Returns the decoded answer once the transport has resolved.
    /// Yields `Some` exactly once.
    pub fn poll(&self) -> Option<Result<T, ApiError>> {
        match &self.state {
            CallState::Sent { promise, decode } => {
                let response = promise.take_value()?;
                Some(response.map_err(ApiError::from).and_then(*decode))
            }
            CallState::Failed(error) => error.take_value().map(Err),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(self) -> Result<T, ApiError> {
        match self.state {
            CallState::Sent { promise, decode } => decode(promise.wait()?),
            CallState::Failed(error) => Err(error.wait()),
        }
    }
}

fn decode_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_response(&response));
    }

    Ok(serde_json::from_str(&response.body)?)
}

fn decode_battle_id(response: HttpResponse) -> Result<BattleId, ApiError> {
    decode_json::<CreateBattleResponse>(response).map(|created| created.battle_id)
}

//====================================================================

/// Client for the battle backend's HTTP interface.
pub struct BattleApi {
    base_url: String,
    transport: Box<dyn Transport>,
}

impl BattleApi {
    pub fn new(base_url: impl Into<String>, transport: impl Transport + 'static) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        log::debug!("Battle api targeting '{}'", base_url);

        Self {
            base_url,
            transport: Box::new(transport),
        }
    }

    /// Uses the platform's HTTP transport.
    pub fn http(base_url: impl Into<String>) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let transport = UreqTransport::new();

        #[cfg(target_arch = "wasm32")]
        let transport = FetchTransport;

        Self::new(base_url, transport)
    }

    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /battles`
    pub fn create_battle(
        &self,
        team_a: &[String],
        team_b: &[String],
        level: u32,
    ) -> ApiCall<BattleId> {
        let body = CreateBattleRequest {
            team_a,
            team_b,
            level,
        };

        self.post_json("/battles", &body, decode_battle_id)
    }

    /// Posts `body` as JSON. A body that fails to encode is never sent.
    fn post_json<B: Serialize, T>(&self, path: &str, body: &B, decode: Decoder<T>) -> ApiCall<T> {
        let body = match serde_json::to_string(body) {
            Ok(body) => body,
            Err(e) => {
                log::error!("Unable to encode request to '{}': {}", path, e);
                return ApiCall::failed(ApiError::Encode(e));
            }
        };

        let request = HttpRequest::post(self.url(path), Some(body));
        ApiCall::new(self.transport.send(request), decode)
    }

    /// `GET /battles/{id}`
    pub fn get_battle(&self, battle_id: &BattleId) -> ApiCall<BattleSummary> {
        let request = HttpRequest::get(self.url(&format!("/battles/{}", battle_id)));
        ApiCall::new(self.transport.send(request), decode_json)
    }

    /// `POST /battles/{id}/turn`
    pub fn next_turn(&self, battle_id: &BattleId) -> ApiCall<TurnOutcome> {
        let request = HttpRequest::post(self.url(&format!("/battles/{}/turn", battle_id)), None);
        ApiCall::new(self.transport.send(request), decode_json)
    }

    /// `POST /battles/{id}/autoplay`. Without `max_turns` the backend picks
    /// its own limit.
    pub fn autoplay(&self, battle_id: &BattleId, max_turns: Option<u32>) -> ApiCall<AutoplayOutcome> {
        let path = match max_turns {
            Some(max_turns) => format!("/battles/{}/autoplay?max_turns={}", battle_id, max_turns),
            None => format!("/battles/{}/autoplay", battle_id),
        };

        let request = HttpRequest::post(self.url(&path), None);
        ApiCall::new(self.transport.send(request), decode_json)
    }

    /// `GET /battles`
    pub fn list_battles(&self) -> ApiCall<BTreeMap<BattleId, BattleSummary>> {
        let request = HttpRequest::get(self.url("/battles"));
        ApiCall::new(self.transport.send(request), decode_json)
    }
}

//====================================================================

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::BTreeMap, rc::Rc};

    use super::*;

    #[derive(Clone, Default)]
    struct CountingTransport {
        sent: Rc<Cell<usize>>,
    }

    impl Transport for CountingTransport {
        fn send(&self, _request: HttpRequest) -> JobPromise<TransportResult> {
            self.sent.set(self.sent.get() + 1);
            JobPromise::resolved(Ok(HttpResponse {
                status: 200,
                body: r#"{"battle_id": "sent"}"#.into(),
            }))
        }
    }

    #[test]
    fn unencodable_body_is_not_sent() {
        let transport = CountingTransport::default();
        let api = BattleApi::new(DEFAULT_API_BASE, transport.clone());

        // Maps with non-string keys have no JSON form
        let body = BTreeMap::from([((1, 2), 3)]);
        let call = api.post_json("/battles", &body, decode_battle_id);

        assert!(!call.is_pending());
        assert!(matches!(call.poll(), Some(Err(ApiError::Encode(_)))));
        assert!(call.poll().is_none());
        assert_eq!(transport.sent.get(), 0);
    }

    #[test]
    fn encodable_body_is_sent() {
        let transport = CountingTransport::default();
        let api = BattleApi::new(DEFAULT_API_BASE, transport.clone());

        let battle_id = api
            .create_battle(&["Arthur".to_string()], &["Mordred".to_string()], 5)
            .wait()
            .unwrap();

        assert_eq!(battle_id.as_str(), "sent");
        assert_eq!(transport.sent.get(), 1);
    }
}

//====================================================================
