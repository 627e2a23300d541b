//! Scripted transport shared by engine and facade tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gigboard_domain::ResponseSpec;
use tokio::time::Instant;

use crate::api::GigboardApi;
use crate::auth::{InMemoryCredentialStore, SessionNotifier};
use crate::config::EngineConfig;
use crate::engine::RequestEngine;
use crate::ports::{HttpTransport, TransportError, TransportRequest};

pub const BASE_URL: &str = "https://api.test/v1";

/// What the transport does for one attempt.
pub enum Step {
    Respond(Result<ResponseSpec, TransportError>),
    /// Replies 200 with the request body.
    Echo,
    /// Responds once the delay has passed.
    Delayed(Duration, Result<ResponseSpec, TransportError>),
    /// Never completes.
    Hang,
}

impl Step {
    pub fn json(status: u16, body: &str) -> Self {
        Self::Respond(Ok(ResponseSpec::with_body(status, body)))
    }

    pub fn status(status: u16) -> Self {
        Self::Respond(Ok(ResponseSpec::with_body(status, Vec::new())))
    }

    pub fn status_after(delay: Duration, status: u16) -> Self {
        Self::Delayed(delay, Ok(ResponseSpec::with_body(status, Vec::new())))
    }

    pub const fn fail(error: TransportError) -> Self {
        Self::Respond(Err(error))
    }
}

/// Transport that replays a fixed script and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<(Instant, TransportRequest)>>,
}

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests().pop().expect("no request was made")
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(
        &self,
        request: &TransportRequest,
    ) -> impl Future<Output = Result<ResponseSpec, TransportError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), request.clone()));
        let step = self.steps.lock().unwrap().pop_front();
        let echoed = request.body.clone().unwrap_or_default();

        async move {
            match step {
                Some(Step::Respond(result)) => result,
                Some(Step::Echo) => Ok(ResponseSpec::with_body(200, echoed)),
                Some(Step::Delayed(delay, result)) => {
                    tokio::time::sleep(delay).await;
                    result
                }
                Some(Step::Hang) => std::future::pending().await,
                None => Err(TransportError::Other("script exhausted".to_string())),
            }
        }
    }
}

/// Engine wired to a scripted transport, an in-memory store and a fresh
/// notifier.
pub struct Harness {
    pub engine: Arc<RequestEngine<ScriptedTransport>>,
    pub transport: Arc<ScriptedTransport>,
    pub store: Arc<InMemoryCredentialStore>,
    pub notifier: Arc<SessionNotifier>,
}

impl Harness {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self::with_store(steps, InMemoryCredentialStore::new())
    }

    pub fn with_token(steps: impl IntoIterator<Item = Step>, token: &str) -> Self {
        Self::with_store(steps, InMemoryCredentialStore::with_token(token))
    }

    fn with_store(steps: impl IntoIterator<Item = Step>, store: InMemoryCredentialStore) -> Self {
        let config = EngineConfig {
            base_url: BASE_URL.to_string(),
            ..EngineConfig::default()
        };
        let transport = Arc::new(ScriptedTransport::new(steps));
        let store = Arc::new(store);
        let notifier = Arc::new(SessionNotifier::new());
        let engine = RequestEngine::new(
            config,
            Arc::clone(&transport),
            store.clone(),
            Arc::clone(&notifier),
        )
        .unwrap();
        let engine = Arc::new(engine);

        Self {
            engine,
            transport,
            store,
            notifier,
        }
    }

    pub fn api(&self) -> GigboardApi<ScriptedTransport> {
        GigboardApi::new(Arc::clone(&self.engine))
    }
}
