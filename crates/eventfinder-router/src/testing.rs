//! Test doubles shared by the router tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use eventfinder_core::{Query, RoutingDecision};
use eventfinder_providers::{
    BoxFuture, EventProvider, FetchResult, PlaceholderProvider, ProviderRegistry, ProviderResult,
};

use crate::decider::Decider;
use crate::error::{RoutingError, RoutingResult};
use crate::reasoning::{ReasoningClient, RoutingRequest};

pub(crate) const MAJOR_VENUE_GUIDANCE: &str =
    "big, formally organized events (major concerts, sports, large venues)";
pub(crate) const COMMUNITY_GUIDANCE: &str =
    "local/community/smaller events (meetups, workshops, local gatherings)";

/// Registry with placeholder `eventbrite` and `ticketmaster` providers.
pub(crate) fn registry() -> ProviderRegistry {
    ProviderRegistry::new()
        .with_provider(Arc::new(PlaceholderProvider::new(
            "ticketmaster",
            MAJOR_VENUE_GUIDANCE,
        )))
        .unwrap()
        .with_provider(Arc::new(PlaceholderProvider::new(
            "eventbrite",
            COMMUNITY_GUIDANCE,
        )))
        .unwrap()
}

/// Returns the same result for every query.
pub(crate) struct StaticProvider {
    name: String,
    result: FetchResult,
}

impl StaticProvider {
    pub(crate) fn new(name: &str, result: FetchResult) -> Self {
        Self {
            name: name.to_string(),
            result,
        }
    }
}

impl EventProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn guidance(&self) -> &str {
        "anything"
    }

    fn fetch_events<'a>(&'a self, _query: &'a Query) -> BoxFuture<'a, ProviderResult<FetchResult>> {
        let result = self.result.clone();
        Box::pin(async move { Ok(result) })
    }
}

/// Sleeps before answering.
pub(crate) struct SlowProvider {
    name: String,
    delay: Duration,
    result: FetchResult,
}

impl SlowProvider {
    pub(crate) fn new(name: &str, delay: Duration, result: FetchResult) -> Self {
        Self {
            name: name.to_string(),
            delay,
            result,
        }
    }
}

impl EventProvider for SlowProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn guidance(&self) -> &str {
        "slow"
    }

    fn fetch_events<'a>(&'a self, _query: &'a Query) -> BoxFuture<'a, ProviderResult<FetchResult>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            Ok(self.result.clone())
        })
    }
}

/// Panics when called.
pub(crate) struct PanickingProvider(pub(crate) &'static str);

impl EventProvider for PanickingProvider {
    fn name(&self) -> &str {
        self.0
    }

    fn guidance(&self) -> &str {
        "broken"
    }

    fn fetch_events<'a>(&'a self, _query: &'a Query) -> BoxFuture<'a, ProviderResult<FetchResult>> {
        Box::pin(async move { explode() })
    }
}

fn explode() -> ProviderResult<FetchResult> {
    panic!("adapter bug")
}

/// Always returns the same decision.
pub(crate) struct FixedDecider(pub(crate) RoutingDecision);

impl Decider for FixedDecider {
    fn decide<'a>(&'a self, _query: &'a Query) -> BoxFuture<'a, RoutingResult<RoutingDecision>> {
        let decision = self.0.clone();
        Box::pin(async move { Ok(decision) })
    }
}

type ErrorFactory = Box<dyn Fn() -> RoutingError + Send + Sync>;

/// Always fails.
pub(crate) struct FailingDecider {
    make_error: ErrorFactory,
}

impl FailingDecider {
    pub(crate) fn new(make_error: impl Fn() -> RoutingError + Send + Sync + 'static) -> Self {
        Self {
            make_error: Box::new(make_error),
        }
    }
}

impl Decider for FailingDecider {
    fn decide<'a>(&'a self, _query: &'a Query) -> BoxFuture<'a, RoutingResult<RoutingDecision>> {
        let error = (self.make_error)();
        Box::pin(async move { Err(error) })
    }
}

/// Reasoning client with a canned reply that records every request.
pub(crate) struct ScriptedClient {
    reply: Box<dyn Fn() -> RoutingResult<String> + Send + Sync>,
    requests: Mutex<Vec<RoutingRequest>>,
}

impl ScriptedClient {
    pub(crate) fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self {
            reply: Box::new(move || Ok(text.clone())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(make_error: impl Fn() -> RoutingError + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(move || Err(make_error())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RoutingRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ReasoningClient for ScriptedClient {
    fn complete<'a>(&'a self, request: &'a RoutingRequest) -> BoxFuture<'a, RoutingResult<String>> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = (self.reply)();
        Box::pin(async move { reply })
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
