//! Async request dispatcher.
//!
//! Wraps the blocking chat client so the event loop never waits on the
//! network: `dispatch` returns immediately and the result comes back as a
//! `DetectCompleted`/`GenerateCompleted` event. At most one request per
//! target may be outstanding; a second dispatch while one is pending is a
//! caller bug, not a queueing request.

use anyhow::{bail, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::openai::OpenAiClient;
use crate::prompt;
use crate::tui::event::{Event, RequestTarget};

/// Per-target in-flight guards, shared with the worker tasks.
#[derive(Clone, Default)]
pub struct InFlight {
    detect: Arc<AtomicBool>,
    generate: Arc<AtomicBool>,
}

impl InFlight {
    fn flag(&self, target: RequestTarget) -> &Arc<AtomicBool> {
        match target {
            RequestTarget::Detect => &self.detect,
            RequestTarget::Generate => &self.generate,
        }
    }

    /// Claims the slot for `target`. Returns false when a request for that
    /// target is already outstanding.
    pub fn try_begin(&self, target: RequestTarget) -> bool {
        !self.flag(target).swap(true, Ordering::SeqCst)
    }

    pub fn finish(&self, target: RequestTarget) {
        self.flag(target).store(false, Ordering::SeqCst);
    }
}

pub struct RequestDispatcher {
    tx: mpsc::UnboundedSender<Event>,
    client: OpenAiClient,
    in_flight: InFlight,
}

impl RequestDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<Event>, client: OpenAiClient) -> Self {
        Self {
            tx,
            client,
            in_flight: InFlight::default(),
        }
    }

    /// Issues a request for `target` on a blocking worker and returns
    /// immediately. Exactly one completion event is delivered per call,
    /// including for prompts rejected by the context-budget guard.
    pub fn dispatch(&self, target: RequestTarget, prompt: String) -> Result<()> {
        if !self.in_flight.try_begin(target) {
            bail!("a {} request is already in flight", target);
        }

        if prompt::exceeds_context_budget(&prompt, self.client.model()) {
            self.in_flight.finish(target);
            let reason = format!(
                "Prompt is too large for {} (about {} tokens)",
                self.client.model(),
                prompt::estimated_tokens(&prompt)
            );
            let _ = self.tx.send(completion(target, Err(reason)));
            return Ok(());
        }

        let tx = self.tx.clone();
        let client = self.client.clone();
        let in_flight = self.in_flight.clone();
        tokio::task::spawn_blocking(move || {
            tracing::debug!(%target, "request dispatched");
            let result = client.complete(&prompt).map_err(|e| format!("{:#}", e));
            in_flight.finish(target);
            // Send failure means the wizard already quit; the result is
            // simply discarded.
            let _ = tx.send(completion(target, result));
        });

        Ok(())
    }
}

fn completion(target: RequestTarget, result: Result<String, String>) -> Event {
    match target {
        RequestTarget::Detect => Event::DetectCompleted(result),
        RequestTarget::Generate => Event::GenerateCompleted(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_rejects_second_claim_per_target() {
        let guard = InFlight::default();
        assert!(guard.try_begin(RequestTarget::Detect));
        assert!(!guard.try_begin(RequestTarget::Detect));
        // The other target is independent.
        assert!(guard.try_begin(RequestTarget::Generate));

        guard.finish(RequestTarget::Detect);
        assert!(guard.try_begin(RequestTarget::Detect));
    }

    #[tokio::test]
    async fn oversized_prompt_yields_a_failure_completion() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client = OpenAiClient::new("sk-test".to_string(), crate::config::GPT_35_TURBO);
        let dispatcher = RequestDispatcher::new(tx, client);

        let prompt = "x".repeat(5000 * 4);
        dispatcher.dispatch(RequestTarget::Detect, prompt).unwrap();

        match rx.recv().await.unwrap() {
            Event::DetectCompleted(Err(reason)) => {
                assert!(reason.contains("too large"));
            }
            other => panic!("expected DetectCompleted failure, got {:?}", other),
        }
        // The slot is free again.
        assert!(dispatcher.in_flight.try_begin(RequestTarget::Detect));
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_failure_and_clears_the_slot() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client = OpenAiClient::new("sk-test".to_string(), crate::config::GPT_35_TURBO)
            .with_endpoint("http://127.0.0.1:1/v1/chat/completions");
        let dispatcher = RequestDispatcher::new(tx, client);

        dispatcher
            .dispatch(RequestTarget::Generate, "hello".to_string())
            .unwrap();

        match rx.recv().await.unwrap() {
            Event::GenerateCompleted(Err(_)) => {}
            other => panic!("expected GenerateCompleted failure, got {:?}", other),
        }
        assert!(dispatcher.in_flight.try_begin(RequestTarget::Generate));
    }

    #[tokio::test]
    async fn double_dispatch_is_a_caller_error() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let client = OpenAiClient::new("sk-test".to_string(), crate::config::GPT_35_TURBO);
        let dispatcher = RequestDispatcher::new(tx, client);

        // Claim the slot directly so no network request is involved.
        assert!(dispatcher.in_flight.try_begin(RequestTarget::Detect));
        let err = dispatcher
            .dispatch(RequestTarget::Detect, "prompt".to_string())
            .unwrap_err();
        assert!(err.to_string().contains("already in flight"));
    }
}
