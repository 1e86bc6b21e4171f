//! Poller cadence under tokio's paused clock

use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use trashcam::api::{Prediction, PredictionSource};
use trashcam::messages::Msg;
use trashcam::model::PollToken;
use trashcam::services::PredictionPoller;

#[derive(Clone, Default)]
struct CountingSource {
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PredictionSource for CountingSource {
    async fn poll_prediction(&self) -> Result<Prediction> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n == 1 {
            anyhow::bail!("transient failure");
        }
        Ok(Prediction {
            class_name: "plastic".to_string(),
            confidence: 90.0,
        })
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Msg>) -> Vec<Msg> {
    let mut msgs = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        msgs.push(msg);
    }
    msgs
}

#[tokio::test(start_paused = true)]
async fn test_first_query_is_immediate_then_every_second() {
    let source = CountingSource::default();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut poller = PredictionPoller::new(source.clone(), tx);

    poller.start(PollToken(1));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(source.calls(), 1);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(source.calls(), 2);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(source.calls(), 4);

    // A failed tick does not stop the schedule; every tick posts a result
    let msgs = drain(&mut rx);
    assert_eq!(msgs.len(), 4);
    let failures = msgs
        .iter()
        .filter(|msg| matches!(msg, Msg::PredictionResult { prediction: Err(_), .. }))
        .count();
    assert_eq!(failures, 1);
    assert!(msgs
        .iter()
        .all(|msg| matches!(msg, Msg::PredictionResult { token: PollToken(1), .. })));
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_future_ticks() {
    let source = CountingSource::default();
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut poller = PredictionPoller::new(source.clone(), tx);

    poller.start(PollToken(7));
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(source.calls(), 2);

    poller.stop();
    assert!(!poller.is_active());
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(source.calls(), 2);

    // Stopping twice is a no-op
    poller.stop();
    assert!(poller.token().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_restart_uses_new_token() {
    let source = CountingSource::default();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut poller = PredictionPoller::new(source.clone(), tx);

    poller.start(PollToken(1));
    tokio::time::sleep(Duration::from_millis(10)).await;
    poller.start(PollToken(2));
    assert_eq!(poller.token(), Some(PollToken(2)));
    tokio::time::sleep(Duration::from_millis(10)).await;

    let tokens: Vec<PollToken> = drain(&mut rx)
        .into_iter()
        .filter_map(|msg| match msg {
            Msg::PredictionResult { token, .. } => Some(token),
            _ => None,
        })
        .collect();
    assert_eq!(tokens, vec![PollToken(1), PollToken(2)]);
}
