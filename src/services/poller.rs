//! Prediction poller
//!
//! Queries the classifier immediately on start, then once per second,
//! until stopped. Each result is posted as `Msg::PredictionResult`
//! tagged with the token the poller was started with; the controller
//! decides whether it still applies.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::api::PredictionSource;
use crate::log_debug;
use crate::messages::Msg;
use crate::model::PollToken;

pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

pub struct PredictionPoller<S: PredictionSource> {
    source: S,
    msg_tx: mpsc::UnboundedSender<Msg>,
    active: Option<(PollToken, JoinHandle<()>)>,
}

impl<S: PredictionSource> PredictionPoller<S> {
    pub fn new(source: S, msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            source,
            msg_tx,
            active: None,
        }
    }

    /// Start ticking under `token`, replacing any running ticker
    pub fn start(&mut self, token: PollToken) {
        self.stop();

        let source = self.source.clone();
        let msg_tx = self.msg_tx.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                // Fetches run detached: stopping the ticker does not abort one in flight
                let source = source.clone();
                let msg_tx = msg_tx.clone();
                tokio::spawn(async move {
                    let prediction = source.poll_prediction().await;
                    let _ = msg_tx.send(Msg::PredictionResult { token, prediction });
                });
            }
        });

        log_debug(&format!("DEBUG [Poller]: started with token {}", token.0));
        self.active = Some((token, handle));
    }

    /// Cancel future ticks; a no-op when already stopped
    pub fn stop(&mut self) {
        if let Some((token, handle)) = self.active.take() {
            handle.abort();
            log_debug(&format!("DEBUG [Poller]: stopped token {}", token.0));
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn token(&self) -> Option<PollToken> {
        self.active.as_ref().map(|(token, _)| *token)
    }
}

impl<S: PredictionSource> Drop for PredictionPoller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
