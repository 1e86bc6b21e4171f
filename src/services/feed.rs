//! Live feed reader
//!
//! Holds `GET /video_feed` open while streaming. The backend only
//! produces frames (and fresh predictions) while someone consumes the
//! stream, so the body is drained and its multipart boundaries counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::ClassifierClient;
use crate::log_debug;
use crate::logic::errors::format_error_message;
use crate::messages::Msg;

/// Boundary that precedes every JPEG part in the stream
pub const FRAME_BOUNDARY: &[u8] = b"--frame";

/// Counts boundaries across chunk splits
#[derive(Debug, Default)]
pub struct BoundaryCounter {
    carry: Vec<u8>,
}

impl BoundaryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning the boundaries completed in it
    pub fn push(&mut self, chunk: &[u8]) -> u64 {
        let mut buf = std::mem::take(&mut self.carry);
        buf.extend_from_slice(chunk);

        let mut count = 0;
        let mut start = 0;
        while let Some(pos) = find(&buf[start..], FRAME_BOUNDARY) {
            count += 1;
            start += pos + FRAME_BOUNDARY.len();
        }

        // Keep a tail short enough that it cannot hold a whole boundary
        let keep = (FRAME_BOUNDARY.len() - 1).min(buf.len() - start);
        self.carry = buf[buf.len() - keep..].to_vec();
        count
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

pub struct FeedStream {
    client: ClassifierClient,
    msg_tx: mpsc::UnboundedSender<Msg>,
    frames: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl FeedStream {
    pub fn new(client: ClassifierClient, msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            client,
            msg_tx,
            frames: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Open the feed at `url`; a no-op when already open
    pub fn open(&mut self, url: String) {
        if self.task.is_some() {
            return;
        }
        self.frames.store(0, Ordering::Relaxed);

        let client = self.client.clone();
        let msg_tx = self.msg_tx.clone();
        let frames = self.frames.clone();

        self.task = Some(tokio::spawn(async move {
            log_debug(&format!("DEBUG [Feed]: opening {}", url));

            let mut response = match client.open_video_feed(&url).await {
                Ok(response) => response,
                Err(e) => {
                    log_debug(&format!("DEBUG [Feed]: open failed: {:#}", e));
                    let _ = msg_tx.send(Msg::FeedClosed {
                        error: Some(format_error_message(&e)),
                    });
                    return;
                }
            };

            let mut counter = BoundaryCounter::new();
            let error = loop {
                match response.chunk().await {
                    Ok(Some(chunk)) => {
                        let n = counter.push(&chunk);
                        if n > 0 {
                            frames.fetch_add(n, Ordering::Relaxed);
                        }
                    }
                    Ok(None) => break None,
                    Err(e) => break Some(e.to_string()),
                }
            };

            log_debug(&format!(
                "DEBUG [Feed]: closed after {} frames (error: {:?})",
                frames.load(Ordering::Relaxed),
                error
            ));
            let _ = msg_tx.send(Msg::FeedClosed { error });
        }));
    }

    /// Abort the reader; a no-op when already closed
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log_debug("DEBUG [Feed]: reader aborted");
        }
    }

    pub fn is_open(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Frames received since the feed was last opened
    pub fn frame_count(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl Drop for FeedStream {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_boundaries_in_one_chunk() {
        let mut counter = BoundaryCounter::new();
        let chunk = b"--frame\r\nContent-Type: image/jpeg\r\n\r\nxx\r\n--frame\r\nContent-Type: image/jpeg\r\n\r\nyy\r\n";
        assert_eq!(counter.push(chunk), 2);
    }

    #[test]
    fn test_counts_boundary_split_across_chunks() {
        let mut counter = BoundaryCounter::new();
        assert_eq!(counter.push(b"jpegdata--fr"), 0);
        assert_eq!(counter.push(b"ame\r\nmore"), 1);
        assert_eq!(counter.push(b"-"), 0);
        assert_eq!(counter.push(b"-frame"), 1);
    }

    #[test]
    fn test_boundary_not_counted_twice() {
        let mut counter = BoundaryCounter::new();
        assert_eq!(counter.push(b"--frame"), 1);
        assert_eq!(counter.push(b"\r\n"), 0);
    }
}
