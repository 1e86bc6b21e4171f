use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

use crate::logic::errors::ServiceError;
use crate::model::SelectedFile;

/// Classification reported by `/get_prediction` and `/upload`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub class_name: String,
    pub confidence: f64,
}

/// Classification of a captured frame plus where the backend stored it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptureOutcome {
    #[serde(flatten)]
    pub prediction: Prediction,
    pub image_path: String,
}

/// Either the success shape or an explicit `{ "error": ... }` payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Reply<T> {
    Failure { error: String },
    Success(T),
}

/// Source of periodic predictions (the classifier, or a stand-in under test)
pub trait PredictionSource: Clone + Send + Sync + 'static {
    fn poll_prediction(&self) -> impl Future<Output = Result<Prediction>> + Send;
}

#[derive(Clone)]
pub struct ClassifierClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl ClassifierClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// URL of the live feed; the query string defeats intermediary caching
    pub fn video_feed_url(&self, cache_bust: i64) -> String {
        format!("{}?{}", self.url("video_feed"), cache_bust)
    }

    /// Open the long-lived MJPEG stream (no request timeout)
    pub async fn open_video_feed(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to open video feed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Video feed returned HTTP {}", status);
        }
        Ok(response)
    }

    pub async fn get_prediction(&self) -> Result<Prediction> {
        let response = self
            .client
            .get(self.url("get_prediction"))
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to fetch prediction")?;

        read_reply(response).await.context("GET /get_prediction")
    }

    pub async fn capture_image(&self) -> Result<CaptureOutcome> {
        let response = self
            .client
            .post(self.url("capture_image"))
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to capture image")?;

        read_reply(response).await.context("POST /capture_image")
    }

    pub async fn upload_image(&self, file: &SelectedFile) -> Result<Prediction> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .with_context(|| format!("Failed to read {}", file.path.display()))?;

        let part = Part::bytes(bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("upload"))
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .context("Failed to upload image")?;

        read_reply(response).await.context("POST /upload")
    }

    /// Tell the backend to stop the stream; the reply body is irrelevant
    pub async fn stop_camera(&self) -> Result<()> {
        self.client
            .get(self.url("stop_camera"))
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to stop camera")?
            .error_for_status()
            .context("GET /stop_camera")?;

        Ok(())
    }

    /// Fetch the bytes of a captured image served by the backend
    pub async fn fetch_artifact(&self, image_path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.url(image_path))
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", image_path))?
            .error_for_status()?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read {}", image_path))?;
        Ok(bytes.to_vec())
    }
}

impl PredictionSource for ClassifierClient {
    async fn poll_prediction(&self) -> Result<Prediction> {
        self.get_prediction().await
    }
}

/// Decode a reply: an error payload wins regardless of status,
/// a non-success status without one is a transport failure
async fn read_reply<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await.context("Failed to read response")?;
    decode_reply(status.is_success(), status.as_u16(), &text)
}

fn decode_reply<T: DeserializeOwned>(success: bool, status: u16, text: &str) -> Result<T> {
    match serde_json::from_str::<Reply<T>>(text) {
        Ok(Reply::Failure { error }) => Err(ServiceError::new(error).into()),
        Ok(Reply::Success(value)) if success => Ok(value),
        _ if !success => anyhow::bail!("HTTP {}", status),
        Ok(Reply::Success(value)) => Ok(value),
        Err(e) => Err(anyhow::Error::new(e).context("Failed to parse response")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::errors::{classify_error, format_error_message, FailureKind};

    #[test]
    fn test_decode_prediction() {
        let prediction: Prediction =
            decode_reply(true, 200, r#"{"class_name": "plastic", "confidence": 92.0}"#).unwrap();
        assert_eq!(prediction.class_name, "plastic");
        assert_eq!(prediction.confidence, 92.0);
    }

    #[test]
    fn test_decode_capture_outcome() {
        let outcome: CaptureOutcome = decode_reply(
            true,
            200,
            r#"{"class_name": "battery", "confidence": 77.1, "image_path": "/static/uploads/capture_1.jpg"}"#,
        )
        .unwrap();
        assert_eq!(outcome.prediction.class_name, "battery");
        assert_eq!(outcome.image_path, "/static/uploads/capture_1.jpg");
    }

    #[test]
    fn test_error_payload_is_service_error() {
        let err = decode_reply::<CaptureOutcome>(false, 400, r#"{"error": "No camera frame available"}"#)
            .unwrap_err();
        assert_eq!(classify_error(&err), FailureKind::ServiceError);
        assert_eq!(format_error_message(&err), "No camera frame available");
    }

    #[test]
    fn test_error_payload_with_success_status() {
        let err = decode_reply::<CaptureOutcome>(true, 200, r#"{"error": "boom"}"#).unwrap_err();
        assert_eq!(classify_error(&err), FailureKind::ServiceError);
    }

    #[test]
    fn test_bad_status_without_payload_is_network_failure() {
        let err = decode_reply::<Prediction>(false, 502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(classify_error(&err), FailureKind::NetworkFailure);
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn test_garbage_body_is_network_failure() {
        let err = decode_reply::<Prediction>(true, 200, "not json").unwrap_err();
        assert_eq!(classify_error(&err), FailureKind::NetworkFailure);
    }

    #[test]
    fn test_url_joining() {
        let client = ClassifierClient::new("http://localhost:5000/".to_string(), Duration::from_secs(1));
        assert_eq!(client.url("/get_prediction"), "http://localhost:5000/get_prediction");
        assert_eq!(
            client.url("/static/uploads/capture_1.jpg"),
            "http://localhost:5000/static/uploads/capture_1.jpg"
        );
        assert_eq!(client.video_feed_url(42), "http://localhost:5000/video_feed?42");
    }
}
