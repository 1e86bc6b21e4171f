use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::api::ClassifierClient;
use crate::log_debug;
use crate::messages::Msg;
use crate::model::{DownloadRequest, DownloadSource, RequestTicket, SelectedFile};

/// API request types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Classify the current camera frame
    CaptureImage { ticket: RequestTicket },

    /// Classify a local file
    Upload {
        ticket: RequestTicket,
        file: SelectedFile,
    },

    /// Tell the backend the stream is no longer wanted
    StopCamera,

    /// Write a reviewed artifact into the download directory
    Download(DownloadRequest),
}

impl ApiRequest {
    fn name(&self) -> &'static str {
        match self {
            ApiRequest::CaptureImage { .. } => "CaptureImage",
            ApiRequest::Upload { .. } => "Upload",
            ApiRequest::StopCamera => "StopCamera",
            ApiRequest::Download(_) => "Download",
        }
    }
}

/// API service worker; every request runs on its own task
pub struct ApiService {
    client: ClassifierClient,
    download_dir: PathBuf,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl ApiService {
    pub fn new(
        client: ClassifierClient,
        download_dir: PathBuf,
        msg_tx: mpsc::UnboundedSender<Msg>,
    ) -> Self {
        Self {
            client,
            download_dir,
            msg_tx,
        }
    }

    fn dispatch(&self, request: ApiRequest) {
        let client = self.client.clone();
        let download_dir = self.download_dir.clone();
        let msg_tx = self.msg_tx.clone();

        // No retries: the user re-triggers the action
        tokio::spawn(async move {
            let name = request.name();
            log_debug(&format!("DEBUG [API Service]: START {}", name));

            let msg = Self::execute_request(&client, &download_dir, request).await;

            log_debug(&format!("DEBUG [API Service]: END {} -> {}", name, msg.name()));
            let _ = msg_tx.send(msg);
        });
    }

    /// Execute an API request and return the completion message
    async fn execute_request(
        client: &ClassifierClient,
        download_dir: &Path,
        request: ApiRequest,
    ) -> Msg {
        match request {
            ApiRequest::CaptureImage { ticket } => {
                let result = client.capture_image().await;
                Msg::CaptureResponse { ticket, result }
            }

            ApiRequest::Upload { ticket, file } => {
                let result = client.upload_image(&file).await;
                Msg::UploadResponse { ticket, result }
            }

            ApiRequest::StopCamera => {
                let result = client.stop_camera().await;
                Msg::StopCameraAck { result }
            }

            ApiRequest::Download(request) => {
                let result = save_download(client, download_dir, &request).await;
                Msg::DownloadFinished { result }
            }
        }
    }
}

/// Write the artifact as `download_dir/<file_name>` and return its path
pub async fn save_download(
    client: &ClassifierClient,
    download_dir: &Path,
    request: &DownloadRequest,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(download_dir)
        .await
        .with_context(|| format!("Failed to create {}", download_dir.display()))?;

    let target = download_dir.join(&request.file_name);

    match &request.source {
        DownloadSource::Remote { image_path } => {
            let bytes = client.fetch_artifact(image_path).await?;
            tokio::fs::write(&target, bytes)
                .await
                .with_context(|| format!("Failed to write {}", target.display()))?;
        }
        DownloadSource::Local(path) => {
            tokio::fs::copy(path, &target)
                .await
                .with_context(|| format!("Failed to copy {}", path.display()))?;
        }
    }

    Ok(target)
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: ClassifierClient,
    download_dir: PathBuf,
    msg_tx: mpsc::UnboundedSender<Msg>,
) -> mpsc::UnboundedSender<ApiRequest> {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();

    tokio::spawn(async move {
        let service = ApiService::new(client, download_dir, msg_tx);

        while let Some(request) = request_rx.recv().await {
            service.dispatch(request);
        }

        log_debug("DEBUG [API Service]: request channel closed, worker exiting");
    });

    request_tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_local_download_copies_file() {
        let dir = std::env::temp_dir().join(format!("trashcam-dl-{}", std::process::id()));
        let source = std::env::temp_dir().join(format!("trashcam-src-{}.png", std::process::id()));
        std::fs::write(&source, b"not really a png").unwrap();

        let client = ClassifierClient::new("http://127.0.0.1:9".to_string(), Duration::from_millis(50));
        let request = DownloadRequest {
            source: DownloadSource::Local(source.clone()),
            file_name: "metal_1700000000000.png".to_string(),
        };

        let saved = save_download(&client, &dir, &request).await.unwrap();
        assert_eq!(saved, dir.join("metal_1700000000000.png"));
        assert_eq!(std::fs::read(&saved).unwrap(), b"not really a png");

        let _ = std::fs::remove_file(&source);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_worker_posts_completion() {
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel();
        // Nothing listens on the discard port; the request fails fast
        let client = ClassifierClient::new("http://127.0.0.1:9".to_string(), Duration::from_millis(200));
        let request_tx = spawn_api_service(client, std::env::temp_dir(), msg_tx);

        request_tx.send(ApiRequest::StopCamera).unwrap();

        let msg = tokio::time::timeout(Duration::from_secs(5), msg_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(msg, Msg::StopCameraAck { result: Err(_) }));
    }
}
