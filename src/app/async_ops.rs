//! Async operations for the TUI
//!
//! Uses channels to communicate between the sync TUI loop and async tasks.
//! Every fetch runs in its own task, so a newer request never waits behind an
//! older one; ordering is settled by the controllers' tickets.

use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use tokio::sync::mpsc;

use crate::api::AnimeGateway;
use crate::images;
use crate::screens::{FetchOutcome, FetchRequest};

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Execute a controller request against the gateway
    Fetch(FetchRequest),
    /// Download and decode a cover image
    LoadImage { url: String },
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the async worker to the TUI
#[derive(Debug)]
pub enum AsyncResult {
    /// A request settled
    Fetched(FetchOutcome),
    /// Cover decoded
    ImageLoaded { url: String, image: DynamicImage },
    /// Cover download or decode failed
    ImageFailed { url: String, error: String },
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

/// Spawn the async worker and return handles
pub fn spawn_worker<G>(gateway: Arc<G>) -> AsyncHandle
where
    G: AnimeGateway + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AsyncCommand>(32);
    let (result_tx, result_rx) = mpsc::channel::<AsyncResult>(32);

    let image_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_default();

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                AsyncCommand::Shutdown => {
                    tracing::debug!("Async worker shutting down");
                    break;
                }
                AsyncCommand::Fetch(request) => {
                    let gateway = Arc::clone(&gateway);
                    let result_tx = result_tx.clone();
                    tokio::spawn(async move {
                        let outcome = request.execute(gateway.as_ref()).await;
                        let _ = result_tx.send(AsyncResult::Fetched(outcome)).await;
                    });
                }
                AsyncCommand::LoadImage { url } => {
                    let client = image_client.clone();
                    let result_tx = result_tx.clone();
                    tokio::spawn(async move {
                        let result = match images::fetch_cover(&client, &url).await {
                            Ok(image) => AsyncResult::ImageLoaded { url, image },
                            Err(e) => AsyncResult::ImageFailed {
                                url,
                                error: format!("{e:#}"),
                            },
                        };
                        let _ = result_tx.send(result).await;
                    });
                }
            }
        }
    });

    AsyncHandle { cmd_tx, result_rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoGateway;
    use crate::screens::SearchController;

    #[tokio::test]
    async fn test_fetch_round_trip() {
        let gateway = Arc::new(DemoGateway::new().unwrap());
        let mut handle = spawn_worker(gateway);
        let mut search = SearchController::new();

        let request = search.mount(Some("bebop")).unwrap();
        handle
            .cmd_tx
            .send(AsyncCommand::Fetch(request))
            .await
            .unwrap();

        let Some(AsyncResult::Fetched(FetchOutcome::Search { ticket, result })) =
            handle.result_rx.recv().await
        else {
            panic!("expected a search outcome");
        };
        assert!(search.complete(ticket, result));
        assert_eq!(search.results()[0].title, "Cowboy Bebop");

        handle.cmd_tx.send(AsyncCommand::Shutdown).await.unwrap();
    }

    #[tokio::test]
    async fn test_requests_run_concurrently() {
        let gateway =
            Arc::new(DemoGateway::new().unwrap().with_latency(Duration::from_millis(200)));
        let mut handle = spawn_worker(gateway);
        let mut search = SearchController::new();

        let first = search.mount(Some("naruto")).unwrap();
        let second = search.perform_search("frieren").unwrap();
        let start = std::time::Instant::now();
        handle.cmd_tx.send(AsyncCommand::Fetch(first)).await.unwrap();
        handle.cmd_tx.send(AsyncCommand::Fetch(second)).await.unwrap();

        let mut committed = 0;
        for _ in 0..2 {
            if let Some(AsyncResult::Fetched(FetchOutcome::Search { ticket, result })) =
                handle.result_rx.recv().await
                && search.complete(ticket, result)
            {
                committed += 1;
            }
        }

        // Both ran side by side, and only the newer one committed
        assert!(start.elapsed() < Duration::from_millis(400));
        assert_eq!(committed, 1);
        assert_eq!(search.results()[0].title, "Sousou no Frieren");
    }
}
