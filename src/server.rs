//! Listener lifecycle
//!
//! [`Listener::start`] binds the socket and serves on a background task;
//! the returned [`RunningListener`] is the only handle to that task.
//! Stopping is graceful: requests already being handled run to completion.

use std::net::SocketAddr;

use axum::{extract::DefaultBodyLimit, middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    handlers,
    middleware::logging_middleware,
    state::AppState,
};

/// Build the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config().server.max_body_bytes;

    Router::new()
        .merge(handlers::routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CatchPanicLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// A listener that has not been started yet
pub struct Listener {
    state: AppState,
}

impl Listener {
    /// Create a listener serving `state`
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind the configured address and start serving.
    ///
    /// A bind failure is returned as [`AppError::Bind`]; nothing is spawned
    /// in that case.
    pub async fn start(self) -> AppResult<RunningListener> {
        let addr = self.state.config().server.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| AppError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| AppError::Bind { addr, source })?;

        let mut shutdown = self.state.shutdown_signal();
        let app = create_router(self.state.clone());

        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown.wait_for(|stop| *stop).await;
                })
                .await;

            if let Err(e) = result {
                tracing::error!("Listener on {} failed: {}", local_addr, e);
            }
            tracing::info!("Listener on {} stopped", local_addr);
        });

        tracing::info!("Listening on http://{}", local_addr);
        self.state
            .editor()
            .show_message(&format!("Competitive Companion listener ready on {local_addr}"));

        Ok(RunningListener {
            local_addr,
            state: self.state,
            handle,
        })
    }
}

/// Handle to a listener serving on a background task
pub struct RunningListener {
    local_addr: SocketAddr,
    state: AppState,
    handle: JoinHandle<()>,
}

impl RunningListener {
    /// Address actually bound (useful when the configured port is 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether the serving task has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Receiver that turns `true` when a stop was requested (including by
    /// one-shot mode)
    pub fn shutdown_requested(&self) -> watch::Receiver<bool> {
        self.state.shutdown_signal()
    }

    /// Wait for the listener to stop without asking it to
    pub async fn wait(self) -> AppResult<()> {
        self.handle
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))
    }

    /// Stop accepting, let in-flight requests finish, then return
    pub async fn stop(self) -> AppResult<()> {
        self.state.request_shutdown();
        self.wait().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{Datelike, Local};
    use tokio::sync::Notify;

    use super::*;
    use crate::config::Config;
    use crate::editor::{CommandEditor, Editor, EditorError};

    /// Editor that holds the request open for a while once it is reached
    struct SlowEditor {
        reached: Arc<Notify>,
        delay: Duration,
    }

    #[async_trait]
    impl Editor for SlowEditor {
        async fn open_file(&self, _path: &Path) -> Result<(), EditorError> {
            self.reached.notify_one();
            tokio::time::sleep(self.delay).await;
            Ok(())
        }

        fn project_folders(&self) -> Vec<PathBuf> {
            Vec::new()
        }

        fn show_message(&self, _message: &str) {}
    }

    fn test_config(root: &Path, extra: &[(&str, &str)]) -> Config {
        let mut settings: HashMap<String, String> = HashMap::new();
        settings.insert("HOOK_HOST".to_string(), "127.0.0.1".to_string());
        settings.insert("HOOK_PORT".to_string(), "0".to_string());
        settings.insert("SOURCE_ROOT".to_string(), root.display().to_string());
        for (k, v) in extra {
            settings.insert(k.to_string(), v.to_string());
        }
        Config::from_settings(&settings).unwrap()
    }

    async fn start(config: Config) -> RunningListener {
        let editor = Arc::new(CommandEditor::new(&config.editor));
        Listener::new(AppState::new(config, editor))
            .start()
            .await
            .unwrap()
    }

    fn today_dir(root: &Path) -> PathBuf {
        let today = Local::now().date_naive();
        root.join(format!("{:04}", today.year()))
            .join(format!("{:02}", today.month()))
            .join(format!("{:02}", today.day()))
    }

    async fn post(addr: SocketAddr, path: &str, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("http://{addr}{path}"))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    const TWO_SUM: &str = r#"{"title":"A. Two Sum!","tests":[{"input":"1 2\n","output":"3\n"}]}"#;

    #[tokio::test]
    async fn test_end_to_end_default_config() {
        let root = tempfile::tempdir().unwrap();
        let running = start(test_config(root.path(), &[])).await;

        let response = post(running.local_addr(), "/", TWO_SUM).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let ack: serde_json::Value = response.json().await.unwrap();
        assert_eq!(ack["identifier"], "A__Two_Sum");
        assert_eq!(ack["source_created"], true);

        let dir = today_dir(root.path());
        let source = std::fs::read_to_string(dir.join("A__Two_Sum.cpp")).unwrap();
        assert!(source.contains("Problem: A. Two Sum!"));
        assert!(source.contains("1000 ms, 256 MB"));

        let tests: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("A__Two_Sum_tests.txt")).unwrap())
                .unwrap();
        assert_eq!(
            tests,
            serde_json::json!([{"test": "1 2\n", "correct_answers": ["3"]}])
        );

        running.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_does_not_stop_listener() {
        let root = tempfile::tempdir().unwrap();
        let running = start(test_config(root.path(), &[])).await;
        let addr = running.local_addr();

        let bad = post(addr, "/", "{not json").await;
        assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = bad.json().await.unwrap();
        assert_eq!(body["error"]["code"], "PAYLOAD_PARSE_ERROR");

        let good = post(addr, "/any/path/at/all", TWO_SUM).await;
        assert_eq!(good.status(), reqwest::StatusCode::OK);
        assert!(today_dir(root.path()).join("A__Two_Sum.cpp").exists());

        assert!(!running.is_finished());
        running.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_source_survives_second_request() {
        let root = tempfile::tempdir().unwrap();
        let running = start(test_config(root.path(), &[])).await;
        let addr = running.local_addr();

        post(addr, "/", TWO_SUM).await;
        let source_path = today_dir(root.path()).join("A__Two_Sum.cpp");
        std::fs::write(&source_path, "// my solution\n").unwrap();

        let second = post(
            addr,
            "/",
            r#"{"title":"A. Two Sum!","tests":[{"input":"5 5\n","output":"10\n"}]}"#,
        )
        .await;
        let ack: serde_json::Value = second.json().await.unwrap();
        assert_eq!(ack["source_created"], false);

        assert_eq!(std::fs::read_to_string(&source_path).unwrap(), "// my solution\n");
        let tests = std::fs::read_to_string(today_dir(root.path()).join("A__Two_Sum_tests.txt")).unwrap();
        assert!(tests.contains("5 5\\n"));
        assert!(!tests.contains("1 2\\n"));

        running.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_non_post_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let running = start(test_config(root.path(), &[])).await;

        let response = reqwest::get(format!("http://{}/", running.local_addr()))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);

        running.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_filesystem_failure_is_isolated() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let running = start(test_config(&blocker, &[])).await;

        let response = post(running.local_addr(), "/", TWO_SUM).await;
        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!running.is_finished());

        running.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_one_shot_mode_stops_after_success() {
        let root = tempfile::tempdir().unwrap();
        let running = start(test_config(root.path(), &[("HOOK_ONE_SHOT", "true")])).await;
        let addr = running.local_addr();

        // A failed request does not count
        let bad = post(addr, "/", "garbage").await;
        assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);
        assert!(!*running.shutdown_requested().borrow());

        let good = post(addr, "/", TWO_SUM).await;
        assert_eq!(good.status(), reqwest::StatusCode::OK);
        drop(good);

        tokio::time::timeout(Duration::from_secs(5), running.wait())
            .await
            .expect("listener did not stop in one-shot mode")
            .unwrap();
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = occupied.local_addr().unwrap().port().to_string();

        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path(), &[("HOOK_PORT", port.as_str())]);
        let editor = Arc::new(CommandEditor::new(&config.editor));

        let result = Listener::new(AppState::new(config, editor)).start().await;
        assert!(matches!(result, Err(AppError::Bind { .. })));
    }

    #[tokio::test]
    async fn test_stop_lets_in_flight_request_finish() {
        let root = tempfile::tempdir().unwrap();
        let reached = Arc::new(Notify::new());
        let editor = Arc::new(SlowEditor {
            reached: reached.clone(),
            delay: Duration::from_millis(300),
        });
        let running = Listener::new(AppState::new(test_config(root.path(), &[]), editor))
            .start()
            .await
            .unwrap();

        let request = tokio::spawn(post(running.local_addr(), "/", TWO_SUM));
        reached.notified().await;
        assert!(!request.is_finished());

        tokio::time::timeout(Duration::from_secs(5), running.stop())
            .await
            .expect("listener did not stop")
            .unwrap();

        let response = request.await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert!(today_dir(root.path()).join("A__Two_Sum.cpp").exists());
    }
}
