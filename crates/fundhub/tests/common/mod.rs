//! Common test utilities and helpers

use std::path::Path;
use std::sync::{Arc, Mutex};

use fundhub::{Client, Notification, Notifier, Severity};
use wiremock::MockServer;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Route the client's tracing output to the test harness.
///
/// Filtered by `RUST_LOG`; safe to call from every test.
#[allow(dead_code)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Notifier that keeps every notification for later inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    /// Everything notified so far, in order
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    /// Messages notified so far, in order
    pub fn messages(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.seen.lock().unwrap().push(Notification {
            severity,
            message: message.to_string(),
        });
    }
}

/// Client pointed at a mock server, reporting into a fresh recorder
#[allow(dead_code)]
pub fn recording_client(server: &MockServer) -> (Client, Arc<RecordingNotifier>) {
    init_test_tracing();
    let notifier = Arc::new(RecordingNotifier::default());
    let client = Client::builder()
        .base_url(server.uri())
        .notifier(notifier.clone())
        .build()
        .expect("Failed to build client");
    (client, notifier)
}
