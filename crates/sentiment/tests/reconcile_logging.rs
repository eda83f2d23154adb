use domain::Comment;
use sentiment::{ReconcileError, reconcile};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log lines in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

fn comments(n: usize) -> Vec<Comment> {
    (0..n).map(|i| Comment::new(format!("comment {i}"))).collect()
}

#[test]
fn too_few_labels_logs_expected_and_received_counts() {
    let (result, logs) = with_captured_logs(|| {
        reconcile(&comments(5), r#"["Positive","Neutral","Positive"]"#)
    });

    assert_eq!(
        result.unwrap_err(),
        ReconcileError::LengthMismatch {
            expected: 5,
            received: 3
        }
    );
    let line = logs
        .lines()
        .find(|line| line.contains("WARN"))
        .expect("a warning is logged");
    assert!(line.contains("expected=5"), "{line}");
    assert!(line.contains("received=3"), "{line}");
}

#[test]
fn surplus_labels_log_no_warning() {
    let (result, logs) = with_captured_logs(|| {
        reconcile(&comments(2), r#"["Positive","Negative","Neutral","Neutral"]"#)
    });

    assert_eq!(result.unwrap().len(), 2);
    assert!(!logs.contains("WARN"), "{logs}");
    assert!(logs.contains("dropping surplus sentiments"), "{logs}");
}

#[test]
fn exact_reply_logs_nothing() {
    let (result, logs) = with_captured_logs(|| {
        reconcile(&comments(2), r#"["Positive","Negative"]"#)
    });

    assert!(result.is_ok());
    assert!(logs.is_empty(), "{logs}");
}
