#![allow(dead_code)]

use frontctl::dispatcher::{Request, Response};
use frontctl::middleware::Middleware;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared, ordered record of what ran during a dispatch.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

/// Middleware that records its `before`/`after` calls and can abort.
pub struct Recorder {
    pub name: &'static str,
    pub log: CallLog,
    pub abort_with: Option<Response>,
}

impl Recorder {
    pub fn pass(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: log.clone(),
            abort_with: None,
        }
    }

    pub fn abort(name: &'static str, log: &CallLog, response: Response) -> Self {
        Self {
            name,
            log: log.clone(),
            abort_with: Some(response),
        }
    }
}

impl Middleware for Recorder {
    fn before(&self, _req: &Request) -> Option<Response> {
        self.log.push(format!("before:{}", self.name));
        self.abort_with.clone()
    }

    fn after(&self, _req: &Request, res: &mut Response, _latency: Duration) {
        self.log.push(format!("after:{}", self.name));
        res.set_header(&format!("x-after-{}", self.name), "1".to_string());
    }
}

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temporary file ending in `.{ext}`.
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn create_temp_manifest(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("frontctl_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
