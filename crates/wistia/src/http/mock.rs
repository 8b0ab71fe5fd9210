use super::{HttpRequest, Transport};
use crate::Result;
use parking_lot::Mutex;
use std::fmt::Write as _;

/// In-memory [`Transport`] that remembers every request and replies with
/// the same canned body.
pub(crate) struct MockTransport {
    body: Vec<u8>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn json(body: serde_json::Value) -> Self {
        Self::raw(&body.to_string())
    }

    pub(crate) fn raw(body: &str) -> Self {
        Self {
            body: body.as_bytes().to_vec(),
            requests: Mutex::new(vec![]),
        }
    }

    #[track_caller]
    pub(crate) fn single_request(&self) -> HttpRequest {
        let requests = self.requests.lock();
        assert_eq!(requests.len(), 1, "{requests:#?}");
        requests[0].clone()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: HttpRequest) -> Result<Vec<u8>> {
        self.requests.lock().push(request);
        Ok(self.body.clone())
    }
}

/// Renders the request in a human-readable form suitable for snapshots
pub(crate) fn request_snapshot(request: &HttpRequest) -> String {
    let mut snapshot = format!("{} {}", request.method, request.url);

    let Some(payload) = &request.payload else {
        snapshot.push_str("\n<no body>");
        return snapshot;
    };

    for (key, value) in payload.fields() {
        write!(snapshot, "\n{key}={value}").unwrap();
    }

    snapshot
}
