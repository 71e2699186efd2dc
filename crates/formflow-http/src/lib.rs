#![forbid(unsafe_code)]

//! HTTP delivery for FormFlow.
//!
//! [`HttpTransport`] POSTs the form snapshot as JSON to a configured
//! endpoint with a blocking [`ureq`] agent. Any response outside the 2xx
//! window, and any transport-level failure, resolves as a
//! [`TransportError`]; the workflow decides how to present it. The client
//! blocks: the pump already runs deliveries on a worker thread.

use std::time::Duration;

use formflow_core::FormSnapshot;
use formflow_runtime::{Transport, TransportError};

/// Connect/read/write timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A transport that delivers snapshots to a remote endpoint.
///
/// ```no_run
/// use formflow_http::HttpTransport;
/// use formflow_runtime::{FailurePolicy, FormProgram, TranscriptSurface};
///
/// let transport = HttpTransport::new("https://api.example.com/contact");
/// let _program = FormProgram::new(TranscriptSurface::new(), transport, FailurePolicy::Report);
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    endpoint: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport for the given endpoint URL with default timeouts.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a transport with an explicit timeout for connect, read, and
    /// write.
    #[must_use]
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }

    /// The configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn deliver(&self, snapshot: &FormSnapshot) -> Result<(), TransportError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(snapshot);

        match response {
            Ok(response) if status_is_success(response.status()) => Ok(()),
            // ureq only surfaces >= 400 as Error::Status; a stray 3xx that
            // survives redirect handling still counts as a failure here.
            Ok(response) => {
                tracing::warn!(status = response.status(), "non-2xx response");
                Err(TransportError::Status(response.status()))
            }
            Err(ureq::Error::Status(status, _)) => {
                tracing::warn!(status, "endpoint rejected submission");
                Err(TransportError::Status(status))
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::warn!(error = %transport, "endpoint unreachable");
                Err(TransportError::Transport(transport.to_string()))
            }
        }
    }
}

/// Whether a status code counts as a successful delivery.
#[must_use]
fn status_is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
