//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use user_registry::domain::FailureReporter;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) reporter: Arc<FailureReporter>,
}

impl ServerConfig {
    /// Configuration with issue reporting disabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            reporter: Arc::new(FailureReporter::disabled()),
        }
    }

    /// Attach the reporter used for undeclared failures.
    #[must_use]
    pub fn with_failure_reporter(mut self, reporter: FailureReporter) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
