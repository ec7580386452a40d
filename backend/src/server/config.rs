//! HTTP server configuration.

use clap::Parser;

/// Command-line and environment configuration for the HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "backend", about = "Social graph API server")]
pub struct ServerConfig {
    /// Interface to bind to.
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "BIND_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServerConfig {
    /// Return the bind address as a `(host, port)` pair.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
