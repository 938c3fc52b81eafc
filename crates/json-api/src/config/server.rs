//! Server Config

use clap::Args;

/// Listener and request limits.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address to listen on
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8740_u16)]
    pub port: u16,

    /// Largest accepted request body in bytes
    #[arg(long, env = "MAX_REQUEST_BYTES", default_value_t = 1_048_576_u64)]
    pub max_request_bytes: u64,
}

impl ServerRuntimeConfig {
    /// `host:port` for the listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
