//! Server configuration from command line flags and environment variables.

use std::time::Duration;

use clap::Parser;

/// Prediction endpoint used when none is configured
pub const DEFAULT_AI_ENDPOINT: &str =
    "https://toknowai.onrender.com/api/v1/prediction/b942e405-3055-42f1-94c7-dd57f5728921";

/// Room-based chat relay server
#[derive(Debug, Clone, Parser)]
#[command(name = "roomrelay-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on (0 picks a free port)
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// URL of the AI prediction endpoint
    #[arg(long, env = "AI_ENDPOINT", default_value = DEFAULT_AI_ENDPOINT)]
    pub ai_endpoint: String,

    /// Timeout for one AI request, in seconds
    #[arg(long, env = "AI_TIMEOUT_SECS", default_value_t = 30)]
    pub ai_timeout_secs: u64,

    /// Start with AI replies switched off
    #[arg(long, env = "AI_DISABLED")]
    pub ai_disabled: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }
}
