//! Configuration module for the org-chart backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory where uploaded photos are stored and served from
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Public base URL used when building photo links for clients
    pub public_base_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("ORGCHART_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let upload_dir = env::var("ORGCHART_UPLOAD_DIR")
            .unwrap_or_else(|_| "./uploads".to_string())
            .into();

        let bind_addr: SocketAddr = env::var("ORGCHART_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .expect("Invalid ORGCHART_BIND_ADDR format");

        let public_base_url =
            env::var("ORGCHART_PUBLIC_URL").unwrap_or_else(|_| format!("http://{}", bind_addr));

        let log_level = env::var("ORGCHART_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            upload_dir,
            bind_addr,
            public_base_url,
            log_level,
        }
    }
}
