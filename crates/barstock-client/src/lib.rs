//! HTTP transport and configuration for talking to the inventory server.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod http;

pub use config::{BodyEncoding, ClientConfig, config_path};
pub use error::{ClientError, ConfigError, Result};
pub use http::HttpTransport;
