//! # Dashboard API
//!
//! 项目数据源管理后端：数据源注册、第三方授权、采集配置汇总与来电接入

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod management;
pub mod oauth;
pub mod pipeline;
pub mod sources;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{DashboardError, Result};
