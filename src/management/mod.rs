//! # 管理端 HTTP 接口
//!
//! 基于 Axum 的数据源管理、汇总配置与来电接入接口

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;

pub use server::{AppState, ManagementServer};
