//! # 数据管道配置
//!
//! 静态采集目录、数据源到配置片段的投影，以及供外部调度器拉取的汇总服务

pub mod catalog;
pub mod fragment;
pub mod projector;
pub mod service;

pub use fragment::{ConfigFragment, PipelineDocument};
pub use projector::ConfigProjector;
pub use service::PipelineService;
