//! # 应用装配
//!
//! 启动时一次性构建的依赖容器

pub mod context;

pub use context::AppContext;
