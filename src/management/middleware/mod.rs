//! # 管理API中间件

pub mod project;

pub use project::{ProjectClaims, ProjectContext, ProjectTokenManager, project_auth};
