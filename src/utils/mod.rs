//! # 通用工具
//!
//! 短标识生成与密钥比较

pub mod ids;
pub mod secret;

pub use ids::{SOURCE_ID_LEN, STATE_TOKEN_LEN, generate_id};
pub use secret::constant_time_eq;
