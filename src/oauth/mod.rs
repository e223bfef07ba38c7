//! # OAuth 凭证获取
//!
//! 一次性状态存储、第三方凭证兑换与授权跳转地址构建

pub mod authorize;
pub mod exchange;
pub mod state_store;

pub use authorize::google_authorization_url;
pub use exchange::{CredentialExchangeClient, build_http_client};
pub use state_store::{OAuthStateStore, StateRecord};
