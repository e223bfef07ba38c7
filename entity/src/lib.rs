//! # Entity 模块
//!
//! 包含所有 Sea-ORM 实体定义

pub mod call_records;
pub mod google_oauth_states;
pub mod projects;
pub mod sources;

pub use call_records::Entity as CallRecords;
pub use google_oauth_states::Entity as GoogleOAuthStates;
pub use projects::Entity as Projects;
pub use sources::Entity as Sources;
