//! # 数据源
//!
//! 数据源类型、按项目作用域的注册表与按类型的创建流程

pub mod registry;
pub mod service;
pub mod types;

pub use registry::SourceRegistry;
pub use service::{
    CallPickerCreated, CreateCallPickerSource, CreateFacebookSource, GoogleAuthorizeRequest,
    GoogleCallbackRequest, SourceService,
};
pub use types::{
    CallPickerConfig, FacebookConfig, GoogleAdsConfig, PhoneNumber, Source, SourceConfig,
    SourceKind,
};
