//! # 来电接收
//!
//! Call Picker 推送的来电记录：按号码路由到项目、持久化，并异步通知外部 webhook

pub mod notifier;
pub mod receiver;
pub mod record;
pub mod routing;

pub use notifier::{CallNotifier, NoopNotifier, NotifyError, WebhookNotifier};
pub use receiver::TransportReceiver;
pub use record::CallRecord;
pub use routing::{CallRouting, DatabaseCallRouting};
