//! # 错误处理宏

/// 快速创建资源未找到错误的宏
#[macro_export]
macro_rules! not_found {
    ($resource:expr, $id:expr) => {
        $crate::error::DashboardError::not_found($resource, $id)
    };
}

/// 快速创建参数校验错误的宏
#[macro_export]
macro_rules! validation_error {
    ($field:expr, $msg:expr) => {
        $crate::error::DashboardError::validation($msg, Some($field.to_string()))
    };
    ($field:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::error::DashboardError::validation(format!($fmt, $($arg)*), Some($field.to_string()))
    };
}

/// 确保条件成立，否则返回参数校验错误
#[macro_export]
macro_rules! ensure_validation {
    ($cond:expr, $field:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::validation_error!($field, $msg));
        }
    };
    ($cond:expr, $field:expr, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::validation_error!($field, $fmt, $($arg)*));
        }
    };
}
