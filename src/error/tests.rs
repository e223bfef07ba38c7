//! # 错误处理测试

use crate::error::{Context, DashboardError};
use axum::http::StatusCode;
use std::error::Error;

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err = DashboardError::config_with_source("配置文件加载失败", io_err);

    assert!(matches!(err, DashboardError::Config { .. }));
    assert_eq!(err.to_string(), "配置错误: 配置文件加载失败");
    assert!(err.source().is_some());
}

#[test]
fn test_not_found_error() {
    let err = crate::not_found!("source", "abc");
    assert_eq!(err.to_string(), "资源未找到: source abc");
    assert_eq!(
        err.to_http_response_parts(),
        (StatusCode::NOT_FOUND, "NOT_FOUND")
    );
}

#[test]
fn test_upstream_and_parse_map_to_bad_gateway() {
    let upstream = DashboardError::upstream("facebook", Some(400), "invalid token");
    let parse = DashboardError::parse_with_source(
        "google",
        "missing refresh_token",
        anyhow::anyhow!("eof"),
    );

    assert_eq!(upstream.to_http_response_parts().0, StatusCode::BAD_GATEWAY);
    assert_eq!(parse.to_http_response_parts().1, "PARSE_ERROR");
}

#[test]
fn test_context_preserves_status_of_inner_error() {
    let result: Result<(), DashboardError> =
        Err(DashboardError::not_found("oauth_state", "a1b2c"));

    let err = result.context("兑换授权码失败").unwrap_err();
    assert_eq!(err.to_string(), "兑换授权码失败");
    assert!(err.is_not_found());
    assert_eq!(err.to_http_response_parts().0, StatusCode::NOT_FOUND);
}

#[test]
fn test_auto_conversion_from_db_error() {
    let db_err = sea_orm::DbErr::Custom("disk full".to_string());
    let err: DashboardError = db_err.into();

    assert!(matches!(err, DashboardError::Persistence { .. }));
    assert_eq!(err.to_string(), "持久化错误: 数据库操作失败");
    assert!(err.source().is_some());
}

#[test]
fn test_serialization_failure_is_server_side() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: DashboardError = json_err.into();

    assert!(matches!(err, DashboardError::Serialization { .. }));
    assert_eq!(
        err.to_http_response_parts(),
        (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
    );
}

#[test]
fn test_auto_conversion_from_toml_error() {
    let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
    let err: DashboardError = toml_err.into();

    assert!(matches!(err, DashboardError::Config { .. }));
    assert!(err.to_string().contains("TOML解析失败"));
}

#[test]
fn test_ensure_validation_macro() {
    fn check(name: &str) -> crate::error::Result<()> {
        crate::ensure_validation!(!name.is_empty(), "sourceName", "数据源名称不能为空");
        Ok(())
    }

    assert!(check("Acme").is_ok());
    let err = check("").unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Validation { field: Some(ref f), .. } if f == "sourceName"
    ));
}
