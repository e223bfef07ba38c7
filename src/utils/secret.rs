//! # 密钥比较

use sha2::{Digest, Sha256};

/// 以恒定时间比较两个密钥
///
/// 先取 SHA-256 摘要再逐字节异或，比较耗时与输入内容和长度无关。
/// 期望值为空时一律返回 `false`。
#[must_use]
pub fn constant_time_eq(provided: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }

    let a = Sha256::digest(provided.as_bytes());
    let b = Sha256::digest(expected.as_bytes());

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
