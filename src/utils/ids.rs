//! # 短标识生成
//!
//! URL 安全字母表上的随机短 ID，数据源用 10 位，授权状态用 5 位。

use rand::Rng;

/// URL 安全字母表
const ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// 数据源 ID 长度
pub const SOURCE_ID_LEN: usize = 10;

/// 授权状态令牌长度
pub const STATE_TOKEN_LEN: usize = 5;

/// 生成指定长度的随机 ID
#[must_use]
pub fn generate_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
