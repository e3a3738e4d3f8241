//! # 地址模块
//!
//! 使用带校验和的 base58 编码（版本字节 + 载荷 + 4 字节双 SHA-256 校验和）
//! 在锁定哈希与地址字符串之间转换。

use crate::error::{Error, Result};

/// 地址的版本前缀
pub const ADDRESS_VERSION: u8 = 0x00;

/// 将锁定哈希编码为地址
pub fn encode(locking_hash: &[u8], version: u8) -> String {
    bs58::encode(locking_hash)
        .with_check_version(version)
        .into_string()
}

/// 解码地址，返回载荷和版本字节
///
/// 校验和不匹配或字符非法时返回 `Error::InvalidAddress`。
pub fn decode(address: &str) -> Result<(Vec<u8>, u8)> {
    let invalid = |reason: String| Error::InvalidAddress {
        address: address.to_string(),
        reason,
    };

    let raw = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| invalid(e.to_string()))?;

    let (version, payload) = raw
        .split_first()
        .ok_or_else(|| invalid("missing version byte".to_string()))?;

    Ok((payload.to_vec(), *version))
}
