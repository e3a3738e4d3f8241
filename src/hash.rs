//! # 哈希模块
//!
//! 交易标识使用 SHA-256，锁定哈希使用 SHA-256 之后再做一次 RIPEMD-160。

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// 锁定哈希的字节长度
pub const LOCKING_HASH_LEN: usize = 20;

/// 计算数据的 SHA-256 哈希
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// 将公钥压缩为 20 字节的锁定哈希
///
/// 先做 SHA-256，再对结果做 RIPEMD-160。任意长度的输入都得到固定长度的输出。
///
/// # 参数
///
/// * `pubkey` - 公钥的原始字节（`x || y` 坐标）
///
/// # 返回值
///
/// 返回 20 字节的锁定哈希
pub fn hash_pubkey(pubkey: &[u8]) -> [u8; LOCKING_HASH_LEN] {
    let public_sha256 = sha256(pubkey);

    let mut ripemd = Ripemd160::new();
    ripemd.update(public_sha256);
    ripemd.finalize().into()
}
