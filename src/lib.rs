//! # UTXO 交易核心
//!
//! 实现 UTXO 模型的交易：规范的交易 ID 计算、coinbase 交易构建，
//! 以及逐输入的 ECDSA 签名与验证。
//!
//! ## 主要模块
//!
//! * `transaction` - 定义交易、交易输入和交易输出，计算交易 ID 和签名摘要
//! * `signature` - 交易输入的签名与验证
//! * `hash` - 公钥哈希（SHA-256 + RIPEMD-160）
//! * `address` - 带校验和的 base58 地址编解码
//! * `wallet` - 密钥对与地址
//! * `error` - 错误类型

pub mod address;
pub mod error;
pub mod hash;
pub mod signature;
pub mod transaction;
pub mod wallet;

pub use error::{Error, Result};
pub use hash::hash_pubkey;
pub use transaction::{Transaction, TxInput, TxOutput};
pub use wallet::Wallet;
