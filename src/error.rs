//! # 错误模块
//!
//! 交易构建、签名与验证过程中可能出现的全部错误。

use thiserror::Error;

/// 交易核心的错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 地址格式错误或校验和不匹配
    #[error("invalid address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// 查找表中没有被引用的前序交易
    #[error("unknown previous transaction {0}")]
    UnknownPreviousTransaction(String),

    /// 前序交易中不存在被引用的输出
    #[error("output index {index} out of range for transaction {txid} ({outputs} outputs)")]
    InvalidOutputIndex {
        txid: String,
        index: i64,
        outputs: usize,
    },

    /// 计算摘要时给出的输入索引超出范围
    #[error("input index {index} out of range ({inputs} inputs)")]
    InvalidInputIndex { index: usize, inputs: usize },

    /// 签名或公钥的字节长度不是坐标宽度的两倍
    #[error("invalid {field} encoding: expected {expected} bytes, got {actual}")]
    InvalidSignatureEncoding {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// 输入中的公钥不属于被花费输出的接收者
    #[error("public key does not hash to locking hash {0}")]
    KeyMismatch(String),

    /// 规范序列化失败（InternalEncodingError），说明内存中的数据本身有问题
    #[error("internal encoding error: {0}")]
    InternalEncoding(#[from] bincode::Error),

    /// 交易没有任何输入
    #[error("transaction must have at least one input")]
    NoInputs,

    /// secp256k1 报告的错误，例如私钥或曲线点无效
    #[error("crypto error: {0}")]
    Crypto(#[from] secp256k1::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
