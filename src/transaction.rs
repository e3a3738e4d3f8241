//! # 交易模块
//!
//! 定义 UTXO 模型中的交易、交易输入和交易输出。
//!
//! 交易 ID 是对 `(inputs, outputs)` 做规范序列化后的 SHA-256 哈希，只在构建时计算一次。
//! 签名是在此之后原地写入输入的，所以 ID 不包含签名。

use log::debug;
use serde::{Deserialize, Serialize};

use crate::address;
use crate::error::{Error, Result};
use crate::hash::{hash_pubkey, sha256, LOCKING_HASH_LEN};

/// Coinbase 交易的挖矿奖励
pub const SUBSIDY: u64 = 10;

/// Coinbase 输入引用的输出索引
pub const COINBASE_INDEX: i64 = -1;

/// 交易 ID
pub type TxId = [u8; 32];

/// 交易结构，包含交易输入和输出列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// 交易 ID，由内容计算得到
    pub id: TxId,
    /// 交易输入列表，顺序有意义
    pub inputs: Vec<TxInput>,
    /// 交易输出列表，顺序有意义
    pub outputs: Vec<TxOutput>,
}

/// 交易输入结构，引用之前交易的输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// 前一个交易的 ID，coinbase 输入为空
    pub prev_txid: Vec<u8>,
    /// 前一个交易中输出的索引，coinbase 输入为 -1
    pub prev_index: i64,
    /// `r || s` 签名，签名之前为空
    pub signature: Vec<u8>,
    /// 普通输入为花费者公钥的 `x || y` 坐标；coinbase 输入为任意数据
    pub pubkey: Vec<u8>,
}

/// 交易输出结构，表示可花费的金额和锁定哈希
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// 输出金额（最小货币单位）
    pub value: u64,
    /// 接收者公钥的 20 字节哈希
    pub locking_hash: Vec<u8>,
}

impl TxInput {
    /// 创建一个尚未签名的输入
    pub fn new(prev_txid: Vec<u8>, prev_index: i64) -> Self {
        TxInput {
            prev_txid,
            prev_index,
            signature: Vec::new(),
            pubkey: Vec::new(),
        }
    }

    /// 判断该输入的公钥是否对应给定的锁定哈希
    pub fn uses_key(&self, locking_hash: &[u8]) -> bool {
        hash_pubkey(&self.pubkey).as_slice() == locking_hash
    }
}

impl TxOutput {
    /// 创建一个锁定到地址的输出
    ///
    /// # 参数
    ///
    /// * `value` - 输出金额
    /// * `address` - 接收者地址
    ///
    /// # 返回值
    ///
    /// 地址无法解码时返回 `Error::InvalidAddress`
    pub fn new(value: u64, address: &str) -> Result<Self> {
        let mut output = TxOutput {
            value,
            locking_hash: Vec::new(),
        };
        output.lock(address)?;
        Ok(output)
    }

    /// 将输出锁定到地址
    pub fn lock(&mut self, address: &str) -> Result<()> {
        let (payload, _version) = address::decode(address)?;
        if payload.len() != LOCKING_HASH_LEN {
            return Err(Error::InvalidAddress {
                address: address.to_string(),
                reason: format!(
                    "payload is {} bytes, expected {}",
                    payload.len(),
                    LOCKING_HASH_LEN
                ),
            });
        }
        self.locking_hash = payload;
        Ok(())
    }

    pub fn is_locked_with_key(&self, locking_hash: &[u8]) -> bool {
        self.locking_hash == locking_hash
    }
}

impl Transaction {
    /// 创建新的交易并计算其 ID
    ///
    /// 非 coinbase 输入的 `signature` 和 `pubkey` 应当为空，否则它们会进入交易 ID。
    ///
    /// # 参数
    ///
    /// * `inputs` - 交易输入列表，不能为空
    /// * `outputs` - 交易输出列表
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Result<Self> {
        if inputs.is_empty() {
            return Err(Error::NoInputs);
        }

        let mut tx = Transaction {
            id: [0u8; 32],
            inputs,
            outputs,
        };
        tx.id = tx.hash()?;

        debug!(
            "created transaction {} ({} inputs, {} outputs)",
            tx.id_hex(),
            tx.inputs.len(),
            tx.outputs.len()
        );
        Ok(tx)
    }

    /// 创建 coinbase 交易，将固定奖励支付给 `to`
    ///
    /// `data` 放在唯一输入的 `pubkey` 字段里，不具有密码学含义。
    pub fn new_coinbase(data: &[u8], to: &str) -> Result<Self> {
        let input = TxInput {
            prev_txid: Vec::new(),
            prev_index: COINBASE_INDEX,
            signature: Vec::new(),
            pubkey: data.to_vec(),
        };
        let output = TxOutput::new(SUBSIDY, to)?;

        Transaction::new(vec![input], vec![output])
    }

    /// 判断是否为 coinbase 交易
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1
            && self.inputs[0].prev_txid.is_empty()
            && self.inputs[0].prev_index == COINBASE_INDEX
    }

    /// 交易 ID 的十六进制形式，也是前序交易查找表的键
    pub fn id_hex(&self) -> String {
        hex::encode(self.id)
    }

    /// 对交易内容做规范序列化后计算 SHA-256
    ///
    /// bincode 默认配置下整数为定宽小端，字节序列带 u64 长度前缀，字段按声明顺序排列。
    ///
    /// 哈希的是当前内容。签名之后输入里有了 `signature` 和 `pubkey`，结果不再等于 `id`，
    /// 不能用它重新推导交易 ID。
    pub fn hash(&self) -> Result<TxId> {
        content_hash(&self.inputs, &self.outputs)
    }

    /// 创建清空了所有输入 `signature` 和 `pubkey` 的副本
    pub fn trimmed_copy(&self) -> Transaction {
        let inputs = self
            .inputs
            .iter()
            .map(|input| TxInput::new(input.prev_txid.clone(), input.prev_index))
            .collect();

        Transaction {
            id: self.id,
            inputs,
            outputs: self.outputs.clone(),
        }
    }

    /// 计算某个输入需要签名（或验证）的摘要
    ///
    /// 在修剪后的副本上把第 `index` 个输入的 `pubkey` 换成被引用输出的锁定哈希，
    /// 再重新计算 ID。每个输入嵌入的锁定哈希不同，因此摘要也不同。
    /// 不修改 `self`。
    pub fn input_digest(&self, index: usize, referenced_locking_hash: &[u8]) -> Result<TxId> {
        let mut inputs = self.inputs.clone();
        let count = inputs.len();
        let input = inputs
            .get_mut(index)
            .ok_or(Error::InvalidInputIndex { index, inputs: count })?;
        input.signature.clear();
        input.pubkey = referenced_locking_hash.to_vec();

        content_hash(&inputs, &self.outputs)
    }
}

fn content_hash(inputs: &[TxInput], outputs: &[TxOutput]) -> Result<TxId> {
    let encoded = bincode::serialize(&(inputs, outputs))?;
    Ok(sha256(&encoded))
}
