//! # 签名模块
//!
//! 为交易的每个输入生成和验证 secp256k1 ECDSA 签名。
//!
//! 每个输入签名的摘要来自交易的修剪副本，并嵌入了它所花费输出的锁定哈希，
//! 因此签名只对那一个输出有效。签名和公钥都使用定宽大端编码：
//! 签名为 `r || s`，公钥为 `x || y`，每一半都是 [`COORD_LEN`] 字节。

use std::collections::HashMap;

use log::{debug, warn};
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, Verification};

use crate::error::{Error, Result};
use crate::transaction::{Transaction, TxInput};

/// secp256k1 坐标（以及签名中 r、s）的字节宽度
pub const COORD_LEN: usize = 32;

impl Transaction {
    /// 用私钥为所有输入签名
    ///
    /// coinbase 交易不需要签名，直接返回。签名写入原交易的输入，同时写入签名者的公钥；
    /// 交易 ID 保持不变。任何一个输入无法解析时返回错误，且不会修改交易。
    ///
    /// # 参数
    ///
    /// * `private_key` - 签名者的私钥
    /// * `prev_txs` - 以十六进制交易 ID 为键的前序交易查找表
    pub fn sign(
        &mut self,
        private_key: &SecretKey,
        prev_txs: &HashMap<String, Transaction>,
    ) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::NoInputs);
        }
        if self.is_coinbase() {
            return Ok(());
        }

        let secp = Secp256k1::new();
        let pubkey = encode_public_key(&PublicKey::from_secret_key(&secp, private_key));
        let trimmed = self.trimmed_copy();

        let mut signatures = Vec::with_capacity(self.inputs.len());
        for (index, input) in self.inputs.iter().enumerate() {
            let locking_hash = referenced_locking_hash(input, prev_txs)?;
            let digest = trimmed.input_digest(index, locking_hash)?;
            let message = Message::from_slice(&digest)?;

            // RFC 6979 的 nonce 再混入新的随机数，每次签名都不同
            let mut noncedata = [0u8; 32];
            OsRng.fill_bytes(&mut noncedata);
            let signature = secp.sign_ecdsa_with_noncedata(&message, private_key, &noncedata);

            debug!(
                "signed input {} of transaction {} (digest {})",
                index,
                self.id_hex(),
                hex::encode(digest)
            );
            signatures.push(signature.serialize_compact().to_vec());
        }

        for (input, signature) in self.inputs.iter_mut().zip(signatures) {
            input.signature = signature;
            input.pubkey = pubkey.clone();
        }
        Ok(())
    }

    /// 验证所有输入的签名
    ///
    /// # 返回值
    ///
    /// 所有输入都通过验证时返回 `Ok(true)`；遇到第一个失败的输入立即返回 `Ok(false)`。
    /// 签名或公钥编码错误视为验证失败。前序交易或输出无法解析、或交易没有输入时返回错误。
    pub fn verify(&self, prev_txs: &HashMap<String, Transaction>) -> Result<bool> {
        // 反序列化或直接构造的交易可能绕过 `Transaction::new` 的检查
        if self.inputs.is_empty() {
            return Err(Error::NoInputs);
        }
        if self.is_coinbase() {
            return Ok(true);
        }

        let secp = Secp256k1::verification_only();
        let trimmed = self.trimmed_copy();

        for (index, input) in self.inputs.iter().enumerate() {
            let locking_hash = referenced_locking_hash(input, prev_txs)?;
            let digest = trimmed.input_digest(index, locking_hash)?;

            if let Err(e) = verify_input(&secp, input, locking_hash, &digest) {
                warn!(
                    "input {} of transaction {} failed verification: {}",
                    index,
                    self.id_hex(),
                    e
                );
                return Ok(false);
            }
            debug!("verified input {} of transaction {}", index, self.id_hex());
        }

        Ok(true)
    }
}

/// 公钥的 `x || y` 编码（去掉 SEC1 非压缩格式的 0x04 前缀）
pub fn encode_public_key(public_key: &PublicKey) -> Vec<u8> {
    public_key.serialize_uncompressed()[1..].to_vec()
}

/// 从 `x || y` 编码恢复曲线上的点
pub fn decode_public_key(bytes: &[u8]) -> Result<PublicKey> {
    let (x, y) = split_coordinates(bytes, "public key")?;

    let mut sec1 = [0u8; 1 + 2 * COORD_LEN];
    sec1[0] = 0x04;
    sec1[1..1 + COORD_LEN].copy_from_slice(x);
    sec1[1 + COORD_LEN..].copy_from_slice(y);
    Ok(PublicKey::from_slice(&sec1)?)
}

/// 从 `r || s` 编码恢复签名
pub fn decode_signature(bytes: &[u8]) -> Result<Signature> {
    let (r, s) = split_coordinates(bytes, "signature")?;

    let mut compact = [0u8; 2 * COORD_LEN];
    compact[..COORD_LEN].copy_from_slice(r);
    compact[COORD_LEN..].copy_from_slice(s);
    Ok(Signature::from_compact(&compact)?)
}

fn split_coordinates<'a>(bytes: &'a [u8], field: &'static str) -> Result<(&'a [u8], &'a [u8])> {
    if bytes.len() != 2 * COORD_LEN {
        return Err(Error::InvalidSignatureEncoding {
            field,
            expected: 2 * COORD_LEN,
            actual: bytes.len(),
        });
    }
    Ok(bytes.split_at(COORD_LEN))
}

/// 在查找表中找到输入所花费输出的锁定哈希
fn referenced_locking_hash<'a>(
    input: &TxInput,
    prev_txs: &'a HashMap<String, Transaction>,
) -> Result<&'a [u8]> {
    let txid = hex::encode(&input.prev_txid);
    let prev_tx = prev_txs
        .get(&txid)
        .ok_or_else(|| Error::UnknownPreviousTransaction(txid.clone()))?;

    let output = usize::try_from(input.prev_index)
        .ok()
        .and_then(|index| prev_tx.outputs.get(index))
        .ok_or(Error::InvalidOutputIndex {
            txid,
            index: input.prev_index,
            outputs: prev_tx.outputs.len(),
        })?;

    Ok(&output.locking_hash)
}

fn verify_input<C: Verification>(
    secp: &Secp256k1<C>,
    input: &TxInput,
    locking_hash: &[u8],
    digest: &[u8],
) -> Result<()> {
    let signature = decode_signature(&input.signature)?;
    let public_key = decode_public_key(&input.pubkey)?;

    if !input.uses_key(locking_hash) {
        return Err(Error::KeyMismatch(hex::encode(locking_hash)));
    }

    let message = Message::from_slice(digest)?;
    secp.verify_ecdsa(&message, &signature, &public_key)?;
    Ok(())
}
