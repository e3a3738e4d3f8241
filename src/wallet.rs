use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::address::{self, ADDRESS_VERSION};
use crate::error::Result;
use crate::hash::{hash_pubkey, LOCKING_HASH_LEN};
use crate::signature::encode_public_key;

/// 钱包，持有一对 secp256k1 密钥
pub struct Wallet {
    pub private_key: SecretKey,
    pub public_key: PublicKey,
}

impl Wallet {
    /// 用系统随机数生成新的密钥对
    pub fn new() -> Self {
        let secp = Secp256k1::new();
        let mut rng = rand::thread_rng();
        let (private_key, public_key) = secp.generate_keypair(&mut rng);

        Wallet {
            private_key,
            public_key,
        }
    }

    /// 从 32 字节私钥恢复钱包
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        let secp = Secp256k1::new();
        let private_key = SecretKey::from_slice(bytes)?;
        let public_key = PublicKey::from_secret_key(&secp, &private_key);

        Ok(Wallet {
            private_key,
            public_key,
        })
    }

    /// 公钥的 `x || y` 坐标，签名后写入交易输入的就是这个值
    pub fn public_key_bytes(&self) -> Vec<u8> {
        encode_public_key(&self.public_key)
    }

    pub fn pub_key_hash(&self) -> [u8; LOCKING_HASH_LEN] {
        hash_pubkey(&self.public_key_bytes())
    }

    /// 钱包地址：锁定哈希加版本前缀后做 base58 校验编码
    pub fn address(&self) -> String {
        address::encode(&self.pub_key_hash(), ADDRESS_VERSION)
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}
