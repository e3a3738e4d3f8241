use utxo_tx::address::{self, ADDRESS_VERSION};
use utxo_tx::{hash_pubkey, Error, Wallet};

#[test]
fn test_wallet_creation() {
    // 创建新钱包
    let wallet = Wallet::new();

    // 公钥是 64 字节的 x || y 坐标
    assert_eq!(wallet.public_key_bytes().len(), 64);
    assert_eq!(wallet.pub_key_hash(), hash_pubkey(&wallet.public_key_bytes()));

    // 创建另一个钱包，验证地址唯一性
    let wallet2 = Wallet::new();
    assert_ne!(wallet.address(), wallet2.address());
}

#[test]
fn test_address_decodes_to_pub_key_hash() {
    let wallet = Wallet::new();

    let (payload, version) = address::decode(&wallet.address()).unwrap();

    assert_eq!(payload, wallet.pub_key_hash().to_vec());
    assert_eq!(version, ADDRESS_VERSION);
    // 版本 0x00 的地址以 '1' 开头
    assert!(wallet.address().starts_with('1'));
}

#[test]
fn test_wallet_from_secret_bytes() {
    let wallet = Wallet::new();

    let restored = Wallet::from_secret_bytes(&wallet.private_key.secret_bytes()).unwrap();

    assert_eq!(restored.public_key, wallet.public_key);
    assert_eq!(restored.address(), wallet.address());
}

#[test]
fn test_wallet_from_invalid_secret() {
    assert!(matches!(
        Wallet::from_secret_bytes(&[0u8; 32]),
        Err(Error::Crypto(_))
    ));
    assert!(Wallet::from_secret_bytes(&[1u8; 31]).is_err());
}
