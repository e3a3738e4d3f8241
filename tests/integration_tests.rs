use std::collections::HashMap;

use utxo_tx::transaction::SUBSIDY;
use utxo_tx::{Transaction, TxInput, TxOutput, Wallet};

// 主流程测试：挖矿奖励 -> 花费 -> 验证
#[test]
fn test_coinbase_spend_workflow() {
    let _ = env_logger::builder().is_test(true).try_init();

    println!("=== 交易完整工作流程 ===");

    // 第1步：创建两个钱包（矿工和用户）
    let miner = Wallet::new();
    let user = Wallet::new();
    println!("  矿工钱包地址: {}", miner.address());
    println!("  用户钱包地址: {}", user.address());

    // 第2步：创建 Coinbase 交易，奖励给矿工
    let coinbase = Transaction::new_coinbase(b"block 1", &miner.address()).unwrap();
    assert!(coinbase.is_coinbase());
    assert_eq!(coinbase.outputs[0].value, SUBSIDY);
    println!("  创建了 Coinbase 交易，ID: {}", coinbase.id_hex());

    // 第3步：矿工把奖励全部转给用户
    let input = TxInput::new(coinbase.id.to_vec(), 0);
    let output = TxOutput::new(SUBSIDY, &user.address()).unwrap();
    let mut spend = Transaction::new(vec![input], vec![output]).unwrap();
    assert!(!spend.is_coinbase());

    let mut prev_txs = HashMap::new();
    prev_txs.insert(coinbase.id_hex(), coinbase.clone());

    // 第4步：矿工签名，验证通过
    spend.sign(&miner.private_key, &prev_txs).unwrap();
    assert!(spend.inputs[0].uses_key(&coinbase.outputs[0].locking_hash));
    assert!(spend.verify(&prev_txs).unwrap());
    println!("  交易 {} 签名并验证通过", spend.id_hex());

    // 第5步：用户继续花费收到的输出
    let input = TxInput::new(spend.id.to_vec(), 0);
    let output = TxOutput::new(SUBSIDY, &miner.address()).unwrap();
    let mut refund = Transaction::new(vec![input], vec![output]).unwrap();
    prev_txs.insert(spend.id_hex(), spend.clone());

    refund.sign(&user.private_key, &prev_txs).unwrap();
    assert!(refund.verify(&prev_txs).unwrap());

    // 第6步：换成无关的密钥重新签名，验证失败
    let stranger = Wallet::new();
    let mut forged = spend.clone();
    forged.sign(&stranger.private_key, &prev_txs).unwrap();
    assert!(!forged.verify(&prev_txs).unwrap());
    println!("  无关密钥的签名被拒绝");
}

#[test]
fn test_independent_transactions_verify_in_parallel() {
    let miner = Wallet::new();
    let mut prev_txs = HashMap::new();
    let mut spends = Vec::new();

    for block in 0..4u8 {
        let coinbase = Transaction::new_coinbase(&[block], &miner.address()).unwrap();
        let input = TxInput::new(coinbase.id.to_vec(), 0);
        let output = TxOutput::new(SUBSIDY, &Wallet::new().address()).unwrap();
        spends.push(Transaction::new(vec![input], vec![output]).unwrap());
        prev_txs.insert(coinbase.id_hex(), coinbase);
    }
    for spend in &mut spends {
        spend.sign(&miner.private_key, &prev_txs).unwrap();
    }

    let prev_txs = &prev_txs;
    std::thread::scope(|scope| {
        let handles: Vec<_> = spends
            .iter()
            .map(|spend| scope.spawn(move || spend.verify(prev_txs).unwrap()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}
