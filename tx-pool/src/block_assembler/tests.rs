use super::*;
use crate::component::tests::{build_entry, build_tx, dummy_outpoint};
use ferro_pow::DummyPowEngine;
use ferro_types::{FeeRate, IndexedHeader, COIN};

const MTP: u32 = 1_600_000_000;

struct MockChain {
    tip: Option<IndexedHeader>,
    adjusted_time: u32,
}

impl MockChain {
    fn at_height(height: BlockNumber) -> Self {
        let header = Header {
            version: 1,
            time: MTP,
            bits: 0x1d00_ffff,
            ..Header::default()
        };
        MockChain {
            tip: Some(IndexedHeader::new(header, height)),
            adjusted_time: MTP + 600,
        }
    }

    fn empty() -> Self {
        MockChain {
            tip: None,
            adjusted_time: MTP + 600,
        }
    }
}

impl ChainProvider for MockChain {
    fn tip(&self) -> Option<IndexedHeader> {
        self.tip.clone()
    }

    fn median_time_past(&self, _header: &IndexedHeader) -> u32 {
        MTP
    }

    fn adjusted_time(&self) -> u32 {
        self.adjusted_time
    }

    fn block_version(&self, _prev: Option<&IndexedHeader>) -> i32 {
        0x2000_0000
    }
}

fn assemble_on(pool: TxPool, config: BlockAssemblerConfig, chain: &MockChain) -> BlockTemplate {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut assembler = BlockAssembler::new(Consensus::default(), config);
    let pool = RwLock::new(pool);
    assembler.create_new_block(&pool, chain, &DummyPowEngine)
}

fn assemble(pool: TxPool, config: BlockAssemblerConfig) -> BlockTemplate {
    assemble_on(pool, config, &MockChain::at_height(99))
}

fn template_txids(template: &BlockTemplate) -> Vec<H256> {
    template
        .block
        .transactions
        .iter()
        .skip(1)
        .map(Transaction::hash)
        .collect()
}

#[test]
fn empty_pool_yields_coinbase_only() {
    let chain = MockChain::at_height(99);
    let tip_hash = chain.tip.as_ref().unwrap().hash;
    let template = assemble_on(TxPool::new(), BlockAssemblerConfig::default(), &chain);

    assert_eq!(template.block.transactions.len(), 1);
    let coinbase = template.block.coinbase().unwrap();
    assert!(coinbase.is_coinbase());
    assert_eq!(coinbase.outputs[0].value, Amount::from_sats(50 * COIN));

    assert_eq!(template.tx_fees, vec![Amount::zero()]);
    assert_eq!(template.stats.tx_count, 0);
    assert_eq!(template.stats.block_size, 1000);
    assert_eq!(template.stats.block_sigops, 100);

    assert_eq!(template.block.header.prev_hash, tip_hash);
    assert_eq!(template.block.header.time, MTP + 600);
    assert_eq!(template.block.header.bits, 0x1d00_ffff);
    assert_eq!(template.block.header.version, 0x2000_0000);
}

#[test]
fn genesis_template_has_zero_prev_hash() {
    let template = assemble_on(
        TxPool::new(),
        BlockAssemblerConfig::default(),
        &MockChain::empty(),
    );
    assert!(template.block.header.prev_hash.is_zero());
    // Height 0, first era subsidy.
    assert_eq!(
        template.block.coinbase().unwrap().outputs[0].value,
        Amount::from_sats(50 * COIN)
    );
}

#[test]
fn header_time_never_precedes_median_time_past() {
    let mut chain = MockChain::at_height(99);
    chain.adjusted_time = MTP - 100;
    let template = assemble_on(TxPool::new(), BlockAssemblerConfig::default(), &chain);
    assert_eq!(template.block.header.time, MTP + 1);
}

#[test]
fn selects_in_descending_rate_order() {
    let mut pool = TxPool::new();
    let mid = build_entry(&[dummy_outpoint(1)], 1, 2_000, 1000);
    let low = build_entry(&[dummy_outpoint(2)], 2, 1_500, 1000);
    let high = build_entry(&[dummy_outpoint(3)], 3, 5_000, 1000);
    let ordered = vec![high.txid(), mid.txid(), low.txid()];
    for entry in [mid, low, high] {
        pool.add_entry(entry, &[]).unwrap();
    }

    let template = assemble(pool, BlockAssemblerConfig::default());
    assert_eq!(template_txids(&template), ordered);
    assert_eq!(template.tx_fees[0], Amount::from_sats(-8_500));
    assert_eq!(template.stats.block_size, 1000 + 3000);
}

#[test]
fn fee_mode_prefers_absolute_fee_over_rate() {
    let mut pool = TxPool::new();
    // Highest fee but the worst rate.
    let big = build_entry(&[dummy_outpoint(1)], 1, 10_000, 10_000);
    // Best rate, smaller fee.
    let quick = build_entry(&[dummy_outpoint(2)], 2, 2_000, 200);
    let ordered = vec![big.txid(), quick.txid()];
    for entry in [big, quick] {
        pool.add_entry(entry, &[]).unwrap();
    }

    let config = BlockAssemblerConfig {
        sort_mode: SortMode::Fee,
        ..Default::default()
    };
    let template = assemble(pool, config);
    assert_eq!(template_txids(&template), ordered);
}

#[test]
fn below_floor_packages_are_excluded() {
    for sort_mode in [SortMode::Fee, SortMode::FeeRate] {
        let mut pool = TxPool::new();
        // 50 sats/kB against the default 1000 sats/kB floor.
        pool.add_entry(build_entry(&[dummy_outpoint(1)], 1, 50, 1000), &[])
            .unwrap();
        let config = BlockAssemblerConfig {
            sort_mode,
            ..Default::default()
        };
        let template = assemble(pool, config);
        assert_eq!(template.block.transactions.len(), 1);
    }
}

#[test]
fn zero_floor_admits_zero_fee_entries() {
    let mut pool = TxPool::new();
    let free = build_entry(&[dummy_outpoint(1)], 1, 0, 500);
    let free_id = free.txid();
    pool.add_entry(free, &[]).unwrap();

    let config = BlockAssemblerConfig {
        min_fee_rate: FeeRate::zero(),
        ..Default::default()
    };
    let template = assemble(pool, config);
    assert_eq!(template_txids(&template), vec![free_id]);
    assert_eq!(template.tx_fees, vec![Amount::zero(), Amount::zero()]);
}

#[test]
fn child_package_pulls_low_fee_parent() {
    let mut pool = TxPool::new();
    // The parent alone is under the floor; the child's package carries it.
    let parent = build_entry(&[dummy_outpoint(1)], 1, 10, 200);
    let parent_id = parent.txid();
    let child = build_entry(&[OutPoint::new(parent_id, 0)], 2, 5_000, 200);
    let child_id = child.txid();
    pool.add_entry(parent, &[]).unwrap();
    pool.add_entry(child, &[parent_id]).unwrap();

    let template = assemble(pool, BlockAssemblerConfig::default());
    assert_eq!(template_txids(&template), vec![parent_id, child_id]);
    assert_eq!(template.tx_fees[0], Amount::from_sats(-5_010));
    assert_eq!(
        template.block.coinbase().unwrap().outputs[0].value,
        Amount::from_sats(50 * COIN + 5_010)
    );
}

#[test]
fn chain_commits_ancestors_first() {
    let mut pool = TxPool::new();
    let a = build_entry(&[dummy_outpoint(1)], 1, 2_000, 300);
    let a_id = a.txid();
    let b = build_entry(&[OutPoint::new(a_id, 0)], 2, 3_000, 300);
    let b_id = b.txid();
    let c = build_entry(&[OutPoint::new(b_id, 0)], 3, 9_000, 300);
    let c_id = c.txid();
    pool.add_entry(a, &[]).unwrap();
    pool.add_entry(b, &[a_id]).unwrap();
    pool.add_entry(c, &[b_id]).unwrap();

    // c's package rate tops the ranking, so one pop commits all three.
    let template = assemble(pool, BlockAssemblerConfig::default());
    assert_eq!(template_txids(&template), vec![a_id, b_id, c_id]);
    assert_eq!(template.stats.tx_count, 3);
}

#[test]
fn size_budget_failure_skips_to_smaller_candidates() {
    let mut pool = TxPool::new();
    // Best rate, but 1000 reserved + 600 busts the 1500 ceiling.
    let big = build_entry(&[dummy_outpoint(1)], 1, 60_000, 600);
    let small = build_entry(&[dummy_outpoint(2)], 2, 400, 300);
    let small_id = small.txid();
    pool.add_entry(big, &[]).unwrap();
    pool.add_entry(small, &[]).unwrap();

    let config = BlockAssemblerConfig {
        max_generated_block_size: 1500,
        ..Default::default()
    };
    let template = assemble(pool, config);
    assert_eq!(template_txids(&template), vec![small_id]);
    assert_eq!(template.stats.block_size, 1300);
}

#[test]
fn sigop_budget_failure_skips_to_cheaper_candidates() {
    let mut pool = TxPool::new();
    // 100 reserved + 19_900 meets the 20_000 allowance, which fails the
    // strict budget test.
    let heavy = TxEntry::new(
        build_tx(&[dummy_outpoint(1)], 1),
        Amount::from_sats(60_000),
        600,
        19_900,
    );
    let light = TxEntry::new(
        build_tx(&[dummy_outpoint(2)], 2),
        Amount::from_sats(400),
        300,
        10,
    );
    let light_id = light.txid();
    pool.add_entry(heavy, &[]).unwrap();
    pool.add_entry(light, &[]).unwrap();

    let template = assemble(pool, BlockAssemblerConfig::default());
    assert_eq!(template_txids(&template), vec![light_id]);
    assert_eq!(template.stats.block_sigops, 100 + 10);
}

#[test]
fn tiny_consensus_limit_floors_the_generated_size() {
    // A consensus limit under 2000 pushes the ceiling below the coinbase
    // reservation; the reservation floor wins and fills the whole budget.
    let consensus = Consensus {
        max_block_size: 1500,
        ..Consensus::default()
    };
    let mut pool = TxPool::new();
    pool.add_entry(build_entry(&[dummy_outpoint(1)], 1, 2_000, 300), &[])
        .unwrap();
    let mut assembler = BlockAssembler::new(consensus, BlockAssemblerConfig::default());
    let pool = RwLock::new(pool);
    let template = assembler.create_new_block(&pool, &MockChain::at_height(99), &DummyPowEngine);

    assert_eq!(template.block.transactions.len(), 1);
    assert_eq!(template.stats.block_size, 1000);
}

#[test]
fn committed_ancestors_no_longer_subsidize_descendants() {
    let mut pool = TxPool::new();
    let parent = build_entry(&[dummy_outpoint(1)], 1, 10_000, 100);
    let parent_id = parent.txid();
    // Standalone rate 500 sats/kB, under the floor; the package rate with
    // the parent would clear it.
    let child = build_entry(&[OutPoint::new(parent_id, 0)], 2, 500, 1000);
    pool.add_entry(parent, &[]).unwrap();
    pool.add_entry(child, &[parent_id]).unwrap();

    let template = assemble(pool, BlockAssemblerConfig::default());
    assert_eq!(template_txids(&template), vec![parent_id]);
    assert_eq!(template.stats.descendants_updated, 1);
}

#[test]
fn consecutive_failures_abort_a_nearly_full_block() {
    let mut pool = TxPool::new();
    // Pops first on rate and fails the size budget.
    let big = build_entry(&[dummy_outpoint(1)], 1, 600_000, 1500);
    // Would fit, but selection has already given up.
    let small = build_entry(&[dummy_outpoint(2)], 2, 400, 300);
    pool.add_entry(big, &[]).unwrap();
    pool.add_entry(small, &[]).unwrap();

    let config = BlockAssemblerConfig {
        max_generated_block_size: 2000,
        max_consecutive_failures: 0,
        near_full_slack: 2000,
        ..Default::default()
    };
    let template = assemble(pool, config);
    assert_eq!(template.block.transactions.len(), 1);
}

#[test]
fn non_final_packages_are_skipped() {
    let mut pool = TxPool::new();
    let mut tx = build_tx(&[dummy_outpoint(1)], 1);
    // Height lock far in the future, with a non-final sequence so the
    // locktime is enforced.
    tx.lock_time = 1_000_000;
    tx.inputs[0].sequence = 0;
    let locked = TxEntry::new(tx, Amount::from_sats(5_000), 300, 1);
    let liquid = build_entry(&[dummy_outpoint(2)], 2, 1_000, 300);
    let liquid_id = liquid.txid();
    pool.add_entry(locked, &[]).unwrap();
    pool.add_entry(liquid, &[]).unwrap();

    let template = assemble(pool, BlockAssemblerConfig::default());
    assert_eq!(template_txids(&template), vec![liquid_id]);
}

#[test]
fn template_metadata_is_index_aligned() {
    let mut pool = TxPool::new();
    let entry = TxEntry::new(
        build_tx(&[dummy_outpoint(1)], 1),
        Amount::from_sats(2_000),
        300,
        7,
    );
    let fee = entry.fee;
    pool.add_entry(entry, &[]).unwrap();

    let template = assemble(pool, BlockAssemblerConfig::default());
    assert_eq!(template.block.transactions.len(), 2);
    assert_eq!(template.tx_fees.len(), 2);
    assert_eq!(template.tx_sig_ops.len(), 2);
    assert_eq!(template.tx_fees[0], -fee);
    assert_eq!(template.tx_fees[1], fee);
    assert_eq!(template.tx_sig_ops[1], 7);
}

#[test]
fn version_override_wins_over_chain_version() {
    let config = BlockAssemblerConfig {
        block_version_override: Some(4),
        ..Default::default()
    };
    let template = assemble(TxPool::new(), config);
    assert_eq!(template.block.header.version, 4);
}

#[test]
fn coinbase_message_lands_in_the_unlocking_script() {
    let config = BlockAssemblerConfig {
        coinbase_message: Some("ferro".to_string()),
        ..Default::default()
    };
    let template = assemble(TxPool::new(), config);
    let script = &template.block.coinbase().unwrap().inputs[0].script_sig;
    let bytes = script.as_bytes();
    assert!(bytes
        .windows(5)
        .any(|window| window == b"ferro".as_slice()));
}

#[test]
fn merkle_root_covers_selected_transactions() {
    let mut pool = TxPool::new();
    pool.add_entry(build_entry(&[dummy_outpoint(1)], 1, 2_000, 300), &[])
        .unwrap();

    let template = assemble(pool, BlockAssemblerConfig::default());
    let txids: Vec<H256> = template
        .block
        .transactions
        .iter()
        .map(Transaction::hash)
        .collect();
    assert_eq!(template.block.header.merkle_root, merkle_root(&txids));
}
