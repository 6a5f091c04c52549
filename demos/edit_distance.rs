//! 演示如何在 library 模式下使用 nw-rust 计算加权编辑距离。
//!
//! 运行方式：
//! ```bash
//! cargo run --example edit_distance
//! ```

use nw_rust::dist::{self, AnomalyLog, CostModel};

fn main() {
    // 1. 两条待比对的序列（含一个嵌入的换行符，模拟未清洗的 FASTA 流）
    let seq_a = b"ACGTACGT\nAGCTGATC";
    let seq_b = b"ACGTTCGTAGCTGATC";
    println!("seq_a: {:?}", String::from_utf8_lossy(seq_a));
    println!("seq_b: {:?}", String::from_utf8_lossy(seq_b));

    // 2. 代价模型：默认 替换=1，未知碱基=2，插入删除=2
    let costs = CostModel::default();
    println!(
        "costs: substitution={} unknown={} indel={}",
        costs.substitution, costs.unknown, costs.indel
    );

    // 3. 生产引擎：线性空间迭代
    let mut log = AnomalyLog::new();
    let d = dist::distance_iterative_logged(seq_a, seq_b, &costs, &mut log).unwrap();
    println!("\ndistance (iterative): {d}");
    if !log.is_empty() {
        println!("skipped {} non-base symbol(s)", log.total());
    }

    // 4. 其余三个引擎给出相同结果，只是访存顺序不同
    let memo = dist::distance_memoized(seq_a, seq_b, &costs).unwrap();
    let blocked = dist::distance_blocked(seq_a, seq_b, &costs, dist::DEFAULT_TILE).unwrap();
    let oblivious = dist::distance_oblivious(seq_a, seq_b, &costs, dist::DEFAULT_THRESHOLD).unwrap();
    println!("memoized:  {memo}");
    println!("blocked:   {blocked}");
    println!("oblivious: {oblivious}");
    assert_eq!(d, memo);
    assert_eq!(d, blocked);
    assert_eq!(d, oblivious);

    // 5. 未知碱基 N 按独立代价计价
    let unknown = dist::distance_iterative(b"NNNN", b"ACGT", &costs).unwrap();
    println!("\nNNNN vs ACGT: {unknown}");

    println!("\n完成！");
}
