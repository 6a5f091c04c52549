//! 自底向上、线性空间的迭代引擎：从 (M,N) 反向逐列扫描到 (0,0)，
//! 只保留一条长度 N+1 的列缓冲。生产用实现，其余引擎以它为对照。

use anyhow::Result;

use super::{base_column, gap_cost, min3, pair_cost, AnomalyLog, CostModel, Orientation};
use crate::util::dna;

/// O(M·N) 时间、O(N) 空间计算两条序列的加权编辑距离。
/// 唯一的错误路径是列缓冲分配失败。
pub fn distance_iterative(a: &[u8], b: &[u8], costs: &CostModel) -> Result<u64> {
    let mut log = AnomalyLog::new();
    let res = distance_iterative_logged(a, b, costs, &mut log);
    log.report();
    res
}

/// 同 [`distance_iterative`]，非碱基符号记入调用方提供的 `log`。
pub fn distance_iterative_logged(
    a: &[u8],
    b: &[u8],
    costs: &CostModel,
    log: &mut AnomalyLog,
) -> Result<u64> {
    let ori = Orientation::new(a, b);
    let (m, n) = (ori.m(), ori.n());

    // col[j] = φ(当前列+1, j)，初始为基例列 φ(M, ·)
    let mut col = base_column(&ori, costs)?;

    for i in (0..m).rev() {
        let xi = ori.primary[i];
        // 对角前驱 φ(i+1, j+1)，显式局部量而非隐藏状态
        let mut prev = 0u64;
        for j in (0..=n).rev() {
            if j == n {
                prev = col[j];
                col[j] = gap_cost(costs, xi) + col[j];
            } else if !dna::is_base(xi) {
                // φ(i,j) = φ(i+1,j)：原值即答案，只推进对角前驱
                prev = col[j];
                log.record(xi);
            } else if !dna::is_base(ori.secondary[j]) {
                prev = col[j];
                col[j] = col[j + 1];
                log.record(ori.secondary[j]);
            } else {
                let diag = pair_cost(costs, xi, ori.secondary[j]) + prev;
                let down = costs.indel + col[j + 1];
                let right = costs.indel + col[j];
                prev = col[j];
                col[j] = min3(diag, down, right);
            }
        }
    }

    Ok(col[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sequences() {
        let d = distance_iterative(b"ACGTACGT", b"ACGTACGT", &CostModel::default()).unwrap();
        assert_eq!(d, 0);
    }

    #[test]
    fn single_substitution() {
        let d = distance_iterative(b"ACGT", b"ACTT", &CostModel::default()).unwrap();
        assert_eq!(d, 1);
    }

    #[test]
    fn single_gap() {
        // 多出一个碱基：一次插入
        let d = distance_iterative(b"ACGGT", b"ACGT", &CostModel::default()).unwrap();
        assert_eq!(d, 2);
    }

    #[test]
    fn case_and_uracil_fold() {
        let d = distance_iterative(b"acgu", b"ACGT", &CostModel::default()).unwrap();
        assert_eq!(d, 0);
    }

    #[test]
    fn empty_vs_nonempty() {
        let costs = CostModel::default();
        assert_eq!(distance_iterative(b"", b"ACG", &costs).unwrap(), 3 * costs.indel);
        assert_eq!(distance_iterative(b"", b"", &costs).unwrap(), 0);
    }

    #[test]
    fn noise_only_sequence_is_free() {
        // 全部为非碱基符号的一侧等价于空序列
        let d = distance_iterative(b"\n\r\n", b"", &CostModel::default()).unwrap();
        assert_eq!(d, 0);
        let d = distance_iterative(b"\nACG\n", b"ACG", &CostModel::default()).unwrap();
        assert_eq!(d, 0);
    }
}
