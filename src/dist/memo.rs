//! 自顶向下递归 + 备忘的引擎：完整 (M+1)×(N+1) 备忘表，每格最多求值一次。
//! O(M·N) 时间与空间；存在意义是作为递推定义的直译对照，空间上不经济。

use anyhow::{anyhow, Result};

use super::{gap_cost, min3, pair_cost, AnomalyLog, CostModel, Orientation};
use crate::util::dna;

/// 备忘表哨兵：尚未计算。距离有 indel × max(M,N) 的上界，取不到该值。
const NOT_COMPUTED: u64 = u64::MAX;

struct MemoContext<'a> {
    ori: Orientation<'a>,
    /// 行优先展平的 (M+1)×(N+1) 表
    table: Vec<u64>,
    width: usize,
}

impl MemoContext<'_> {
    /// 递归求 φ(i,j)，命中备忘则直接返回。递归深度 O(M+N)。
    fn phi(&mut self, costs: &CostModel, log: &mut AnomalyLog, i: usize, j: usize) -> u64 {
        let idx = i * self.width + j;
        if self.table[idx] != NOT_COMPUTED {
            return self.table[idx];
        }
        let (m, n) = (self.ori.m(), self.ori.n());
        let res = if i == m {
            if j == n {
                0
            } else {
                gap_cost(costs, self.ori.secondary[j]) + self.phi(costs, log, i, j + 1)
            }
        } else if j == n {
            gap_cost(costs, self.ori.primary[i]) + self.phi(costs, log, i + 1, j)
        } else if !dna::is_base(self.ori.primary[i]) {
            log.record(self.ori.primary[i]);
            self.phi(costs, log, i + 1, j)
        } else if !dna::is_base(self.ori.secondary[j]) {
            log.record(self.ori.secondary[j]);
            self.phi(costs, log, i, j + 1)
        } else {
            let diag = pair_cost(costs, self.ori.primary[i], self.ori.secondary[j])
                + self.phi(costs, log, i + 1, j + 1);
            let down = costs.indel + self.phi(costs, log, i + 1, j);
            let right = costs.indel + self.phi(costs, log, i, j + 1);
            min3(diag, down, right)
        };
        self.table[idx] = res;
        res
    }
}

/// O(M·N) 空间的备忘递归求距离。备忘表分配失败返回 Err。
pub fn distance_memoized(a: &[u8], b: &[u8], costs: &CostModel) -> Result<u64> {
    let mut log = AnomalyLog::new();
    let res = distance_memoized_logged(a, b, costs, &mut log);
    log.report();
    res
}

/// 同 [`distance_memoized`]，非碱基符号记入调用方提供的 `log`。
pub fn distance_memoized_logged(
    a: &[u8],
    b: &[u8],
    costs: &CostModel,
    log: &mut AnomalyLog,
) -> Result<u64> {
    let ori = Orientation::new(a, b);
    let width = ori.n() + 1;
    let cells = (ori.m() + 1)
        .checked_mul(width)
        .ok_or_else(|| anyhow!("memo table dimensions overflow"))?;
    let table = super::alloc_filled(cells, NOT_COMPUTED, "memo table")?;
    let mut ctx = MemoContext { ori, table, width };
    Ok(ctx.phi(costs, log, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sequences() {
        let d = distance_memoized(b"ACGTACGT", b"ACGTACGT", &CostModel::default()).unwrap();
        assert_eq!(d, 0);
    }

    #[test]
    fn substitution_and_gap_mix() {
        let costs = CostModel::default();
        assert_eq!(distance_memoized(b"ACGT", b"ACTT", &costs).unwrap(), 1);
        assert_eq!(distance_memoized(b"ACGT", b"ACG", &costs).unwrap(), costs.indel);
    }

    #[test]
    fn empty_inputs() {
        let costs = CostModel::default();
        assert_eq!(distance_memoized(b"", b"", &costs).unwrap(), 0);
        assert_eq!(distance_memoized(b"AC", b"", &costs).unwrap(), 2 * costs.indel);
    }

    #[test]
    fn each_cell_computed_once_result_stable() {
        // 两次调用各自独立分配备忘表，结果必须一致
        let costs = CostModel::default();
        let d1 = distance_memoized(b"ACGTN\nACG", b"TGCA", &costs).unwrap();
        let d2 = distance_memoized(b"ACGTN\nACG", b"TGCA", &costs).unwrap();
        assert_eq!(d1, d2);
    }
}
