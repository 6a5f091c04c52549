//! cache-oblivious 递归引擎：对当前矩形在较长的那条轴上二分，远离原点
//! 的一半先解，直到两边都不超过 `threshold` 再退回逐格扫描。
//!
//! 不携带任何绑定具体缓存容量的常数——二分天然在每个尺度上产生局部性，
//! 这正是它相对固定分块引擎要演示的性质。递归深度 O(log(M+N))，
//! 任何格子都不会被重算。

use anyhow::{ensure, Result};

use super::{base_column, base_row, scan_rect, AnomalyLog, CostModel, Orientation};

/// 递归二分求距离。`threshold` ≥ 1 为基例边长上限，只影响性能。
/// 错误路径：`threshold` 为 0，或工作缓冲分配失败。
pub fn distance_oblivious(a: &[u8], b: &[u8], costs: &CostModel, threshold: usize) -> Result<u64> {
    let mut log = AnomalyLog::new();
    let res = distance_oblivious_logged(a, b, costs, threshold, &mut log);
    log.report();
    res
}

/// 同 [`distance_oblivious`]，非碱基符号记入调用方提供的 `log`。
pub fn distance_oblivious_logged(
    a: &[u8],
    b: &[u8],
    costs: &CostModel,
    threshold: usize,
    log: &mut AnomalyLog,
) -> Result<u64> {
    ensure!(threshold >= 1, "base-case threshold must be at least 1");
    let ori = Orientation::new(a, b);
    let (m, n) = (ori.m(), ori.n());

    // 两条全长边界缓冲：列缓冲持 φ(M,·)，行缓冲持 φ(·,N)
    let mut col_buf = base_column(&ori, costs)?;
    if m == 0 {
        return Ok(col_buf[0]);
    }
    let mut row_buf = base_row(&ori, costs)?;

    solve(&ori, costs, log, threshold, 0, m - 1, 0, n, &mut col_buf, &mut row_buf, 0);

    Ok(col_buf[0])
}

/// 解矩形 [x0,x1]×[y0,y1]（含端点，列为主序列位置、行为副序列位置）。
/// 进出时的缓冲与角值（corner = φ(x1+1, y1+1)）不变量与 [`scan_rect`]
/// 相同，返回 φ(x1+1, y0)；二分只负责把矩形按正确的依赖次序喂给基例
/// 扫描，并在子块之间传递角值：
/// - 横切（列轴较长）：左半块的角值是进入时列 mid+1 的行边界值，必须
///   在右半块改写它之前取出；
/// - 纵切（行轴较长）：上半块的角值正是下半块的返回值。
fn solve(
    ori: &Orientation,
    costs: &CostModel,
    log: &mut AnomalyLog,
    threshold: usize,
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
    col_buf: &mut [u64],
    row_buf: &mut [u64],
    corner: u64,
) -> u64 {
    let x_len = x1 - x0 + 1;
    let y_len = y1 - y0 + 1;
    if x_len <= threshold && y_len <= threshold {
        scan_rect(ori, costs, log, x0..x1 + 1, y0, y1, col_buf, row_buf, 0, corner)
    } else if x_len >= y_len {
        let mid = x0 + (x1 - x0) / 2;
        let corner_left = row_buf[mid + 1];
        let out = solve(ori, costs, log, threshold, mid + 1, x1, y0, y1, col_buf, row_buf, corner);
        solve(ori, costs, log, threshold, x0, mid, y0, y1, col_buf, row_buf, corner_left);
        out
    } else {
        let mid = y0 + (y1 - y0) / 2;
        let lower = solve(ori, costs, log, threshold, x0, x1, mid + 1, y1, col_buf, row_buf, corner);
        solve(ori, costs, log, threshold, x0, x1, y0, mid, col_buf, row_buf, lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::distance_iterative;

    #[test]
    fn matches_linear_scan_across_split_seams() {
        let costs = CostModel::default();
        let a = b"ACGTACGTACGTACGTACGTACGTACG";
        let b = b"ACGTTCGAACGTACGTTAG";
        let reference = distance_iterative(a, b, &costs).unwrap();
        for threshold in [1, 2, 3, 4, 7, 13, 27, 100] {
            assert_eq!(
                distance_oblivious(a, b, &costs, threshold).unwrap(),
                reference,
                "threshold={threshold}"
            );
        }
    }

    #[test]
    fn noisy_input_at_split_boundary() {
        let costs = CostModel::default();
        let a = b"ACGT\n\nACGTACG";
        let b = b"ACGTACGTACG";
        let reference = distance_iterative(a, b, &costs).unwrap();
        assert_eq!(reference, 0);
        for threshold in 1..=13 {
            assert_eq!(
                distance_oblivious(a, b, &costs, threshold).unwrap(),
                reference,
                "threshold={threshold}"
            );
        }
    }

    #[test]
    fn skewed_rectangles_split_on_longer_axis() {
        // 一边远长于另一边时，二分先削长轴；结果仍与参考一致
        let costs = CostModel::default();
        let a = b"ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGT";
        let b = b"AGT";
        assert_eq!(
            distance_oblivious(a, b, &costs, 2).unwrap(),
            distance_iterative(a, b, &costs).unwrap()
        );
    }

    #[test]
    fn degenerate_inputs() {
        let costs = CostModel::default();
        assert_eq!(distance_oblivious(b"", b"", &costs, 8).unwrap(), 0);
        assert_eq!(distance_oblivious(b"", b"ACGT", &costs, 8).unwrap(), 4 * costs.indel);
        assert_eq!(distance_oblivious(b"A", b"A", &costs, 1).unwrap(), 0);
    }

    #[test]
    fn zero_threshold_is_an_error() {
        assert!(distance_oblivious(b"AC", b"AC", &CostModel::default(), 0).is_err());
    }
}
