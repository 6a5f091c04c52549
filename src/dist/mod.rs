//! Needleman-Wunsch 加权全局编辑距离。
//!
//! 同一个递推 φ 的四种求值策略，数值结果完全一致，区别只在访存顺序与
//! 缓存失效次数：
//!
//! - [`memo`] — 自顶向下递归 + 完整备忘表，O(M·N) 空间
//! - [`iter`] — 自底向上逐列扫描，O(N) 空间（生产实现）
//! - [`blocked`] — 固定边长分块扫描（cache-aware，需调参）
//! - [`oblivious`] — 递归二分分块（cache-oblivious，无需调参）
//!
//! 递推定义（后缀形式）：φ(i,j) 为把主序列后缀 `primary[i..]` 变换为
//! 副序列后缀 `secondary[j..]` 的最小代价；φ(M,N)=0，非碱基符号零代价
//! 跳过并记入 [`AnomalyLog`]，整体答案为 φ(0,0)。

use anyhow::{anyhow, Result};

use crate::util::dna;

pub mod blocked;
pub mod iter;
pub mod memo;
pub mod oblivious;

pub use blocked::{distance_blocked, distance_blocked_logged};
pub use iter::{distance_iterative, distance_iterative_logged};
pub use memo::{distance_memoized, distance_memoized_logged};
pub use oblivious::{distance_oblivious, distance_oblivious_logged};

/// 分块引擎默认块边长（单位：格）。只影响性能，不影响结果。
pub const DEFAULT_TILE: usize = 128;
/// cache-oblivious 引擎默认递归基例阈值。只影响性能，不影响结果。
pub const DEFAULT_THRESHOLD: usize = 32;

/// 代价模型：三个非负标量，进程级配置而非逐调用参数，但以显式值传入
/// 每次引擎调用（不设全局可变常量）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    /// 两个已知碱基失配的替换代价
    pub substitution: u64,
    /// 任一侧为未知碱基（N）时的替换代价
    pub unknown: u64,
    /// 插入 / 删除（gap）代价
    pub indel: u64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self { substitution: 1, unknown: 2, indel: 2 }
    }
}

/// 方向归一化上下文：primary 指向不短于对方的序列（N ≤ M），
/// 使所有线性空间引擎的工作缓冲按较短序列分配。
/// 每次计算构造一次，只读，结束即弃。
#[derive(Debug, Clone, Copy)]
pub struct Orientation<'a> {
    /// 较长序列，长度 M
    pub primary: &'a [u8],
    /// 较短序列，长度 N（N ≤ M）
    pub secondary: &'a [u8],
}

impl<'a> Orientation<'a> {
    pub fn new(a: &'a [u8], b: &'a [u8]) -> Self {
        if a.len() >= b.len() {
            Self { primary: a, secondary: b }
        } else {
            Self { primary: b, secondary: a }
        }
    }

    #[inline]
    pub fn m(&self) -> usize {
        self.primary.len()
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.secondary.len()
    }
}

/// 非碱基符号记录器（逐次计算私有，诊断用）。
/// 跳过规则不中止计算，这里只统计被跳过的符号。
#[derive(Debug, Clone)]
pub struct AnomalyLog {
    counts: [u64; 256],
}

impl Default for AnomalyLog {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl AnomalyLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record(&mut self, sym: u8) {
        self.counts[sym as usize] += 1;
    }

    pub fn count(&self, sym: u8) -> u64 {
        self.counts[sym as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// 出现过的符号及其计数，按符号值升序。
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// 在 stderr 上输出一行汇总（仅当确有非碱基符号时）。
    pub fn report(&self) {
        if self.is_empty() {
            return;
        }
        let mut items = String::new();
        for (sym, count) in self.symbols() {
            if !items.is_empty() {
                items.push_str(", ");
            }
            items.push('\'');
            for esc in std::ascii::escape_default(sym) {
                items.push(esc as char);
            }
            items.push_str(&format!("' x{count}"));
        }
        eprintln!("skipped {} non-base symbol(s): {}", self.total(), items);
    }
}

/// 对角代价：相同碱基 0；任一侧为未知碱基按 unknown 计
/// （通配判定先于相等判定，N 对 N 也计 unknown）；否则 substitution。
#[inline]
pub(crate) fn pair_cost(costs: &CostModel, x: u8, y: u8) -> u64 {
    if dna::is_unknown_base(x) || dna::is_unknown_base(y) {
        costs.unknown
    } else if dna::is_same_base(x, y) {
        0
    } else {
        costs.substitution
    }
}

/// gap 代价：非碱基符号不计入（跳过规则的基例形式）。
#[inline]
pub(crate) fn gap_cost(costs: &CostModel, c: u8) -> u64 {
    if dna::is_base(c) {
        costs.indel
    } else {
        0
    }
}

#[inline]
pub(crate) fn min3(a: u64, b: u64, c: u64) -> u64 {
    a.min(b).min(c)
}

/// 可失败分配：工作缓冲拿不到内存是致命错误，向调用方返回 Err
/// 而不是 panic（见错误分级：分配失败 / 非碱基符号 / 退化输入）。
pub(crate) fn alloc_filled(len: usize, fill: u64, what: &str) -> Result<Vec<u64>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|e| anyhow!("cannot allocate {what} ({len} cells): {e}"))?;
    v.resize(len, fill);
    Ok(v)
}

/// 基例列 φ(M, ·)：col[N]=0，col[j] = gap(secondary[j]) + col[j+1]。
pub(crate) fn base_column(ori: &Orientation, costs: &CostModel) -> Result<Vec<u64>> {
    let n = ori.n();
    let mut col = alloc_filled(n + 1, 0, "column buffer")?;
    for j in (0..n).rev() {
        col[j] = gap_cost(costs, ori.secondary[j]) + col[j + 1];
    }
    Ok(col)
}

/// 基例行 φ(·, N)：row[M]=0，row[i] = gap(primary[i]) + row[i+1]。
pub(crate) fn base_row(ori: &Orientation, costs: &CostModel) -> Result<Vec<u64>> {
    let m = ori.m();
    let mut row = alloc_filled(m + 1, 0, "row buffer")?;
    for i in (0..m).rev() {
        row[i] = gap_cost(costs, ori.primary[i]) + row[i + 1];
    }
    Ok(row)
}

/// 两个分块引擎共用的矩形扫描核：对列区间 `cols`（主序列位置）与行区间
/// `[r_lo, r_hi]`（副序列位置）做右到左、下到上的线性扫描。
///
/// 进入时必须成立的不变量（块边界记账全部由它导出）：
/// - `col_buf[j]`（j 在行区间内）持有右邻列的终值 φ(cols.end, j)；
/// - 若 r_hi < N，`row_buf[c - buf_base]` 持有下邻行的终值 φ(c, r_hi+1)，
///   `corner` 持有右下角对角终值 φ(cols.end, r_hi+1)。
///
/// 返回时：`col_buf[j]` 更新为 φ(cols.start, j)；`row_buf[c - buf_base]`
/// 被改写为本块顶行终值 φ(c, r_lo)；返回值为 φ(cols.end, r_lo)，即上邻
/// 块进入时要求的 `corner`。角值走显式入参 / 返回值而不是缓冲槽位：
/// 递归二分会在相邻子树之间交错重访同一列条带，留在缓冲里的角值会被
/// 中途的发布覆盖。
///
/// `buf_base` 是 row_buf 下标的平移量：blocked 引擎按块内相对下标复用
/// 小缓冲（buf_base = cols.start），oblivious 引擎用全长缓冲按绝对下标
/// 访问（buf_base = 0）。
pub(crate) fn scan_rect(
    ori: &Orientation,
    costs: &CostModel,
    log: &mut AnomalyLog,
    cols: std::ops::Range<usize>,
    r_lo: usize,
    r_hi: usize,
    col_buf: &mut [u64],
    row_buf: &mut [u64],
    buf_base: usize,
    corner: u64,
) -> u64 {
    let n = ori.n();
    // prev_k：发布顶行值时被挤出的旧 row_buf 值，即左邻列下边沿的对角依赖
    let mut prev_k = 0u64;
    let mut out = 0u64;
    for c in cols.clone().rev() {
        let xi = ori.primary[c];
        let slot = c - buf_base;
        // prev：列内扫描携带的对角前驱 φ(c+1, j+1)
        let mut prev = 0u64;
        for j in (r_lo..=r_hi).rev() {
            if j == n {
                // 基例行，只出现在含 N 行的底部块
                prev = col_buf[j];
                col_buf[j] = gap_cost(costs, xi) + col_buf[j];
            } else if !dna::is_base(xi) {
                // 整列跳过：φ(c,j) = φ(c+1,j)，缓冲原值即答案
                prev = col_buf[j];
                log.record(xi);
            } else if !dna::is_base(ori.secondary[j]) {
                prev = col_buf[j];
                col_buf[j] = if j == r_hi { row_buf[slot] } else { col_buf[j + 1] };
                log.record(ori.secondary[j]);
            } else {
                let yj = ori.secondary[j];
                let (diag_src, down_src) = if j == r_hi {
                    // 块下边沿：依赖在行边界缓冲与角值里
                    let d = if c + 1 == cols.end { corner } else { prev_k };
                    (d, row_buf[slot])
                } else {
                    (prev, col_buf[j + 1])
                };
                let diag = pair_cost(costs, xi, yj) + diag_src;
                let down = costs.indel + down_src;
                let right = costs.indel + col_buf[j];
                prev = col_buf[j];
                col_buf[j] = min3(diag, down, right);
            }
        }
        // 发布本列顶行终值给上邻块；被挤出的旧值作为左邻列的对角依赖
        prev_k = row_buf[slot];
        row_buf[slot] = col_buf[r_lo];
        if c + 1 == cols.end {
            out = prev;
        }
    }
    out
}
