//! # nw-rust
//!
//! 基于 Needleman-Wunsch 递推的加权全局编辑距离计算器，面向 FASTA 风格
//! 的基因序列，提供四种访存特性不同、数值结果完全一致的计算引擎：
//!
//! - **备忘递归**：自顶向下 + 完整备忘表（O(M·N) 空间）
//! - **线性空间迭代**：自底向上逐列扫描，只留一条列缓冲（生产实现）
//! - **cache-aware 分块**：固定边长方块 + 小边界缓冲，面向指定缓存级调参
//! - **cache-oblivious 递归**：长轴二分到阈值，无需任何缓存参数
//!
//! 代价模型（替换 / 未知碱基替换 / 插入删除）是显式传入的配置值；
//! 输入流里混入的非碱基符号（换行、表头残片等）按零代价跳过并记入
//! 诊断日志，从不中止计算。
//!
//! ## 快速示例
//!
//! ```rust
//! use nw_rust::dist::{self, CostModel};
//!
//! let costs = CostModel::default();
//! let d = dist::distance_iterative(b"ACGT", b"AGCT", &costs).unwrap();
//! assert_eq!(d, 2);
//!
//! // 四个引擎对同一输入给出同一结果
//! assert_eq!(d, dist::distance_memoized(b"ACGT", b"AGCT", &costs).unwrap());
//! assert_eq!(d, dist::distance_blocked(b"ACGT", b"AGCT", &costs, 128).unwrap());
//! assert_eq!(d, dist::distance_oblivious(b"ACGT", b"AGCT", &costs, 32).unwrap());
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — FASTA 解析（清洗 / 保留原始噪声两种模式）
//! - [`dist`] — 距离引擎与共享的代价模型 / 方向归一化 / 异常日志
//! - [`util`] — 碱基符号分类（is_base / is_unknown_base / is_same_base）

pub mod dist;
pub mod io;
pub mod util;
