//! # Reporting Module / 报告模块
//!
//! This module handles the console output of a step: the configuration
//! banner printed before the run and the final outcome line.
//! Report files are produced by newman itself.
//!
//! 此模块处理步骤的控制台输出：运行前打印的配置横幅以及最终结果行。
//! 报告文件由 newman 自身生成。

pub mod console;

// Re-export common reporting functions
pub use console::{print_outcome, print_step_header};
