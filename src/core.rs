//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Newman Runner:
//! the step configuration, display-name derivation, command templates
//! and the execution state machine.
//!
//! 此模块包含 Newman Runner 的核心功能：
//! 步骤配置、显示名称推导、命令模板以及执行状态机。

pub mod config;
pub mod display_name;
pub mod error;
pub mod execution;
pub mod template;

// Re-exports
pub use config::StepConfig;
pub use error::NewmanError;
pub use execution::{run_newman_execute, NewmanUtils};
