//! # Infrastructure Module / 基础设施模块
//!
//! This module provides the concrete bindings the core runs against:
//! shell command execution, glob search and the system collaborator
//! combining them.
//!
//! 此模块提供核心所依赖的具体绑定：
//! shell 命令执行、glob 搜索以及组合它们的系统协作者。

pub mod command;
pub mod fs;
pub mod system;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
