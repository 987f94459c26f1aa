//! # Commands Module / 命令模块
//!
//! The subcommands of the Newman Runner CLI.
//!
//! Newman Runner CLI 的子命令。

pub mod init;
pub mod run;
