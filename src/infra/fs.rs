//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system helpers of Newman Runner:
//! collection discovery by glob pattern and writing configuration files.
//!
//! 此模块提供 Newman Runner 的文件系统辅助功能：
//! 按 glob 模式发现集合以及写入配置文件。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::error::BoxError;

/// The result of a glob search.
#[derive(Debug, Default)]
pub struct GlobMatches {
    /// Matching paths, in the order the glob yields them.
    pub paths: Vec<String>,
    /// Entries that could not be read during the walk, e.g. a directory
    /// without read permission. They do not end the search.
    pub skipped: Vec<glob::GlobError>,
}

/// Returns every path matching `pattern`, in the order the glob yields them
/// (alphabetical within each directory).
///
/// # Arguments
/// * `pattern` - A glob pattern such as `**/*.postman_collection.json`
///
/// # Returns
/// The matching paths plus the unreadable entries that were skipped.
/// Only an invalid pattern is an error.
///
/// 返回所有匹配 `pattern` 的路径，顺序与 glob 产出的顺序一致（每个目录内按字母排序）。
/// 无法读取的条目会被跳过并记录；只有无效的模式才会返回错误。
pub fn glob_paths(pattern: &str) -> Result<GlobMatches, BoxError> {
    let mut matches = GlobMatches::default();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) => matches.paths.push(path.to_string_lossy().into_owned()),
            Err(e) => matches.skipped.push(e),
        }
    }
    Ok(matches)
}

/// Writes `content` to `path`, creating missing parent directories.
///
/// 将 `content` 写入 `path`，并创建缺失的父目录。
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
