//! # Collection Display Names / 集合显示名称
//!
//! Turns a discovered collection path into the identifier used to name the
//! generated report files and exposed to the command template as
//! `.CollectionDisplayName`.
//!
//! 将发现的集合路径转换为用于命名生成的报告文件的标识符，
//! 并以 `.CollectionDisplayName` 的形式提供给命令模板。

use std::path::MAIN_SEPARATOR;

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Derives the display name of a collection path.
///
/// A single leading separator is dropped, leading dots of the first segment
/// are stripped, the final segment loses everything from its first `.`, and
/// the remaining separators become underscores.
///
/// 去掉一个前导分隔符，去除第一段的前导点，最后一段从第一个 `.` 起的部分被删除，
/// 其余分隔符替换为下划线。
///
/// ```
/// use newman_runner::core::display_name::collection_display_name;
///
/// assert_eq!(collection_display_name("dir1/dir2/fancyFile.txt"), "dir1_dir2_fancyFile");
/// assert_eq!(collection_display_name("."), "");
/// ```
pub fn collection_display_name(path: &str) -> String {
    let path = path.strip_prefix(is_separator).unwrap_or(path);
    let mut segments: Vec<&str> = path.split(is_separator).collect();

    if let Some(first) = segments.first_mut() {
        *first = first.trim_start_matches('.');
    }
    if let Some(last) = segments.last_mut() {
        if let Some(dot) = last.find('.') {
            *last = &last[..dot];
        }
    }

    segments.join("_")
}
