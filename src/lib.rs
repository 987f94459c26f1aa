//! # Newman Runner Library / Newman Runner 库
//!
//! This library provides the core functionality for the Newman Runner tool,
//! a configuration-driven pipeline step that installs newman and runs every
//! Postman collection matched by a glob pattern.
//!
//! 此库为 Newman Runner 工具提供核心功能，
//! 这是一个配置驱动的流水线步骤，用于安装 newman 并运行 glob 模式匹配到的每个 Postman 集合。
//!
//! ## Modules / 模块
//!
//! - `core` - Step configuration, command templates and the execution state machine
//! - `infra` - Infrastructure services like shell execution and glob search
//! - `reporting` - Console output around a step
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 步骤配置、命令模板和执行状态机
//! - `infra` - 基础设施服务，如 shell 执行和 glob 搜索
//! - `reporting` - 步骤相关的控制台输出
//! - `cli` - 命令行接口和命令

pub mod core;
pub mod infra;
pub mod reporting;
pub mod cli;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::template;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    // Detect system locale and set it for i18n.
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
