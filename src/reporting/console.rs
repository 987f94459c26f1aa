//! # Console Reporting Module / 控制台报告模块
//!
//! Colorful, localized console output around a newman step.
//!
//! 围绕 newman 步骤的彩色、本地化控制台输出。

use colored::*;

use crate::core::{config::StepConfig, error::NewmanError};
use crate::infra::t;

/// Prints the settings the step is about to run with.
///
/// # Output Format / 输出格式
/// ```text
/// --- Newman Step ---
///   - Collections     | **/*.postman_collection.json
///   - Environment     | env.json
///   - Globals         | (none)
///   - Fail on error   | true
/// ```
///
/// 打印步骤即将使用的设置。
pub fn print_step_header(config: &StepConfig) {
    let none = t!("summary.none").to_string();
    let or_none = |value: &str| {
        if value.is_empty() {
            none.clone()
        } else {
            value.to_string()
        }
    };

    println!("\n{}", t!("summary.banner").bold());
    let rows = [
        (t!("summary.collections"), config.newman_collection.clone()),
        (t!("summary.environment"), or_none(&config.newman_environment)),
        (t!("summary.globals"), or_none(&config.newman_globals)),
        (t!("summary.fail_on_error"), config.fail_on_error.to_string()),
    ];
    for (label, value) in rows {
        println!("  - {:<16} | {}", label, value.cyan());
    }
}

/// Prints the final outcome of the step.
///
/// 打印步骤的最终结果。
pub fn print_outcome(result: &Result<(), NewmanError>, fail_on_error: bool) {
    match result {
        Ok(()) if fail_on_error => {
            println!("\n{}", t!("summary.step_passed").green().bold());
        }
        Ok(()) => {
            println!("\n{}", t!("summary.step_completed").green().bold());
            println!("{}", t!("summary.check_reports").yellow());
        }
        Err(_) => {
            println!("\n{}", t!("summary.step_failed").red().bold());
        }
    }
}
