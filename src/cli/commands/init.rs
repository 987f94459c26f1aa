//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command for the Newman Runner CLI,
//! which creates a new step configuration file.
//!
//! 此模块实现了 Newman Runner CLI 的 `init` 命令，
//! 用于创建新的步骤配置文件。

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::infra::{fs, t};

/// The commented configuration written by `init`. Every value equals the
/// built-in default.
pub const DEFAULT_CONFIG: &str = r#"# Newman Step Configuration / Newman 步骤配置

# Language for console messages / 控制台消息的语言
language = "en"

# Glob pattern of the collections to run / 要运行的集合的 glob 模式
newmanCollection = "**/*.postman_collection.json"

# Environment and globals files, available to the run command template
# 环境文件和全局变量文件，可在运行命令模板中使用
newmanEnvironment = ""
newmanGlobals = ""

# Installs newman before the collections run / 在运行集合之前安装 newman
newmanInstallCommand = "npm install newman --global --quiet"
# Environment override applied to the install command (empty disables it)
# 应用于安装命令的环境变量覆盖（为空则禁用）
npmInstallEnv = "NPM_CONFIG_PREFIX=~/.npm-global"
# The installed newman binary / 已安装的 newman 可执行文件
newmanExecutable = "/home/node/.npm-global/bin/newman"

# Rendered once per collection. Placeholders / 每个集合渲染一次。占位符：
#   {{.NewmanCollection}}       path of the collection / 集合路径
#   {{.CollectionDisplayName}}  report-safe name of the collection / 集合的报告安全名称
#   {{.Config.<Field>}}         any field of this file in PascalCase / 本文件中的任意字段（PascalCase）
newmanRunCommand = "run '{{.NewmanCollection}}' --environment '{{.Config.NewmanEnvironment}}' --globals '{{.Config.NewmanGlobals}}' --reporters junit,html --reporter-junit-export 'target/newman/TEST-{{.CollectionDisplayName}}.xml' --reporter-html-export 'target/newman/TEST-{{.CollectionDisplayName}}.html'"

# Stop at the first failing collection? When false, failures only show up in the reports.
# 是否在第一个失败的集合处停止？为 false 时，失败只体现在报告中。
failOnError = true

# Print resolved commands and environment overrides / 打印解析后的命令和环境变量覆盖
verbose = false
"#;

/// Executes the init command with the provided arguments.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
///
/// # Returns
/// A Result indicating success or failure of the command execution
pub fn execute(output: PathBuf, force: bool) -> Result<()> {
    // Check if file already exists
    if output.exists() && !force {
        println!(
            "{}",
            t!("init.file_exists", path = output.display()).red()
        );
        println!("{}", t!("init.use_force").yellow());
        return Ok(());
    }

    fs::write_file(&output, DEFAULT_CONFIG)?;

    println!(
        "{}",
        t!("init.success", path = output.display()).green()
    );
    println!("{}", t!("init.next_steps"));

    Ok(())
}
