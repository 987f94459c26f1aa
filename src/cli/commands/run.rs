//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command for the Newman Runner CLI,
//! which executes the newman step according to the step configuration.
//!
//! 此模块实现了 Newman Runner CLI 的 `run` 命令，
//! 根据步骤配置执行 newman 步骤。

use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};

use crate::{
    core::{
        config::{ConfigOverrides, StepConfig, DEFAULT_CONFIG_FILE},
        execution::run_newman_execute,
    },
    infra::{system::SystemUtils, t},
    reporting::console::{print_outcome, print_step_header},
};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `config` - Path to the step configuration file. When absent,
///   `newman.toml` is used if it exists, otherwise the defaults.
/// * `overrides` - Values given on the command line
/// * `language` - The language requested with `--lang`, which wins over the
///   configured one
///
/// # Returns
/// A Result indicating success or failure of the step
pub async fn execute(
    config: Option<PathBuf>,
    overrides: ConfigOverrides,
    language: Option<String>,
) -> Result<()> {
    let mut step_config = load_config(config.as_deref())?;
    step_config.apply_overrides(overrides);
    if language.is_none() {
        rust_i18n::set_locale(&step_config.language);
    }
    step_config.validate()?;

    print_step_header(&step_config);

    let mut utils = SystemUtils::new(step_config.verbose);
    let result = run_newman_execute(&step_config, &mut utils).await;
    print_outcome(&result, step_config.fail_on_error);

    Ok(result?)
}

fn load_config(path: Option<&Path>) -> Result<StepConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                println!("{}", t!("run.using_defaults", path = DEFAULT_CONFIG_FILE).cyan());
                return Ok(StepConfig::default());
            }
            default_path
        }
    };

    println!(
        "{}",
        t!("run.loading_config", path = path.display()).cyan()
    );
    Ok(StepConfig::load(path)?)
}
