//! # Newman Execution Engine / Newman 执行引擎
//!
//! This module drives one newman step from start to finish: it logs the
//! toolchain versions, installs newman, discovers the collections and runs
//! one rendered command per collection. Everything that touches the outside
//! world goes through the [`NewmanUtils`] collaborator.
//!
//! 此模块从头到尾驱动一个 newman 步骤：记录工具链版本、安装 newman、
//! 发现集合，并为每个集合运行一条渲染后的命令。
//! 所有与外部世界的交互都通过 [`NewmanUtils`] 协作者完成。

use colored::*;

use crate::{
    core::{
        config::StepConfig,
        display_name::collection_display_name,
        error::{BoxError, NewmanError},
        template::resolve_template,
    },
    infra::t,
};

/// The shell every command is run with.
pub const SHELL: &str = "/bin/sh";
pub const NODE_VERSION_COMMAND: &str = "node --version";
pub const NPM_VERSION_COMMAND: &str = "npm --version";
/// Pins the npm prefix while the node version is logged.
pub const NPM_PREFIX_ENV: &str = "NPM_CONFIG_PREFIX=~/.npm-global";
/// Keeps newman from signalling failed tests through its exit code.
pub const SUPPRESS_EXIT_CODE_FLAG: &str = "--suppress-exit-code";

/// The capabilities the step needs from its environment.
///
/// The real implementation lives in [`crate::infra::system`]; tests inject a
/// scripted double that records every call.
///
/// 步骤所需的环境能力。真实实现位于 [`crate::infra::system`]；
/// 测试中注入一个记录每次调用的脚本化替身。
#[allow(async_fn_in_trait)]
pub trait NewmanUtils {
    /// Returns the paths matching `pattern`, in the order they should run.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, BoxError>;

    /// Runs `script` with `shell` and waits for it. A non-zero exit is an error.
    async fn run_shell(&mut self, shell: &str, script: &str) -> Result<(), BoxError>;

    /// Sets `KEY=VALUE` environment variables for the following shell calls.
    fn set_env(&mut self, env: &[String]);
}

/// Logs the node and npm versions, in that order.
///
/// # Errors
/// `LogNodeVersion` or `LogNpmVersion`, depending on which command failed.
///
/// 依次记录 node 和 npm 的版本。
pub async fn log_versions<U: NewmanUtils>(utils: &mut U) -> Result<(), NewmanError> {
    utils.set_env(&[NPM_PREFIX_ENV.to_string()]);
    utils
        .run_shell(SHELL, NODE_VERSION_COMMAND)
        .await
        .map_err(NewmanError::LogNodeVersion)?;

    utils
        .run_shell(SHELL, NPM_VERSION_COMMAND)
        .await
        .map_err(NewmanError::LogNpmVersion)?;

    Ok(())
}

/// Runs the install command verbatim, after applying `env_override` if it is
/// not empty. Installation is unconditional.
///
/// 在应用 `env_override`（如果非空）后原样运行安装命令。安装总是会执行。
pub async fn install_newman<U: NewmanUtils>(
    utils: &mut U,
    install_command: &str,
    env_override: &str,
) -> Result<(), NewmanError> {
    if !env_override.is_empty() {
        utils.set_env(&[env_override.to_string()]);
    }
    utils
        .run_shell(SHELL, install_command)
        .await
        .map_err(NewmanError::Install)
}

/// Finds the collections matching `pattern`.
///
/// A broken search and an empty match are two different errors.
pub fn discover_collections<U: NewmanUtils>(
    utils: &U,
    pattern: &str,
) -> Result<Vec<String>, NewmanError> {
    let collections = utils.glob(pattern).map_err(|source| NewmanError::Glob {
        pattern: pattern.to_string(),
        source,
    })?;

    if collections.is_empty() {
        return Err(NewmanError::NoCollectionFound {
            pattern: pattern.to_string(),
        });
    }
    Ok(collections)
}

/// Turns a rendered template into the shell command for one collection.
///
/// Without `failOnError` the suppress flag is appended, so failing tests
/// only show up in the reports.
///
/// 将渲染后的模板转换为一个集合的 shell 命令。
pub fn build_run_command(config: &StepConfig, rendered: &str) -> String {
    let mut command = format!("{} {}", config.newman_executable, rendered);
    if !config.fail_on_error {
        command.push(' ');
        command.push_str(SUPPRESS_EXIT_CODE_FLAG);
    }
    command
}

async fn run_collection<U: NewmanUtils>(
    config: &StepConfig,
    utils: &mut U,
    collection: &str,
) -> Result<(), NewmanError> {
    let display_name = collection_display_name(collection);
    let rendered = resolve_template(config, collection, &display_name)?;
    let command = build_run_command(config, &rendered);

    if config.verbose {
        println!(
            "{}",
            t!("run.resolved_command", command = &command).dimmed()
        );
    }

    utils
        .run_shell(SHELL, &command)
        .await
        .map_err(NewmanError::Execution)
}

/// The stages of a newman step.
///
/// Errors never leave a stage half-done: a failed transition moves the
/// machine to `Failed` and the error is returned to the caller.
///
/// newman 步骤的各个阶段。失败的转换会使状态机进入 `Failed`，并将错误返回给调用者。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionState {
    Init,
    VersionsLogged,
    Installed,
    /// The glob returned at least one collection.
    Discovering { collections: Vec<String> },
    /// `index` is the next collection to run.
    PerCollection {
        collections: Vec<String>,
        index: usize,
    },
    Done,
    Failed,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionState::Done | ExecutionState::Failed)
    }
}

/// A single newman step run against a configuration and a collaborator.
///
/// 针对一个配置和一个协作者运行的单个 newman 步骤。
pub struct NewmanExecution<'a, U: NewmanUtils> {
    config: &'a StepConfig,
    utils: &'a mut U,
    state: ExecutionState,
}

impl<'a, U: NewmanUtils> NewmanExecution<'a, U> {
    pub fn new(config: &'a StepConfig, utils: &'a mut U) -> Self {
        Self {
            config,
            utils,
            state: ExecutionState::Init,
        }
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Performs one transition. Terminal states are left unchanged.
    ///
    /// 执行一次状态转换。终止状态保持不变。
    pub async fn advance(&mut self) -> Result<(), NewmanError> {
        let state = std::mem::replace(&mut self.state, ExecutionState::Failed);

        let next = match state {
            ExecutionState::Init => {
                println!("{}", t!("run.logging_versions").blue());
                log_versions(&mut *self.utils).await?;
                ExecutionState::VersionsLogged
            }
            ExecutionState::VersionsLogged => {
                println!(
                    "{}",
                    t!("run.installing", command = &self.config.newman_install_command).blue()
                );
                install_newman(
                    &mut *self.utils,
                    &self.config.newman_install_command,
                    &self.config.npm_install_env,
                )
                .await?;
                ExecutionState::Installed
            }
            ExecutionState::Installed => {
                let collections =
                    discover_collections(&*self.utils, &self.config.newman_collection)?;
                println!(
                    "{}",
                    t!(
                        "run.collections_found",
                        count = collections.len(),
                        pattern = &self.config.newman_collection
                    )
                    .cyan()
                );
                ExecutionState::Discovering { collections }
            }
            ExecutionState::Discovering { collections } => ExecutionState::PerCollection {
                collections,
                index: 0,
            },
            ExecutionState::PerCollection { collections, index } => {
                let Some(collection) = collections.get(index).cloned() else {
                    self.state = ExecutionState::Done;
                    return Ok(());
                };
                println!(
                    "{}",
                    t!(
                        "run.running_collection",
                        current = index + 1,
                        total = collections.len(),
                        name = collection.yellow()
                    )
                    .blue()
                );
                run_collection(self.config, &mut *self.utils, &collection).await?;
                if index + 1 < collections.len() {
                    ExecutionState::PerCollection {
                        collections,
                        index: index + 1,
                    }
                } else {
                    ExecutionState::Done
                }
            }
            terminal @ (ExecutionState::Done | ExecutionState::Failed) => terminal,
        };

        self.state = next;
        Ok(())
    }

    /// Advances until the step is done or a transition fails.
    ///
    /// 持续推进，直到步骤完成或某次转换失败。
    pub async fn run(&mut self) -> Result<(), NewmanError> {
        while !self.state.is_terminal() {
            self.advance().await?;
        }
        Ok(())
    }
}

/// Runs the whole newman step: versions, install, discovery, then every
/// collection in discovery order. The first error ends the step.
///
/// 运行整个 newman 步骤：版本、安装、发现，然后按发现顺序运行每个集合。
/// 第一个错误即结束步骤。
pub async fn run_newman_execute<U: NewmanUtils>(
    config: &StepConfig,
    utils: &mut U,
) -> Result<(), NewmanError> {
    NewmanExecution::new(config, utils).run().await
}
