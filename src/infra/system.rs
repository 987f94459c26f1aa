//! # System Collaborator / 系统协作者
//!
//! The [`NewmanUtils`] implementation used outside of tests: globbing on the
//! real file system and running commands through a real shell.
//!
//! 测试之外使用的 [`NewmanUtils`] 实现：在真实文件系统上执行 glob，
//! 并通过真实的 shell 运行命令。

use colored::*;

use crate::{
    core::{
        error::{BoxError, ShellError},
        execution::NewmanUtils,
    },
    infra::{command, fs, t},
};

/// Runs the step against the local machine.
///
/// Environment variables set through [`NewmanUtils::set_env`] stay in effect
/// for every later shell call; setting a key again replaces its value.
///
/// 针对本地机器运行步骤。通过 `set_env` 设置的环境变量对之后的每次 shell 调用都有效；
/// 再次设置同一个键会替换其值。
#[derive(Debug, Default)]
pub struct SystemUtils {
    env: Vec<(String, String)>,
    verbose: bool,
}

impl SystemUtils {
    pub fn new(verbose: bool) -> Self {
        Self {
            env: Vec::new(),
            verbose,
        }
    }

    /// The environment overrides currently applied to shell calls.
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }
}

impl NewmanUtils for SystemUtils {
    fn glob(&self, pattern: &str) -> Result<Vec<String>, BoxError> {
        let matches = fs::glob_paths(pattern)?;
        if self.verbose {
            for skipped in &matches.skipped {
                println!(
                    "{}",
                    t!(
                        "run.glob_skipped",
                        path = skipped.path().display(),
                        error = skipped.error()
                    )
                    .yellow()
                );
            }
        }
        Ok(matches.paths)
    }

    async fn run_shell(&mut self, shell: &str, script: &str) -> Result<(), BoxError> {
        let cmd = command::shell_command(
            shell,
            script,
            self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        let status = command::spawn_and_stream(cmd).await?;

        if status.success() {
            return Ok(());
        }
        let err = match status.code() {
            Some(code) => ShellError::ExitCode {
                shell: shell.to_string(),
                script: script.to_string(),
                code,
            },
            None => ShellError::Terminated {
                shell: shell.to_string(),
                script: script.to_string(),
            },
        };
        Err(err.into())
    }

    fn set_env(&mut self, env: &[String]) {
        for entry in env {
            let Some((key, value)) = entry.split_once('=') else {
                println!("{}", t!("run.invalid_env", entry = entry).yellow());
                continue;
            };
            // Values reach the child verbatim, so `~` is expanded here.
            let value = shellexpand::tilde(value).into_owned();
            if self.verbose {
                println!(
                    "{}",
                    t!("run.env_override", key = key, value = &value).dimmed()
                );
            }
            match self.env.iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value,
                None => self.env.push((key.to_string(), value)),
            }
        }
    }
}
