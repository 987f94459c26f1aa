//! # Error Types / 错误类型
//!
//! Every stage of the step wraps the failure of its collaborator with a fixed,
//! stage-specific prefix. The first error returned ends the step.
//!
//! 步骤的每个阶段都会使用固定的、特定于阶段的前缀包装其协作者的失败。
//! 返回的第一个错误即结束整个步骤。

use thiserror::Error;

use crate::core::template::TemplateError;

/// The error type produced by collaborators (`glob`, `run_shell`).
/// 协作者（`glob`、`run_shell`）产生的错误类型。
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fatal failure of the newman execution step.
/// newman 执行步骤的致命失败。
#[derive(Debug, Error)]
pub enum NewmanError {
    #[error("error logging node version: {0}")]
    LogNodeVersion(#[source] BoxError),

    #[error("error logging npm version: {0}")]
    LogNpmVersion(#[source] BoxError),

    #[error("error installing newman: {0}")]
    Install(#[source] BoxError),

    #[error("Could not execute global search for '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: BoxError,
    },

    #[error("no collection found with pattern '{pattern}'")]
    NoCollectionFound { pattern: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("The execution of the newman tests failed, see the log for details.: {0}")]
    Execution(#[source] BoxError),
}

/// A shell command that ran but did not succeed.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("running '{script}' with {shell} failed with exit code {code}")]
    ExitCode {
        shell: String,
        script: String,
        code: i32,
    },

    #[error("running '{script}' with {shell} was terminated by a signal")]
    Terminated { shell: String, script: String },
}
