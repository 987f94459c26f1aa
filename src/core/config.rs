//! # Step Configuration / 步骤配置
//!
//! The immutable input of a newman execution step, loaded from a TOML file,
//! completed with defaults and adjusted by command-line overrides.
//!
//! newman 执行步骤的不可变输入，从 TOML 文件加载，
//! 使用默认值补全，并可由命令行参数覆盖。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The default configuration file looked up by `run` and written by `init`.
/// `run` 查找、`init` 写入的默认配置文件。
pub const DEFAULT_CONFIG_FILE: &str = "newman.toml";

pub const DEFAULT_COLLECTION_PATTERN: &str = "**/*.postman_collection.json";
pub const DEFAULT_INSTALL_COMMAND: &str = "npm install newman --global --quiet";
pub const DEFAULT_RUN_COMMAND: &str = "run '{{.NewmanCollection}}' --environment '{{.Config.NewmanEnvironment}}' --globals '{{.Config.NewmanGlobals}}' --reporters junit,html --reporter-junit-export 'target/newman/TEST-{{.CollectionDisplayName}}.xml' --reporter-html-export 'target/newman/TEST-{{.CollectionDisplayName}}.html'";
pub const DEFAULT_NPM_INSTALL_ENV: &str = "NPM_CONFIG_PREFIX=~/.npm-global";
pub const DEFAULT_NEWMAN_EXECUTABLE: &str = "/home/node/.npm-global/bin/newman";

/// Errors raised while loading or validating a [`StepConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("configuration field '{0}' must not be empty")]
    EmptyField(&'static str),
}

/// Describes one run of the newman step.
///
/// Keys in the TOML file use camelCase (`newmanCollection`, `failOnError`, ...).
/// Inside a command template the same fields are reachable in PascalCase
/// through `.Config` (see [`StepConfig::template_field`]).
///
/// 描述 newman 步骤的一次运行。
/// TOML 文件中的键使用 camelCase；在命令模板中可以通过 `.Config` 以 PascalCase 访问同样的字段。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepConfig {
    /// Glob pattern used to discover the collection files.
    /// 用于发现集合文件的 glob 模式。
    pub newman_collection: String,
    /// Path of the newman environment file.
    pub newman_environment: String,
    /// Path of the newman globals file.
    pub newman_globals: String,
    /// Shell command installing newman. Runs unconditionally.
    /// 安装 newman 的 shell 命令，总是会执行。
    pub newman_install_command: String,
    /// Command template rendered once per collection.
    /// 每个集合渲染一次的命令模板。
    pub newman_run_command: String,
    /// When `false`, `--suppress-exit-code` is appended so failing tests only
    /// show up in the reports.
    ///
    /// 为 `false` 时追加 `--suppress-exit-code`，失败的测试只体现在报告中。
    pub fail_on_error: bool,
    pub verbose: bool,
    /// `KEY=VALUE` override applied before the install command. Empty disables it.
    /// 在安装命令之前应用的 `KEY=VALUE` 覆盖。为空则禁用。
    pub npm_install_env: String,
    /// The installed newman binary every rendered command is prefixed with.
    pub newman_executable: String,
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    pub language: String,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            newman_collection: DEFAULT_COLLECTION_PATTERN.to_string(),
            newman_environment: String::new(),
            newman_globals: String::new(),
            newman_install_command: DEFAULT_INSTALL_COMMAND.to_string(),
            newman_run_command: DEFAULT_RUN_COMMAND.to_string(),
            fail_on_error: true,
            verbose: false,
            npm_install_env: DEFAULT_NPM_INSTALL_ENV.to_string(),
            newman_executable: DEFAULT_NEWMAN_EXECUTABLE.to_string(),
            language: "en".to_string(),
        }
    }
}

impl StepConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// 读取并解析 `path` 处的配置文件。
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the invariants the pipeline relies on.
    ///
    /// 检查执行管道所依赖的不变量。
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("newmanCollection", &self.newman_collection),
            ("newmanInstallCommand", &self.newman_install_command),
            ("newmanRunCommand", &self.newman_run_command),
            ("newmanExecutable", &self.newman_executable),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }
        Ok(())
    }

    /// Looks up a field by the PascalCase name used in command templates,
    /// rendered the way the template prints it.
    ///
    /// 按命令模板中使用的 PascalCase 名称查找字段，并按模板输出的格式渲染。
    pub fn template_field(&self, name: &str) -> Option<String> {
        let value = match name {
            "NewmanCollection" => self.newman_collection.clone(),
            "NewmanEnvironment" => self.newman_environment.clone(),
            "NewmanGlobals" => self.newman_globals.clone(),
            "NewmanInstallCommand" => self.newman_install_command.clone(),
            "NewmanRunCommand" => self.newman_run_command.clone(),
            "FailOnError" => self.fail_on_error.to_string(),
            "Verbose" => self.verbose.to_string(),
            "NpmInstallEnv" => self.npm_install_env.clone(),
            "NewmanExecutable" => self.newman_executable.clone(),
            "Language" => self.language.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(collection) = overrides.collection {
            self.newman_collection = collection;
        }
        if let Some(environment) = overrides.environment {
            self.newman_environment = environment;
        }
        if let Some(globals) = overrides.globals {
            self.newman_globals = globals;
        }
        if let Some(install_command) = overrides.install_command {
            self.newman_install_command = install_command;
        }
        if let Some(run_command) = overrides.run_command {
            self.newman_run_command = run_command;
        }
        if let Some(fail_on_error) = overrides.fail_on_error {
            self.fail_on_error = fail_on_error;
        }
        if let Some(executable) = overrides.newman_executable {
            self.newman_executable = executable;
        }
        // The flag can only switch verbosity on.
        self.verbose |= overrides.verbose;
    }
}

/// Values given on the command line for the `run` subcommand.
/// `run` 子命令在命令行上给出的值。
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub collection: Option<String>,
    pub environment: Option<String>,
    pub globals: Option<String>,
    pub install_command: Option<String>,
    pub run_command: Option<String>,
    pub fail_on_error: Option<bool>,
    pub newman_executable: Option<String>,
    pub verbose: bool,
}
