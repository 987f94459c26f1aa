// Shared test helpers for integration tests
#![allow(dead_code)]

use newman_runner::core::error::BoxError;
use newman_runner::core::execution::NewmanUtils;
use newman_runner::core::StepConfig;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

pub const RUN_COMMAND: &str = "run {{.NewmanCollection}} --environment {{.Config.NewmanEnvironment}} --globals {{.Config.NewmanGlobals}} --reporters junit,html --reporter-junit-export target/newman/TEST-{{.CollectionDisplayName}}.xml --reporter-html-export target/newman/TEST-{{.CollectionDisplayName}}.html";

/// One recorded `run_shell` call together with the environment set right before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedScript {
    pub shell: String,
    pub script: String,
    pub envs: Vec<String>,
}

impl ExecutedScript {
    pub fn new(shell: &str, script: &str) -> Self {
        Self {
            shell: shell.to_string(),
            script: script.to_string(),
            envs: vec![],
        }
    }

    pub fn with_envs(mut self, envs: &[&str]) -> Self {
        self.envs = envs.iter().map(|e| e.to_string()).collect();
        self
    }
}

/// A scripted `NewmanUtils` double. Every shell call is recorded, including
/// the failing ones.
#[derive(Debug, Default)]
pub struct MockUtils {
    pub error_on_glob: bool,
    pub error_on_newman_install: bool,
    pub error_on_newman_execution: bool,
    pub error_on_logging_node: bool,
    pub error_on_logging_npm: bool,
    /// Fails only the newman run whose command mentions this collection.
    pub error_on_collection: Option<String>,
    pub files_to_find: Vec<String>,
    pub executed_scripts: Vec<ExecutedScript>,
    pub glob_calls: RefCell<Vec<String>>,
    pending_envs: Vec<String>,
}

impl MockUtils {
    pub fn new() -> Self {
        Self {
            files_to_find: vec!["localFile.json".to_string(), "localFile2.json".to_string()],
            ..Default::default()
        }
    }

    pub fn scripts(&self) -> Vec<&str> {
        self.executed_scripts
            .iter()
            .map(|s| s.script.as_str())
            .collect()
    }

    pub fn newman_runs(&self) -> Vec<&str> {
        self.scripts()
            .into_iter()
            .filter(|s| s.contains("newman run"))
            .collect()
    }
}

impl NewmanUtils for MockUtils {
    fn glob(&self, pattern: &str) -> Result<Vec<String>, BoxError> {
        self.glob_calls.borrow_mut().push(pattern.to_string());
        if self.error_on_glob {
            return Err("error on Glob".into());
        }
        Ok(self.files_to_find.clone())
    }

    async fn run_shell(&mut self, shell: &str, script: &str) -> Result<(), BoxError> {
        self.executed_scripts.push(ExecutedScript {
            shell: shell.to_string(),
            script: script.to_string(),
            envs: std::mem::take(&mut self.pending_envs),
        });

        let params: Vec<&str> = script.split(' ').collect();
        let executable = params[0];
        let second = params.get(1).copied().unwrap_or_default();

        if self.error_on_logging_node && executable == "node" && second == "--version" {
            return Err("error on RunShell".into());
        }
        if self.error_on_logging_npm && executable == "npm" && second == "--version" {
            return Err("error on RunShell".into());
        }
        if self.error_on_newman_execution && executable.contains("newman") {
            return Err("error on newman execution".into());
        }
        if let Some(collection) = &self.error_on_collection {
            if executable.contains("newman") && params.contains(&collection.as_str()) {
                return Err(format!("collection {collection} failed").into());
            }
        }
        if self.error_on_newman_install && params.contains(&"install") {
            return Err("error on newman install".into());
        }
        Ok(())
    }

    fn set_env(&mut self, env: &[String]) {
        self.pending_envs.extend_from_slice(env);
    }
}

/// The configuration every orchestrator test starts from.
pub fn all_fine_config() -> StepConfig {
    StepConfig {
        newman_collection: "**.json".to_string(),
        newman_environment: "env.json".to_string(),
        newman_globals: "globals.json".to_string(),
        newman_install_command: "npm install newman --global --quiet".to_string(),
        newman_run_command: RUN_COMMAND.to_string(),
        fail_on_error: false,
        ..StepConfig::default()
    }
}

pub fn expected_newman_run(collection: &str, display_name: &str) -> String {
    format!(
        "/home/node/.npm-global/bin/newman run {collection} --environment env.json --globals globals.json --reporters junit,html --reporter-junit-export target/newman/TEST-{display_name}.xml --reporter-html-export target/newman/TEST-{display_name}.html"
    )
}

/// A scratch project with fake `node`, `npm` and `newman` executables.
///
/// The fake newman appends its arguments to `newman.log` and, like the real
/// one, exits non-zero for a collection named `failing*` unless
/// `--suppress-exit-code` is given.
pub struct FakeToolchain {
    pub dir: TempDir,
}

impl FakeToolchain {
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).expect("Failed to create bin directory");
        fs::create_dir_all(dir.path().join("collections"))
            .expect("Failed to create collections directory");

        write_script(&bin.join("node"), "#!/bin/sh\necho v20.0.0\n");
        write_script(&bin.join("npm"), "#!/bin/sh\necho 10.0.0\n");

        let log = dir.path().join("newman.log");
        let newman = format!(
            "#!/bin/sh\necho \"$@\" >> '{}'\ncase \"$*\" in\n  *--suppress-exit-code*) exit 0 ;;\n  *failing*) exit 1 ;;\nesac\nexit 0\n",
            log.display()
        );
        write_script(&bin.join("newman"), &newman);

        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn newman_executable(&self) -> PathBuf {
        self.path().join("bin").join("newman")
    }

    /// `PATH` with the fake binaries in front.
    pub fn path_env(&self) -> String {
        let system_path = std::env::var("PATH").unwrap_or_default();
        format!("{}:{}", self.path().join("bin").display(), system_path)
    }

    pub fn add_collection(&self, name: &str) {
        fs::write(self.path().join("collections").join(name), "{}")
            .expect("Failed to write collection");
    }

    /// Writes `newman.toml` in the project, pointing at the fake newman.
    pub fn write_config(&self, fail_on_error: bool, extra: &str) -> PathBuf {
        let config_path = self.path().join("newman.toml");
        let content = format!(
            r#"
language = "en"
newmanCollection = "collections/*.json"
newmanInstallCommand = "npm install newman --global --quiet"
npmInstallEnv = ""
newmanExecutable = "{}"
failOnError = {}
{}
"#,
            self.newman_executable().display(),
            fail_on_error,
            extra
        );
        fs::write(&config_path, content).expect("Failed to write newman.toml");
        config_path
    }

    /// Lines written by the fake newman, one per run.
    pub fn newman_log(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("newman.log"))
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(unix)]
fn write_script(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, content).expect("Failed to write script");
    let mut permissions = fs::metadata(path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions).expect("Failed to make script executable");
}

#[cfg(not(unix))]
fn write_script(path: &Path, content: &str) {
    fs::write(path, content).expect("Failed to write script");
}
