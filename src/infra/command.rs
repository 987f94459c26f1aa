//! # Command Execution / 命令执行
//!
//! Spawns shell commands and forwards their output to the console while the
//! caller waits for the exit status.
//!
//! 派生 shell 命令，并在调用者等待退出状态时将其输出转发到控制台。

use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Builds the command running `script` with `shell -c`.
///
/// # Arguments
/// * `shell` - The shell executable, e.g. `/bin/sh`
/// * `script` - The script handed to the shell
/// * `env` - Extra environment variables for the child process
///
/// 构建以 `shell -c` 运行 `script` 的命令。
pub fn shell_command<'a, I>(shell: &str, script: &str, env: I) -> Command
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut cmd = Command::new(shell);
    cmd.arg("-c").arg(script).envs(env).kill_on_drop(true);
    cmd
}

/// Spawns a command and streams its stdout and stderr line by line.
/// Both streams are read concurrently; stdout lines go to stdout and stderr
/// lines go to stderr.
///
/// # Returns
/// The `ExitStatus` of the process once both streams are drained.
///
/// 派生一个命令并逐行转发其 stdout 和 stderr。
/// 两个流被并发读取；stdout 的行写入 stdout，stderr 的行写入 stderr。
pub async fn spawn_and_stream(mut cmd: Command) -> std::io::Result<ExitStatus> {
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

    // Spawn a task to forward stdout line by line.
    // 派生一个任务来逐行转发 stdout。
    let stdout_handle = tokio::spawn(forward_lines(stdout, |line| println!("{line}")));

    // Spawn a task to forward stderr line by line.
    // 派生一个任务来逐行转发 stderr。
    let stderr_handle = tokio::spawn(forward_lines(stderr, |line| eprintln!("{line}")));

    let status = child.wait().await;

    // Wait for the forwarding tasks so no trailing output is lost.
    // 等待转发任务完成，确保不会丢失末尾的输出。
    if let Err(e) = stdout_handle.await {
        eprintln!("Failed to join stdout task: {}", e);
    }
    if let Err(e) = stderr_handle.await {
        eprintln!("Failed to join stderr task: {}", e);
    }

    status
}

/// Reads `reader` to the end and hands every line to `emit`, without the
/// trailing newline. Bytes that are not valid UTF-8 are replaced, so the pipe
/// stays drained until the child closes it.
///
/// 将 `reader` 读到末尾，并把每一行（不含换行符）交给 `emit`。
/// 非法的 UTF-8 字节会被替换，因此管道会一直被读取，直到子进程关闭它。
pub async fn forward_lines<R, F>(reader: R, mut emit: F)
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                emit(&String::from_utf8_lossy(&buf));
            }
        }
    }
}
