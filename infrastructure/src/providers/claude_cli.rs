//! Claude CLI gateway
//!
//! Runs `claude --print` once per request, writing the combined prompt to
//! stdin and reading the answer from stdout.

use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Default largest stdout accepted from one invocation
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;
/// Stderr kept for error messages; the rest is discarded
const MAX_STDERR_BYTES: usize = 64 * 1024;

/// LLM Gateway backed by the Claude Code CLI
pub struct ClaudeCliGateway {
    command: String,
    args: Vec<String>,
    timeout: Duration,
    max_output_bytes: usize,
}

impl ClaudeCliGateway {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args: vec!["--print".to_string()],
            timeout,
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }

    /// Replace the default `--print` arguments
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    /// Single stdin payload carrying both prompts
    pub fn format_prompt(prompt: &str, system_prompt: &str) -> String {
        if system_prompt.is_empty() {
            return prompt.to_string();
        }
        format!(
            "[SYSTEM INSTRUCTIONS]\n{}\n\n[USER REQUEST]\n{}",
            system_prompt, prompt
        )
    }

    /// Drain both pipes with bounded buffers, then reap the child
    async fn collect(&self, child: &mut Child) -> Result<CapturedOutput, GatewayError> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| GatewayError::Other("failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| GatewayError::Other("failed to capture stderr".to_string()))?;

        let (stdout, stderr) = tokio::try_join!(
            read_capped(stdout, self.max_output_bytes),
            read_capped(stderr, MAX_STDERR_BYTES),
        )
        .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = child
            .wait()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Ok(CapturedOutput {
            status,
            stdout,
            stderr,
        })
    }
}

struct CapturedOutput {
    status: ExitStatus,
    stdout: Capped,
    stderr: Capped,
}

/// Bytes read from a pipe, at most the cap
struct Capped {
    bytes: Vec<u8>,
    overflowed: bool,
}

/// Keep the first `cap` bytes of `reader` and discard the rest.
///
/// The pipe is read to EOF so the child never blocks on a full pipe.
async fn read_capped<R>(mut reader: R, cap: usize) -> std::io::Result<Capped>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    (&mut reader)
        .take(cap as u64 + 1)
        .read_to_end(&mut bytes)
        .await?;

    let overflowed = bytes.len() > cap;
    if overflowed {
        bytes.truncate(cap);
        tokio::io::copy(&mut reader, &mut tokio::io::sink()).await?;
    }
    Ok(Capped { bytes, overflowed })
}

#[async_trait]
impl LlmGateway for ClaudeCliGateway {
    fn name(&self) -> &str {
        "claude-cli"
    }

    async fn ask(&self, prompt: &str, system_prompt: &str) -> Result<String, GatewayError> {
        let input = Self::format_prompt(prompt, system_prompt);
        debug!(
            "Running {} {} ({} bytes of prompt)",
            self.command,
            self.args.join(" "),
            input.len()
        );

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        let mut child = cmd.spawn().map_err(|e| {
            GatewayError::ProviderUnavailable(format!("failed to run '{}': {}", self.command, e))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| GatewayError::Other("failed to capture stdin".to_string()))?;
        let writer = tokio::spawn(async move {
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                debug!("Claude CLI closed stdin early: {}", e);
            }
            // stdin drops here, signalling end of input
        });

        let collected = tokio::time::timeout(self.timeout, self.collect(&mut child)).await;
        let output = match collected {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    "Claude CLI did not answer within {}s, killed",
                    self.timeout.as_secs()
                );
                writer.abort();
                if let Err(e) = child.start_kill() {
                    debug!("Failed to kill Claude CLI: {}", e);
                }
                return Err(GatewayError::Timeout(self.timeout.as_secs()));
            }
        };
        if let Err(e) = writer.await {
            debug!("Claude CLI stdin writer task failed: {}", e);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr.bytes);
            return Err(GatewayError::RequestFailed(format!(
                "claude exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.overflowed {
            return Err(GatewayError::RequestFailed(format!(
                "response exceeds the {} byte limit",
                self.max_output_bytes
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout.bytes)
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(text)
    }

    async fn check(&self) -> Result<(), GatewayError> {
        which::which(&self.command)
            .map(|path| debug!("Found {} at {}", self.command, path.display()))
            .map_err(|e| {
                GatewayError::ProviderUnavailable(format!(
                    "'{}' not found on PATH: {}",
                    self.command, e
                ))
            })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str, timeout_secs: u64) -> ClaudeCliGateway {
        ClaudeCliGateway::new("sh", Duration::from_secs(timeout_secs))
            .with_args(vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_format_prompt() {
        assert_eq!(
            ClaudeCliGateway::format_prompt("Score these", "You are the Risk Agent"),
            "[SYSTEM INSTRUCTIONS]\nYou are the Risk Agent\n\n[USER REQUEST]\nScore these"
        );
        assert_eq!(ClaudeCliGateway::format_prompt("Just this", ""), "Just this");
    }

    #[tokio::test]
    async fn test_ask_pipes_prompt_through_stdin() {
        let answer = shell("cat", 10).ask("question", "system").await.unwrap();
        assert!(answer.starts_with("[SYSTEM INSTRUCTIONS]\nsystem"));
        assert!(answer.ends_with("[USER REQUEST]\nquestion"));
    }

    #[tokio::test]
    async fn test_ask_reports_exit_failure() {
        let err = shell("echo boom >&2; exit 3", 10)
            .ask("q", "s")
            .await
            .unwrap_err();
        match err {
            GatewayError::RequestFailed(msg) => assert!(msg.contains("boom")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_ask_empty_output() {
        let err = shell("cat > /dev/null", 10).ask("q", "s").await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_ask_times_out() {
        let err = shell("sleep 5", 1).ask("q", "s").await.unwrap_err();
        assert!(matches!(err, GatewayError::Timeout(1)));
    }

    #[tokio::test]
    async fn test_ask_rejects_oversized_output() {
        let err = shell("cat > /dev/null; printf 'abcdefghij'", 10)
            .with_max_output_bytes(4)
            .ask("q", "s")
            .await
            .unwrap_err();
        match err {
            GatewayError::RequestFailed(msg) => assert!(msg.contains("4 byte limit")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_ask_accepts_output_at_limit() {
        let answer = shell("cat > /dev/null; printf 'abcd'", 10)
            .with_max_output_bytes(4)
            .ask("q", "s")
            .await
            .unwrap();
        assert_eq!(answer, "abcd");
    }

    #[tokio::test]
    async fn test_read_capped_keeps_prefix() {
        let capped = read_capped(&b"abcdefghij"[..], 4).await.unwrap();
        assert_eq!(capped.bytes, b"abcd");
        assert!(capped.overflowed);

        let capped = read_capped(&b"abcd"[..], 4).await.unwrap();
        assert_eq!(capped.bytes, b"abcd");
        assert!(!capped.overflowed);
    }

    #[tokio::test]
    async fn test_check_missing_binary() {
        let gateway = ClaudeCliGateway::new("council-no-such-binary-here", Duration::from_secs(1));
        assert!(matches!(
            gateway.check().await,
            Err(GatewayError::ProviderUnavailable(_))
        ));
        let err = gateway.ask("q", "s").await.unwrap_err();
        assert!(matches!(err, GatewayError::ProviderUnavailable(_)));
    }
}
