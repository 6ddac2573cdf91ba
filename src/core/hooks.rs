//! Hook command execution.
//!
//! Operators extend a run with external commands configured per stage.
//! Each template has its tokens substituted, is split on whitespace into a
//! program and arguments, and runs to completion before the next one starts.
//! Output is captured for the log only.

use crate::core::tokens::{unresolved_per_file, TokenSet};
use crate::models::config::{HookStage, HooksConfig};
use crate::Result;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// How hook commands are run.
#[derive(Debug, Clone, Default)]
pub struct HookPolicy {
    /// Kill a hook that runs longer than this. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Stop a file's remaining hooks after the first failure.
    pub abort_on_failure: bool,
}

impl From<&HooksConfig> for HookPolicy {
    fn from(config: &HooksConfig) -> Self {
        Self {
            timeout: (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs)),
            abort_on_failure: config.abort_on_failure,
        }
    }
}

/// A command line split into program and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Split on whitespace. Quoting is not supported.
pub fn split_command(line: &str) -> Result<HookCommand> {
    let mut parts = line.split_whitespace().map(str::to_string);
    let program = parts.next().ok_or(crate::Error::EmptyHookCommand)?;

    Ok(HookCommand {
        program,
        args: parts.collect(),
    })
}

/// Captured result of a hook that ran to completion.
#[derive(Debug, Clone)]
pub struct HookOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl HookOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// How a started hook ended.
#[derive(Debug)]
pub enum HookOutcome {
    /// Ran to completion, whatever its exit status.
    Completed(HookOutput),
    /// Killed after exceeding the timeout.
    TimedOut(Duration),
    /// The program could not be started.
    SpawnFailed(std::io::Error),
}

impl HookOutcome {
    /// Treat anything but a zero exit as an error.
    pub fn into_result(self, line: &str) -> Result<HookOutput> {
        match self {
            HookOutcome::Completed(output) if output.success() => Ok(output),
            HookOutcome::Completed(output) => Err(crate::Error::HookFailed(
                line.to_string(),
                output.status.to_string(),
            )),
            HookOutcome::TimedOut(limit) => {
                Err(crate::Error::HookTimeout(line.to_string(), limit.as_secs()))
            }
            HookOutcome::SpawnFailed(source) => Err(crate::Error::HookSpawn {
                command: line.to_string(),
                source,
            }),
        }
    }
}

/// What happened to one stage's hooks for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    /// Hooks started.
    pub executed: usize,
    /// Hooks that failed to start, timed out or exited non-zero.
    pub failed: usize,
    /// Remaining hooks were skipped because of `abort_on_failure`.
    pub aborted: bool,
}

/// Runs configured hook commands.
#[derive(Debug, Clone, Default)]
pub struct HookRunner {
    policy: HookPolicy,
}

impl HookRunner {
    pub fn new(policy: HookPolicy) -> Self {
        Self { policy }
    }

    /// Run one already-substituted command line and wait for it.
    ///
    /// Only an empty line or a failure while collecting output is an `Err`.
    pub async fn execute(&self, line: &str) -> Result<HookOutcome> {
        let command = split_command(line)?;

        let child = match Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return Ok(HookOutcome::SpawnFailed(e)),
        };

        let output = match self.policy.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(output) => output?,
                Err(_) => return Ok(HookOutcome::TimedOut(limit)),
            },
            None => child.wait_with_output().await?,
        };

        Ok(HookOutcome::Completed(HookOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }))
    }

    /// Run every template of a stage in order with `tokens` substituted.
    pub async fn run_stage(
        &self,
        stage: HookStage,
        templates: &[String],
        tokens: &TokenSet,
    ) -> StageReport {
        let mut report = StageReport::default();

        for template in templates {
            if stage == HookStage::PostprocessAll {
                for token in unresolved_per_file(template) {
                    tracing::warn!(
                        "{} is undefined in {} and is left as-is: {}",
                        token,
                        stage,
                        template
                    );
                }
            }

            let line = tokens.format(template);
            tracing::info!("-- Executing {}", line);
            report.executed += 1;

            let result = match self.execute(&line).await {
                Ok(outcome) => {
                    if let HookOutcome::Completed(ref output) = outcome {
                        log_output(stage, output);
                    }
                    outcome.into_result(&line)
                }
                Err(e) => Err(e),
            };

            let ok = match result {
                Ok(_) => true,
                Err(e) => {
                    tracing::error!("{} hook failed: {}", stage, e);
                    false
                }
            };

            if !ok {
                report.failed += 1;
                if self.policy.abort_on_failure {
                    report.aborted = true;
                    tracing::warn!("Skipping remaining {} hooks", stage);
                    break;
                }
            }
        }

        report
    }
}

fn log_output(stage: HookStage, output: &HookOutput) {
    if !output.stdout.trim().is_empty() {
        tracing::debug!("[{}] stdout: {}", stage, output.stdout.trim_end());
    }
    if !output.stderr.trim().is_empty() {
        tracing::debug!("[{}] stderr: {}", stage, output.stderr.trim_end());
    }
}
