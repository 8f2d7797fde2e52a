//! FFmpeg execution adapter
//!
//! Runs built invocations as child processes and captures their output.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{Invocation, InvocationOutput};
use crate::ports::ExecutePort;

/// Process-spawning execution adapter
#[derive(Debug, Default, Clone)]
pub struct FFmpegAdapter;

impl FFmpegAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, DomainError> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ProcessingError(format!(
                    "Failed to run {}: {}",
                    invocation.program, e
                ))
            })?;

        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        captured.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!(
            program = %invocation.program,
            status = ?output.status.code(),
            "Process exited"
        );

        Ok(InvocationOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            output: captured,
        })
    }
}
