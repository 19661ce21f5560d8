use crate::common::error::AppError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

/// Engine flags for one invocation, split around the input path.
/// `pre_input` flags affect how the input is opened (e.g. a seek),
/// `pre_output` flags shape the produced stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineArgs {
    pub pre_input: Vec<String>,
    pub pre_output: Vec<String>,
}

/// Runs the external transcoding engine to completion, one invocation per
/// job. The engine is an opaque, trusted-but-fallible dependency: its
/// diagnostics are captured verbatim and never interpreted here.
#[derive(Clone)]
pub struct Transcoder {
    binary: PathBuf,
    timeout: Duration,
}

impl Transcoder {
    pub fn new(binary: PathBuf, timeout: Duration) -> Self {
        Self { binary, timeout }
    }

    /// Invoke `<engine> {pre_input} -i <input> {pre_output} -y <output>` and
    /// wait for it to exit. The request blocks for the duration; the child is
    /// killed if it outlives the configured timeout.
    pub async fn run(
        &self,
        input: &Path,
        args: &EngineArgs,
        output: &Path,
    ) -> Result<(), AppError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&args.pre_input)
            .arg("-i")
            .arg(input)
            .args(&args.pre_output)
            .arg("-y")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        info!(
            "🎬 {} {} -> {}",
            self.binary.display(),
            input.display(),
            output.display()
        );

        let child = cmd.spawn().map_err(|e| {
            AppError::Transcode(format!("Failed to launch {}: {e}", self.binary.display()))
        })?;

        // kill_on_drop reaps the child when the timeout fires.
        let out = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result
                .map_err(|e| AppError::Transcode(format!("Engine I/O failure: {e}")))?,
            Err(_) => {
                return Err(AppError::Transcode(format!(
                    "Transcode timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if !out.status.success() {
            // Surfaced verbatim: the engine's stderr is the caller's primary
            // debugging signal.
            return Err(AppError::Transcode(
                String::from_utf8_lossy(&out.stderr).into_owned(),
            ));
        }

        Ok(())
    }
}
