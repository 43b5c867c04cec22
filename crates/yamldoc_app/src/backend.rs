//! Conversion through an external program.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use engine_logging::engine_debug;
use serde_json::Value;
use yamldoc_core::ConverterOptions;
use yamldoc_engine::{BackendError, ConversionBackend};

/// Environment variable carrying the effective converter options as JSON.
pub const OPTIONS_ENV: &str = "YAMLDOC_OPTIONS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("backend command is empty")]
pub struct EmptyCommand;

/// Runs `program args...` once per document: the document goes to stdin and
/// a JSON object is expected on stdout.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
}

impl CommandBackend {
    /// Splits `line` on whitespace into a program and its arguments.
    pub fn from_command_line(line: &str) -> Result<Self, EmptyCommand> {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }
}

impl ConversionBackend for CommandBackend {
    fn convert(&self, content: &str, options: &ConverterOptions) -> Result<Value, BackendError> {
        let options_json = serde_json::to_string(options)
            .map_err(|err| BackendError::Failed(format!("could not encode options: {err}")))?;

        // A backend that cannot be started will not work for any document.
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(OPTIONS_ENV, options_json)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| BackendError::Fatal(format!("cannot start {}: {err}", self.program)))?;

        // Feed stdin from another thread so a chatty backend cannot block on a full pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = content.to_string();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child
            .wait_with_output()
            .map_err(|err| BackendError::Failed(format!("{} did not finish: {err}", self.program)))?;
        if let Some(writer) = writer {
            // The backend may legitimately exit before reading everything.
            let _ = writer.join();
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::Failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        engine_debug!("{} produced {} bytes", self.program, output.stdout.len());
        serde_json::from_slice(&output.stdout).map_err(|err| {
            BackendError::Failed(format!("{} printed invalid JSON: {err}", self.program))
        })
    }
}
