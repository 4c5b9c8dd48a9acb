use crate::config::TracerConfig;
use crate::error::ConvertError;
use crate::tracer::Tracer;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

pub const DEFAULT_PROGRAM: &str = "potrace";

/// Runs the potrace command line tool with its SVG backend.
///
/// The call blocks until the process exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct PotraceTracer {
    program: OsString,
    extra_args: Vec<String>,
}

impl Default for PotraceTracer {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl PotraceTracer {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(config: &TracerConfig) -> Self {
        Self::new(&config.program).with_args(config.extra_args.iter().cloned())
    }

    /// Arguments placed before the backend and file arguments, e.g. `--turdsize 4`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &std::ffi::OsStr {
        &self.program
    }

    fn build_command(&self, bitmap: &Path, svg: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.extra_args)
            .arg("-s")
            .arg(bitmap)
            .arg("-o")
            .arg(svg)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Tracer for PotraceTracer {
    fn name(&self) -> &str {
        "potrace"
    }

    fn trace(&self, bitmap: &Path, svg: &Path) -> Result<PathBuf, ConvertError> {
        let program = self.program.to_string_lossy().into_owned();
        debug!(
            program = %program,
            extra_args = ?self.extra_args,
            bitmap = %bitmap.display(),
            svg = %svg.display(),
            "Invoking tracing tool"
        );

        let output = self
            .build_command(bitmap, svg)
            .output()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ConvertError::ToolMissing {
                    program: program.clone(),
                },
                _ => ConvertError::ToolSpawn {
                    program: program.clone(),
                    source,
                },
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            warn!(program = %program, status = %output.status, stderr = %stderr, "Tracing tool failed");
            return Err(ConvertError::ToolFailed {
                program,
                status: output.status,
                stderr,
            });
        }

        if !stderr.is_empty() {
            debug!(program = %program, stderr = %stderr, "Tracing tool diagnostics");
        }

        if !svg.is_file() {
            return Err(ConvertError::MissingOutput {
                path: svg.to_path_buf(),
            });
        }

        info!(svg = %svg.display(), "SVG written");
        Ok(svg.to_path_buf())
    }
}
