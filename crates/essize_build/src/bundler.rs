use anyhow::{Context, Result};
use log::{debug, trace};
use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use essize_core::Lang;

/// A probe build request: self-contained probe source text, the consuming
/// project's root as resolution directory, and the source-language tag.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub contents: String,
    pub resolve_dir: PathBuf,
    pub lang: Lang,
}

/// Build diagnostics plus the raw bundled output bytes.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub output: Vec<u8>,
}

/// Bundles a probe snippet in isolation. Diagnostics are reported in the
/// output rather than as an `Err`; `Err` is reserved for failures to invoke
/// the bundler at all.
pub trait Bundler {
    fn build(&self, request: &BuildRequest) -> Result<BuildOutput>;
}

/// Bundler backed by an `esbuild` binary, fed the probe on stdin with the
/// resolve directory as working directory.
#[derive(Debug, Clone)]
pub struct EsbuildCommand {
    binary: PathBuf,
}

impl EsbuildCommand {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }
}

impl Default for EsbuildCommand {
    fn default() -> Self {
        Self::new("esbuild")
    }
}

impl Bundler for EsbuildCommand {
    fn build(&self, request: &BuildRequest) -> Result<BuildOutput> {
        debug!(
            "Bundling probe with {} (resolve dir: {})",
            self.binary.display(),
            request.resolve_dir.display()
        );
        trace!("Probe contents:\n{}", request.contents);

        let mut child = Command::new(&self.binary)
            .arg("--bundle")
            .arg("--minify")
            .arg("--tree-shaking=true")
            .arg(format!("--loader={}", request.lang.loader()))
            .current_dir(&request.resolve_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn {}", self.binary.display()))?;

        child
            .stdin
            .take()
            .context("esbuild stdin was not piped")?
            .write_all(request.contents.as_bytes())
            .context("Failed to write probe to esbuild stdin")?;

        let output = child.wait_with_output().context("Failed to wait for esbuild")?;
        let stderr_lines: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect();

        if !output.status.success() {
            debug!("esbuild exited with {}: {} diagnostic line(s)", output.status, stderr_lines.len());
            return Ok(BuildOutput { errors: stderr_lines, warnings: Vec::new(), output: Vec::new() });
        }

        debug!("esbuild produced {} output bytes", output.stdout.len());
        Ok(BuildOutput { errors: Vec::new(), warnings: stderr_lines, output: output.stdout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_an_invocation_error() {
        let bundler = EsbuildCommand::new("/nonexistent/esbuild-binary");
        let request = BuildRequest {
            contents: "require('pkg')".to_string(),
            resolve_dir: std::env::temp_dir(),
            lang: Lang::JavaScript,
        };
        assert!(bundler.build(&request).is_err());
    }
}
