use log::{debug, warn};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use essize_core::{ImportRecord, Lang, ParseError, classify_imports, compile_probe};
use essize_package::{PackageError, package_root};

use crate::bundler::{BuildRequest, Bundler};
use crate::gzip::gzip_len;

#[derive(Debug, Error)]
pub enum MeasureError {
    /// The snippet contained nothing importable (only local imports, or an
    /// empty snippet).
    #[error("no imports found in snippet")]
    NoImportsFound,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Package(#[from] PackageError),

    /// The bundler ran but reported build diagnostics or produced no output.
    #[error("bundling failed: {0}")]
    Bundle(String),

    /// The bundler could not be invoked at all.
    #[error(transparent)]
    Bundler(#[from] anyhow::Error),

    #[error("failed to gzip bundle output")]
    Gzip(#[source] std::io::Error),
}

/// Measured cost of one import: raw bundled bytes and gzipped bytes.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSize {
    pub package: String,
    pub size: u64,
    pub gzip: u64,
}

/// Measure the first import found in `snippet`, resolving the package
/// relative to the project that contains `file_path`.
pub fn measure_import<B: Bundler>(
    snippet: &str,
    file_path: &Path,
    lang: Lang,
    bundler: &B,
) -> Result<ImportSize, MeasureError> {
    let records = classify_imports(snippet, lang)?;
    let record = records.first().ok_or(MeasureError::NoImportsFound)?;
    if records.len() > 1 {
        warn!("Snippet contains {} imports; measuring the first only", records.len());
    }

    let resolve_dir = package_root(file_path)?;
    measure_record(record, &resolve_dir, lang, bundler)
}

/// Compile one record into a probe, bundle it, and gzip the output.
pub fn measure_record<B: Bundler>(
    record: &ImportRecord,
    resolve_dir: &Path,
    lang: Lang,
    bundler: &B,
) -> Result<ImportSize, MeasureError> {
    let probe = compile_probe(record);
    debug!("Measuring '{}' with probe:\n{}", record.package, probe);

    let request =
        BuildRequest { contents: probe, resolve_dir: resolve_dir.to_path_buf(), lang };
    let result = bundler.build(&request)?;

    if !result.errors.is_empty() {
        return Err(MeasureError::Bundle(result.errors.join(", ")));
    }
    if result.output.is_empty() {
        return Err(MeasureError::Bundle("could not find build output".to_string()));
    }

    let gzip = gzip_len(&result.output).map_err(MeasureError::Gzip)? as u64;
    let size = result.output.len() as u64;
    debug!("Measured '{}': {} bytes raw, {} bytes gzipped", record.package, size, gzip);

    Ok(ImportSize { package: record.package.clone(), size, gzip })
}

/// Render a byte count with decimal units, in the style of the common
/// `filesize` formatters.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}
