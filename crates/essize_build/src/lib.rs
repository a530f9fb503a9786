//! Probe bundling and size measurement for essize.
//!
//! Takes the canonical probe snippets produced by `essize_core`, hands them
//! to a bundler, and reports raw and gzipped output sizes:
//! - The [`Bundler`] trait and an `esbuild`-subprocess implementation
//! - gzip measurement of bundler output
//! - The `measure_import`/`measure_record` orchestration

mod bundler;
mod gzip;
mod measure;

// Re-export public API
pub use bundler::{BuildOutput, BuildRequest, Bundler, EsbuildCommand};
pub use gzip::{gzip_bytes, gzip_len};
pub use measure::{ImportSize, MeasureError, human_size, measure_import, measure_record};
