//! Persistence seam for computed spectra.
//!
//! The engine only ever hands over named, described, fixed-rank real
//! datasets; [`DatasetSink`] is that surface. [`JsonContainer`] is the
//! bundled implementation, writing one JSON document per output file.
//! Which process in a cooperating set actually performs the write is the
//! container's concern, not the engine's.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::SdosError;
use crate::parity::Parity;

pub trait DatasetSink {
    fn write_real(
        &mut self,
        name: &str,
        description: &str,
        dims: &[usize],
        data: &[f64],
    ) -> Result<(), SdosError>;
}

#[derive(Debug, Serialize)]
struct DatasetRecord {
    name: String,
    description: String,
    dims: Vec<usize>,
    data: Vec<f64>,
}

#[derive(Serialize)]
struct ContainerDoc {
    datasets: Vec<DatasetRecord>,
}

/// Buffering JSON-backed dataset container.
pub struct JsonContainer {
    path: PathBuf,
    datasets: Vec<DatasetRecord>,
}

impl JsonContainer {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SdosError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            datasets: Vec::new(),
        })
    }

    /// Flush all buffered datasets to disk and return the written path.
    pub fn close(self) -> Result<PathBuf, SdosError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(
            &mut writer,
            &ContainerDoc {
                datasets: self.datasets,
            },
        )?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(self.path)
    }
}

impl DatasetSink for JsonContainer {
    fn write_real(
        &mut self,
        name: &str,
        description: &str,
        dims: &[usize],
        data: &[f64],
    ) -> Result<(), SdosError> {
        let expected: usize = dims.iter().product();
        if expected != data.len() {
            return Err(SdosError::ShapeMismatch {
                what: "dataset payload",
                expected,
                got: data.len(),
            });
        }
        self.datasets.push(DatasetRecord {
            name: name.to_string(),
            description: description.to_string(),
            dims: dims.to_vec(),
            data: data.to_vec(),
        });
        Ok(())
    }
}

/// Output name for a spectrum: prefix, dataset kind, k-point index, and
/// an optional parity suffix. No extension; the container adds its own.
pub fn spectrum_filename(prefix: &str, kpoint_index: usize, parity: Parity) -> String {
    let mut name = format!("{prefix}-sdos.k{kpoint_index}");
    if let Some(suffix) = parity.suffix() {
        name.push('.');
        name.push_str(suffix);
    }
    name
}
