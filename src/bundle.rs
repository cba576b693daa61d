//! Per-peripheral JSON to a single script-loadable data file.

use crate::error::Error;
use crate::extract::DEFAULT_OUTPUT_DIR;
use crate::report::{Report, Skip, SkipReason};
use indexmap::IndexMap;
use log::info;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Default file the bundler writes.
pub const DEFAULT_OUTPUT_FILE: &str = "mcu_data.js";
/// Default global the bundle is assigned to.
pub const DEFAULT_VARIABLE: &str = "window.MCU_DATA";

/// Options to configure a bundling run.
#[derive(Clone, Debug)]
pub struct Bundler {
    source_dir: PathBuf,
    output_file: PathBuf,
    variable: String,
}

/// Result of a bundling run.
#[derive(Clone, Debug)]
pub struct Bundle {
    /// Bundled records keyed by name, each exactly as read.
    pub peripherals: IndexMap<String, Value>,
    /// Files that were not included.
    pub skipped: Vec<Skip>,
}

impl Bundler {
    /// Creates a bundler reading records from `source_dir` and writing
    /// `output_file`.
    pub fn new(source_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_file: output_file.into(),
            variable: DEFAULT_VARIABLE.to_owned(),
        }
    }

    /// Sets the directory to read records from.
    pub fn source_dir(&mut self, source_dir: impl Into<PathBuf>) -> &mut Self {
        self.source_dir = source_dir.into();
        self
    }

    /// Sets the file to write the bundle to.
    pub fn output_file(&mut self, output_file: impl Into<PathBuf>) -> &mut Self {
        self.output_file = output_file.into();
        self
    }

    /// Sets the global variable the bundle is assigned to.
    pub fn variable(&mut self, variable: impl Into<String>) -> &mut Self {
        self.variable = variable.into();
        self
    }

    /// Loads every record in the source directory and writes the bundle.
    ///
    /// Fails without writing anything if the source directory is missing.
    /// Files that cannot be loaded are reported in [`Bundle::skipped`].
    pub fn run(&self) -> Result<Bundle, Error> {
        let files = scan(&self.source_dir)?;
        let Report { items, skipped } =
            files.iter().map(|path| load_one(path)).collect::<Report<_>>();
        let peripherals = merge(items);
        emit(&peripherals, &self.output_file, &self.variable)?;
        info!(
            "created {} with {} peripherals",
            self.output_file.display(),
            peripherals.len()
        );
        Ok(Bundle { peripherals, skipped })
    }
}

impl Default for Bundler {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE)
    }
}

/// Lists `*.json` files in `dir`, matching the extension case-insensitively,
/// sorted by path.
pub fn scan(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::NotFound { path: dir.to_owned() });
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| Error::io(dir, err))? {
        let path = entry.map_err(|err| Error::io(dir, err))?.path();
        if path.is_file() && is_record(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads one record, keyed by its `name` or else by the file stem.
///
/// The record is kept as a JSON value, so keys and values the extractor does
/// not produce pass through untouched.
pub fn load_one(path: &Path) -> Result<(String, Value), Skip> {
    let item = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    let json = fs::read_to_string(path)
        .map_err(|err| Skip::new(&item, SkipReason::Unreadable(err.to_string())))?;
    let record = serde_json::from_str::<Value>(&json)
        .map_err(|err| Skip::new(&item, SkipReason::Malformed(err.to_string())))?;
    if !record.is_object() {
        return Err(Skip::new(&item, SkipReason::Malformed("not a JSON object".into())));
    }
    let key = match record.get("name").and_then(Value::as_str) {
        Some(name) => name.to_owned(),
        None => path
            .file_stem()
            .map_or_else(|| item.clone(), |stem| stem.to_string_lossy().into_owned()),
    };
    info!("loaded {key}");
    Ok((key, record))
}

/// Collects records into a map. A later record replaces an earlier one with
/// the same key.
pub fn merge(records: impl IntoIterator<Item = (String, Value)>) -> IndexMap<String, Value> {
    records.into_iter().collect()
}

/// Writes `<variable> = <minified JSON>;` to `output_file`.
pub fn emit(
    peripherals: &IndexMap<String, Value>,
    output_file: &Path,
    variable: &str,
) -> Result<(), Error> {
    let script = format!("{variable} = {};", serde_json::to_string(peripherals)?);
    fs::write(output_file, script).map_err(|err| Error::io(output_file, err))
}

fn is_record(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str).map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}
