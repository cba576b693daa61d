//! SVD to per-peripheral JSON conversion.

use crate::device::Peripheral;
use crate::error::Error;
use crate::report::{Report, Skip, SkipReason};
use crate::resolve::{resolve_inheritance, MissingBase};
use crate::xml::{Document, Element};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Default SVD file read by the extractor.
pub const DEFAULT_INPUT: &str = "MIMXRT1062.svd";
/// Default directory the extractor writes to.
pub const DEFAULT_OUTPUT_DIR: &str = "MIMXRT1062_JSON_Peripherals_Complete";

/// Options to configure an extraction run.
#[derive(Clone, Debug)]
pub struct Extractor {
    input: PathBuf,
    output_dir: PathBuf,
}

/// Result of an extraction run.
#[derive(Clone, Debug)]
pub struct Extraction {
    /// Written files, and peripherals that were skipped.
    pub report: Report<PathBuf>,
    /// Peripherals whose `derivedFrom` base was not found.
    pub missing_bases: Vec<MissingBase>,
}

impl Extractor {
    /// Creates an extractor reading `input` and writing into `output_dir`.
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), output_dir: output_dir.into() }
    }

    /// Sets the SVD file to read.
    pub fn input(&mut self, input: impl Into<PathBuf>) -> &mut Self {
        self.input = input.into();
        self
    }

    /// Sets the directory to write records into.
    pub fn output_dir(&mut self, output_dir: impl Into<PathBuf>) -> &mut Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Loads the SVD file, resolves inheritance and writes one JSON file per
    /// peripheral.
    ///
    /// Nothing is written if the input cannot be loaded.
    pub fn run(&self) -> Result<Extraction, Error> {
        info!("loading SVD file {}", self.input.display());
        let document = Document::load(&self.input)?;
        let resolution = resolve_inheritance(&document);
        let peripherals = extract(&resolution.peripherals);
        let report = write(&peripherals, &self.output_dir)?;
        info!(
            "wrote {} peripheral files to {}",
            report.items.len(),
            self.output_dir.display()
        );
        Ok(Extraction { report, missing_bases: resolution.missing_bases })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_OUTPUT_DIR)
    }
}

/// Converts resolved peripheral elements into records.
pub fn extract(elements: &[Element]) -> Vec<Peripheral> {
    elements.iter().map(Peripheral::from_element).collect()
}

/// Writes each named peripheral to `<output_dir>/<name>.json`, creating the
/// directory if needed.
///
/// A later peripheral with the same name overwrites the earlier file.
pub fn write(peripherals: &[Peripheral], output_dir: &Path) -> Result<Report<PathBuf>, Error> {
    if !output_dir.is_dir() {
        fs::create_dir_all(output_dir).map_err(|err| Error::io(output_dir, err))?;
        info!("created output directory {}", output_dir.display());
    }
    let mut report = Report::default();
    for (i, peripheral) in peripherals.iter().enumerate() {
        let Some(name) = &peripheral.name else {
            report.push(Err(Skip::new(format!("peripheral #{i}"), SkipReason::Unnamed)));
            continue;
        };
        let path = output_dir.join(format!("{}.json", file_name(name)));
        let outcome = match fs::write(&path, to_json(peripheral)?) {
            Ok(()) => {
                debug!("wrote {}", path.display());
                Ok(path)
            }
            Err(err) => Err(Skip::new(name, SkipReason::Unwritable(err.to_string()))),
        };
        report.push(outcome);
    }
    Ok(report)
}

/// Serializes a record with two-space indentation.
pub fn to_json(peripheral: &Peripheral) -> serde_json::Result<String> {
    serde_json::to_string_pretty(peripheral)
}

/// Replaces characters that are not allowed in file names.
pub fn file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(name: Option<&str>) -> Peripheral {
        let mut peripheral = Peripheral::default();
        peripheral.name = name.map(str::to_owned);
        peripheral
    }

    #[test]
    fn sanitizes_file_names() {
        assert_eq!(file_name("ADC1"), "ADC1");
        assert_eq!(file_name("A/B:C*D"), "A_B_C_D");
        assert_eq!(file_name("tab\there"), "tab_here");
        assert_eq!(file_name("Überwacher"), "Überwacher");
    }

    #[test]
    fn pretty_json_keeps_non_ascii() {
        let mut peripheral = named(Some("WDOG"));
        peripheral.description = Some("看门狗 timer".into());
        assert_eq!(
            to_json(&peripheral).unwrap(),
            "{\n  \"name\": \"WDOG\",\n  \"description\": \"看门狗 timer\",\n  \"registers\": []\n}"
        );
    }

    #[test]
    fn writes_named_and_skips_unnamed() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("nested").join("out");
        let peripherals = [named(Some("ADC1")), named(None), named(Some("A/B"))];
        let report = write(&peripherals, &output_dir).unwrap();
        assert_eq!(report.items, [output_dir.join("ADC1.json"), output_dir.join("A_B.json")]);
        assert_eq!(report.skipped, [Skip::new("peripheral #1", SkipReason::Unnamed)]);
        assert!(output_dir.join("ADC1.json").is_file());
    }

    #[test]
    fn failed_write_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let long_name = "X".repeat(300);
        let peripherals = [named(Some("A")), named(Some(&long_name)), named(Some("C"))];
        let report = write(&peripherals, dir.path()).unwrap();
        assert_eq!(report.items, [dir.path().join("A.json"), dir.path().join("C.json")]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].item, long_name);
        assert!(matches!(report.skipped[0].reason, SkipReason::Unwritable(_)));
        assert!(dir.path().join("C.json").is_file());
    }

    #[test]
    fn later_duplicate_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut second = named(Some("ADC1"));
        second.group_name = Some("ADC".into());
        let report = write(&[named(Some("ADC1")), second.clone()], dir.path()).unwrap();
        assert_eq!(report.items.len(), 2);
        let written = fs::read_to_string(dir.path().join("ADC1.json")).unwrap();
        assert_eq!(serde_json::from_str::<Peripheral>(&written).unwrap(), second);
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("out");
        let err = Extractor::new(dir.path().join("missing.svd"), &output_dir).run().unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!output_dir.exists());
    }

    #[test]
    fn malformed_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.svd");
        fs::write(&input, "<device><peripherals></device>").unwrap();
        let output_dir = dir.path().join("out");
        let err = Extractor::new(&input, &output_dir).run().unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(!output_dir.exists());
    }
}
