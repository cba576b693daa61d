//! CMSIS-SVD to JSON converter for browser-based register viewers.
//!
//! The [`Extractor`] turns one SVD file into one JSON record per peripheral,
//! copying the address block and registers of `derivedFrom` bases into the
//! peripherals that lack their own. The [`Bundler`] then merges a directory of
//! such records into a single `window.MCU_DATA = {...};` script.
//!
//! # Usage
//!
//! ```no_run
//! use svd_json::{Bundler, Extractor};
//!
//! # fn main() -> Result<(), svd_json::Error> {
//! Extractor::new("MIMXRT1062.svd", "peripherals").run()?;
//! Bundler::new("peripherals", "mcu_data.js").run()?;
//! # Ok(())
//! # }
//! ```

#![deny(elided_lifetimes_in_paths)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod bundle;
pub mod extract;
pub mod resolve;
pub mod xml;

mod device;
mod error;
mod report;

pub use self::bundle::{Bundle, Bundler};
pub use self::device::{
    parse_int, Access, AddressBlock, EnumeratedValue, Field, Peripheral, Register,
};
pub use self::error::{Error, ParseError};
pub use self::extract::{Extraction, Extractor};
pub use self::report::{Report, Skip, SkipReason};
pub use self::resolve::{resolve_inheritance, MissingBase, Resolution};
pub use self::xml::{Document, Element};
