//! `derivedFrom` resolution.

use crate::xml::{Document, Element};
use indexmap::IndexMap;
use log::{info, warn};

/// Children a derived peripheral takes from its base when it has none.
const INHERITED: [&str; 2] = ["addressBlock", "registers"];

/// Peripheral elements with inherited structure copied in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Self-contained peripheral elements in document order.
    pub peripherals: Vec<Element>,
    /// Peripherals whose base could not be found. They are still present in
    /// `peripherals`, unchanged.
    pub missing_bases: Vec<MissingBase>,
}

/// A `derivedFrom` reference to a peripheral that does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingBase {
    /// Name of the derived peripheral, if it has one.
    pub peripheral: Option<String>,
    /// The referenced base name.
    pub derived_from: String,
}

/// Copies `<addressBlock>` and `<registers>` from base peripherals into the
/// peripherals derived from them.
///
/// Bases are looked up in the unmodified document: a base that is itself
/// derived contributes only what it declares on its own. On duplicate names
/// the last declaration is used as the base.
pub fn resolve_inheritance(document: &Document) -> Resolution {
    let index = document
        .peripherals()
        .filter_map(|peripheral| peripheral.child_text("name").map(|name| (name, peripheral)))
        .collect::<IndexMap<_, _>>();
    let mut resolution = Resolution::default();
    for peripheral in document.peripherals() {
        let mut peripheral = peripheral.clone();
        let derived_from = peripheral
            .attribute("derivedFrom")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        if let Some(derived_from) = derived_from {
            if let Some(base) = index.get(derived_from.as_str()) {
                inherit(&mut peripheral, base);
            } else {
                let name = peripheral.child_text("name").map(str::to_owned);
                warn!(
                    "peripheral {} is derived from {derived_from}, which was not found",
                    name.as_deref().unwrap_or("?")
                );
                resolution.missing_bases.push(MissingBase { peripheral: name, derived_from });
            }
        }
        resolution.peripherals.push(peripheral);
    }
    info!("resolved inheritance of {} peripherals", resolution.peripherals.len());
    resolution
}

fn inherit(peripheral: &mut Element, base: &Element) {
    for tag in INHERITED {
        if peripheral.child(tag).is_none() {
            if let Some(child) = base.child(tag) {
                peripheral.push(child.clone());
            }
        }
    }
}
