use super::access::{access, Access};
use super::{int, int32, parse_int, text};
use crate::xml::Element;
use serde::{Deserialize, Serialize};

/// Bit-field properties of a register.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Name string used to identify the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// String describing the details of the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The position of the least significant bit of the field within the
    /// register.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_offset: Option<u32>,
    /// The bit-width of the bitfield within the register.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_width: Option<u32>,
    /// The access type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    /// Side effect of a read, e.g. `clear`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_action: Option<String>,
    /// Named values, present only when the field has an
    /// `<enumeratedValues>` block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumerated_values: Option<Vec<EnumeratedValue>>,
}

/// A named value of a field.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnumeratedValue {
    /// Identifier of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Meaning of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The value itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
}

impl Field {
    /// Extracts a field from a `<field>` element.
    pub fn from_element(element: &Element) -> Self {
        let (bit_offset, bit_width) = bit_range(element);
        Self {
            name: text(element, "name"),
            description: text(element, "description"),
            bit_offset,
            bit_width,
            access: access(element),
            read_action: text(element, "readAction"),
            enumerated_values: element.child("enumeratedValues").map(|values| {
                values.children_named("enumeratedValue").map(EnumeratedValue::from_element).collect()
            }),
        }
    }
}

impl EnumeratedValue {
    /// Extracts a value from an `<enumeratedValue>` element.
    pub fn from_element(element: &Element) -> Self {
        Self {
            name: text(element, "name"),
            description: text(element, "description"),
            value: int(element, "value"),
        }
    }
}

/// Resolves the bit position from whichever of the three SVD notations
/// is present: `bitOffset`/`bitWidth`, `lsb`/`msb` or `bitRange`.
fn bit_range(element: &Element) -> (Option<u32>, Option<u32>) {
    let bit_offset = int32(element, "bitOffset");
    let bit_width = int32(element, "bitWidth");
    if bit_offset.is_some() || bit_width.is_some() {
        return (bit_offset, bit_width);
    }
    let lsb_msb = int32(element, "lsb")
        .zip(int32(element, "msb"))
        .or_else(|| element.child_text("bitRange").and_then(parse_bit_range));
    match lsb_msb {
        Some((lsb, msb)) if msb >= lsb => (Some(lsb), Some(msb - lsb + 1)),
        _ => (None, None),
    }
}

fn parse_bit_range(src: &str) -> Option<(u32, u32)> {
    let (msb, lsb) = src.strip_prefix('[')?.strip_suffix(']')?.split_once(':')?;
    let lsb = u32::try_from(parse_int(lsb)?).ok()?;
    let msb = u32::try_from(parse_int(msb)?).ok()?;
    Some((lsb, msb))
}
