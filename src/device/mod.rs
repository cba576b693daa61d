mod access;
mod field;
mod peripheral;
mod register;

pub use self::access::Access;
pub use self::field::{EnumeratedValue, Field};
pub use self::peripheral::{AddressBlock, Peripheral};
pub use self::register::Register;

use crate::xml::Element;

/// Parses an SVD numeric literal.
///
/// A `0x`, `0X` or `#` prefix selects hexadecimal, anything else is read as
/// decimal. Thousands separators are ignored. Returns `None` for empty or
/// unparsable input.
pub fn parse_int(src: &str) -> Option<u64> {
    let src = src.trim().replace(',', "");
    let (digits, radix) = if let Some(hex) =
        src.strip_prefix("0x").or_else(|| src.strip_prefix("0X")).or_else(|| src.strip_prefix('#'))
    {
        (hex, 16)
    } else {
        (src.as_str(), 10)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

fn text(element: &Element, tag: &str) -> Option<String> {
    element.child_text(tag).map(str::to_owned)
}

fn int(element: &Element, tag: &str) -> Option<u64> {
    element.child_text(tag).and_then(parse_int)
}

fn int32(element: &Element, tag: &str) -> Option<u32> {
    int(element, tag).and_then(|value| u32::try_from(value).ok())
}
