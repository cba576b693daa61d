use super::access::{access, Access};
use super::field::Field;
use super::{int, int32, text};
use crate::xml::Element;
use serde::{Deserialize, Serialize};

/// The description of a register.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    /// String to identify the register.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// String describing the details of the register.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The address offset relative to the peripheral base address.
    pub address_offset: u64,
    /// The bit-width of the register.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// The access rights for the register.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    /// The default value for the register at RESET, as written in the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_value: Option<String>,
    /// Bits of the register that have a defined reset value, as written in the
    /// source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_mask: Option<String>,
    /// Bit-fields of the register.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Register {
    /// Extracts a register from a `<register>` element.
    ///
    /// Returns `None` when the element has no resolvable `<addressOffset>`,
    /// which marks it as a placeholder rather than a register instance.
    pub fn from_element(element: &Element) -> Option<Self> {
        let address_offset = int(element, "addressOffset")?;
        Some(Self {
            name: text(element, "name"),
            description: text(element, "description"),
            address_offset,
            size: int32(element, "size"),
            access: access(element),
            reset_value: text(element, "resetValue"),
            reset_mask: text(element, "resetMask"),
            fields: element
                .child("fields")
                .into_iter()
                .flat_map(|fields| fields.children_named("field"))
                .map(Field::from_element)
                .collect(),
        })
    }

    /// Returns a reference to the field with name `name`.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name.as_deref() == Some(name))
    }
}
