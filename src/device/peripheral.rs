use super::register::Register;
use super::text;
use crate::xml::Element;
use log::debug;
use serde::{Deserialize, Serialize};

/// Peripheral of the device.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Peripheral {
    /// The string identifies the peripheral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The string provides an overview of the purpose and functionality of the
    /// peripheral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the group the peripheral belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Lowest address reserved or used by the peripheral, as written in the
    /// source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_address: Option<String>,
    /// Registers in document order.
    #[serde(default)]
    pub registers: Vec<Register>,
    /// The memory region occupied by the peripheral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_block: Option<AddressBlock>,
}

/// Address range of a peripheral, each bound kept as written in the source.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressBlock {
    /// Start of the block relative to the base address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    /// Number of address units in the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// What the block holds, e.g. `registers`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl Peripheral {
    /// Extracts a peripheral from a `<peripheral>` element.
    ///
    /// Registers are taken from the `<registers>` child, or from the element
    /// itself when there is no such container.
    pub fn from_element(element: &Element) -> Self {
        let name = text(element, "name");
        let container = element.child("registers").unwrap_or(element);
        let registers = container
            .children_named("register")
            .filter_map(|register| {
                let extracted = Register::from_element(register);
                if extracted.is_none() {
                    debug!(
                        "{}: skipping register `{}` without address offset",
                        name.as_deref().unwrap_or("?"),
                        register.child_text("name").unwrap_or("?")
                    );
                }
                extracted
            })
            .collect();
        Self {
            description: text(element, "description"),
            group_name: text(element, "groupName"),
            base_address: text(element, "baseAddress"),
            registers,
            address_block: element.child("addressBlock").map(AddressBlock::from_element),
            name,
        }
    }

    /// Returns a reference to the register with name `name`.
    pub fn register(&self, name: &str) -> Option<&Register> {
        self.registers.iter().find(|register| register.name.as_deref() == Some(name))
    }
}

impl AddressBlock {
    /// Extracts an `<addressBlock>` element.
    pub fn from_element(element: &Element) -> Self {
        Self {
            offset: text(element, "offset"),
            size: text(element, "size"),
            usage: text(element, "usage"),
        }
    }
}
