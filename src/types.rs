//! Registry of TNV value types.
//!
//! Each [`ValueType`] has an entry in a static table giving the byte that goes
//! on the wire, the width of its value, how the receiver should interpret that
//! value and a name for diagnostics. The wire code is stored in the table
//! rather than derived from the variant's position, so reordering the enum
//! does not change what is transmitted.
//!
//! Adding a type means adding a variant, a table row and a match arm in
//! [`ValueType::info`]. The receiver needs the same row to know how many bytes
//! follow the header.

use crate::encoding::Signedness;

/// Symbolic type of a TNV value.
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum ValueType {
    /// Firmware or payload format version, `uint8`.
    Version,
    /// Soil temperature, `int16` (typically hundredths of a degree).
    SoilTemperature,
    /// Soil relative humidity, `uint16`.
    SoilHumidity,
    /// Volumetric water content, `uint16`.
    VolumetricWaterContent,
}

/// One row of the type registry.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TypeInfo {
    /// The variant this row describes.
    pub value_type: ValueType,
    /// Byte transmitted as the first byte of the TNV header.
    pub wire_code: u8,
    /// Width in bytes of the value that follows the header.
    pub width: u8,
    /// How the value bytes are interpreted.
    pub signedness: Signedness,
    /// Name used in diagnostics.
    pub name: &'static str,
}

static REGISTRY: [TypeInfo; 4] = [
    TypeInfo {
        value_type: ValueType::Version,
        wire_code: 0x00,
        width: 1,
        signedness: Signedness::Unsigned,
        name: "VERSION",
    },
    TypeInfo {
        value_type: ValueType::SoilTemperature,
        wire_code: 0x01,
        width: 2,
        signedness: Signedness::Signed,
        name: "SOIL_TEMPERATURE",
    },
    TypeInfo {
        value_type: ValueType::SoilHumidity,
        wire_code: 0x02,
        width: 2,
        signedness: Signedness::Unsigned,
        name: "SOIL_HUMIDITY",
    },
    TypeInfo {
        value_type: ValueType::VolumetricWaterContent,
        wire_code: 0x03,
        width: 2,
        signedness: Signedness::Unsigned,
        name: "VOLUMETRIC_WATER_CONTENT",
    },
];

impl ValueType {
    /// Every registered type, in table order.
    pub const ALL: [ValueType; 4] = [
        ValueType::Version,
        ValueType::SoilTemperature,
        ValueType::SoilHumidity,
        ValueType::VolumetricWaterContent,
    ];

    /// The registry row for this type.
    pub fn info(self) -> &'static TypeInfo {
        match self {
            ValueType::Version => &REGISTRY[0],
            ValueType::SoilTemperature => &REGISTRY[1],
            ValueType::SoilHumidity => &REGISTRY[2],
            ValueType::VolumetricWaterContent => &REGISTRY[3],
        }
    }

    /// Byte transmitted to identify this type.
    pub fn wire_code(self) -> u8 {
        self.info().wire_code
    }

    /// Width in bytes of values of this type.
    pub fn width(self) -> u8 {
        self.info().width
    }

    /// Interpretation of values of this type.
    pub fn signedness(self) -> Signedness {
        self.info().signedness
    }

    /// Diagnostic name, e.g. `SOIL_TEMPERATURE`.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Looks up the type transmitted as `code`.
    pub fn from_wire_code(code: u8) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|info| info.wire_code == code)
            .map(|info| info.value_type)
    }
}

/// Width of the value that follows a TNV header carrying `code`.
///
/// Returns `None` for codes that are not in the registry.
pub fn width_of(code: u8) -> Option<u8> {
    ValueType::from_wire_code(code).map(ValueType::width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_rows_match_variants() {
        for ty in ValueType::ALL {
            assert_eq!(ty.info().value_type, ty);
        }
    }

    #[test]
    fn test_wire_codes_are_unique() {
        for (i, a) in REGISTRY.iter().enumerate() {
            for b in &REGISTRY[i + 1..] {
                assert_ne!(a.wire_code, b.wire_code);
            }
        }
    }

    #[test]
    fn test_wire_code_lookup_round_trips() {
        for ty in ValueType::ALL {
            assert_eq!(ValueType::from_wire_code(ty.wire_code()), Some(ty));
        }
        assert_eq!(ValueType::from_wire_code(0x7f), None);
    }

    #[test]
    fn test_known_widths_and_codes() {
        assert_eq!(ValueType::Version.wire_code(), 0x00);
        assert_eq!(ValueType::VolumetricWaterContent.wire_code(), 0x03);
        assert_eq!(width_of(0x00), Some(1));
        assert_eq!(width_of(0x01), Some(2));
        assert_eq!(width_of(0x02), Some(2));
        assert_eq!(width_of(0x03), Some(2));
        assert_eq!(width_of(0xff), None);
    }

    #[test]
    fn test_widths_are_scalar_widths() {
        for ty in ValueType::ALL {
            assert!(matches!(ty.width(), 1 | 2 | 4));
        }
    }

    #[test]
    fn test_soil_temperature_is_signed() {
        assert_eq!(ValueType::SoilTemperature.signedness(), Signedness::Signed);
        assert_eq!(ValueType::SoilHumidity.signedness(), Signedness::Unsigned);
        assert_eq!(ValueType::SoilTemperature.name(), "SOIL_TEMPERATURE");
    }
}
