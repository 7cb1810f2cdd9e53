//! Sensor identifiers and family codes.

use std::fmt;

/// Supported 1-Wire family codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// DS18S20 (family code 0x10).
    Ds18s20,
    /// DS18B20 and MAX31850 compatible parts (family code 0x28).
    Ds18b20,
}

impl Family {
    /// All supported families.
    pub const ALL: [Family; 2] = [Family::Ds18s20, Family::Ds18b20];

    /// Directory name prefix the `w1` driver uses for this family.
    pub fn prefix(self) -> &'static str {
        match self {
            Family::Ds18s20 => "10-",
            Family::Ds18b20 => "28-",
        }
    }

    /// Matches a directory entry name against the supported prefixes.
    ///
    /// Names shorter than a prefix never match.
    pub fn from_device_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| name.starts_with(family.prefix()))
    }
}

/// Identifier of one sensor, as named under the bus device directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId {
    name: String,
    family: Family,
}

impl DeviceId {
    /// Builds an identifier from a directory entry name, or `None` if the
    /// name does not carry a supported family prefix.
    pub fn parse(name: &str) -> Option<Self> {
        let family = Family::from_device_name(name)?;
        Some(Self {
            name: name.to_string(),
            family,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> Family {
        self.family
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_family_from_name() {
        assert_eq!(
            Family::from_device_name("28-0316a2795eff"),
            Some(Family::Ds18b20)
        );
        assert_eq!(Family::from_device_name("10-000802b4"), Some(Family::Ds18s20));
        assert_eq!(Family::from_device_name("w1_bus_master1"), None);
        assert_eq!(Family::from_device_name("3b-0000"), None);
    }

    #[test]
    fn test_short_names() {
        assert_eq!(Family::from_device_name(""), None);
        assert_eq!(Family::from_device_name("2"), None);
        assert_eq!(Family::from_device_name("28"), None);
        assert!(DeviceId::parse("10").is_none());
    }

    #[test]
    fn test_device_id() {
        let id = DeviceId::parse("28-").unwrap();
        assert_eq!(id.as_str(), "28-");
        assert_eq!(id.family(), Family::Ds18b20);
        assert_eq!(id.to_string(), "28-");
    }

    #[test]
    fn test_device_id_hash() {
        let mut seen = HashSet::new();
        assert!(seen.insert(DeviceId::parse("28-0316a2795eff").unwrap()));
        assert!(seen.insert(DeviceId::parse("10-000802b4c8e1").unwrap()));
        assert!(!seen.insert(DeviceId::parse("28-0316a2795eff").unwrap()));
        assert_eq!(seen.len(), 2);
    }
}
