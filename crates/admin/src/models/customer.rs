//! Customer and address domain types.

use ims_core::{AddressId, CustomerId, PhoneNumber};

/// A customer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    /// Optional reference into the `address` table (not enforced by the schema).
    pub address_id: Option<AddressId>,
    pub phone: PhoneNumber,
}

impl Customer {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A postal address row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub line_1: String,
    pub line_2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    /// Street lines joined with a comma, skipping an empty second line.
    #[must_use]
    pub fn street(&self) -> String {
        match self.line_2.as_deref().map(str::trim) {
            Some(line_2) if !line_2.is_empty() => format!("{}, {line_2}", self.line_1),
            _ => self.line_1.clone(),
        }
    }

    /// "City, ST 12345".
    #[must_use]
    pub fn locality(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(line_2: Option<&str>) -> Address {
        Address {
            id: AddressId::new(1),
            line_1: "101 N 3rd St".to_string(),
            line_2: line_2.map(String::from),
            city: "Grand Forks".to_string(),
            state: "ND".to_string(),
            zip: "58203".to_string(),
        }
    }

    #[test]
    fn test_street_with_second_line() {
        assert_eq!(address(Some("Apt 4")).street(), "101 N 3rd St, Apt 4");
    }

    #[test]
    fn test_street_skips_blank_second_line() {
        assert_eq!(address(None).street(), "101 N 3rd St");
        assert_eq!(address(Some("  ")).street(), "101 N 3rd St");
    }

    #[test]
    fn test_locality() {
        assert_eq!(address(None).locality(), "Grand Forks, ND 58203");
    }

    #[test]
    fn test_full_name() {
        let customer = Customer {
            id: CustomerId::new(1),
            first_name: "Ana".to_string(),
            last_name: "Garcia".to_string(),
            address_id: None,
            phone: PhoneNumber::new(7_015_551_234),
        };
        assert_eq!(customer.full_name(), "Ana Garcia");
    }
}
