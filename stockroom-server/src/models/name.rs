//! Record name validation
//!
//! Item and store names are stored exactly as supplied so that a lookup by
//! the same string finds the record again. Only the empty name is refused.

use super::ValidationError;

/// Validated item or store name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordName(String);

impl RecordName {
    /// Create a new record name.
    ///
    /// The name is kept verbatim, surrounding whitespace included.
    ///
    /// # Example
    /// ```
    /// use stockroom_server::models::RecordName;
    ///
    /// assert!(RecordName::new("Hammer").is_ok());
    /// assert_eq!(RecordName::new(" Hammer ").unwrap().as_str(), " Hammer ");
    /// assert!(RecordName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_surrounding_whitespace() {
        let name = RecordName::new("  Main Street Store\t").unwrap();
        assert_eq!(name.as_str(), "  Main Street Store\t");
    }

    #[test]
    fn rejects_empty() {
        let err = RecordName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn long_names_are_accepted() {
        let name = "n".repeat(4096);
        assert_eq!(RecordName::new(&name).unwrap().into_string(), name);
    }
}
