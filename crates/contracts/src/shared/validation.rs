//! Validation rules for form fields

use chrono::{NaiveDate, NaiveTime};

/// Формат даты, принимаемый формами (`<input type="date">`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Формат времени, принимаемый формами (`<input type="time">`)
pub const TIME_FORMAT: &str = "%H:%M";

/// Expected textual shape of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
}

impl ValueFormat {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            ValueFormat::Date => NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok(),
            ValueFormat::Time => NaiveTime::parse_from_str(value, TIME_FORMAT).is_ok(),
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            ValueFormat::Date => "YYYY-MM-DD",
            ValueFormat::Time => "HH:MM",
        }
    }
}

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub format: Option<ValueFormat>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            format: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            format: None,
        }
    }

    pub const fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Validate a string value against the rules
    ///
    /// An optional blank value passes: format is only checked on non-blank input.
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            if self.required {
                return Err(format!("{} is required", field_label));
            }
            return Ok(());
        }

        if let Some(format) = self.format {
            if !format.matches(trimmed) {
                return Err(format!("{} must be a valid {}", field_label, format.hint()));
            }
        }

        Ok(())
    }

    /// Validate a numeric value: it must be finite
    fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a number", field_label));
        }

        Ok(())
    }

    /// Parse raw form input as a number and validate it
    ///
    /// Returns `Ok(None)` for a blank optional value.
    pub fn parse_number(&self, raw: &str, field_label: &str) -> Result<Option<f64>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            if self.required {
                return Err(format!("{} is required", field_label));
            }
            return Ok(None);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| format!("{} must be a number", field_label))?;
        self.validate_number(value, field_label)?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("   ", "Notes").is_err());
        assert!(rules.validate_string("ok", "Notes").is_ok());
    }

    #[test]
    fn test_optional_blank_skips_format() {
        let rules = ValidationRules::none().with_format(ValueFormat::Date);
        assert!(rules.validate_string("", "Date").is_ok());
        assert!(rules.validate_string("2024-02-30", "Date").is_err());
        assert!(rules.validate_string("2024-02-29", "Date").is_ok());
    }

    #[test]
    fn test_time_format() {
        let rules = ValidationRules::required().with_format(ValueFormat::Time);
        assert!(rules.validate_string("09:00", "Time").is_ok());
        assert!(rules.validate_string("25:00", "Time").is_err());
        assert!(rules.validate_string("9am", "Time").is_err());
    }

    #[test]
    fn test_parse_number() {
        let rules = ValidationRules::required();
        assert_eq!(rules.parse_number("100000", "Value"), Ok(Some(100000.0)));
        assert_eq!(rules.parse_number(" 12.5 ", "Value"), Ok(Some(12.5)));
        assert!(rules.parse_number("", "Value").is_err());
        assert!(rules.parse_number("abc", "Value").is_err());
        assert!(rules.parse_number("NaN", "Value").is_err());
        assert_eq!(ValidationRules::none().parse_number("", "Value"), Ok(None));
    }
}
