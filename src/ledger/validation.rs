use chrono::NaiveDate;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::state::NewCustomer;

/// date format used by the form inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// parse a `YYYY-MM-DD` date coming from a form field
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| LedgerError::InvalidDate {
        message: format!("{input:?}: {e}"),
    })
}

/// ledger amounts must be strictly positive
pub fn validate_amount(amount: Money) -> Result<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount { amount })
    }
}

pub fn validate_required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::validation(field, "is required"));
    }
    Ok(())
}

/// loose `nonspace@nonspace` check
pub fn validate_email(email: &str) -> Result<()> {
    validate_required("email", email)?;

    let has_space = email.chars().any(char::is_whitespace);
    let has_inner_at = email
        .char_indices()
        .any(|(i, c)| c == '@' && i > 0 && i + 1 < email.len());
    if has_space || !has_inner_at {
        return Err(LedgerError::validation("email", format!("{email:?} is not an email address")));
    }
    Ok(())
}

pub fn validate_phone(phone: &str, min_length: usize) -> Result<()> {
    validate_required("phone", phone)?;

    if phone.chars().count() < min_length {
        return Err(LedgerError::validation(
            "phone",
            format!("must be at least {min_length} characters"),
        ));
    }
    Ok(())
}

/// every add-customer precondition
pub fn validate_new_customer(fields: &NewCustomer, min_phone_length: usize) -> Result<()> {
    validate_required("name", &fields.name)?;
    validate_email(&fields.email)?;
    validate_phone(&fields.phone, min_phone_length)?;
    validate_required("address", &fields.address)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-04-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 28).unwrap()
        );
        assert!(matches!(parse_date("2025-02-30"), Err(LedgerError::InvalidDate { .. })));
        assert!(matches!(parse_date("28/04/2025"), Err(LedgerError::InvalidDate { .. })));
        assert!(matches!(parse_date(""), Err(LedgerError::InvalidDate { .. })));
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Money::from_major(1)).is_ok());
        assert!(validate_amount(Money::from_minor(1)).is_ok());
        assert_eq!(
            validate_amount(Money::ZERO),
            Err(LedgerError::InvalidAmount { amount: Money::ZERO })
        );
        assert!(validate_amount(-Money::from_major(5)).is_err());

        // sub-paisa amounts read from json round to zero first
        let dust: Money = serde_json::from_str("\"0.001\"").unwrap();
        assert!(matches!(validate_amount(dust), Err(LedgerError::InvalidAmount { .. })));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("suresh@example.com").is_ok());
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("suresh@").is_err());
        assert!(validate_email("suresh example.com").is_err());
        assert!(validate_email("su resh@example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210", 10).is_ok());
        assert!(validate_phone("+91 98765 43210", 10).is_ok());
        assert!(validate_phone("98765", 10).is_err());
        assert!(validate_phone("   ", 1).is_err());
    }

    #[test]
    fn test_validate_new_customer_reports_field() {
        let fields = NewCustomer::new("Meena", "meena@example.com", "9876543210", "  ");
        match validate_new_customer(&fields, 10) {
            Err(LedgerError::Validation { field, .. }) => assert_eq!(field, "address"),
            other => panic!("unexpected {other:?}"),
        }

        let fields = NewCustomer::new("", "meena@example.com", "9876543210", "Cuttack");
        match validate_new_customer(&fields, 10) {
            Err(LedgerError::Validation { field, .. }) => assert_eq!(field, "name"),
            other => panic!("unexpected {other:?}"),
        }

        let fields = NewCustomer::new("Meena", "meena@example.com", "9876543210", "Cuttack");
        assert!(validate_new_customer(&fields, 10).is_ok());
    }
}
