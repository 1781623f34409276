use crate::error::{AppError, Result};

/// Validation utilities for input sanitization and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate customer name
    pub fn validate_customer_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "customer name cannot be empty".to_string(),
            ));
        }

        if name.chars().count() > 100 {
            return Err(AppError::Validation(
                "customer name too long (max 100 characters)".to_string(),
            ));
        }

        if name.contains('\0') || name.contains('\r') || name.contains('\n') {
            return Err(AppError::Validation(
                "customer name contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate item name
    pub fn validate_item_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "item name cannot be empty".to_string(),
            ));
        }

        if name.chars().count() > 100 {
            return Err(AppError::Validation(
                "item name too long (max 100 characters)".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate phone number format
    pub fn validate_phone(phone: &str) -> Result<()> {
        if phone.trim().is_empty() {
            return Err(AppError::Validation(
                "phone number cannot be empty".to_string(),
            ));
        }

        let digits_only = phone.chars().filter(char::is_ascii_digit).count();
        if !(7..=15).contains(&digits_only) {
            return Err(AppError::Validation(
                "phone number must be between 7 and 15 digits".to_string(),
            ));
        }

        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
        {
            return Err(AppError::Validation(
                "phone number contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a price field (cost, sale, fee, total)
    pub fn validate_price(label: &str, price: f64) -> Result<()> {
        if !price.is_finite() {
            return Err(AppError::Validation(format!("{label} must be a number")));
        }
        if price < 0.0 {
            return Err(AppError::Validation(format!("{label} cannot be negative")));
        }
        Ok(())
    }

    /// Validate an ordered quantity
    pub fn validate_quantity(quantity: f64) -> Result<()> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(AppError::Validation(
                "quantity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a weekly batch key of the form "YYYY-Www"
    pub fn validate_week_key(week_key: &str) -> Result<()> {
        let invalid = || AppError::Validation(format!("invalid week key: {week_key}"));

        let (year, week) = week_key.split_once("-W").ok_or_else(invalid)?;
        if year.len() != 4 || year.parse::<u16>().is_err() {
            return Err(invalid());
        }
        let week: u8 = week.parse().map_err(|_| invalid())?;
        if !(1..=53).contains(&week) {
            return Err(invalid());
        }

        Ok(())
    }
}
