//! Field validators for registration and clinic data.
//!
//! Each validator returns the offending rule as the error message; the API
//! layer wraps it into a 400 response.

/// Letters and spaces only (names, city parts). Unicode letters allowed.
pub fn validate_letters(field: &str, value: &str) -> Result<(), String> {
    let mut words = value.split_whitespace();
    let non_empty = words.clone().next().is_some();
    let letters_only = words.all(|w| w.chars().all(|c| c.is_alphabetic()));

    if non_empty && letters_only {
        Ok(())
    } else {
        Err(format!("{} must contain only letters and spaces", field))
    }
}

/// Phone number: '+', country code and subscriber digits, e.g. +48123456789
pub fn validate_phone_number(value: &str) -> Result<(), String> {
    let digits = match value.strip_prefix('+') {
        Some(rest) => rest,
        None => return Err("Phone number must start with '+', e.g. +48123456789".to_string()),
    };

    if digits.len() >= 7 && digits.len() <= 15 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Phone number must contain a country code and digits, e.g. +48123456789".to_string())
    }
}

/// Postal code with city: "NN-NNN City", e.g. "00-001 Warszawa"
pub fn validate_postal_code(value: &str) -> Result<(), String> {
    let error = || "Postal code must be in the format 'NN-NNN City', e.g. '00-001 Warszawa'".to_string();

    let mut parts = value.splitn(2, ' ');
    let code = parts.next().unwrap_or_default();
    let city = parts.next().unwrap_or_default();

    let code_bytes = code.as_bytes();
    let code_ok = code_bytes.len() == 6
        && code_bytes[2] == b'-'
        && code_bytes[..2].iter().all(u8::is_ascii_digit)
        && code_bytes[3..].iter().all(u8::is_ascii_digit);

    if !code_ok {
        return Err(error());
    }

    validate_letters("City", city).map_err(|_| error())
}

/// Animal microchip number: exactly 15 digits
pub fn validate_chip_number(value: &str) -> Result<(), String> {
    if value.len() == 15 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Chip number must consist of exactly 15 digits".to_string())
    }
}

/// Veterinary permit number: exactly 7 digits
pub fn validate_permit_number(value: &str) -> Result<(), String> {
    if value.len() == 7 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Permit number must consist of exactly 7 digits".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_letters() {
        assert!(validate_letters("First name", "Anna").is_ok());
        assert!(validate_letters("First name", "Anna Maria").is_ok());
        assert!(validate_letters("First name", "Łukasz").is_ok());

        assert!(validate_letters("First name", "").is_err());
        assert!(validate_letters("First name", "   ").is_err());
        assert!(validate_letters("First name", "Anna2").is_err());
        assert!(validate_letters("First name", "Anna!").is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("+48123456789").is_ok());
        assert!(validate_phone_number("+1555123456").is_ok());

        assert!(validate_phone_number("48123456789").is_err());
        assert!(validate_phone_number("+48 123 456").is_err());
        assert!(validate_phone_number("+123").is_err());
        assert!(validate_phone_number("+abcdefgh").is_err());
    }

    #[test]
    fn test_validate_postal_code() {
        assert!(validate_postal_code("00-001 Warszawa").is_ok());
        assert!(validate_postal_code("30-059 Kraków").is_ok());
        assert!(validate_postal_code("00-001 Stalowa Wola").is_ok());

        assert!(validate_postal_code("00001 Warszawa").is_err());
        assert!(validate_postal_code("00-001").is_err());
        assert!(validate_postal_code("ab-cde Warszawa").is_err());
    }

    #[test]
    fn test_validate_chip_number() {
        assert!(validate_chip_number("616093900123456").is_ok());

        assert!(validate_chip_number("12345").is_err());
        assert!(validate_chip_number("61609390012345a").is_err());
    }

    #[test]
    fn test_validate_permit_number() {
        assert!(validate_permit_number("1234567").is_ok());

        assert!(validate_permit_number("123456").is_err());
        assert!(validate_permit_number("12345678").is_err());
        assert!(validate_permit_number("12345a7").is_err());
    }
}
