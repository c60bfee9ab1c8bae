use url::Url;

use crate::errors::{Error, Result};

/// 3-20 chars: ASCII letters, digits, hyphen, underscore. Checked before
/// normalization so mixed-case input passes.
pub fn validate_merchant_id(candidate: &str) -> Result<()> {
    if candidate.len() < 3 || candidate.len() > 20 {
        return Err(Error::InvalidMerchantId);
    }

    if !candidate
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(Error::InvalidMerchantId);
    }

    Ok(())
}

/// Trim, validate, lower-case: the storage form of a merchant id.
pub fn normalize_merchant_id(candidate: &str) -> Result<String> {
    let candidate = candidate.trim();
    validate_merchant_id(candidate)?;
    Ok(candidate.to_lowercase())
}

/// Absolute URL with a scheme; `field` names the offender in the error.
pub fn validate_url(field: &'static str, value: &str) -> Result<()> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| Error::InvalidUrl(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merchant_id_length_bounds() {
        assert!(validate_merchant_id("ab").is_err());
        assert!(validate_merchant_id("abc").is_ok());
        assert!(validate_merchant_id(&"a".repeat(20)).is_ok());
        assert!(validate_merchant_id(&"a".repeat(21)).is_err());
    }

    #[test]
    fn merchant_id_charset() {
        assert!(validate_merchant_id("My_Shop-1").is_ok());
        assert!(validate_merchant_id("shop.name").is_err());
        assert!(validate_merchant_id("shop name").is_err());
        assert!(validate_merchant_id("商家123").is_err());
    }

    #[test]
    fn normalization_lower_cases() {
        assert_eq!(normalize_merchant_id("My_Shop-1").unwrap(), "my_shop-1");
        assert_eq!(normalize_merchant_id("  Demo  ").unwrap(), "demo");
    }

    #[test]
    fn urls_must_be_absolute() {
        assert!(validate_url("shopUrl", "https://a.example").is_ok());
        assert!(validate_url("shopUrl", "not-a-url").is_err());
        assert!(validate_url("shopUrl", "/relative/path").is_err());
    }
}
