//! Per-field validation rules.
//!
//! Each rule takes a raw value and either returns the normalized value or a
//! message describing the violated rule. Rules never panic; callers feed the
//! result through [`crate::ValidationReport::capture`] to aggregate
//! failures.

use landgrid_types::{Facing, ObjectId};
use rust_decimal::Decimal;
use url::Url;

/// Plot number: trimmed, 1-50 chars, letters/digits/hyphen/slash/space.
pub fn plot_number(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > 50 {
        return Err("plot number must be 1-50 characters".to_string());
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '/' || c.is_whitespace());
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err("plot number may only contain letters, digits, hyphens, slashes and spaces"
            .to_string())
    }
}

/// Plot area in square feet: inclusive range [50, 100000].
pub fn area(value: Decimal) -> Result<Decimal, String> {
    decimal_range(value, 50, 100_000, "area (sq ft)")
}

/// Price per square foot: inclusive range [100, 50000].
pub fn price_per_sq_ft(value: Decimal) -> Result<Decimal, String> {
    decimal_range(value, 100, 50_000, "price per sq ft")
}

/// Road width in feet: inclusive range [0, 200].
pub fn road_width(value: Decimal) -> Result<Decimal, String> {
    decimal_range(value, 0, 200, "road width")
}

/// Facing: one of the eight compass directions.
pub fn facing(raw: &str) -> Result<Facing, String> {
    raw.parse().map_err(|()| {
        format!(
            "facing must be one of: {}",
            Facing::ALL.map(|f| f.as_str()).join(", ")
        )
    })
}

/// One feature entry: at most 100 chars, letters/digits/space/hyphen/comma/period.
pub fn feature(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.len() > 100 {
        return Err("feature must be at most 100 characters".to_string());
    }
    if listing_charset(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err("feature may only contain letters, digits, spaces, hyphens, commas and periods"
            .to_string())
    }
}

/// One image entry: a well-formed http(s) URL.
pub fn image_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| "image must be a well-formed URL".to_string())?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err("image URL must be http(s) with a host".to_string());
    }
    Ok(trimmed.to_string())
}

/// Colony name: trimmed, 2-100 chars, letters/digits/space/hyphen/comma/period.
pub fn colony_name(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.len() < 2 || trimmed.len() > 100 {
        return Err("colony name must be 2-100 characters".to_string());
    }
    if listing_charset(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err("colony name may only contain letters, digits, spaces, hyphens, commas and periods"
            .to_string())
    }
}

/// Free-text city name: trimmed, 2-50 chars, letters/space/hyphen/period.
pub fn city_name(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.len() < 2 || trimmed.len() > 50 {
        return Err("city name must be 2-50 characters".to_string());
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == '.');
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err("city name may only contain letters, spaces, hyphens and periods".to_string())
    }
}

/// Email: basic syntax check, lowercased, at most 100 chars.
pub fn email(raw: &str) -> Result<String, String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.len() > 100 {
        return Err("email must be at most 100 characters".to_string());
    }
    let Some((local, domain)) = normalized.split_once('@') else {
        return Err("email must contain a single '@'".to_string());
    };
    let local_ok = !local.is_empty() && !local.contains(['@', ' ']);
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(['@', ' '])
        && !domain.is_empty();
    if local_ok && domain_ok {
        Ok(normalized)
    } else {
        Err("email is not valid".to_string())
    }
}

/// Password: 6-100 chars with at least one lowercase, one uppercase, one digit.
///
/// The raw password is returned for the out-of-scope hashing collaborator;
/// it is never stored as-is.
pub fn password(raw: &str) -> Result<String, String> {
    if raw.len() < 6 || raw.len() > 100 {
        return Err("password must be 6-100 characters".to_string());
    }
    let lower = raw.chars().any(|c| c.is_ascii_lowercase());
    let upper = raw.chars().any(|c| c.is_ascii_uppercase());
    let digit = raw.chars().any(|c| c.is_ascii_digit());
    if lower && upper && digit {
        Ok(raw.to_string())
    } else {
        Err("password must contain a lowercase letter, an uppercase letter and a digit"
            .to_string())
    }
}

/// Phone: digits-only extraction, then reassembly.
///
/// - exactly 10 digits: prefixed with the `+91` country code
/// - 10-15 digits: prefixed with `+`
/// - anything else: invalid
pub fn phone(raw: &str) -> Result<String, String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => Ok(format!("+91{digits}")),
        11..=15 => Ok(format!("+{digits}")),
        _ => Err("phone must contain 10-15 digits".to_string()),
    }
}

/// Reference field: a 24-character hexadecimal identifier.
pub fn object_id(raw: &str) -> Result<ObjectId, String> {
    ObjectId::parse(raw).map_err(|err| err.to_string())
}

/// Shared charset for names/features: letters, digits, space, hyphen,
/// comma, period.
fn listing_charset(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | ',' | '.'))
}

fn decimal_range(value: Decimal, min: u32, max: u32, what: &str) -> Result<Decimal, String> {
    if value >= Decimal::from(min) && value <= Decimal::from(max) {
        Ok(value)
    } else {
        Err(format!("{what} must be between {min} and {max}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("A-12", Some("A-12"))]
    #[test_case("  B/7 East  ", Some("B/7 East") ; "trimmed")]
    #[test_case("", None ; "empty")]
    #[test_case("A#12", None ; "bad charset")]
    fn test_plot_number(raw: &str, expected: Option<&str>) {
        assert_eq!(plot_number(raw).ok().as_deref(), expected);
    }

    #[test]
    fn test_plot_number_length_bounds() {
        assert!(plot_number(&"9".repeat(50)).is_ok());
        assert!(plot_number(&"9".repeat(51)).is_err());
    }

    #[test_case(50, true ; "lower bound inclusive")]
    #[test_case(100_000, true ; "upper bound inclusive")]
    #[test_case(49, false)]
    #[test_case(100_001, false)]
    fn test_area_range(value: u32, ok: bool) {
        assert_eq!(area(Decimal::from(value)).is_ok(), ok);
    }

    #[test]
    fn test_price_and_road_width_ranges() {
        assert!(price_per_sq_ft(Decimal::from(100)).is_ok());
        assert!(price_per_sq_ft(Decimal::from(99)).is_err());
        assert!(price_per_sq_ft(Decimal::from(50_001)).is_err());
        assert!(road_width(Decimal::ZERO).is_ok());
        assert!(road_width(Decimal::from(200)).is_ok());
        assert!(road_width(Decimal::from(201)).is_err());
        assert!(road_width(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_facing_enum() {
        assert_eq!(facing("north-east").unwrap(), Facing::NorthEast);
        assert!(facing("skyward").is_err());
    }

    #[test]
    fn test_feature_rule() {
        assert_eq!(feature("Corner plot, park-facing.").unwrap(),
            "Corner plot, park-facing.");
        assert!(feature(&"x".repeat(101)).is_err());
        assert!(feature("no <script> here").is_err());
    }

    #[test_case("https://cdn.example.com/p/1.jpg", true)]
    #[test_case("http://cdn.example.com/p/1.jpg", true)]
    #[test_case("ftp://cdn.example.com/p/1.jpg", false ; "wrong scheme")]
    #[test_case("not a url", false)]
    #[test_case("/relative/path.jpg", false)]
    fn test_image_url(raw: &str, ok: bool) {
        assert_eq!(image_url(raw).is_ok(), ok);
    }

    #[test]
    fn test_colony_and_city_names() {
        assert!(colony_name("Green Meadows Phase 2").is_ok());
        assert!(colony_name("G").is_err());
        assert!(colony_name("Bad<Name>").is_err());
        assert!(city_name("New Delhi").is_ok());
        assert!(city_name("Sector 9").is_err()); // digits not allowed here
    }

    #[test]
    fn test_email_normalization() {
        assert_eq!(email("  User@Example.COM ").unwrap(), "user@example.com");
        assert!(email("nodomain@").is_err());
        assert!(email("no-at-sign.example.com").is_err());
        assert!(email("two@@example.com").is_err());
        assert!(email("dot@example").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(password("Abc123").is_ok());
        assert!(password("abc123").is_err()); // no uppercase
        assert!(password("ABC123").is_err()); // no lowercase
        assert!(password("Abcdef").is_err()); // no digit
        assert!(password("Ab1").is_err()); // too short
    }

    #[test]
    fn test_phone_extraction_and_prefixing() {
        assert_eq!(phone("9876543210").unwrap(), "+919876543210");
        assert_eq!(phone("(987) 654-3210").unwrap(), "+919876543210");
        assert_eq!(phone("+14155552671").unwrap(), "+14155552671");
        assert!(phone("12345").is_err());
        assert!(phone("").is_err());
    }

    #[test]
    fn test_object_id_rule() {
        assert!(object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(object_id("not-an-id").is_err());
    }
}
