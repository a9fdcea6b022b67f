// 🔢 Form Field Parsing - raw text fields → numbers
// Every calculator input arrives as the text the user typed. Blank fields only
// fall back to a value where a default is declared; unparsable text is always
// rejected, never silently read as zero.

use crate::errors::{HubError, Result};

/// Currency label used for every monetary figure
pub const CURRENCY: &str = "QAR";

/// Parse a field that must be present
pub fn parse_required(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HubError::validation(field, "is required"));
    }
    parse_number(field, trimmed)
}

/// Parse a field that takes `default` when left blank
pub fn parse_or_default(field: &str, raw: &str, default: f64) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    parse_number(field, trimmed)
}

/// Parse a field that may be left blank entirely
pub fn parse_optional(field: &str, raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_number(field, trimmed).map(Some)
}

fn parse_number(field: &str, text: &str) -> Result<f64> {
    // Allow "1,250.00" as typed in most locales here
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(HubError::validation(field, "must be a number")),
    }
}

/// Round to 2 decimal places (half away from zero). Display only.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format an amount as "QAR 1,234.56"
pub fn format_money(value: f64) -> String {
    let rounded = round2(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{} {}", sign, CURRENCY, group_thousands(rounded.abs()))
}

/// Format a percentage as "12.34%"
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", round2(value))
}

fn group_thousands(value: f64) -> String {
    let text = format!("{:.2}", value);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}.{}", grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let err = parse_required("amount", "   ").unwrap_err();
        assert_eq!(err, HubError::validation("amount", "is required"));
    }

    #[test]
    fn test_required_rejects_garbage() {
        let err = parse_required("amount", "12abc").unwrap_err();
        assert_eq!(err.field(), Some("amount"));
        assert!(parse_required("amount", "NaN").is_err());
        assert!(parse_required("amount", "inf").is_err());
    }

    #[test]
    fn test_required_accepts_grouped_and_negative() {
        assert_eq!(parse_required("x", "1,250.50").unwrap(), 1250.5);
        assert_eq!(parse_required("x", " -42 ").unwrap(), -42.0);
    }

    #[test]
    fn test_default_only_applies_to_blank() {
        assert_eq!(parse_or_default("rate", "", 5.0).unwrap(), 5.0);
        assert_eq!(parse_or_default("rate", "15", 5.0).unwrap(), 15.0);
        assert!(parse_or_default("rate", "five", 5.0).is_err());
    }

    #[test]
    fn test_optional() {
        assert_eq!(parse_optional("period", "").unwrap(), None);
        assert_eq!(parse_optional("period", "2").unwrap(), Some(2.0));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(22.474487), 22.47);
        assert_eq!(round2(2.346), 2.35);
        assert_eq!(round2(-7.125), -7.13);
        assert_eq!(round2(-0.001), 0.0);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1670.0), "QAR 1,670.00");
        assert_eq!(format_money(1234567.891), "QAR 1,234,567.89");
        assert_eq!(format_money(-500.5), "-QAR 500.50");
        assert_eq!(format_money(999.0), "QAR 999.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(50.0), "50.00%");
        assert_eq!(format_percent(22.4744), "22.47%");
    }
}
