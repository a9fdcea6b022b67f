// VAT calculator - exclusive (add tax on top) or inclusive (extract tax)

use super::Calculator;
use crate::errors::{HubError, Result};
use crate::input::{format_money, format_percent, parse_or_default, parse_required, round2};
use crate::notify::Notification;
use serde::{Deserialize, Serialize};

/// Rate applied when the rate field is left blank (planned Qatar VAT)
pub const DEFAULT_RATE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatMode {
    /// Amount is net; VAT is added on top
    #[default]
    Exclusive,
    /// Amount already includes VAT; VAT is extracted
    Inclusive,
}

impl VatMode {
    pub fn label(&self) -> &'static str {
        match self {
            VatMode::Exclusive => "VAT Exclusive (Add VAT)",
            VatMode::Inclusive => "VAT Inclusive (Extract VAT)",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            VatMode::Exclusive => VatMode::Inclusive,
            VatMode::Inclusive => VatMode::Exclusive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VatInput {
    pub amount: String,
    pub rate: String,
    pub mode: VatMode,
}

impl Default for VatInput {
    fn default() -> Self {
        VatInput {
            amount: String::new(),
            rate: "5".to_string(),
            mode: VatMode::Exclusive,
        }
    }
}

impl VatInput {
    pub fn new(amount: &str, rate: &str, mode: VatMode) -> Self {
        VatInput {
            amount: amount.to_string(),
            rate: rate.to_string(),
            mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatResult {
    pub net: f64,
    pub vat: f64,
    pub total: f64,
    pub rate: f64,
    pub mode: VatMode,
}

pub struct Vat;

impl Vat {
    /// Pure formula, no validation
    pub fn split(amount: f64, rate: f64, mode: VatMode) -> VatResult {
        let (net, vat, total) = match mode {
            VatMode::Exclusive => {
                let vat = amount * rate / 100.0;
                (amount, vat, amount + vat)
            }
            VatMode::Inclusive => {
                let net = amount / (1.0 + rate / 100.0);
                (net, amount - net, amount)
            }
        };

        VatResult {
            net,
            vat,
            total,
            rate,
            mode,
        }
    }
}

impl Calculator for Vat {
    type Input = VatInput;
    type Output = VatResult;

    const NAME: &'static str = "VAT Calculator";

    fn compute(input: &VatInput) -> Result<VatResult> {
        let amount = parse_required("amount", &input.amount)?;
        if amount <= 0.0 {
            return Err(HubError::validation("amount", "must be greater than 0"));
        }

        let rate = parse_or_default("rate", &input.rate, DEFAULT_RATE)?;
        if rate < 0.0 {
            return Err(HubError::validation("rate", "cannot be negative"));
        }

        Ok(Vat::split(amount, rate, input.mode))
    }

    fn summary(output: &VatResult) -> Vec<(&'static str, String)> {
        vec![
            ("Net Amount", format_money(output.net)),
            ("VAT", format!("{} ({})", format_money(output.vat), format_percent(output.rate))),
            ("Total Amount", format_money(output.total)),
        ]
    }

    fn rounded(output: &VatResult) -> VatResult {
        VatResult {
            net: round2(output.net),
            vat: round2(output.vat),
            total: round2(output.total),
            rate: output.rate,
            mode: output.mode,
        }
    }

    fn confirmation(output: &VatResult) -> Notification {
        Notification::info("VAT Calculated", format!("VAT Amount: {}", format_money(output.vat)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(amount: &str, rate: &str, mode: VatMode) -> Result<VatResult> {
        Vat::compute(&VatInput::new(amount, rate, mode))
    }

    #[test]
    fn test_exclusive_scenario() {
        let r = Vat::rounded(&compute("100", "5", VatMode::Exclusive).unwrap());
        assert_eq!(r.net, 100.00);
        assert_eq!(r.vat, 5.00);
        assert_eq!(r.total, 105.00);
    }

    #[test]
    fn test_exclusive_total_is_amount_plus_tax() {
        for (amount, rate) in [(1.0, 0.0), (99.99, 5.0), (12345.67, 15.0), (0.01, 100.0)] {
            let r = Vat::split(amount, rate, VatMode::Exclusive);
            assert!((r.total - (amount + amount * rate / 100.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_inclusive_extracts_tax() {
        let r = Vat::rounded(&compute("105", "5", VatMode::Inclusive).unwrap());
        assert_eq!(r.net, 100.00);
        assert_eq!(r.vat, 5.00);
        assert_eq!(r.total, 105.00);
    }

    #[test]
    fn test_inclusive_round_trips_through_exclusive() {
        for (amount, rate) in [(105.0, 5.0), (250.0, 5.0), (1999.5, 12.5), (7.0, 0.0)] {
            let inclusive = Vat::split(amount, rate, VatMode::Inclusive);
            let exclusive = Vat::split(inclusive.net, rate, VatMode::Exclusive);
            assert!((exclusive.total - inclusive.total).abs() < 0.005);
            assert!((exclusive.vat - inclusive.vat).abs() < 0.005);
        }
    }

    #[test]
    fn test_blank_rate_uses_default() {
        let r = compute("200", "", VatMode::Exclusive).unwrap();
        assert_eq!(r.rate, DEFAULT_RATE);
        assert_eq!(round2(r.vat), 10.0);
    }

    #[test]
    fn test_rejects_missing_or_non_positive_amount() {
        assert!(compute("", "5", VatMode::Exclusive).is_err());
        assert!(compute("0", "5", VatMode::Exclusive).is_err());
        assert!(compute("-10", "5", VatMode::Inclusive).is_err());
        assert!(compute("abc", "5", VatMode::Exclusive).is_err());
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = compute("100", "-5", VatMode::Exclusive).unwrap_err();
        assert_eq!(err.field(), Some("rate"));
    }

    #[test]
    fn test_summary_rows() {
        let r = compute("100", "5", VatMode::Exclusive).unwrap();
        let rows = Vat::summary(&r);
        assert_eq!(rows[0], ("Net Amount", "QAR 100.00".to_string()));
        assert_eq!(rows[2], ("Total Amount", "QAR 105.00".to_string()));
    }
}
