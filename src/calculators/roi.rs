// ROI calculator - total return, ROI % and compound annualized ROI

use super::Calculator;
use crate::errors::{HubError, Result};
use crate::input::{format_money, format_percent, parse_optional, parse_required, round2};
use crate::notify::Notification;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiInput {
    pub investment: String,
    pub final_value: String,
    /// Years; optional
    pub time_period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub investment: f64,
    pub final_value: f64,
    pub total_return: f64,
    pub roi_percentage: f64,
    /// Only present when a positive time period was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annualized_roi: Option<f64>,
}

pub struct Roi;

impl Roi {
    pub fn evaluate(investment: f64, final_value: f64, years: Option<f64>) -> RoiResult {
        let total_return = final_value - investment;
        let roi_percentage = total_return / investment * 100.0;

        let annualized_roi = years
            .filter(|y| *y > 0.0)
            .map(|y| ((final_value / investment).powf(1.0 / y) - 1.0) * 100.0);

        RoiResult {
            investment,
            final_value,
            total_return,
            roi_percentage,
            annualized_roi,
        }
    }
}

impl Calculator for Roi {
    type Input = RoiInput;
    type Output = RoiResult;

    const NAME: &'static str = "ROI Calculator";

    fn compute(input: &RoiInput) -> Result<RoiResult> {
        let investment = parse_required("investment", &input.investment)?;
        if investment <= 0.0 {
            return Err(HubError::validation("investment", "must be greater than 0"));
        }
        let final_value = parse_required("final_value", &input.final_value)?;
        let years = parse_optional("time_period", &input.time_period)?;

        let result = Roi::evaluate(investment, final_value, years);
        if result.annualized_roi.is_some_and(|r| !r.is_finite()) {
            // Negative final value with a fractional root
            return Err(HubError::validation(
                "final_value",
                "cannot be annualized when negative",
            ));
        }
        Ok(result)
    }

    fn summary(output: &RoiResult) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Total Return", format_money(output.total_return)),
            ("ROI", format_percent(output.roi_percentage)),
        ];
        if let Some(annualized) = output.annualized_roi {
            rows.push(("Annualized ROI", format_percent(annualized)));
        }
        rows
    }

    fn rounded(output: &RoiResult) -> RoiResult {
        RoiResult {
            investment: round2(output.investment),
            final_value: round2(output.final_value),
            total_return: round2(output.total_return),
            roi_percentage: round2(output.roi_percentage),
            annualized_roi: output.annualized_roi.map(round2),
        }
    }

    fn confirmation(output: &RoiResult) -> Notification {
        Notification::info(
            "ROI Calculated",
            format!("Total ROI: {}", format_percent(output.roi_percentage)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(investment: &str, final_value: &str, period: &str) -> RoiInput {
        RoiInput {
            investment: investment.to_string(),
            final_value: final_value.to_string(),
            time_period: period.to_string(),
        }
    }

    #[test]
    fn test_two_year_scenario() {
        let r = Roi::compute(&input("1000", "1500", "2")).unwrap();
        assert_eq!(r.total_return, 500.0);
        assert_eq!(round2(r.roi_percentage), 50.00);
        let expected = (1.5f64.powf(0.5) - 1.0) * 100.0;
        assert!((r.annualized_roi.unwrap() - expected).abs() < 1e-9);
        assert_eq!(Roi::rounded(&r).annualized_roi, Some(22.47));
    }

    #[test]
    fn test_annualized_omitted_without_period() {
        let r = Roi::compute(&input("1000", "1500", "")).unwrap();
        assert_eq!(r.annualized_roi, None);
        let r = Roi::compute(&input("1000", "1500", "0")).unwrap();
        assert_eq!(r.annualized_roi, None);
        let r = Roi::compute(&input("1000", "1500", "-3")).unwrap();
        assert_eq!(r.annualized_roi, None);
        assert_eq!(Roi::summary(&r).len(), 2);
    }

    #[test]
    fn test_break_even_investment_annualizes_to_zero() {
        let r = Roi::compute(&input("1000", "1000", "5")).unwrap();
        assert_eq!(r.annualized_roi, Some(0.0));
    }

    #[test]
    fn test_total_loss() {
        let r = Roi::compute(&input("1000", "0", "1")).unwrap();
        assert_eq!(r.roi_percentage, -100.0);
        assert_eq!(r.annualized_roi, Some(-100.0));
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Roi::compute(&input("", "1500", "")).unwrap_err().field(),
            Some("investment")
        );
        assert_eq!(
            Roi::compute(&input("0", "1500", "")).unwrap_err().field(),
            Some("investment")
        );
        assert_eq!(
            Roi::compute(&input("1000", "", "")).unwrap_err().field(),
            Some("final_value")
        );
        assert_eq!(
            Roi::compute(&input("1000", "1500", "two")).unwrap_err().field(),
            Some("time_period")
        );
    }

    #[test]
    fn test_negative_final_value_with_period_is_rejected() {
        let err = Roi::compute(&input("1000", "-50", "2")).unwrap_err();
        assert_eq!(err.field(), Some("final_value"));
        // Without a period it is just a large loss
        assert!(Roi::compute(&input("1000", "-50", "")).is_ok());
    }
}
