// Break-even calculator - units and revenue needed to cover fixed costs

use super::Calculator;
use crate::errors::{HubError, Result};
use crate::input::{format_money, format_percent, parse_required, round2};
use crate::notify::Notification;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakEvenInput {
    pub fixed_costs: String,
    pub variable_cost: String,
    pub selling_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    pub contribution_margin: f64,
    pub contribution_margin_ratio: f64,
    /// Whole units; a fractional unit cannot be sold
    pub break_even_units: u64,
    pub break_even_revenue: f64,
}

pub struct BreakEven;

impl BreakEven {
    /// Caller guarantees `selling_price > variable_cost` and `fixed_costs >= 0`.
    /// A unit count beyond `u64` is rejected rather than clamped.
    pub fn analyze(
        fixed_costs: f64,
        variable_cost: f64,
        selling_price: f64,
    ) -> Result<BreakEvenResult> {
        let contribution_margin = selling_price - variable_cost;
        let contribution_margin_ratio = contribution_margin / selling_price * 100.0;

        let units = (fixed_costs / contribution_margin).ceil();
        if !units.is_finite() || units >= u64::MAX as f64 {
            return Err(HubError::validation(
                "fixed_costs",
                "too large for the contribution margin",
            ));
        }
        let break_even_units = units as u64;

        let break_even_revenue = break_even_units as f64 * selling_price;
        if !break_even_revenue.is_finite() {
            return Err(HubError::validation("selling_price", "is too large"));
        }

        Ok(BreakEvenResult {
            contribution_margin,
            contribution_margin_ratio,
            break_even_units,
            break_even_revenue,
        })
    }
}

impl Calculator for BreakEven {
    type Input = BreakEvenInput;
    type Output = BreakEvenResult;

    const NAME: &'static str = "Break-even Calculator";

    fn compute(input: &BreakEvenInput) -> Result<BreakEvenResult> {
        let fixed_costs = parse_required("fixed_costs", &input.fixed_costs)?;
        let variable_cost = parse_required("variable_cost", &input.variable_cost)?;
        let selling_price = parse_required("selling_price", &input.selling_price)?;

        if fixed_costs < 0.0 {
            return Err(HubError::validation("fixed_costs", "cannot be negative"));
        }
        if variable_cost < 0.0 {
            return Err(HubError::validation("variable_cost", "cannot be negative"));
        }
        if selling_price <= variable_cost {
            return Err(HubError::validation(
                "selling_price",
                "must be greater than variable cost",
            ));
        }

        BreakEven::analyze(fixed_costs, variable_cost, selling_price)
    }

    fn summary(output: &BreakEvenResult) -> Vec<(&'static str, String)> {
        vec![
            ("Contribution Margin", format_money(output.contribution_margin)),
            ("Contribution Margin Ratio", format_percent(output.contribution_margin_ratio)),
            ("Break-even Units", format!("{} units", output.break_even_units)),
            ("Break-even Revenue", format_money(output.break_even_revenue)),
        ]
    }

    fn rounded(output: &BreakEvenResult) -> BreakEvenResult {
        BreakEvenResult {
            contribution_margin: round2(output.contribution_margin),
            contribution_margin_ratio: round2(output.contribution_margin_ratio),
            break_even_units: output.break_even_units,
            break_even_revenue: round2(output.break_even_revenue),
        }
    }

    fn confirmation(output: &BreakEvenResult) -> Notification {
        Notification::info(
            "Break-even Analysis Complete",
            format!("Break-even: {} units", output.break_even_units),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(fixed: &str, variable: &str, price: &str) -> BreakEvenInput {
        BreakEvenInput {
            fixed_costs: fixed.to_string(),
            variable_cost: variable.to_string(),
            selling_price: price.to_string(),
        }
    }

    #[test]
    fn test_scenario() {
        let r = BreakEven::rounded(&BreakEven::compute(&input("1000", "4", "10")).unwrap());
        assert_eq!(r.contribution_margin, 6.00);
        assert_eq!(r.contribution_margin_ratio, 60.00);
        assert_eq!(r.break_even_units, 167);
        assert_eq!(r.break_even_revenue, 1670.00);
    }

    #[test]
    fn test_units_round_up() {
        for (fixed, variable, price) in [(1000.0, 4.0, 10.0), (50.0, 1.0, 3.0), (1200.0, 0.0, 12.0)] {
            let r = BreakEven::analyze(fixed, variable, price).unwrap();
            let expected = (fixed / (price - variable)).ceil() as u64;
            assert_eq!(r.break_even_units, expected);
        }
        // Exact division stays exact
        assert_eq!(BreakEven::analyze(1200.0, 0.0, 12.0).unwrap().break_even_units, 100);
    }

    #[test]
    fn test_rejects_non_positive_contribution() {
        let err = BreakEven::compute(&input("1000", "10", "10")).unwrap_err();
        assert_eq!(err.field(), Some("selling_price"));
        assert!(BreakEven::compute(&input("1000", "12", "10")).is_err());
    }

    #[test]
    fn test_rejects_missing_fields() {
        assert_eq!(
            BreakEven::compute(&input("", "4", "10")).unwrap_err().field(),
            Some("fixed_costs")
        );
        assert_eq!(
            BreakEven::compute(&input("1000", "", "10")).unwrap_err().field(),
            Some("variable_cost")
        );
        assert_eq!(
            BreakEven::compute(&input("1000", "4", "")).unwrap_err().field(),
            Some("selling_price")
        );
    }

    #[test]
    fn test_zero_fixed_costs_need_no_sales() {
        let r = BreakEven::compute(&input("0", "4", "10")).unwrap();
        assert_eq!(r.break_even_units, 0);
        assert_eq!(r.break_even_revenue, 0.0);
    }

    #[test]
    fn test_rejects_negative_costs() {
        assert!(BreakEven::compute(&input("-1", "4", "10")).is_err());
        assert!(BreakEven::compute(&input("100", "-4", "10")).is_err());
    }

    #[test]
    fn test_rejects_unit_count_beyond_range() {
        // 1e300 / 0.000001 units would saturate a u64
        let err = BreakEven::compute(&input("1e300", "1", "1.000001")).unwrap_err();
        assert_eq!(err.field(), Some("fixed_costs"));

        let err = BreakEven::analyze(1e19, 0.0, 0.5).unwrap_err();
        assert_eq!(err.field(), Some("fixed_costs"));
    }
}
