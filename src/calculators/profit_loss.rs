// Profit & Loss calculator - gross, operating and net profit with margins
// Blank fields count as zero; the calculation always produces a result.

use super::Calculator;
use crate::errors::Result;
use crate::input::{format_money, format_percent, parse_or_default, round2};
use crate::notify::Notification;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitLossInput {
    pub revenue: String,
    pub cogs: String,
    pub expenses: String,
    pub other_income: String,
    pub other_expenses: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLossResult {
    pub revenue: f64,
    pub gross_profit: f64,
    pub operating_profit: f64,
    pub net_profit: f64,
    pub gross_margin: f64,
    pub operating_margin: f64,
    pub net_margin: f64,
}

pub struct ProfitLoss;

impl ProfitLoss {
    pub fn statement(
        revenue: f64,
        cogs: f64,
        expenses: f64,
        other_income: f64,
        other_expenses: f64,
    ) -> ProfitLossResult {
        let gross_profit = revenue - cogs;
        let operating_profit = gross_profit - expenses;
        let net_profit = operating_profit + other_income - other_expenses;

        ProfitLossResult {
            revenue,
            gross_profit,
            operating_profit,
            net_profit,
            gross_margin: margin(gross_profit, revenue),
            operating_margin: margin(operating_profit, revenue),
            net_margin: margin(net_profit, revenue),
        }
    }
}

/// Profit as a percentage of revenue; 0 when there is no positive revenue
fn margin(profit: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    }
}

impl Calculator for ProfitLoss {
    type Input = ProfitLossInput;
    type Output = ProfitLossResult;

    const NAME: &'static str = "Profit & Loss Calculator";

    fn compute(input: &ProfitLossInput) -> Result<ProfitLossResult> {
        Ok(ProfitLoss::statement(
            parse_or_default("revenue", &input.revenue, 0.0)?,
            parse_or_default("cogs", &input.cogs, 0.0)?,
            parse_or_default("expenses", &input.expenses, 0.0)?,
            parse_or_default("other_income", &input.other_income, 0.0)?,
            parse_or_default("other_expenses", &input.other_expenses, 0.0)?,
        ))
    }

    fn summary(output: &ProfitLossResult) -> Vec<(&'static str, String)> {
        vec![
            ("Gross Profit", format_money(output.gross_profit)),
            ("Gross Margin", format_percent(output.gross_margin)),
            ("Operating Profit", format_money(output.operating_profit)),
            ("Operating Margin", format_percent(output.operating_margin)),
            ("Net Profit", format_money(output.net_profit)),
            ("Net Margin", format_percent(output.net_margin)),
        ]
    }

    fn rounded(output: &ProfitLossResult) -> ProfitLossResult {
        ProfitLossResult {
            revenue: round2(output.revenue),
            gross_profit: round2(output.gross_profit),
            operating_profit: round2(output.operating_profit),
            net_profit: round2(output.net_profit),
            gross_margin: round2(output.gross_margin),
            operating_margin: round2(output.operating_margin),
            net_margin: round2(output.net_margin),
        }
    }

    fn confirmation(output: &ProfitLossResult) -> Notification {
        Notification::info(
            "Profit Analysis Complete",
            format!(
                "Net Profit: {} ({})",
                format_money(output.net_profit),
                format_percent(output.net_margin)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(fields: [&str; 5]) -> ProfitLossInput {
        ProfitLossInput {
            revenue: fields[0].to_string(),
            cogs: fields[1].to_string(),
            expenses: fields[2].to_string(),
            other_income: fields[3].to_string(),
            other_expenses: fields[4].to_string(),
        }
    }

    #[test]
    fn test_full_statement() {
        let r = ProfitLoss::compute(&input(["100000", "40000", "30000", "5000", "2000"])).unwrap();
        assert_eq!(r.gross_profit, 60000.0);
        assert_eq!(r.operating_profit, 30000.0);
        assert_eq!(r.net_profit, 33000.0);
        assert_eq!(r.gross_margin, 60.0);
        assert_eq!(r.operating_margin, 30.0);
        assert_eq!(r.net_margin, 33.0);
    }

    #[test]
    fn test_net_profit_identity_including_negatives() {
        let cases = [
            (100.0, 30.0, 20.0, 5.0, 1.0),
            (-500.0, 100.0, 0.0, 0.0, 50.0),
            (0.0, -10.0, -20.0, -5.0, -2.5),
            (1e9, 3.3e8, 1.1e8, 0.0, 7.7e6),
        ];
        for (rev, cogs, exp, oi, oe) in cases {
            let r = ProfitLoss::statement(rev, cogs, exp, oi, oe);
            let expected = rev - cogs - exp + oi - oe;
            assert!((r.net_profit - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_revenue_has_zero_margins() {
        let r = ProfitLoss::compute(&input(["", "100", "50", "", ""])).unwrap();
        assert_eq!(r.gross_margin, 0.0);
        assert_eq!(r.operating_margin, 0.0);
        assert_eq!(r.net_margin, 0.0);
        assert_eq!(r.net_profit, -150.0);
    }

    #[test]
    fn test_negative_revenue_is_tolerated() {
        let r = ProfitLoss::compute(&input(["-100", "", "", "", ""])).unwrap();
        assert_eq!(r.net_profit, -100.0);
        assert_eq!(r.net_margin, 0.0);
    }

    #[test]
    fn test_blank_form_computes_zero() {
        let r = ProfitLoss::compute(&ProfitLossInput::default()).unwrap();
        assert_eq!(r.net_profit, 0.0);
    }

    #[test]
    fn test_garbage_text_is_rejected() {
        let err = ProfitLoss::compute(&input(["lots", "", "", "", ""])).unwrap_err();
        assert_eq!(err.field(), Some("revenue"));
    }
}
