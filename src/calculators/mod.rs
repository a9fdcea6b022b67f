// 🧮 Calculation Engine - VAT, Profit & Loss, ROI, Break-even
//
// Each calculator is a pure function from raw form fields to a full-precision
// result. Rounding to 2 dp happens only when a result is displayed or sent out.
// The only state is the per-calculator form plus its last result.

pub mod break_even;
pub mod profit_loss;
pub mod roi;
pub mod vat;

pub use break_even::{BreakEven, BreakEvenInput, BreakEvenResult};
pub use profit_loss::{ProfitLoss, ProfitLossInput, ProfitLossResult};
pub use roi::{Roi, RoiInput, RoiResult};
pub use vat::{Vat, VatInput, VatMode, VatResult};

use crate::errors::{HubError, Result};
use crate::notify::Notification;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

// ============================================================================
// CALCULATOR TRAIT
// ============================================================================

pub trait Calculator {
    /// Raw form fields, `Default` being the freshly reset form
    type Input: Clone + Debug + Default + Serialize + DeserializeOwned;

    /// Full-precision result
    type Output: Clone + Debug + Serialize;

    const NAME: &'static str;

    fn compute(input: &Self::Input) -> Result<Self::Output>;

    /// Display rows (label, formatted value), rounded to 2 dp
    fn summary(output: &Self::Output) -> Vec<(&'static str, String)>;

    /// Copy of the result with every figure rounded to 2 dp
    fn rounded(output: &Self::Output) -> Self::Output;

    /// Confirmation shown after a successful calculation
    fn confirmation(output: &Self::Output) -> Notification;
}

// ============================================================================
// CALCULATOR STATE
// ============================================================================

/// Form + last result for one calculator
#[derive(Debug, Clone)]
pub struct CalculatorState<C: Calculator> {
    pub input: C::Input,
    last: Option<C::Output>,
    last_error: Option<HubError>,
}

impl<C: Calculator> CalculatorState<C> {
    pub fn new() -> Self {
        CalculatorState {
            input: C::Input::default(),
            last: None,
            last_error: None,
        }
    }

    /// Recompute from the current form. On failure the form is kept and the
    /// previous result is discarded.
    pub fn calculate(&mut self) -> Notification {
        match C::compute(&self.input) {
            Ok(output) => {
                tracing::debug!(calculator = C::NAME, "calculation complete");
                let notification = C::confirmation(&output);
                self.last = Some(output);
                self.last_error = None;
                notification
            }
            Err(err) => {
                tracing::warn!(calculator = C::NAME, error = %err, "calculation rejected");
                let notification = Notification::from(&err);
                self.last = None;
                self.last_error = Some(err);
                notification
            }
        }
    }

    /// Clear both the form and the result
    pub fn reset(&mut self) {
        self.input = C::Input::default();
        self.last = None;
        self.last_error = None;
    }

    pub fn result(&self) -> Option<&C::Output> {
        self.last.as_ref()
    }

    pub fn error(&self) -> Option<&HubError> {
        self.last_error.as_ref()
    }

    pub fn summary(&self) -> Vec<(&'static str, String)> {
        self.last.as_ref().map(C::summary).unwrap_or_default()
    }
}

impl<C: Calculator> Default for CalculatorState<C> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CALCULATOR KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorKind {
    Vat,
    ProfitLoss,
    Roi,
    BreakEven,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 4] = [
        CalculatorKind::Vat,
        CalculatorKind::ProfitLoss,
        CalculatorKind::Roi,
        CalculatorKind::BreakEven,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Vat => Vat::NAME,
            CalculatorKind::ProfitLoss => ProfitLoss::NAME,
            CalculatorKind::Roi => Roi::NAME,
            CalculatorKind::BreakEven => BreakEven::NAME,
        }
    }

    /// Editable form fields, in display order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            CalculatorKind::Vat => &["Amount (QAR)", "VAT Rate (%)"],
            CalculatorKind::ProfitLoss => &[
                "Revenue",
                "Cost of Goods Sold",
                "Operating Expenses",
                "Other Income",
                "Other Expenses",
            ],
            CalculatorKind::Roi => &["Initial Investment", "Final Value", "Time Period (years)"],
            CalculatorKind::BreakEven => &[
                "Fixed Costs",
                "Variable Cost per Unit",
                "Selling Price per Unit",
            ],
        }
    }

    pub fn next(&self) -> Self {
        match self {
            CalculatorKind::Vat => CalculatorKind::ProfitLoss,
            CalculatorKind::ProfitLoss => CalculatorKind::Roi,
            CalculatorKind::Roi => CalculatorKind::BreakEven,
            CalculatorKind::BreakEven => CalculatorKind::Vat,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            CalculatorKind::Vat => CalculatorKind::BreakEven,
            CalculatorKind::ProfitLoss => CalculatorKind::Vat,
            CalculatorKind::Roi => CalculatorKind::ProfitLoss,
            CalculatorKind::BreakEven => CalculatorKind::Roi,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_keeps_input_on_error() {
        let mut state = CalculatorState::<Vat>::new();
        state.input.amount = "".to_string();

        let n = state.calculate();
        assert!(n.is_error());
        assert!(state.result().is_none());
        assert_eq!(state.error().and_then(|e| e.field()), Some("amount"));
        assert_eq!(state.input.rate, "5");
    }

    #[test]
    fn test_state_replaces_result_wholesale() {
        let mut state = CalculatorState::<BreakEven>::new();
        state.input.fixed_costs = "1000".to_string();
        state.input.variable_cost = "4".to_string();
        state.input.selling_price = "10".to_string();
        assert!(!state.calculate().is_error());
        assert_eq!(state.result().map(|r| r.break_even_units), Some(167));

        // A later failure discards the stale result
        state.input.selling_price = "3".to_string();
        assert!(state.calculate().is_error());
        assert!(state.result().is_none());
        assert!(state.summary().is_empty());
    }

    #[test]
    fn test_reset_returns_to_initial_form() {
        let mut state = CalculatorState::<Roi>::new();
        state.input.investment = "1000".to_string();
        state.input.final_value = "1500".to_string();
        state.calculate();
        assert!(state.result().is_some());

        state.reset();
        assert!(state.result().is_none());
        assert!(state.error().is_none());
        assert_eq!(state.input.investment, "");
    }

    #[test]
    fn test_calculating_twice_is_idempotent() {
        let mut state = CalculatorState::<ProfitLoss>::new();
        state.input.revenue = "50000".to_string();
        state.input.cogs = "20000".to_string();
        state.calculate();
        let first = state.summary();
        state.calculate();
        assert_eq!(first, state.summary());
    }

    #[test]
    fn test_kind_cycle() {
        for kind in CalculatorKind::ALL {
            assert_eq!(kind.next().previous(), kind);
            assert!(!kind.fields().is_empty());
        }
    }
}
