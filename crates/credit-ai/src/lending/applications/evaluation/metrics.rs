use serde::{Deserialize, Serialize};

use super::super::domain::LoanApplication;

/// Share of the principal assumed to be repaid per year when estimating the new EMI.
const ANNUAL_REPAYMENT_RATE: f64 = 0.01;

/// Financial ratios derived from a loan application.
///
/// Zero income is not trapped here; the ratios become non-finite and flow onward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub monthly_loan_emi: f64,
    pub total_debt: f64,
    /// Percentage of monthly income consumed by debt.
    pub dti_ratio: f64,
    /// Loan principal as a multiple of annual income.
    pub loan_to_income_ratio: f64,
}

impl DerivedMetrics {
    pub fn from_application(application: &LoanApplication) -> Self {
        let monthly_loan_emi = application.loan_amount * ANNUAL_REPAYMENT_RATE / 12.0;
        let total_debt = application.existing_loans + monthly_loan_emi;
        let dti_ratio = total_debt / application.income * 100.0;
        let loan_to_income_ratio = application.loan_amount / (application.income * 12.0);

        Self {
            monthly_loan_emi,
            total_debt,
            dti_ratio,
            loan_to_income_ratio,
        }
    }

    pub fn display(&self) -> MetricsDisplay {
        MetricsDisplay {
            dti_ratio: format!("{:.2}%", self.dti_ratio),
            loan_to_income_ratio: format!("{:.2}x", self.loan_to_income_ratio),
            monthly_emi: format!("₹{:.0}", self.monthly_loan_emi),
        }
    }
}

/// Pre-formatted metric strings for audit screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsDisplay {
    pub dti_ratio: String,
    pub loan_to_income_ratio: String,
    pub monthly_emi: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application(income: f64, loan_amount: f64, existing_loans: f64) -> LoanApplication {
        LoanApplication {
            income,
            loan_amount,
            cibil_score: 720,
            employment_years: 4.0,
            existing_loans,
        }
    }

    #[test]
    fn derives_emi_and_ratios() {
        let metrics = DerivedMetrics::from_application(&application(50_000.0, 500_000.0, 10_000.0));

        assert!((metrics.monthly_loan_emi - 416.666_666).abs() < 1e-3);
        assert!((metrics.total_debt - 10_416.666_666).abs() < 1e-3);
        assert!((metrics.dti_ratio - 20.833_333).abs() < 1e-4);
        assert!((metrics.loan_to_income_ratio - 0.833_333).abs() < 1e-4);
    }

    #[test]
    fn zero_income_propagates_non_finite_ratios() {
        let metrics = DerivedMetrics::from_application(&application(0.0, 100_000.0, 0.0));

        assert!(metrics.dti_ratio.is_infinite());
        assert!(metrics.loan_to_income_ratio.is_infinite());
        assert!(metrics.monthly_loan_emi.is_finite());
    }

    #[test]
    fn display_formats_match_audit_layout() {
        let display =
            DerivedMetrics::from_application(&application(50_000.0, 500_000.0, 10_000.0))
                .display();

        assert_eq!(display.dti_ratio, "20.83%");
        assert_eq!(display.loan_to_income_ratio, "0.83x");
        assert_eq!(display.monthly_emi, "₹417");
    }
}
