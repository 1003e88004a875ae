use serde::{Deserialize, Serialize};

/// Indian-context market and planning constants used as form defaults.
pub struct MarketDefaults;

impl MarketDefaults {
    pub const INFLATION_RATE: f64 = 6.0;
    pub const INVESTMENT_RETURN: f64 = 12.0;
    pub const PPF_RETURN: f64 = 7.1;
    pub const FD_RETURN: f64 = 6.5;
    pub const RETIREMENT_AGE: u32 = 60;
    pub const LIFE_EXPECTANCY: u32 = 80;
    pub const MIN_RETIREMENT_AGE: u32 = 45;
    pub const MAX_RETIREMENT_AGE: u32 = 75;
    /// Share of current income expected as monthly expense in retirement.
    pub const EXPENSE_RATIO: f64 = 0.8;
    pub const SAFE_WITHDRAWAL_RATE: f64 = 4.0;
    pub const MIN_WITHDRAWAL_RATE: f64 = 2.5;
    /// Section 80C deduction ceiling (₹1.5 lakh per annum).
    pub const EPF_TAX_EXEMPTION_LIMIT: f64 = 150_000.0;
    /// Additional deduction under 80CCD(1B).
    pub const NPS_ADDITIONAL_TAX_BENEFIT: f64 = 50_000.0;
}

pub const MONTHS_IN_YEAR: f64 = 12.0;
pub const PERCENTAGE_DIVISOR: f64 = 100.0;

/// Rates assumed when estimating the retirement corpus.
///
/// Both values are annual percentages. The defaults are 6% inflation and a
/// 6% in-retirement return (half of the 12% accumulation-phase return).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusRates {
    pub inflation_rate: f64,
    pub retirement_return: f64,
}

impl Default for CorpusRates {
    fn default() -> Self {
        Self {
            inflation_rate: MarketDefaults::INFLATION_RATE,
            retirement_return: MarketDefaults::INVESTMENT_RETURN / 2.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_monthly_income: f64,
    /// Fraction in `[0, 1]`.
    pub current_expense_ratio: f64,
    pub current_savings: f64,
    pub monthly_investment: f64,
    /// Annual percent, e.g. `12.0`.
    pub expected_return: f64,
    /// Annual percent, e.g. `6.0`.
    pub inflation_rate: f64,
}

impl Default for PlanInputs {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: MarketDefaults::RETIREMENT_AGE,
            life_expectancy: MarketDefaults::LIFE_EXPECTANCY,
            current_monthly_income: 75_000.0,
            current_expense_ratio: MarketDefaults::EXPENSE_RATIO,
            current_savings: 500_000.0,
            monthly_investment: 15_000.0,
            expected_return: MarketDefaults::INVESTMENT_RETURN,
            inflation_rate: MarketDefaults::INFLATION_RATE,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    pub age: u32,
    pub year: i32,
    pub savings: f64,
    pub goal: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResults {
    pub years_till_retirement: i64,
    pub retirement_duration: i64,
    pub monthly_expense: f64,
    pub retirement_corpus_needed: f64,
    pub projected_corpus: f64,
    pub monthly_savings_required: f64,
    pub monthly_shortfall: f64,
    pub projections: Vec<YearlyProjection>,
}

impl PlanResults {
    pub fn goal_met(&self) -> bool {
        self.projected_corpus >= self.retirement_corpus_needed
    }

    /// Projected corpus as a percent of the corpus needed, uncapped.
    pub fn percentage_achieved(&self) -> f64 {
        self.projected_corpus / self.retirement_corpus_needed * 100.0
    }
}
