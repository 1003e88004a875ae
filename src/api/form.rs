use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::{MarketDefaults, PlanInputs, PlanResults, recompute, round_half_up};

/// A raw form value: JSON number or the text the user typed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn as_finite(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Number(v) => *v,
            FieldValue::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanField {
    CurrentAge,
    RetirementAge,
    LifeExpectancy,
    CurrentMonthlyIncome,
    CurrentExpenseRatio,
    CurrentSavings,
    MonthlyInvestment,
    ExpectedReturn,
    InflationRate,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl PlanField {
    /// Application order; life expectancy follows retirement age because its
    /// lower bound depends on it.
    pub const ALL: [PlanField; 9] = [
        PlanField::CurrentAge,
        PlanField::RetirementAge,
        PlanField::LifeExpectancy,
        PlanField::CurrentMonthlyIncome,
        PlanField::CurrentExpenseRatio,
        PlanField::CurrentSavings,
        PlanField::MonthlyInvestment,
        PlanField::ExpectedReturn,
        PlanField::InflationRate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlanField::CurrentAge => "currentAge",
            PlanField::RetirementAge => "retirementAge",
            PlanField::LifeExpectancy => "lifeExpectancy",
            PlanField::CurrentMonthlyIncome => "currentMonthlyIncome",
            PlanField::CurrentExpenseRatio => "currentExpenseRatio",
            PlanField::CurrentSavings => "currentSavings",
            PlanField::MonthlyInvestment => "monthlyInvestment",
            PlanField::ExpectedReturn => "expectedReturn",
            PlanField::InflationRate => "inflationRate",
        }
    }

    pub fn bounds(self, inputs: &PlanInputs) -> FieldBounds {
        let (min, max, step) = match self {
            PlanField::CurrentAge => (18.0, 70.0, 1.0),
            PlanField::RetirementAge => (
                f64::from(MarketDefaults::MIN_RETIREMENT_AGE),
                f64::from(MarketDefaults::MAX_RETIREMENT_AGE),
                1.0,
            ),
            PlanField::LifeExpectancy => (
                f64::from(inputs.retirement_age.saturating_add(5).max(70)),
                100.0,
                1.0,
            ),
            PlanField::CurrentMonthlyIncome => (10_000.0, 1_000_000.0, 1_000.0),
            PlanField::CurrentExpenseRatio => (0.5, 0.9, 0.01),
            PlanField::CurrentSavings => (0.0, 10_000_000.0, 10_000.0),
            PlanField::MonthlyInvestment => (0.0, 500_000.0, 1_000.0),
            PlanField::ExpectedReturn => (5.0, 16.0, 0.1),
            PlanField::InflationRate => (4.0, 9.0, 0.1),
        };
        FieldBounds { min, max, step }
    }

    fn is_whole_years(self) -> bool {
        matches!(
            self,
            PlanField::CurrentAge | PlanField::RetirementAge | PlanField::LifeExpectancy
        )
    }

    pub fn get(self, inputs: &PlanInputs) -> f64 {
        match self {
            PlanField::CurrentAge => f64::from(inputs.current_age),
            PlanField::RetirementAge => f64::from(inputs.retirement_age),
            PlanField::LifeExpectancy => f64::from(inputs.life_expectancy),
            PlanField::CurrentMonthlyIncome => inputs.current_monthly_income,
            PlanField::CurrentExpenseRatio => inputs.current_expense_ratio,
            PlanField::CurrentSavings => inputs.current_savings,
            PlanField::MonthlyInvestment => inputs.monthly_investment,
            PlanField::ExpectedReturn => inputs.expected_return,
            PlanField::InflationRate => inputs.inflation_rate,
        }
    }

    fn set(self, inputs: &mut PlanInputs, value: f64) {
        match self {
            PlanField::CurrentAge => inputs.current_age = value as u32,
            PlanField::RetirementAge => inputs.retirement_age = value as u32,
            PlanField::LifeExpectancy => inputs.life_expectancy = value as u32,
            PlanField::CurrentMonthlyIncome => inputs.current_monthly_income = value,
            PlanField::CurrentExpenseRatio => inputs.current_expense_ratio = value,
            PlanField::CurrentSavings => inputs.current_savings = value,
            PlanField::MonthlyInvestment => inputs.monthly_investment = value,
            PlanField::ExpectedReturn => inputs.expected_return = value,
            PlanField::InflationRate => inputs.inflation_rate = value,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Clamped,
    /// In range, but not a whole number of years.
    Rounded,
    Reverted,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAdjustment {
    pub field: PlanField,
    pub kind: AdjustmentKind,
    pub value: f64,
}

/// Partial plan as sent by the browser form or assembled from CLI flags.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanPayload {
    pub current_age: Option<FieldValue>,
    pub retirement_age: Option<FieldValue>,
    pub life_expectancy: Option<FieldValue>,
    pub current_monthly_income: Option<FieldValue>,
    pub current_expense_ratio: Option<FieldValue>,
    /// Same as `current_expense_ratio`, entered as a percent (50-90).
    pub current_expense_percent: Option<FieldValue>,
    pub current_savings: Option<FieldValue>,
    pub monthly_investment: Option<FieldValue>,
    pub expected_return: Option<FieldValue>,
    pub inflation_rate: Option<FieldValue>,
}

impl PlanPayload {
    fn value_for(&self, field: PlanField) -> Option<FieldValue> {
        match field {
            PlanField::CurrentAge => self.current_age.clone(),
            PlanField::RetirementAge => self.retirement_age.clone(),
            PlanField::LifeExpectancy => self.life_expectancy.clone(),
            PlanField::CurrentMonthlyIncome => self.current_monthly_income.clone(),
            PlanField::CurrentExpenseRatio => self.current_expense_ratio.clone().or_else(|| {
                self.current_expense_percent
                    .as_ref()
                    .map(|raw| match raw.as_finite() {
                        Some(percent) => FieldValue::Number(percent / 100.0),
                        None => raw.clone(),
                    })
            }),
            PlanField::CurrentSavings => self.current_savings.clone(),
            PlanField::MonthlyInvestment => self.monthly_investment.clone(),
            PlanField::ExpectedReturn => self.expected_return.clone(),
            PlanField::InflationRate => self.inflation_rate.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedField {
    value: f64,
    adjustment: Option<FieldAdjustment>,
}

/// Clamps a raw value into the field's range, or falls back to the last
/// valid value when it is not a finite number.
fn resolve_field(field: PlanField, raw: &FieldValue, current: &PlanInputs) -> ResolvedField {
    let last_valid = field.get(current);
    let Some(candidate) = raw.as_finite() else {
        warn!(
            "{}: ignoring non-numeric value {raw:?}, keeping {last_valid}",
            field.name()
        );
        return ResolvedField {
            value: last_valid,
            adjustment: Some(FieldAdjustment {
                field,
                kind: AdjustmentKind::Reverted,
                value: last_valid,
            }),
        };
    };

    let bounds = field.bounds(current);
    let clamped = candidate.clamp(bounds.min, bounds.max);
    let value = if field.is_whole_years() {
        round_half_up(clamped)
    } else {
        clamped
    };

    let kind = if clamped != candidate {
        warn!(
            "{}: {candidate} outside [{}, {}], using {value}",
            field.name(),
            bounds.min,
            bounds.max
        );
        Some(AdjustmentKind::Clamped)
    } else if value != clamped {
        debug!("{}: {candidate} rounded to {value} whole years", field.name());
        Some(AdjustmentKind::Rounded)
    } else {
        None
    };
    let adjustment = kind.map(|kind| FieldAdjustment { field, kind, value });

    ResolvedField { value, adjustment }
}

/// Holds the current plan and its results, replacing both on every change.
#[derive(Debug, Clone)]
pub struct Planner {
    inputs: PlanInputs,
    results: PlanResults,
    start_year: i32,
}

impl Planner {
    pub fn new(inputs: PlanInputs, start_year: i32) -> Self {
        let results = recompute(&inputs, start_year);
        Self {
            inputs,
            results,
            start_year,
        }
    }

    pub fn default_for_year(start_year: i32) -> Self {
        Self::new(PlanInputs::default(), start_year)
    }

    pub fn inputs(&self) -> &PlanInputs {
        &self.inputs
    }

    pub fn results(&self) -> &PlanResults {
        &self.results
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Applies one edited field and recomputes.
    pub fn set_field(&mut self, field: PlanField, raw: &FieldValue) -> Option<FieldAdjustment> {
        let resolved = resolve_field(field, raw, &self.inputs);
        let mut next = self.inputs;
        field.set(&mut next, resolved.value);
        self.replace(next);
        resolved.adjustment
    }

    /// Applies every field present in `payload`, then recomputes once.
    pub fn apply(&mut self, payload: &PlanPayload) -> Vec<FieldAdjustment> {
        let mut next = self.inputs;
        let mut adjustments = Vec::new();
        for field in PlanField::ALL {
            let Some(raw) = payload.value_for(field) else {
                continue;
            };
            let resolved = resolve_field(field, &raw, &next);
            field.set(&mut next, resolved.value);
            adjustments.extend(resolved.adjustment);
        }
        self.replace(next);
        adjustments
    }

    fn replace(&mut self, inputs: PlanInputs) {
        let results = recompute(&inputs, self.start_year);
        debug!(
            "plan recomputed: years={} corpus_needed={:.0} projected={:.0} required={:.0} shortfall={:.0}",
            results.years_till_retirement,
            results.retirement_corpus_needed,
            results.projected_corpus,
            results.monthly_savings_required,
            results.monthly_shortfall
        );
        self.inputs = inputs;
        self.results = results;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn planner() -> Planner {
        Planner::new(PlanInputs::default(), 2026)
    }

    #[test]
    fn payload_parses_numbers_and_numeric_text() {
        let json = r#"{
          "currentAge": 35,
          "retirementAge": "58",
          "currentMonthlyIncome": 120000,
          "expectedReturn": " 11.5 "
        }"#;
        let payload: PlanPayload = serde_json::from_str(json).expect("payload should parse");
        let mut planner = planner();
        let adjustments = planner.apply(&payload);

        assert!(adjustments.is_empty());
        let inputs = planner.inputs();
        assert_eq!(inputs.current_age, 35);
        assert_eq!(inputs.retirement_age, 58);
        assert_approx(inputs.current_monthly_income, 120_000.0);
        assert_approx(inputs.expected_return, 11.5);
        assert_approx(inputs.inflation_rate, 6.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let payload = PlanPayload {
            current_age: Some(FieldValue::Number(12.0)),
            expected_return: Some(FieldValue::Number(25.0)),
            current_savings: Some(FieldValue::Number(-5.0)),
            ..PlanPayload::default()
        };
        let mut planner = planner();
        let adjustments = planner.apply(&payload);

        assert_eq!(planner.inputs().current_age, 18);
        assert_approx(planner.inputs().expected_return, 16.0);
        assert_approx(planner.inputs().current_savings, 0.0);
        assert_eq!(adjustments.len(), 3);
        assert!(adjustments.iter().all(|a| a.kind == AdjustmentKind::Clamped));
    }

    #[test]
    fn non_numeric_value_reverts_to_last_valid() {
        let mut planner = planner();
        planner.set_field(PlanField::InflationRate, &FieldValue::Number(7.5));
        let adjustment = planner.set_field(PlanField::InflationRate, &FieldValue::from("abc"));

        assert_approx(planner.inputs().inflation_rate, 7.5);
        assert_eq!(
            adjustment,
            Some(FieldAdjustment {
                field: PlanField::InflationRate,
                kind: AdjustmentKind::Reverted,
                value: 7.5,
            })
        );
    }

    #[test]
    fn non_finite_text_is_reverted() {
        let mut planner = planner();
        let adjustment = planner.set_field(PlanField::CurrentSavings, &FieldValue::from("inf"));
        assert_approx(planner.inputs().current_savings, 500_000.0);
        assert_eq!(adjustment.map(|a| a.kind), Some(AdjustmentKind::Reverted));
    }

    #[test]
    fn life_expectancy_floor_tracks_clamped_retirement_age() {
        let payload = PlanPayload {
            retirement_age: Some(FieldValue::Number(90.0)),
            life_expectancy: Some(FieldValue::Number(72.0)),
            ..PlanPayload::default()
        };
        let mut planner = planner();
        planner.apply(&payload);

        assert_eq!(planner.inputs().retirement_age, 75);
        assert_eq!(planner.inputs().life_expectancy, 80);
    }

    #[test]
    fn life_expectancy_floor_is_at_least_seventy() {
        let mut planner = planner();
        planner.set_field(PlanField::RetirementAge, &FieldValue::Number(45.0));
        planner.set_field(PlanField::LifeExpectancy, &FieldValue::Number(60.0));
        assert_eq!(planner.inputs().life_expectancy, 70);
    }

    #[test]
    fn ages_round_to_whole_years() {
        let mut planner = planner();
        let adjustment = planner.set_field(PlanField::CurrentAge, &FieldValue::Number(32.5));
        assert_eq!(planner.inputs().current_age, 33);
        assert_eq!(adjustment.map(|a| a.kind), Some(AdjustmentKind::Rounded));

        let adjustment = planner.set_field(PlanField::RetirementAge, &FieldValue::Number(80.4));
        assert_eq!(planner.inputs().retirement_age, 75);
        assert_eq!(adjustment.map(|a| a.kind), Some(AdjustmentKind::Clamped));
    }

    #[test]
    fn expense_percent_is_stored_as_fraction() {
        let payload: PlanPayload =
            serde_json::from_str(r#"{"currentExpensePercent": 70}"#).expect("payload parses");
        let mut planner = planner();
        planner.apply(&payload);
        assert_approx(planner.inputs().current_expense_ratio, 0.7);
    }

    #[test]
    fn expense_ratio_wins_over_percent() {
        let payload: PlanPayload = serde_json::from_str(
            r#"{"currentExpenseRatio": 0.6, "currentExpensePercent": 85}"#,
        )
        .expect("payload parses");
        let mut planner = planner();
        planner.apply(&payload);
        assert_approx(planner.inputs().current_expense_ratio, 0.6);
    }

    #[test]
    fn each_change_replaces_results_wholesale() {
        let mut planner = planner();
        let before = planner.results().retirement_corpus_needed;
        planner.set_field(PlanField::InflationRate, &FieldValue::Number(8.0));
        let after = planner.results().retirement_corpus_needed;
        assert!(after > before);

        let fresh = recompute(planner.inputs(), planner.start_year());
        assert_eq!(planner.results().projections, fresh.projections);
        assert_eq!(planner.results().projected_corpus, fresh.projected_corpus);
    }

    #[test]
    fn bounds_match_form_ranges() {
        let inputs = PlanInputs::default();
        let income = PlanField::CurrentMonthlyIncome.bounds(&inputs);
        assert_approx(income.min, 10_000.0);
        assert_approx(income.max, 1_000_000.0);
        let life = PlanField::LifeExpectancy.bounds(&inputs);
        assert_approx(life.min, 70.0);
        assert_approx(life.max, 100.0);
    }
}
