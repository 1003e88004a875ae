use log::trace;

use super::types::{
    CorpusRates, MONTHS_IN_YEAR, MarketDefaults, PERCENTAGE_DIVISOR, PlanInputs, PlanResults,
    YearlyProjection,
};

/// Compound growth of a lump sum at an annual rate, compounded yearly.
///
/// `years` may be fractional; a negative rate models a loss.
pub fn future_value(principal: f64, annual_rate_percent: f64, years: f64) -> f64 {
    let rate = annual_rate_percent / PERCENTAGE_DIVISOR;
    principal * (1.0 + rate).powf(years)
}

/// Lump sum plus a level end-of-month contribution, compounded monthly.
///
/// Falls back to straight-line accumulation when the monthly rate is zero
/// or too small to register in `1 + rate`.
pub fn future_value_with_contributions(
    initial: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> f64 {
    let monthly_rate = annual_rate_percent / PERCENTAGE_DIVISOR / MONTHS_IN_YEAR;
    let months = years * MONTHS_IN_YEAR;

    let growth = compound_growth(monthly_rate, months);
    let lump_sum = initial * (1.0 + growth);

    if growth == 0.0 {
        lump_sum + monthly_contribution * months
    } else {
        lump_sum + monthly_contribution * (growth / monthly_rate)
    }
}

/// Level monthly contribution that lifts `current_amount` to `goal_amount`
/// within `years`.
///
/// Returns 0 when there is no time horizon or when the lump sum alone,
/// grown at the annual rate, already reaches the goal.
pub fn required_monthly_savings(
    current_amount: f64,
    goal_amount: f64,
    annual_rate_percent: f64,
    years: f64,
) -> f64 {
    if years <= 0.0 {
        return 0.0;
    }

    let monthly_rate = annual_rate_percent / PERCENTAGE_DIVISOR / MONTHS_IN_YEAR;
    let months = years * MONTHS_IN_YEAR;

    let grown_savings = future_value(current_amount, annual_rate_percent, years);
    let additional_needed = (goal_amount - grown_savings).max(0.0);
    if additional_needed == 0.0 {
        return 0.0;
    }

    let growth = compound_growth(monthly_rate, months);
    if growth == 0.0 {
        return additional_needed / months;
    }

    additional_needed * monthly_rate / growth
}

/// `(1 + rate)^periods - 1` without losing tiny rates to cancellation.
fn compound_growth(rate_per_period: f64, periods: f64) -> f64 {
    (periods * rate_per_period.ln_1p()).exp_m1()
}

/// Lump sum needed at retirement to fund inflated expenses under an
/// adjusted safe-withdrawal rate.
///
/// The 4% base rate drops by however much inflation outpaces the
/// in-retirement return, floored at 2.5%. A rate left as `None` falls back
/// to [`CorpusRates::default`].
pub fn retirement_corpus_target(
    current_monthly_expense: f64,
    years_to_retirement: f64,
    inflation_rate: Option<f64>,
    retirement_return: Option<f64>,
) -> f64 {
    let defaults = CorpusRates::default();
    let rates = CorpusRates {
        inflation_rate: inflation_rate.unwrap_or(defaults.inflation_rate),
        retirement_return: retirement_return.unwrap_or(defaults.retirement_return),
    };

    let expense_at_retirement = current_monthly_expense
        * (1.0 + rates.inflation_rate / PERCENTAGE_DIVISOR).powf(years_to_retirement);
    let annual_expense_at_retirement = expense_at_retirement * MONTHS_IN_YEAR;

    let adjusted_withdrawal_rate = (MarketDefaults::SAFE_WITHDRAWAL_RATE
        - (rates.inflation_rate - rates.retirement_return))
        .max(MarketDefaults::MIN_WITHDRAWAL_RATE);

    annual_expense_at_retirement / (adjusted_withdrawal_rate / PERCENTAGE_DIVISOR)
}

pub fn monthly_expense_in_retirement(current_monthly_income: f64, expense_ratio: f64) -> f64 {
    current_monthly_income * expense_ratio
}

/// Year-by-year savings path from `current_age` to `retirement_age`
/// inclusive, starting at calendar year `start_year`.
///
/// Each year compounds the previous balance by one year rather than using
/// the closed form over the full span, so rounding accumulates the same way
/// as the browser chart. Empty when `retirement_age < current_age`.
pub fn generate_projection(
    current_age: u32,
    retirement_age: u32,
    current_savings: f64,
    monthly_investment: f64,
    annual_rate_percent: f64,
    goal_amount: f64,
    start_year: i32,
) -> Vec<YearlyProjection> {
    if retirement_age < current_age {
        return Vec::new();
    }

    let span = retirement_age - current_age;
    let mut projections = Vec::with_capacity(span as usize + 1);
    let mut accumulated = current_savings;

    for offset in 0..=span {
        if offset > 0 {
            accumulated = future_value_with_contributions(
                accumulated,
                monthly_investment,
                annual_rate_percent,
                1.0,
            );
        }

        projections.push(YearlyProjection {
            age: current_age + offset,
            year: start_year + offset as i32,
            savings: round_half_up(accumulated),
            goal: goal_amount,
        });
    }

    projections
}

/// Recomputes the whole plan from scratch for one set of inputs.
pub fn recompute(inputs: &PlanInputs, start_year: i32) -> PlanResults {
    let years_till_retirement = i64::from(inputs.retirement_age) - i64::from(inputs.current_age);
    let retirement_duration = i64::from(inputs.life_expectancy) - i64::from(inputs.retirement_age);
    let years = years_till_retirement as f64;

    let monthly_expense =
        monthly_expense_in_retirement(inputs.current_monthly_income, inputs.current_expense_ratio);

    let retirement_corpus_needed = retirement_corpus_target(
        monthly_expense,
        years,
        Some(inputs.inflation_rate),
        Some(inputs.expected_return / 2.0),
    );

    let projected_corpus = future_value_with_contributions(
        inputs.current_savings,
        inputs.monthly_investment,
        inputs.expected_return,
        years,
    );

    let monthly_savings_required = required_monthly_savings(
        inputs.current_savings,
        retirement_corpus_needed,
        inputs.expected_return,
        years,
    );

    let monthly_shortfall = (monthly_savings_required - inputs.monthly_investment).max(0.0);

    let projections = generate_projection(
        inputs.current_age,
        inputs.retirement_age,
        inputs.current_savings,
        inputs.monthly_investment,
        inputs.expected_return,
        retirement_corpus_needed,
        start_year,
    );

    trace!(
        "recomputed plan: corpus_needed={retirement_corpus_needed:.2} projected={projected_corpus:.2} required={monthly_savings_required:.2}"
    );

    PlanResults {
        years_till_retirement,
        retirement_duration,
        monthly_expense,
        retirement_corpus_needed,
        projected_corpus,
        monthly_savings_required,
        monthly_shortfall,
        projections,
    }
}

/// `Math.round` semantics: halves round toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
