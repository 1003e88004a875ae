mod engine;
pub mod format;
pub mod report;
mod types;

pub(crate) use engine::round_half_up;
pub use engine::{
    future_value, future_value_with_contributions, generate_projection,
    monthly_expense_in_retirement, recompute, required_monthly_savings, retirement_corpus_target,
};
pub use report::{DisplaySummary, PlanReport};
pub use types::{
    CorpusRates, MONTHS_IN_YEAR, MarketDefaults, PERCENTAGE_DIVISOR, PlanInputs, PlanResults,
    YearlyProjection,
};
