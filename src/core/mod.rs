mod amortization;
mod calculators;
mod format;
mod insurance;
mod loan_rules;
mod types;
mod va;

pub use amortization::{
    PayoffSimulation, amortization_schedule, calculate_amortization,
    monthly_principal_and_interest, payment_factor, remaining_balance,
};
pub use calculators::{
    DSCR_QUALIFYING_RATIO, DscrStatus, break_even_months, calculate, calculate_affordability,
    calculate_dscr, calculate_purchase, calculate_refinance, calculate_rent_vs_buy,
    calculate_va_purchase, calculate_va_refinance, debt_service_coverage_ratio,
    total_refinance_savings,
};
pub use format::{
    format_currency, format_number, format_percentage, format_result, parse_amount,
    parse_currency_input, parse_percent, parse_percentage_input,
};
pub use insurance::{InsuranceCost, dollar_to_percent, percent_to_dollar};
pub use loan_rules::monthly_mortgage_insurance;
pub use types::{
    AffordabilityInput, AmortizationPeriod, AmortizationResult, AmortizationYear,
    CalculatorKind, CalculatorResult, DscrInput, FeeType, LoanType, PaymentFrequency,
    PurchaseInput, Rate, RefinanceInput, RentVsBuyInput, ResultFormat, ScenarioInput,
    VaPurchaseInput, VaRefinanceInput,
};
pub use va::{
    calculate_final_mortgage_amount, calculate_va_funding_fee, get_periods_per_year,
    payment_for_frequency,
};
