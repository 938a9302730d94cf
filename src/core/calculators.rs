use super::amortization::{
    calculate_amortization, monthly_principal_and_interest, payment_factor, remaining_balance,
};
use super::format::format_percentage;
use super::loan_rules::monthly_mortgage_insurance;
use super::types::{
    AffordabilityInput, CalculatorResult, DscrInput, FeeType, LoanType, PurchaseInput, Rate,
    RefinanceInput, RentVsBuyInput, ScenarioInput, VaPurchaseInput, VaRefinanceInput,
};
use super::va::{calculate_final_mortgage_amount, calculate_va_funding_fee, payment_for_frequency};

pub const DSCR_QUALIFYING_RATIO: f64 = 1.0;

const BREAK_EVEN_LABEL: &str = "Break-Even Point (months)";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DscrStatus {
    Qualifies,
    DoesNotQualify,
}

impl DscrStatus {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= DSCR_QUALIFYING_RATIO {
            DscrStatus::Qualifies
        } else {
            DscrStatus::DoesNotQualify
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DscrStatus::Qualifies => "Qualifies",
            DscrStatus::DoesNotQualify => "Does not qualify",
        }
    }
}

pub fn calculate(input: &ScenarioInput) -> Vec<CalculatorResult> {
    match input {
        ScenarioInput::Purchase(input) => calculate_purchase(input),
        ScenarioInput::Refinance(input) => calculate_refinance(input),
        ScenarioInput::Affordability(input) => calculate_affordability(input),
        ScenarioInput::RentVsBuy(input) => calculate_rent_vs_buy(input),
        ScenarioInput::Dscr(input) => calculate_dscr(input),
        ScenarioInput::VaPurchase(input) => calculate_va_purchase(input),
        ScenarioInput::VaRefinance(input) => calculate_va_refinance(input),
    }
}

/// Months until closing costs are recovered. `None` when the refinance never
/// pays for itself because the payment does not go down.
pub fn break_even_months(closing_costs: f64, monthly_savings: f64) -> Option<f64> {
    if monthly_savings.is_finite() && monthly_savings > 0.0 {
        Some(closing_costs.max(0.0) / monthly_savings)
    } else {
        None
    }
}

pub fn total_refinance_savings(monthly_savings: f64, term_in_months: u32, closing_costs: f64) -> f64 {
    monthly_savings * term_in_months as f64 - closing_costs
}

pub fn debt_service_coverage_ratio(net_operating_income: f64, annual_debt_service: f64) -> f64 {
    if annual_debt_service > 0.0 {
        net_operating_income / annual_debt_service
    } else {
        0.0
    }
}

pub fn calculate_purchase(input: &PurchaseInput) -> Vec<CalculatorResult> {
    let loan_amount = (input.home_price - input.down_payment).max(0.0);
    let term = term_in_months(input.loan_term_years);
    let amortization = calculate_amortization(
        loan_amount,
        input.interest_rate,
        term,
        input.extra_monthly_payment,
    );

    let principal_and_interest = amortization.monthly_principal_and_interest;
    let property_tax = monthly_property_tax(input.home_price, input.property_tax_rate);
    let insurance = input.home_insurance.monthly_amount(input.home_price);
    let mortgage_insurance = monthly_mortgage_insurance(
        input.loan_type,
        loan_amount,
        input.manual_mortgage_insurance,
    );
    let total =
        principal_and_interest + property_tax + insurance + mortgage_insurance + input.monthly_hoa;

    let mut results = vec![
        CalculatorResult::currency("Monthly Payment", total)
            .highlighted()
            .with_description("Principal, interest, taxes, insurance and HOA dues"),
        CalculatorResult::currency("Principal & Interest", principal_and_interest),
        CalculatorResult::currency("Property Tax", property_tax),
        CalculatorResult::currency("Home Insurance", insurance),
        CalculatorResult::currency(input.loan_type.insurance_label(), mortgage_insurance),
        CalculatorResult::currency("HOA Dues", input.monthly_hoa),
        CalculatorResult::currency("Loan Amount", loan_amount),
        CalculatorResult::percentage("Down Payment", share_of(input.down_payment, input.home_price)),
        CalculatorResult::currency("Total Interest", amortization.total_interest),
        CalculatorResult::currency("Total Cost of Loan", loan_amount + amortization.total_interest),
    ];

    if input.extra_monthly_payment > 0.0 && loan_amount > 0.0 {
        let baseline = calculate_amortization(loan_amount, input.interest_rate, term, 0.0);
        results.push(
            CalculatorResult::number("Payoff Time (months)", amortization.actual_term_in_months as f64)
                .with_description(format!("Instead of {} months", baseline.actual_term_in_months)),
        );
        results.push(CalculatorResult::currency(
            "Interest Saved",
            (baseline.total_interest - amortization.total_interest).max(0.0),
        ));
    }

    results
}

pub fn calculate_refinance(input: &RefinanceInput) -> Vec<CalculatorResult> {
    let new_loan_amount = input.current_balance.max(0.0) + input.cash_out.max(0.0);
    let term = term_in_months(input.new_loan_term_years);
    let amortization = calculate_amortization(new_loan_amount, input.new_interest_rate, term, 0.0);
    let new_payment = amortization.monthly_principal_and_interest;
    let monthly_savings = input.current_monthly_payment - new_payment;

    vec![
        CalculatorResult::currency("Monthly Savings", monthly_savings).highlighted(),
        CalculatorResult::currency("New Monthly Payment", new_payment),
        CalculatorResult::currency("Current Monthly Payment", input.current_monthly_payment),
        CalculatorResult::currency("New Loan Amount", new_loan_amount),
        break_even_result(break_even_months(input.closing_costs, monthly_savings)),
        CalculatorResult::currency(
            "Total Savings",
            total_refinance_savings(monthly_savings, term, input.closing_costs),
        )
        .with_description("Monthly savings over the new loan term, less closing costs"),
        CalculatorResult::currency("Total Interest (new loan)", amortization.total_interest),
    ]
}

pub fn calculate_affordability(input: &AffordabilityInput) -> Vec<CalculatorResult> {
    let monthly_income = input.annual_income.max(0.0) / 12.0;
    let max_housing_payment =
        (monthly_income * input.debt_to_income_ratio.as_fraction() - input.monthly_debts).max(0.0);
    let monthly_tax_rate = input.property_tax_rate.as_fraction() / 12.0;
    let monthly_insurance = input.annual_insurance / 12.0;
    let fixed_costs = monthly_insurance + input.monthly_hoa;

    // payment = loan * factor + (loan + down) * monthly_tax_rate + fixed_costs
    let term = term_in_months(input.loan_term_years);
    let factor = payment_factor(input.interest_rate, term);
    let available = max_housing_payment - fixed_costs - input.down_payment * monthly_tax_rate;
    let max_loan = if factor > 0.0 && available > 0.0 {
        available / (factor + monthly_tax_rate)
    } else {
        0.0
    };
    let max_price = max_loan + input.down_payment;

    let principal_and_interest = monthly_principal_and_interest(max_loan, input.interest_rate, term);
    let property_tax = max_price * monthly_tax_rate;
    let monthly_payment = principal_and_interest + property_tax + fixed_costs;

    vec![
        CalculatorResult::currency("Maximum Home Price", max_price).highlighted(),
        CalculatorResult::currency("Maximum Loan Amount", max_loan),
        CalculatorResult::currency("Down Payment", input.down_payment),
        CalculatorResult::currency("Monthly Payment", monthly_payment),
        CalculatorResult::currency("Principal & Interest", principal_and_interest),
        CalculatorResult::currency("Property Tax", property_tax),
        CalculatorResult::currency("Home Insurance", monthly_insurance),
        CalculatorResult::currency("HOA Dues", input.monthly_hoa),
        CalculatorResult::percentage("Debt-to-Income Ratio", input.debt_to_income_ratio.as_fraction()),
    ]
}

pub fn calculate_rent_vs_buy(input: &RentVsBuyInput) -> Vec<CalculatorResult> {
    let years = input.years_to_stay;
    let months = term_in_months(years);

    let mut total_rent = 0.0;
    let mut rent = input.monthly_rent.max(0.0);
    for _ in 0..years {
        total_rent += rent * 12.0;
        rent *= 1.0 + input.annual_rent_increase.as_fraction();
    }

    let loan_amount = (input.home_price - input.down_payment).max(0.0);
    let term = term_in_months(input.loan_term_years);
    let principal_and_interest =
        monthly_principal_and_interest(loan_amount, input.interest_rate, term);
    let payments_made = months.min(term);
    let ownership_costs = monthly_property_tax(input.home_price, input.property_tax_rate)
        + input.annual_insurance / 12.0
        + input.home_price * input.annual_maintenance_rate.as_fraction() / 12.0;

    let home_value =
        input.home_price * (1.0 + input.home_appreciation_rate.as_fraction()).powf(years as f64);
    let balance = remaining_balance(loan_amount, input.interest_rate, term, payments_made);
    let equity = home_value - balance;
    let net_cost_of_buying = input.down_payment
        + principal_and_interest * payments_made as f64
        + ownership_costs * months as f64
        - equity;
    let advantage = total_rent - net_cost_of_buying;

    let verdict = if advantage >= 0.0 {
        "Buying costs less than renting over your stay"
    } else {
        "Renting costs less than buying over your stay"
    };

    vec![
        CalculatorResult::currency("Buying Advantage", advantage)
            .highlighted()
            .with_description(verdict),
        CalculatorResult::currency("Total Rent Paid", total_rent),
        CalculatorResult::currency("Net Cost of Buying", net_cost_of_buying),
        CalculatorResult::currency("Monthly Mortgage Payment", principal_and_interest),
        CalculatorResult::currency("Monthly Ownership Costs", ownership_costs),
        CalculatorResult::currency("Home Value at Sale", home_value),
        CalculatorResult::currency("Equity Built", equity),
        CalculatorResult::number("Years Compared", years as f64),
    ]
}

pub fn calculate_dscr(input: &DscrInput) -> Vec<CalculatorResult> {
    let loan_amount = (input.purchase_price - input.down_payment).max(0.0);
    let principal_and_interest = monthly_principal_and_interest(
        loan_amount,
        input.interest_rate,
        term_in_months(input.loan_term_years),
    );
    let annual_debt_service = principal_and_interest * 12.0;

    let vacancy = input.vacancy_rate.as_fraction().clamp(0.0, 1.0);
    let effective_income = input.monthly_rent * 12.0 * (1.0 - vacancy);
    let operating_expenses = input.annual_property_tax
        + input.annual_insurance
        + (input.monthly_hoa + input.monthly_operating_expenses) * 12.0;
    let net_operating_income = effective_income - operating_expenses;

    let ratio = debt_service_coverage_ratio(net_operating_income, annual_debt_service);
    let status = DscrStatus::from_ratio(ratio);
    let annual_cash_flow = net_operating_income - annual_debt_service;

    vec![
        CalculatorResult::number("Debt Service Coverage Ratio", ratio)
            .with_decimals(2)
            .highlighted()
            .with_description(status.label()),
        CalculatorResult::currency("Net Operating Income (annual)", net_operating_income),
        CalculatorResult::currency("Annual Debt Service", annual_debt_service),
        CalculatorResult::currency("Monthly Cash Flow", annual_cash_flow / 12.0),
        CalculatorResult::currency("Loan Amount", loan_amount),
        CalculatorResult::percentage("Cap Rate", share_of(net_operating_income, input.purchase_price)),
        CalculatorResult::percentage(
            "Cash-on-Cash Return",
            share_of(annual_cash_flow, input.down_payment),
        ),
    ]
}

pub fn calculate_va_purchase(input: &VaPurchaseInput) -> Vec<CalculatorResult> {
    let base_amount = (input.home_price - input.down_payment).max(0.0);
    let funding_fee = calculate_va_funding_fee(base_amount, input.fee_type);
    let final_amount = calculate_final_mortgage_amount(base_amount, funding_fee);
    let amortization = calculate_amortization(
        final_amount,
        input.interest_rate,
        term_in_months(input.loan_term_years),
        0.0,
    );

    let principal_and_interest = amortization.monthly_principal_and_interest;
    let property_tax = monthly_property_tax(input.home_price, input.property_tax_rate);
    let insurance = input.home_insurance.monthly_amount(input.home_price);
    let mortgage_insurance = monthly_mortgage_insurance(LoanType::Va, final_amount, None);
    let monthly_total =
        principal_and_interest + property_tax + insurance + mortgage_insurance + input.monthly_hoa;

    let frequency = input.payment_frequency;
    let per_period = |monthly: f64| payment_for_frequency(monthly, frequency);

    vec![
        CalculatorResult::currency(frequency.payment_label(), per_period(monthly_total))
            .highlighted(),
        CalculatorResult::currency("Principal & Interest", per_period(principal_and_interest)),
        CalculatorResult::currency("Property Tax", per_period(property_tax)),
        CalculatorResult::currency("Home Insurance", per_period(insurance)),
        CalculatorResult::currency("HOA Dues", per_period(input.monthly_hoa)),
        CalculatorResult::currency(
            LoanType::Va.insurance_label(),
            per_period(mortgage_insurance),
        ),
        CalculatorResult::currency("Base Loan Amount", base_amount),
        funding_fee_result(funding_fee, input.fee_type),
        CalculatorResult::currency("Final Loan Amount", final_amount),
        CalculatorResult::currency("Total Interest", amortization.total_interest),
        CalculatorResult::number("Payments per Year", frequency.periods_per_year() as f64),
    ]
}

pub fn calculate_va_refinance(input: &VaRefinanceInput) -> Vec<CalculatorResult> {
    let base_amount = input.current_balance.max(0.0) + input.cash_out.max(0.0);
    let funding_fee = calculate_va_funding_fee(base_amount, input.fee_type);
    let final_amount = calculate_final_mortgage_amount(base_amount, funding_fee);
    let term = term_in_months(input.new_loan_term_years);
    let amortization = calculate_amortization(final_amount, input.new_interest_rate, term, 0.0);

    let new_payment = amortization.monthly_principal_and_interest;
    let monthly_savings = input.current_monthly_payment - new_payment;
    let frequency = input.payment_frequency;

    vec![
        CalculatorResult::currency(
            frequency.payment_label(),
            payment_for_frequency(new_payment, frequency),
        )
        .highlighted(),
        CalculatorResult::currency("Monthly Savings", monthly_savings),
        CalculatorResult::currency("Current Monthly Payment", input.current_monthly_payment),
        CalculatorResult::currency("Base Loan Amount", base_amount),
        funding_fee_result(funding_fee, input.fee_type),
        CalculatorResult::currency("Final Loan Amount", final_amount),
        break_even_result(break_even_months(input.closing_costs, monthly_savings)),
        CalculatorResult::currency(
            "Total Savings",
            total_refinance_savings(monthly_savings, term, input.closing_costs),
        ),
        CalculatorResult::currency("Total Interest", amortization.total_interest),
    ]
}

fn term_in_months(years: u32) -> u32 {
    years.saturating_mul(12)
}

fn monthly_property_tax(home_price: f64, annual_rate: Rate) -> f64 {
    home_price * annual_rate.as_fraction() / 12.0
}

fn share_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole } else { 0.0 }
}

fn break_even_result(months: Option<f64>) -> CalculatorResult {
    match months {
        Some(months) => CalculatorResult::number(BREAK_EVEN_LABEL, months),
        None => CalculatorResult::number(BREAK_EVEN_LABEL, 0.0)
            .with_description("Never breaks even: the new payment is not lower than the current one"),
    }
}

fn funding_fee_result(funding_fee: f64, fee_type: FeeType) -> CalculatorResult {
    let description = match fee_type {
        FeeType::Exempt => "Exempt from the VA funding fee".to_string(),
        FeeType::FirstTime | FeeType::Subsequent => format!(
            "{} of the base loan, financed into the loan",
            format_percentage(fee_type.funding_fee_rate(), 2)
        ),
    };
    CalculatorResult::currency("VA Funding Fee", funding_fee).with_description(description)
}
