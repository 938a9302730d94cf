//! Request payloads and the input contract: every numeric field may arrive as
//! a JSON number or as the raw string a user typed. Missing, empty, negative
//! or non-finite values fall back to the calculator's default.

use serde::Deserialize;
use tracing::debug;

use crate::core::{
    AffordabilityInput, DscrInput, FeeType, InsuranceCost, LoanType, PaymentFrequency,
    PurchaseInput, Rate, RefinanceInput, RentVsBuyInput, ScenarioInput, VaPurchaseInput,
    VaRefinanceInput, parse_amount, parse_percent,
};

pub const MAX_TERM_YEARS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    fn amount(&self) -> Option<f64> {
        match self {
            NumericField::Number(value) => Some(*value),
            NumericField::Text(raw) => parse_amount(raw).map(|value| signed(raw, value)),
        }
    }

    fn percent(&self) -> Option<f64> {
        match self {
            NumericField::Number(value) => Some(*value),
            NumericField::Text(raw) => parse_percent(raw).map(|value| signed(raw, value)),
        }
    }
}

// The cleaners drop '-'; a sign typed before the number is put back.
fn signed(raw: &str, magnitude: f64) -> f64 {
    let typed_negative = raw
        .chars()
        .take_while(|c| !c.is_ascii_digit() && *c != '.')
        .any(|c| c == '-');
    if typed_negative { -magnitude } else { magnitude }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsuranceMode {
    #[default]
    #[serde(alias = "dollars", alias = "$")]
    Dollar,
    #[serde(alias = "percentage", alias = "%")]
    Percent,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculatePayload {
    Purchase(PurchasePayload),
    Refinance(RefinancePayload),
    Affordability(AffordabilityPayload),
    #[serde(alias = "rentVsBuy")]
    RentVsBuy(RentVsBuyPayload),
    Dscr(DscrPayload),
    #[serde(alias = "vaPurchase")]
    VaPurchase(VaPurchasePayload),
    #[serde(alias = "vaRefinance")]
    VaRefinance(VaRefinancePayload),
}

impl CalculatePayload {
    pub fn into_scenario(self) -> ScenarioInput {
        match self {
            CalculatePayload::Purchase(p) => ScenarioInput::Purchase(p.into_input()),
            CalculatePayload::Refinance(p) => ScenarioInput::Refinance(p.into_input()),
            CalculatePayload::Affordability(p) => ScenarioInput::Affordability(p.into_input()),
            CalculatePayload::RentVsBuy(p) => ScenarioInput::RentVsBuy(p.into_input()),
            CalculatePayload::Dscr(p) => ScenarioInput::Dscr(p.into_input()),
            CalculatePayload::VaPurchase(p) => ScenarioInput::VaPurchase(p.into_input()),
            CalculatePayload::VaRefinance(p) => ScenarioInput::VaRefinance(p.into_input()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PurchasePayload {
    home_price: Option<NumericField>,
    down_payment: Option<NumericField>,
    interest_rate: Option<NumericField>,
    loan_term_years: Option<NumericField>,
    property_tax_rate: Option<NumericField>,
    home_insurance: Option<NumericField>,
    home_insurance_mode: Option<InsuranceMode>,
    monthly_hoa: Option<NumericField>,
    loan_type: Option<LoanType>,
    monthly_mortgage_insurance: Option<NumericField>,
    extra_monthly_payment: Option<NumericField>,
}

impl PurchasePayload {
    pub fn into_input(self) -> PurchaseInput {
        PurchaseInput {
            home_price: amount_or(&self.home_price, "homePrice", 350_000.0),
            down_payment: amount_or(&self.down_payment, "downPayment", 70_000.0),
            interest_rate: rate_or(&self.interest_rate, "interestRate", 7.0),
            loan_term_years: years_or(&self.loan_term_years, "loanTermYears", 30),
            property_tax_rate: rate_or(&self.property_tax_rate, "propertyTaxRate", 1.2),
            home_insurance: insurance_or(&self.home_insurance, self.home_insurance_mode),
            monthly_hoa: amount_or(&self.monthly_hoa, "monthlyHoa", 0.0),
            loan_type: self.loan_type.unwrap_or_default(),
            manual_mortgage_insurance: manual_override(&self.monthly_mortgage_insurance),
            extra_monthly_payment: amount_or(
                &self.extra_monthly_payment,
                "extraMonthlyPayment",
                0.0,
            ),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefinancePayload {
    current_balance: Option<NumericField>,
    current_monthly_payment: Option<NumericField>,
    new_interest_rate: Option<NumericField>,
    new_loan_term_years: Option<NumericField>,
    closing_costs: Option<NumericField>,
    cash_out: Option<NumericField>,
}

impl RefinancePayload {
    pub fn into_input(self) -> RefinanceInput {
        RefinanceInput {
            current_balance: amount_or(&self.current_balance, "currentBalance", 250_000.0),
            current_monthly_payment: amount_or(
                &self.current_monthly_payment,
                "currentMonthlyPayment",
                1_800.0,
            ),
            new_interest_rate: rate_or(&self.new_interest_rate, "newInterestRate", 6.0),
            new_loan_term_years: years_or(&self.new_loan_term_years, "newLoanTermYears", 30),
            closing_costs: amount_or(&self.closing_costs, "closingCosts", 5_000.0),
            cash_out: amount_or(&self.cash_out, "cashOut", 0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AffordabilityPayload {
    annual_income: Option<NumericField>,
    monthly_debts: Option<NumericField>,
    down_payment: Option<NumericField>,
    interest_rate: Option<NumericField>,
    loan_term_years: Option<NumericField>,
    property_tax_rate: Option<NumericField>,
    annual_insurance: Option<NumericField>,
    monthly_hoa: Option<NumericField>,
    debt_to_income_ratio: Option<NumericField>,
}

impl AffordabilityPayload {
    pub fn into_input(self) -> AffordabilityInput {
        AffordabilityInput {
            annual_income: amount_or(&self.annual_income, "annualIncome", 100_000.0),
            monthly_debts: amount_or(&self.monthly_debts, "monthlyDebts", 500.0),
            down_payment: amount_or(&self.down_payment, "downPayment", 50_000.0),
            interest_rate: rate_or(&self.interest_rate, "interestRate", 7.0),
            loan_term_years: years_or(&self.loan_term_years, "loanTermYears", 30),
            property_tax_rate: rate_or(&self.property_tax_rate, "propertyTaxRate", 1.2),
            annual_insurance: amount_or(&self.annual_insurance, "annualInsurance", 1_500.0),
            monthly_hoa: amount_or(&self.monthly_hoa, "monthlyHoa", 0.0),
            debt_to_income_ratio: rate_or(&self.debt_to_income_ratio, "debtToIncomeRatio", 36.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RentVsBuyPayload {
    monthly_rent: Option<NumericField>,
    annual_rent_increase: Option<NumericField>,
    home_price: Option<NumericField>,
    down_payment: Option<NumericField>,
    interest_rate: Option<NumericField>,
    loan_term_years: Option<NumericField>,
    property_tax_rate: Option<NumericField>,
    annual_insurance: Option<NumericField>,
    annual_maintenance_rate: Option<NumericField>,
    home_appreciation_rate: Option<NumericField>,
    years_to_stay: Option<NumericField>,
}

impl RentVsBuyPayload {
    pub fn into_input(self) -> RentVsBuyInput {
        RentVsBuyInput {
            monthly_rent: amount_or(&self.monthly_rent, "monthlyRent", 2_000.0),
            annual_rent_increase: rate_or(&self.annual_rent_increase, "annualRentIncrease", 3.0),
            home_price: amount_or(&self.home_price, "homePrice", 350_000.0),
            down_payment: amount_or(&self.down_payment, "downPayment", 70_000.0),
            interest_rate: rate_or(&self.interest_rate, "interestRate", 7.0),
            loan_term_years: years_or(&self.loan_term_years, "loanTermYears", 30),
            property_tax_rate: rate_or(&self.property_tax_rate, "propertyTaxRate", 1.2),
            annual_insurance: amount_or(&self.annual_insurance, "annualInsurance", 1_500.0),
            annual_maintenance_rate: rate_or(
                &self.annual_maintenance_rate,
                "annualMaintenanceRate",
                1.0,
            ),
            home_appreciation_rate: rate_or(
                &self.home_appreciation_rate,
                "homeAppreciationRate",
                3.0,
            ),
            years_to_stay: years_or(&self.years_to_stay, "yearsToStay", 7),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DscrPayload {
    purchase_price: Option<NumericField>,
    down_payment: Option<NumericField>,
    interest_rate: Option<NumericField>,
    loan_term_years: Option<NumericField>,
    monthly_rent: Option<NumericField>,
    vacancy_rate: Option<NumericField>,
    annual_property_tax: Option<NumericField>,
    annual_insurance: Option<NumericField>,
    monthly_hoa: Option<NumericField>,
    monthly_operating_expenses: Option<NumericField>,
}

impl DscrPayload {
    pub fn into_input(self) -> DscrInput {
        DscrInput {
            purchase_price: amount_or(&self.purchase_price, "purchasePrice", 400_000.0),
            down_payment: amount_or(&self.down_payment, "downPayment", 100_000.0),
            interest_rate: rate_or(&self.interest_rate, "interestRate", 7.5),
            loan_term_years: years_or(&self.loan_term_years, "loanTermYears", 30),
            monthly_rent: amount_or(&self.monthly_rent, "monthlyRent", 3_500.0),
            vacancy_rate: rate_or(&self.vacancy_rate, "vacancyRate", 5.0),
            annual_property_tax: amount_or(
                &self.annual_property_tax,
                "annualPropertyTax",
                4_800.0,
            ),
            annual_insurance: amount_or(&self.annual_insurance, "annualInsurance", 1_800.0),
            monthly_hoa: amount_or(&self.monthly_hoa, "monthlyHoa", 0.0),
            monthly_operating_expenses: amount_or(
                &self.monthly_operating_expenses,
                "monthlyOperatingExpenses",
                300.0,
            ),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VaPurchasePayload {
    home_price: Option<NumericField>,
    down_payment: Option<NumericField>,
    interest_rate: Option<NumericField>,
    loan_term_years: Option<NumericField>,
    fee_type: Option<FeeType>,
    property_tax_rate: Option<NumericField>,
    home_insurance: Option<NumericField>,
    home_insurance_mode: Option<InsuranceMode>,
    monthly_hoa: Option<NumericField>,
    payment_frequency: Option<PaymentFrequency>,
}

impl VaPurchasePayload {
    pub fn into_input(self) -> VaPurchaseInput {
        VaPurchaseInput {
            home_price: amount_or(&self.home_price, "homePrice", 350_000.0),
            down_payment: amount_or(&self.down_payment, "downPayment", 0.0),
            interest_rate: rate_or(&self.interest_rate, "interestRate", 6.5),
            loan_term_years: years_or(&self.loan_term_years, "loanTermYears", 30),
            fee_type: self.fee_type.unwrap_or_default(),
            property_tax_rate: rate_or(&self.property_tax_rate, "propertyTaxRate", 1.2),
            home_insurance: insurance_or(&self.home_insurance, self.home_insurance_mode),
            monthly_hoa: amount_or(&self.monthly_hoa, "monthlyHoa", 0.0),
            payment_frequency: self.payment_frequency.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VaRefinancePayload {
    current_balance: Option<NumericField>,
    current_monthly_payment: Option<NumericField>,
    new_interest_rate: Option<NumericField>,
    new_loan_term_years: Option<NumericField>,
    fee_type: Option<FeeType>,
    cash_out: Option<NumericField>,
    closing_costs: Option<NumericField>,
    payment_frequency: Option<PaymentFrequency>,
}

impl VaRefinancePayload {
    pub fn into_input(self) -> VaRefinanceInput {
        VaRefinanceInput {
            current_balance: amount_or(&self.current_balance, "currentBalance", 250_000.0),
            current_monthly_payment: amount_or(
                &self.current_monthly_payment,
                "currentMonthlyPayment",
                1_800.0,
            ),
            new_interest_rate: rate_or(&self.new_interest_rate, "newInterestRate", 6.0),
            new_loan_term_years: years_or(&self.new_loan_term_years, "newLoanTermYears", 30),
            fee_type: self.fee_type.unwrap_or(FeeType::Subsequent),
            cash_out: amount_or(&self.cash_out, "cashOut", 0.0),
            closing_costs: amount_or(&self.closing_costs, "closingCosts", 3_000.0),
            payment_frequency: self.payment_frequency.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AmortizationPayload {
    loan_amount: Option<NumericField>,
    interest_rate: Option<NumericField>,
    loan_term_years: Option<NumericField>,
    extra_monthly_payment: Option<NumericField>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub loan_amount: f64,
    pub interest_rate: Rate,
    pub term_in_months: u32,
    pub extra_monthly_payment: f64,
}

impl AmortizationPayload {
    pub fn into_terms(self) -> LoanTerms {
        LoanTerms {
            loan_amount: amount_or(&self.loan_amount, "loanAmount", 280_000.0),
            interest_rate: rate_or(&self.interest_rate, "interestRate", 7.0),
            term_in_months: years_or(&self.loan_term_years, "loanTermYears", 30) * 12,
            extra_monthly_payment: amount_or(
                &self.extra_monthly_payment,
                "extraMonthlyPayment",
                0.0,
            ),
        }
    }
}

fn accepted(value: Option<f64>, name: &str, fallback: f64) -> f64 {
    match value {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        Some(value) => {
            debug!(field = name, value, fallback, "rejected input value, using fallback");
            fallback
        }
        None => fallback,
    }
}

fn amount_or(field: &Option<NumericField>, name: &str, fallback: f64) -> f64 {
    accepted(field.as_ref().and_then(NumericField::amount), name, fallback)
}

fn rate_or(field: &Option<NumericField>, name: &str, fallback_percent: f64) -> Rate {
    Rate::from_percent(accepted(
        field.as_ref().and_then(NumericField::percent),
        name,
        fallback_percent,
    ))
}

fn years_or(field: &Option<NumericField>, name: &str, fallback: u32) -> u32 {
    let years = accepted(
        field.as_ref().and_then(NumericField::amount),
        name,
        fallback as f64,
    )
    .round();
    if years > MAX_TERM_YEARS as f64 {
        debug!(field = name, years, fallback, "term too long, using fallback");
        return fallback;
    }
    years as u32
}

// An empty string means "estimate it for me".
fn manual_override(field: &Option<NumericField>) -> Option<f64> {
    field
        .as_ref()
        .and_then(NumericField::amount)
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn insurance_or(field: &Option<NumericField>, mode: Option<InsuranceMode>) -> InsuranceCost {
    match mode.unwrap_or_default() {
        InsuranceMode::Dollar => InsuranceCost::Annual(amount_or(field, "homeInsurance", 1_500.0)),
        InsuranceMode::Percent => InsuranceCost::PercentOfHomeValue(accepted(
            field.as_ref().and_then(NumericField::percent),
            "homeInsurance",
            0.5,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_from_json(json: &str) -> CalculatePayload {
        serde_json::from_str(json).expect("payload should parse")
    }

    #[test]
    fn purchase_payload_accepts_numbers_and_typed_strings() {
        let payload = payload_from_json(
            r#"{
              "calculator": "purchase",
              "homePrice": "$350,000",
              "downPayment": 70000,
              "interestRate": "7.0%",
              "loanTermYears": 30,
              "homeInsurance": "1,800",
              "loanType": "fha"
            }"#,
        );
        let ScenarioInput::Purchase(input) = payload.into_scenario() else {
            panic!("expected purchase input");
        };
        assert_eq!(input.home_price, 350_000.0);
        assert_eq!(input.down_payment, 70_000.0);
        assert_eq!(input.interest_rate, Rate::from_percent(7.0));
        assert_eq!(input.loan_term_years, 30);
        assert_eq!(input.home_insurance, InsuranceCost::Annual(1_800.0));
        assert_eq!(input.loan_type, LoanType::Fha);
        assert_eq!(input.manual_mortgage_insurance, None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let ScenarioInput::Purchase(input) =
            payload_from_json(r#"{"calculator": "purchase"}"#).into_scenario()
        else {
            panic!("expected purchase input");
        };
        assert_eq!(input.home_price, 350_000.0);
        assert_eq!(input.loan_term_years, 30);
        assert_eq!(input.loan_type, LoanType::Conventional);
    }

    #[test]
    fn negative_and_empty_values_use_fallbacks() {
        let ScenarioInput::Refinance(input) = payload_from_json(
            r#"{
              "calculator": "refinance",
              "currentBalance": -5,
              "closingCosts": "",
              "newLoanTermYears": 500
            }"#,
        )
        .into_scenario() else {
            panic!("expected refinance input");
        };
        assert_eq!(input.current_balance, 250_000.0);
        assert_eq!(input.closing_costs, 5_000.0);
        assert_eq!(input.new_loan_term_years, 30);
    }

    #[test]
    fn typed_negative_amount_falls_back_to_default() {
        let ScenarioInput::Refinance(input) = payload_from_json(
            r#"{"calculator": "refinance", "cashOut": "-10,000", "closingCosts": "$-2,500"}"#,
        )
        .into_scenario() else {
            panic!("expected refinance input");
        };
        let defaults = RefinancePayload::default().into_input();
        assert_eq!(input.cash_out, defaults.cash_out);
        assert_eq!(input.closing_costs, defaults.closing_costs);
    }

    #[test]
    fn typed_negative_rate_and_override_are_rejected() {
        let ScenarioInput::Purchase(input) = payload_from_json(
            r#"{"calculator": "purchase", "interestRate": "-7%", "monthlyMortgageInsurance": "-$90"}"#,
        )
        .into_scenario() else {
            panic!("expected purchase input");
        };
        let defaults = PurchasePayload::default().into_input();
        assert_eq!(input.interest_rate, defaults.interest_rate);
        assert_eq!(input.manual_mortgage_insurance, None);
    }

    #[test]
    fn dashes_after_the_number_do_not_flip_its_sign() {
        assert_eq!(NumericField::Text("10,000-".to_string()).amount(), Some(10_000.0));
        assert_eq!(NumericField::Text("$ 1,200".to_string()).amount(), Some(1_200.0));
    }

    #[test]
    fn manual_mortgage_insurance_needs_a_value() {
        let ScenarioInput::Purchase(empty) = payload_from_json(
            r#"{"calculator": "purchase", "monthlyMortgageInsurance": ""}"#,
        )
        .into_scenario() else {
            panic!("expected purchase input");
        };
        assert_eq!(empty.manual_mortgage_insurance, None);

        let ScenarioInput::Purchase(given) = payload_from_json(
            r#"{"calculator": "purchase", "monthlyMortgageInsurance": "95"}"#,
        )
        .into_scenario() else {
            panic!("expected purchase input");
        };
        assert_eq!(given.manual_mortgage_insurance, Some(95.0));
    }

    #[test]
    fn insurance_percent_mode_reads_a_percent() {
        let ScenarioInput::VaPurchase(input) = payload_from_json(
            r#"{
              "calculator": "va-purchase",
              "homeInsurance": "0.45%",
              "homeInsuranceMode": "percent",
              "feeType": "subsequent",
              "paymentFrequency": "bi-weekly"
            }"#,
        )
        .into_scenario() else {
            panic!("expected VA purchase input");
        };
        assert_eq!(input.home_insurance, InsuranceCost::PercentOfHomeValue(0.45));
        assert_eq!(input.fee_type, FeeType::Subsequent);
        assert_eq!(input.payment_frequency, PaymentFrequency::BiWeekly);
    }

    #[test]
    fn calculator_tags_accept_camel_case_aliases() {
        let payload = payload_from_json(r#"{"calculator": "rentVsBuy", "yearsToStay": "10"}"#);
        let ScenarioInput::RentVsBuy(input) = payload.into_scenario() else {
            panic!("expected rent-vs-buy input");
        };
        assert_eq!(input.years_to_stay, 10);
    }

    #[test]
    fn unknown_calculator_is_rejected() {
        let err = serde_json::from_str::<CalculatePayload>(r#"{"calculator": "reverse"}"#)
            .expect_err("unknown calculator must fail");
        assert!(err.to_string().contains("reverse"));
    }

    #[test]
    fn unknown_fee_type_is_rejected() {
        assert!(
            serde_json::from_str::<CalculatePayload>(
                r#"{"calculator": "va-refinance", "feeType": "sometimes"}"#
            )
            .is_err()
        );
    }

    #[test]
    fn amortization_payload_converts_years_to_months() {
        let payload: AmortizationPayload =
            serde_json::from_str(r#"{"loanAmount": "200,000", "loanTermYears": 15}"#)
                .expect("payload should parse");
        let terms = payload.into_terms();
        assert_eq!(terms.loan_amount, 200_000.0);
        assert_eq!(terms.term_in_months, 180);
        assert_eq!(terms.interest_rate, Rate::from_percent(7.0));
    }
}
