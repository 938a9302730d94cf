use serde::{Deserialize, Serialize};

use super::insurance::InsuranceCost;

/// An annual rate held as a percent-number: `Rate::from_percent(7.0)` is 7 %.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Rate(f64);

impl Rate {
    pub const ZERO: Rate = Rate(0.0);

    pub fn from_percent(percent: f64) -> Self {
        Self(percent)
    }

    pub fn as_percent(self) -> f64 {
        self.0
    }

    pub fn as_fraction(self) -> f64 {
        self.0 / 100.0
    }

    pub fn monthly_fraction(self) -> f64 {
        self.as_fraction() / 12.0
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanType {
    #[default]
    Conventional,
    Fha,
    Va,
    Usda,
    Jumbo,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeType {
    #[default]
    #[serde(alias = "firstTime", alias = "first_time")]
    FirstTime,
    Subsequent,
    Exempt,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    #[serde(alias = "biWeekly", alias = "bi_weekly", alias = "biweekly")]
    BiWeekly,
    Weekly,
}

impl PaymentFrequency {
    pub fn payment_label(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "Monthly Payment",
            PaymentFrequency::BiWeekly => "Bi-Weekly Payment",
            PaymentFrequency::Weekly => "Weekly Payment",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Purchase,
    Refinance,
    Affordability,
    #[serde(alias = "rentVsBuy", alias = "rent_vs_buy")]
    RentVsBuy,
    Dscr,
    #[serde(alias = "vaPurchase", alias = "va_purchase")]
    VaPurchase,
    #[serde(alias = "vaRefinance", alias = "va_refinance")]
    VaRefinance,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 7] = [
        CalculatorKind::Purchase,
        CalculatorKind::Refinance,
        CalculatorKind::Affordability,
        CalculatorKind::RentVsBuy,
        CalculatorKind::Dscr,
        CalculatorKind::VaPurchase,
        CalculatorKind::VaRefinance,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            CalculatorKind::Purchase => "purchase",
            CalculatorKind::Refinance => "refinance",
            CalculatorKind::Affordability => "affordability",
            CalculatorKind::RentVsBuy => "rent-vs-buy",
            CalculatorKind::Dscr => "dscr",
            CalculatorKind::VaPurchase => "va-purchase",
            CalculatorKind::VaRefinance => "va-refinance",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CalculatorKind::Purchase => "Mortgage Purchase Calculator",
            CalculatorKind::Refinance => "Refinance Calculator",
            CalculatorKind::Affordability => "Home Affordability Calculator",
            CalculatorKind::RentVsBuy => "Rent vs. Buy Calculator",
            CalculatorKind::Dscr => "DSCR Investment Property Calculator",
            CalculatorKind::VaPurchase => "VA Purchase Calculator",
            CalculatorKind::VaRefinance => "VA Refinance Calculator",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    Currency,
    /// The value is a fraction: 0.05 displays as 5.00%.
    Percentage,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResult {
    pub label: String,
    pub value: f64,
    pub format: ResultFormat,
    pub highlight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<usize>,
}

impl CalculatorResult {
    fn new(label: impl Into<String>, value: f64, format: ResultFormat) -> Self {
        Self {
            label: label.into(),
            value: if value.is_finite() { value } else { 0.0 },
            format,
            highlight: false,
            description: None,
            decimals: None,
        }
    }

    pub fn currency(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, value, ResultFormat::Currency)
    }

    pub fn percentage(label: impl Into<String>, fraction: f64) -> Self {
        Self::new(label, fraction, ResultFormat::Percentage)
    }

    pub fn number(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, value, ResultFormat::Number)
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationResult {
    pub monthly_principal_and_interest: f64,
    pub total_interest: f64,
    pub actual_term_in_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationPeriod {
    pub month: u32,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseInput {
    pub home_price: f64,
    pub down_payment: f64,
    pub interest_rate: Rate,
    pub loan_term_years: u32,
    pub property_tax_rate: Rate,
    pub home_insurance: InsuranceCost,
    pub monthly_hoa: f64,
    pub loan_type: LoanType,
    pub manual_mortgage_insurance: Option<f64>,
    pub extra_monthly_payment: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefinanceInput {
    pub current_balance: f64,
    pub current_monthly_payment: f64,
    pub new_interest_rate: Rate,
    pub new_loan_term_years: u32,
    pub closing_costs: f64,
    pub cash_out: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AffordabilityInput {
    pub annual_income: f64,
    pub monthly_debts: f64,
    pub down_payment: f64,
    pub interest_rate: Rate,
    pub loan_term_years: u32,
    pub property_tax_rate: Rate,
    pub annual_insurance: f64,
    pub monthly_hoa: f64,
    pub debt_to_income_ratio: Rate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RentVsBuyInput {
    pub monthly_rent: f64,
    pub annual_rent_increase: Rate,
    pub home_price: f64,
    pub down_payment: f64,
    pub interest_rate: Rate,
    pub loan_term_years: u32,
    pub property_tax_rate: Rate,
    pub annual_insurance: f64,
    pub annual_maintenance_rate: Rate,
    pub home_appreciation_rate: Rate,
    pub years_to_stay: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DscrInput {
    pub purchase_price: f64,
    pub down_payment: f64,
    pub interest_rate: Rate,
    pub loan_term_years: u32,
    pub monthly_rent: f64,
    pub vacancy_rate: Rate,
    pub annual_property_tax: f64,
    pub annual_insurance: f64,
    pub monthly_hoa: f64,
    pub monthly_operating_expenses: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VaPurchaseInput {
    pub home_price: f64,
    pub down_payment: f64,
    pub interest_rate: Rate,
    pub loan_term_years: u32,
    pub fee_type: FeeType,
    pub property_tax_rate: Rate,
    pub home_insurance: InsuranceCost,
    pub monthly_hoa: f64,
    pub payment_frequency: PaymentFrequency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VaRefinanceInput {
    pub current_balance: f64,
    pub current_monthly_payment: f64,
    pub new_interest_rate: Rate,
    pub new_loan_term_years: u32,
    pub fee_type: FeeType,
    pub cash_out: f64,
    pub closing_costs: f64,
    pub payment_frequency: PaymentFrequency,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioInput {
    Purchase(PurchaseInput),
    Refinance(RefinanceInput),
    Affordability(AffordabilityInput),
    RentVsBuy(RentVsBuyInput),
    Dscr(DscrInput),
    VaPurchase(VaPurchaseInput),
    VaRefinance(VaRefinanceInput),
}

impl ScenarioInput {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            ScenarioInput::Purchase(_) => CalculatorKind::Purchase,
            ScenarioInput::Refinance(_) => CalculatorKind::Refinance,
            ScenarioInput::Affordability(_) => CalculatorKind::Affordability,
            ScenarioInput::RentVsBuy(_) => CalculatorKind::RentVsBuy,
            ScenarioInput::Dscr(_) => CalculatorKind::Dscr,
            ScenarioInput::VaPurchase(_) => CalculatorKind::VaPurchase,
            ScenarioInput::VaRefinance(_) => CalculatorKind::VaRefinance,
        }
    }
}
