use super::types::{FeeType, PaymentFrequency};

pub const FIRST_TIME_FUNDING_FEE_RATE: f64 = 0.0215;
pub const SUBSEQUENT_FUNDING_FEE_RATE: f64 = 0.033;

impl FeeType {
    pub fn funding_fee_rate(self) -> f64 {
        match self {
            FeeType::FirstTime => FIRST_TIME_FUNDING_FEE_RATE,
            FeeType::Subsequent => SUBSEQUENT_FUNDING_FEE_RATE,
            FeeType::Exempt => 0.0,
        }
    }
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }
}

pub fn calculate_va_funding_fee(base_mortgage_amount: f64, fee_type: FeeType) -> f64 {
    base_mortgage_amount.max(0.0) * fee_type.funding_fee_rate()
}

pub fn calculate_final_mortgage_amount(base_mortgage_amount: f64, va_funding_fee: f64) -> f64 {
    base_mortgage_amount + va_funding_fee
}

pub fn get_periods_per_year(frequency: PaymentFrequency) -> u32 {
    frequency.periods_per_year()
}

pub fn payment_for_frequency(monthly_payment: f64, frequency: PaymentFrequency) -> f64 {
    monthly_payment * 12.0 / get_periods_per_year(frequency) as f64
}
