use super::types::{AmortizationPeriod, AmortizationResult, AmortizationYear, Rate};

// Floating-point residue left after a payment at or below this counts as paid.
const PAID_OFF_TOLERANCE: f64 = 1e-6;

pub fn payment_factor(annual_rate: Rate, term_in_months: u32) -> f64 {
    if term_in_months == 0 {
        return 0.0;
    }
    let r = annual_rate.monthly_fraction();
    let n = term_in_months as f64;
    if r == 0.0 {
        return 1.0 / n;
    }
    let growth = (1.0 + r).powf(n);
    if !growth.is_finite() {
        return r;
    }
    r * growth / (growth - 1.0)
}

pub fn monthly_principal_and_interest(principal: f64, annual_rate: Rate, term_in_months: u32) -> f64 {
    if principal.is_nan() || principal <= 0.0 || term_in_months == 0 {
        return 0.0;
    }
    if annual_rate.monthly_fraction() == 0.0 {
        return principal / term_in_months as f64;
    }
    principal * payment_factor(annual_rate, term_in_months)
}

#[derive(Debug, Clone)]
pub struct PayoffSimulation {
    balance: f64,
    monthly_rate: f64,
    payment: f64,
    month: u32,
    max_months: u32,
}

impl PayoffSimulation {
    pub fn new(
        principal: f64,
        annual_rate: Rate,
        term_in_months: u32,
        extra_monthly_payment: f64,
    ) -> Self {
        let standard = monthly_principal_and_interest(principal, annual_rate, term_in_months);
        let extra = if extra_monthly_payment.is_finite() {
            extra_monthly_payment.max(0.0).min(standard)
        } else {
            0.0
        };
        Self {
            balance: if standard > 0.0 { principal } else { 0.0 },
            monthly_rate: annual_rate.monthly_fraction(),
            payment: standard + extra,
            month: 0,
            max_months: term_in_months.saturating_mul(2),
        }
    }
}

impl Iterator for PayoffSimulation {
    type Item = AmortizationPeriod;

    fn next(&mut self) -> Option<Self::Item> {
        if self.balance <= 0.0 || self.month >= self.max_months {
            return None;
        }
        self.month += 1;

        let interest = self.balance * self.monthly_rate;
        let mut principal = (self.payment - interest).min(self.balance);
        self.balance -= principal;
        if self.balance <= PAID_OFF_TOLERANCE {
            principal += self.balance;
            self.balance = 0.0;
        }

        Some(AmortizationPeriod {
            month: self.month,
            interest,
            principal,
            balance: self.balance,
        })
    }
}

pub fn calculate_amortization(
    principal: f64,
    annual_rate: Rate,
    term_in_months: u32,
    extra_monthly_payment: f64,
) -> AmortizationResult {
    if principal.is_nan() || principal <= 0.0 || term_in_months == 0 {
        return AmortizationResult::default();
    }

    let mut total_interest = 0.0;
    let mut actual_term_in_months = 0;
    for period in PayoffSimulation::new(principal, annual_rate, term_in_months, extra_monthly_payment)
    {
        total_interest += period.interest;
        actual_term_in_months = period.month;
    }

    AmortizationResult {
        monthly_principal_and_interest: monthly_principal_and_interest(
            principal,
            annual_rate,
            term_in_months,
        ),
        total_interest,
        actual_term_in_months,
    }
}

pub fn amortization_schedule(
    principal: f64,
    annual_rate: Rate,
    term_in_months: u32,
    extra_monthly_payment: f64,
) -> Vec<AmortizationYear> {
    let mut years: Vec<AmortizationYear> = Vec::new();
    for period in PayoffSimulation::new(principal, annual_rate, term_in_months, extra_monthly_payment)
    {
        let year = (period.month - 1) / 12 + 1;
        match years.last_mut() {
            Some(row) if row.year == year => {
                row.principal_paid += period.principal;
                row.interest_paid += period.interest;
                row.ending_balance = period.balance;
            }
            _ => years.push(AmortizationYear {
                year,
                principal_paid: period.principal,
                interest_paid: period.interest,
                ending_balance: period.balance,
            }),
        }
    }
    years
}

pub fn remaining_balance(
    principal: f64,
    annual_rate: Rate,
    term_in_months: u32,
    months_paid: u32,
) -> f64 {
    if principal.is_nan() || principal <= 0.0 || term_in_months == 0 {
        return 0.0;
    }
    if months_paid == 0 {
        return principal;
    }
    PayoffSimulation::new(principal, annual_rate, term_in_months, 0.0)
        .take(months_paid as usize)
        .last()
        .map(|period| period.balance)
        .unwrap_or(0.0)
}
