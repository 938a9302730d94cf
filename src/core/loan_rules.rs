use super::types::LoanType;

pub const CONVENTIONAL_PMI_ANNUAL_RATE: f64 = 0.005;
pub const FHA_MIP_ANNUAL_RATE: f64 = 0.0085;
pub const USDA_GUARANTEE_FEE_ANNUAL_RATE: f64 = 0.0035;

impl LoanType {
    pub fn estimated_insurance_rate(self) -> f64 {
        match self {
            LoanType::Conventional => CONVENTIONAL_PMI_ANNUAL_RATE,
            LoanType::Fha => FHA_MIP_ANNUAL_RATE,
            LoanType::Usda => USDA_GUARANTEE_FEE_ANNUAL_RATE,
            LoanType::Va | LoanType::Jumbo => 0.0,
        }
    }

    pub fn insurance_label(self) -> &'static str {
        match self {
            LoanType::Conventional => "Private Mortgage Insurance (PMI)",
            LoanType::Fha => "FHA Mortgage Insurance (MIP)",
            LoanType::Va => "Mortgage Insurance (none on VA loans)",
            LoanType::Usda => "USDA Guarantee Fee",
            LoanType::Jumbo => "Jumbo PMI",
        }
    }
}

/// A manual figure wins over the estimate, except for VA, which never carries
/// monthly mortgage insurance.
pub fn monthly_mortgage_insurance(
    loan_type: LoanType,
    loan_balance: f64,
    manual_monthly: Option<f64>,
) -> f64 {
    match (loan_type, manual_monthly) {
        (LoanType::Va, _) => 0.0,
        (_, Some(manual)) => manual.max(0.0),
        (LoanType::Conventional | LoanType::Fha | LoanType::Usda | LoanType::Jumbo, None) => {
            loan_balance.max(0.0) * loan_type.estimated_insurance_rate() / 12.0
        }
    }
}
