pub fn dollar_to_percent(dollar_amount: f64, home_value: f64) -> f64 {
    if home_value > 0.0 {
        dollar_amount / home_value * 100.0
    } else {
        0.0
    }
}

pub fn percent_to_dollar(percent: f64, home_value: f64) -> f64 {
    home_value * percent / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InsuranceCost {
    Annual(f64),
    PercentOfHomeValue(f64),
}

impl Default for InsuranceCost {
    fn default() -> Self {
        InsuranceCost::Annual(0.0)
    }
}

impl InsuranceCost {
    pub fn annual_amount(self, home_value: f64) -> f64 {
        match self {
            InsuranceCost::Annual(dollars) => dollars,
            InsuranceCost::PercentOfHomeValue(percent) => percent_to_dollar(percent, home_value),
        }
    }

    pub fn monthly_amount(self, home_value: f64) -> f64 {
        self.annual_amount(home_value) / 12.0
    }

    pub fn to_percent_mode(self, home_value: f64) -> Self {
        match self {
            InsuranceCost::Annual(dollars) => {
                InsuranceCost::PercentOfHomeValue(dollar_to_percent(dollars, home_value))
            }
            InsuranceCost::PercentOfHomeValue(_) => self,
        }
    }

    pub fn to_dollar_mode(self, home_value: f64) -> Self {
        match self {
            InsuranceCost::Annual(_) => self,
            InsuranceCost::PercentOfHomeValue(percent) => {
                InsuranceCost::Annual(percent_to_dollar(percent, home_value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn converts_between_dollars_and_percent() {
        assert_eq!(dollar_to_percent(1_750.0, 350_000.0), 0.5);
        assert_eq!(percent_to_dollar(0.5, 350_000.0), 1_750.0);
    }

    #[test]
    fn zero_home_value_gives_zero_percent() {
        assert_eq!(dollar_to_percent(1_750.0, 0.0), 0.0);
        assert_eq!(dollar_to_percent(1_750.0, -1.0), 0.0);
        assert_eq!(percent_to_dollar(0.5, 0.0), 0.0);
    }

    #[test]
    fn percent_mode_follows_home_value() {
        let cost = InsuranceCost::PercentOfHomeValue(0.5);
        assert_eq!(cost.annual_amount(300_000.0), 1_500.0);
        assert_eq!(cost.annual_amount(400_000.0), 2_000.0);
        assert_eq!(InsuranceCost::Annual(1_200.0).annual_amount(400_000.0), 1_200.0);
        assert_eq!(InsuranceCost::Annual(1_200.0).monthly_amount(0.0), 100.0);
    }

    #[test]
    fn toggling_modes_preserves_the_premium() {
        let dollars = InsuranceCost::Annual(1_800.0);
        let percent = dollars.to_percent_mode(360_000.0);
        assert_eq!(percent, InsuranceCost::PercentOfHomeValue(0.5));
        assert_eq!(percent.to_percent_mode(1.0), percent);
        assert_eq!(percent.to_dollar_mode(360_000.0), InsuranceCost::Annual(1_800.0));
        assert_eq!(dollars.to_dollar_mode(1.0), dollars);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_dollar_round_trip_within_a_cent(
            dollars in 0.0f64..50_000.0,
            home_value in 1.0f64..10_000_000.0
        ) {
            let back = percent_to_dollar(dollar_to_percent(dollars, home_value), home_value);
            prop_assert!((back - dollars).abs() <= 0.01);
        }

        #[test]
        fn prop_percent_round_trip_within_tolerance(
            percent in 0.0f64..5.0,
            home_value in 1.0f64..10_000_000.0
        ) {
            let back = dollar_to_percent(percent_to_dollar(percent, home_value), home_value);
            prop_assert!((back - percent).abs() <= 0.0001);
        }

        #[test]
        fn prop_conversion_is_linear(
            dollars in 0.0f64..50_000.0,
            home_value in 1_000.0f64..5_000_000.0
        ) {
            let single = dollar_to_percent(dollars, home_value);
            let double = dollar_to_percent(2.0 * dollars, home_value);
            prop_assert!((double - 2.0 * single).abs() <= 1e-9);

            let dollars_single = percent_to_dollar(single, home_value);
            let dollars_double = percent_to_dollar(double, home_value);
            prop_assert!((dollars_double - 2.0 * dollars_single).abs() <= 0.01);
        }
    }
}
