use super::types::{CalculatorResult, ResultFormat};

pub fn format_currency(value: f64, decimals: usize) -> String {
    let (negative, body) = fixed_with_grouping(value, decimals);
    if negative {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

pub fn format_percentage(fraction: f64, decimals: usize) -> String {
    format!("{}%", format_number(fraction * 100.0, decimals))
}

pub fn format_number(value: f64, decimals: usize) -> String {
    let (negative, body) = fixed_with_grouping(value, decimals);
    if negative { format!("-{body}") } else { body }
}

pub fn format_result(result: &CalculatorResult) -> String {
    match result.format {
        ResultFormat::Currency => format_currency(result.value, result.decimals.unwrap_or(0)),
        ResultFormat::Percentage => {
            format_percentage(result.value, result.decimals.unwrap_or(2))
        }
        ResultFormat::Number => format_number(result.value, result.decimals.unwrap_or(0)),
    }
}

pub fn parse_currency_input(raw: &str) -> String {
    strip_to_decimal(raw)
}

pub fn parse_percentage_input(raw: &str) -> String {
    strip_to_decimal(raw)
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    parse_cleaned(&parse_currency_input(raw))
}

pub fn parse_percent(raw: &str) -> Option<f64> {
    parse_cleaned(&parse_percentage_input(raw))
}

fn parse_cleaned(cleaned: &str) -> Option<f64> {
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

// Keeps ASCII digits and the first '.' only.
fn strip_to_decimal(raw: &str) -> String {
    let mut seen_point = false;
    raw.chars()
        .filter(|&c| {
            if c.is_ascii_digit() {
                true
            } else if c == '.' && !seen_point {
                seen_point = true;
                true
            } else {
                false
            }
        })
        .collect()
}

fn fixed_with_grouping(value: f64, decimals: usize) -> (bool, String) {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.*}", decimals, round_half_up(value.abs(), decimals));
    // -0.001 at two decimals is "0.00" and must not keep its sign.
    let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));

    let body = match fixed.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{frac_part}", group_thousands(int_part)),
        None => group_thousands(&fixed),
    };
    (negative, body)
}

// `{:.*}` alone breaks exact ties to even.
fn round_half_up(magnitude: f64, decimals: usize) -> f64 {
    let Ok(exponent) = i32::try_from(decimals) else {
        return magnitude;
    };
    let scale = 10f64.powi(exponent);
    let scaled = magnitude * scale;
    if !scaled.is_finite() {
        return magnitude;
    }
    scaled.round() / scale
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
