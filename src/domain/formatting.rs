//! Text formatting for prices, market figures and timestamps.

const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// `$` price with precision growing as the price shrinks
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "N/A".to_string();
    }
    if price == 0.0 {
        return "$0.00".to_string();
    }
    if price < 0.01 {
        format!("${:.6}", price)
    } else if price < 1.0 {
        format!("${:.4}", price)
    } else if price < 10.0 {
        format!("${:.3}", price)
    } else {
        format!("${}", group_thousands(&format!("{:.2}", price)))
    }
}

/// Compact currency, e.g. `$1.26T`, `-$3.40M`, `$512.5`
pub fn format_currency_compact(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    match scale_of(abs) {
        Some((divisor, suffix)) => format!("{sign}${:.2}{suffix}", abs / divisor),
        None => format!("{sign}${}", up_to_two_decimals(abs)),
    }
}

pub fn format_market_cap(value: Option<f64>) -> String {
    value.map(format_currency_compact).unwrap_or_else(|| "N/A".to_string())
}

pub fn format_volume(value: Option<f64>) -> String {
    format_market_cap(value)
}

/// Signed percentage with two decimals; zero carries no sign
pub fn format_percentage(percentage: f64) -> String {
    if !percentage.is_finite() || percentage == 0.0 {
        return "0.00%".to_string();
    }
    if percentage > 0.0 {
        format!("+{:.2}%", percentage)
    } else {
        format!("{:.2}%", percentage)
    }
}

/// Circulating supply without currency sign; missing or zero is `N/A`
pub fn format_supply(supply: Option<f64>) -> String {
    let supply = match supply {
        Some(s) if s.is_finite() && s != 0.0 => s.abs(),
        _ => return "N/A".to_string(),
    };
    match scale_of(supply) {
        Some((divisor, suffix)) => format!("{:.2}{suffix}", supply / divisor),
        None => up_to_two_decimals(supply),
    }
}

/// One-decimal compact number without currency, e.g. `12.3K`
pub fn format_compact_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    match scale_of(abs) {
        Some((divisor, suffix)) => format!("{sign}{:.1}{suffix}", abs / divisor),
        None => format!("{sign}{:.0}", abs),
    }
}

/// Relative age of a timestamp given the elapsed seconds
pub fn format_elapsed(seconds: i64) -> String {
    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3_600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3_600)
    } else {
        format!("{}d ago", seconds / 86_400)
    }
}

fn scale_of(abs: f64) -> Option<(f64, &'static str)> {
    SCALES.iter().copied().find(|(divisor, _)| abs >= *divisor)
}

/// Up to two fraction digits with trailing zeros dropped, integer part grouped
fn up_to_two_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    group_thousands(trimmed)
}

/// Inserts `,` every three digits of the integer part of a plain decimal string
pub fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_precision_by_magnitude() {
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(0.004321), "$0.004321");
        assert_eq!(format_price(0.5), "$0.5000");
        assert_eq!(format_price(2.5), "$2.500");
        assert_eq!(format_price(64_000.5), "$64,000.50");
    }

    #[test]
    fn compact_currency() {
        assert_eq!(format_currency_compact(1.26e12), "$1.26T");
        assert_eq!(format_currency_compact(-3.4e6), "-$3.40M");
        assert_eq!(format_currency_compact(512.5), "$512.5");
        assert_eq!(format_currency_compact(512.0), "$512");
        assert_eq!(format_market_cap(None), "N/A");
    }

    #[test]
    fn percentages_and_supply() {
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(5.126), "+5.13%");
        assert_eq!(format_percentage(-7.0), "-7.00%");
        assert_eq!(format_supply(Some(19_700_000.0)), "19.70M");
        assert_eq!(format_supply(Some(0.0)), "N/A");
        assert_eq!(format_supply(Some(1234.0)), "1.23K");
        assert_eq!(format_supply(Some(999.0)), "999");
    }

    #[test]
    fn elapsed_and_grouping() {
        assert_eq!(format_elapsed(30), "Just now");
        assert_eq!(format_elapsed(125), "2m ago");
        assert_eq!(format_elapsed(7_300), "2h ago");
        assert_eq!(format_elapsed(200_000), "2d ago");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
        assert_eq!(group_thousands("-100"), "-100");
        assert_eq!(format_compact_number(12_345.0), "12.3K");
    }
}
