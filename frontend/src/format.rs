fn format_with_commas(value: u64) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// US-dollar amount with thousands separators and two decimals.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, format_with_commas(cents / 100), cents % 100)
}

/// Percentage with one decimal, e.g. `40.0%`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value)
}

/// `monthly` -> `Monthly`, for option labels.
pub fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(-42.0), "-$42.00");
    }

    #[test]
    fn currency_handles_odd_input() {
        assert_eq!(format_currency(f64::NAN), "$0.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(40.0), "40.0%");
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_percent(f64::INFINITY), "0.0%");
    }

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(capitalized("monthly"), "Monthly");
        assert_eq!(capitalized(""), "");
    }
}
