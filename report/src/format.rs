/// Formats a USD amount with a magnitude suffix.
///
/// `>= 1e9` -> `$X.XXB`, `>= 1e6` -> `$X.XXM`, otherwise `$X,XXX.XX`.
pub fn format_currency(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}${}", group_thousands(&format!("{:.2}", value.abs())))
    }
}

/// Two decimals with a trailing percent sign, e.g. `-3.10%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Inserts `,` every three digits of the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain, ""));

    let mut grouped = String::with_capacity(plain.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}
