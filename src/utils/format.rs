//! 숫자 표시 형식 (원 단위 반올림, 천 단위 구분, 소수 둘째 자리)

/// Rounds half toward positive infinity, the way the web page rounded
/// (`Math.round`). `-2.5` becomes `-2`, `2.5` becomes `3`.
pub fn js_round(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Thousands-separated number with at most three fraction digits.
pub fn format_grouped(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let digits = format!("{:.3}", x.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (digits.as_str(), ""),
    };

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + 5);
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    if x < 0.0 && out.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.insert(0, '-');
    }
    out
}

/// Fixed number of fraction digits, no grouping. An exact tie rounds away
/// from zero (`toFixed`), where `{:.N}` alone would round it to even.
pub fn format_fixed(x: f64, digits: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }

    let sign = if x < 0.0 { "-" } else { "" };
    let magnitude = x.abs();

    // every finite f64 has a terminating expansion within 1074 places
    let exact = format!("{:.1074}", magnitude);
    let (int_part, frac_part) = match exact.split_once('.') {
        Some((i, f)) => (i, f),
        None => (exact.as_str(), ""),
    };
    let is_tie = frac_part.len() > digits
        && frac_part.as_bytes()[digits] == b'5'
        && frac_part.as_bytes()[digits + 1..].iter().all(|b| *b == b'0');

    let body = if is_tie {
        let truncated = if digits == 0 {
            int_part.to_string()
        } else {
            format!("{}.{}", int_part, &frac_part[..digits])
        };
        increment_last_digit(&truncated)
    } else {
        format!("{:.*}", digits, magnitude)
    };
    format!("{}{}", sign, body)
}

/// Adds one unit in the last place of a plain decimal string.
fn increment_last_digit(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    for i in (0..chars.len()).rev() {
        match chars[i] {
            '.' => continue,
            '9' => chars[i] = '0',
            d => {
                chars[i] = char::from(d as u8 + 1);
                return chars.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(chars).collect()
}

/// 원 단위 금액: 반올림 후 천 단위 구분
pub fn format_won(x: f64) -> String {
    format!("{}원", format_grouped(js_round(x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_round_half_up() {
        assert_eq!(js_round(2.5), 3.0);
        assert_eq!(js_round(-2.5), -2.0);
        assert_eq!(js_round(19.999), 20.0);
        assert_eq!(js_round(-0.4), 0.0);
        assert!(js_round(-0.4).is_sign_positive());
        assert!(js_round(f64::NAN).is_nan());
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(-1234567.0), "-1,234,567");
        assert_eq!(format_grouped(1234.5), "1,234.5");
        assert_eq!(format_grouped(0.12345), "0.123");
        assert_eq!(format_grouped(-0.0001), "0");
        assert_eq!(format_grouped(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_fixed_and_won() {
        assert_eq!(format_fixed(20.0, 2), "20.00");
        assert_eq!(format_fixed(3.456, 2), "3.46");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_won(71234.6), "71,235원");
        assert_eq!(format_won(f64::NAN), "NaN원");
    }

    #[test]
    fn test_format_fixed_rounds_ties_up() {
        assert_eq!(format_fixed(2.125, 2), "2.13");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(1.375, 2), "1.38");
        assert_eq!(format_fixed(9.875, 2), "9.88");
        assert_eq!(format_fixed(0.5, 0), "1");
        assert_eq!(format_fixed(-2.125, 2), "-2.13");
        assert_eq!(format_fixed(99.5, 0), "100");
        // 2.675 is stored just below the tie
        assert_eq!(format_fixed(2.675, 2), "2.67");
    }
}
