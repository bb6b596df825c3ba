/// Formats a rupee amount for display: whole rupees, Indian digit grouping,
/// a leading minus for negatives, and an em-dash placeholder for values that
/// fell out of the finite range.
pub fn format_inr(n: f64) -> String {
    if !n.is_finite() {
        return "\u{2014}".to_string();
    }
    let sign = if n < 0.0 { "-" } else { "" };
    let rupees = n.abs().round();
    format!("{sign}\u{20B9}{}", group_indian(&format!("{rupees:.0}")))
}

/// Indian numbering system: the last three digits form one group, everything
/// above them groups in pairs (12,34,56,789).
fn group_indian(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 2);
    for (idx, ch) in digits.chars().enumerate() {
        let remaining = len - idx;
        if idx > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_in_indian_style() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(100.0), "₹100");
        assert_eq!(format_inr(1_000.0), "₹1,000");
        assert_eq!(format_inr(123_456.0), "₹1,23,456");
        assert_eq!(format_inr(1_200_000.0), "₹12,00,000");
        assert_eq!(format_inr(123_456_789.0), "₹12,34,56,789");
    }

    #[test]
    fn rounds_to_whole_rupees() {
        assert_eq!(format_inr(2_323_390.7635), "₹23,23,391");
        assert_eq!(format_inr(0.4), "₹0");
        assert_eq!(format_inr(0.5), "₹1");
    }

    #[test]
    fn preserves_sign_on_negatives() {
        assert_eq!(format_inr(-1_500.0), "-₹1,500");
        assert_eq!(format_inr(-0.2), "-₹0");
    }

    #[test]
    fn non_finite_renders_placeholder() {
        assert_eq!(format_inr(f64::NAN), "—");
        assert_eq!(format_inr(f64::INFINITY), "—");
        assert_eq!(format_inr(f64::NEG_INFINITY), "—");
    }
}
