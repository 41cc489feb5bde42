//! Formatting utilities used for CLI and export outputs.

/// Hours with a fixed number of decimals; `-0.00` is shown as `0.00`.
pub fn fmt_hours(hours: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, hours);
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Fractional hours as `HHh MMm` (or `HH:MM` when `short`), rounded to the minute.
pub fn hours2readable(hours: f64, want_sign: bool, short: bool) -> String {
    let total = (hours * 60.0).round() as i64;
    let abs_m = total.abs();
    let h = abs_m / 60;
    let m = abs_m % 60;

    let sign = if total > 0 && want_sign {
        "+"
    } else if total < 0 {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, h, m)
    } else {
        format!("{}{:02}h {:02}m", sign, h, m)
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_with_decimals() {
        assert_eq!(fmt_hours(4.25, 2), "4.25");
        assert_eq!(fmt_hours(-1.0, 1), "-1.0");
        assert_eq!(fmt_hours(-0.001, 2), "0.00");
    }

    #[test]
    fn readable_hours() {
        assert_eq!(hours2readable(4.25, false, false), "04h 15m");
        assert_eq!(hours2readable(1.5, true, true), "+01:30");
        assert_eq!(hours2readable(-0.5, false, true), "-00:30");
        assert_eq!(hours2readable(0.0, true, true), "00:00");
    }
}
