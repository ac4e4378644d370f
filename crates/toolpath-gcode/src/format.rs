//! Bounded-precision number rendering for command fields.

/// Format `value` with at most `decimals` decimal places, stripping trailing
/// zeros and a dangling decimal point. Negative zero collapses to `0`.
pub fn trim_fixed(value: f64, decimals: usize) -> String {
    let mut s = format!("{value:.decimals$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// Positional axis value, 3 decimal places.
pub fn axis(value: f64) -> String {
    trim_fixed(value, 3)
}

/// Extrusion amount, 6 decimal places.
pub fn e_value(value: f64) -> String {
    trim_fixed(value, 6)
}

/// Feed rate, 1 decimal place.
pub fn feed(value: f64) -> String {
    trim_fixed(value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_zeros_stripped() {
        assert_eq!(axis(10.0), "10");
        assert_eq!(axis(10.500), "10.5");
        assert_eq!(axis(0.123456), "0.123");
        assert_eq!(e_value(0.797965), "0.797965");
        assert_eq!(e_value(2.0), "2");
        assert_eq!(feed(1000.0), "1000");
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(axis(-0.0001), "0");
        assert_eq!(axis(-0.0), "0");
        assert_eq!(axis(-1.5), "-1.5");
    }

    #[test]
    fn test_axis_round_trip_within_tolerance() {
        for &v in &[0.0, 1.2345, -98.7654, 250.001, 0.0004, 1e3] {
            let parsed: f64 = axis(v).parse().unwrap();
            assert!((parsed - v).abs() < 1e-3, "{v} -> {parsed}");
        }
    }

    #[test]
    fn test_e_round_trip_within_tolerance() {
        for &v in &[0.079796, -5.0, 123.456789] {
            let parsed: f64 = e_value(v).parse().unwrap();
            assert!((parsed - v).abs() < 1e-6, "{v} -> {parsed}");
        }
    }
}
