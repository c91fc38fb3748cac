use scatterplot3d::data::tick_format::*;

#[test]
fn auto_uses_three_significant_digits_in_decimal_range() {
    let f = TickFormatter::Auto;
    assert_eq!(f.format(2f64.powi(-8)), "0.00391");
    assert_eq!(f.format(std::f64::consts::SQRT_2), "1.41");
    assert_eq!(f.format(2.0 * std::f64::consts::SQRT_2), "2.83");
    assert_eq!(f.format(0.25), "0.25");
    assert_eq!(f.format(1.0), "1");
    assert_eq!(f.format(64.0), "64");
    assert_eq!(f.format(1024.0), "1024");
}

#[test]
fn auto_switches_to_scientific_for_tiny_and_huge_values() {
    let f = TickFormatter::Auto;
    assert_eq!(f.format(2f64.powi(-12)), "2.44e-4");
    assert_eq!(f.format(0.0001), "1e-4");
    assert_eq!(f.format(1e6), "1e6");
    assert_eq!(f.format(1_234_567.0), "1.23e6");
    assert_eq!(f.format(-0.0005), "-5e-4");
}

#[test]
fn auto_handles_zero_and_non_finite() {
    let f = TickFormatter::default();
    assert_eq!(f.format(0.0), "0");
    assert_eq!(f.format(f64::INFINITY), "inf");
    assert_eq!(f.format(f64::NAN), "NaN");
}

#[test]
fn decimal_formatter_fixed_places_and_unit() {
    let f = DecimalFormatter {
        decimal_places: 2,
        trim_zeros: false,
        unit: Some("s".to_string()),
    };
    assert_eq!(f.format(1.5), "1.50 s");

    let trimmed = DecimalFormatter {
        decimal_places: 3,
        trim_zeros: true,
        unit: None,
    };
    assert_eq!(trimmed.format(1.5), "1.5");
    assert_eq!(trimmed.format(64.0), "64");
}

#[test]
fn scientific_formatter_is_compact() {
    let f = ScientificFormatter::default();
    assert_eq!(f.format(12345.0), "1.23e4");
    assert_eq!(f.format(-0.042), "-4.20e-2");
    assert_eq!(f.format(3.0), "3.00");
    assert_eq!(f.format(0.0), "0");
    // Mantissa rounding carries into the exponent.
    assert_eq!(f.format(9.996), "1.00e1");
}

#[test]
fn tick_formatter_dispatches_to_variant() {
    let f = TickFormatter::Scientific(ScientificFormatter {
        mantissa_digits: 1,
        unit: Some("ISO".to_string()),
    });
    assert_eq!(f.format(1600.0), "1.6e3 ISO");
}
