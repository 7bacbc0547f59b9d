use crate::models::roi::{Field, FieldErrors, RawFormInput};

pub const MIN_ROOF_AREA_SQFT: f64 = 100.0;
pub const MAX_ROOF_AREA_SQFT: f64 = 10_000.0;
pub const MIN_MONTHLY_BILL: f64 = 100.0;
pub const MAX_MONTHLY_BILL: f64 = 100_000.0;

/// Parse a user-entered decimal. Blank, malformed and non-finite values are
/// all treated as missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check every field independently and collect one message per failing field.
pub fn validate(input: &RawFormInput) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if input.location.trim().is_empty() {
        errors.insert(Field::Location, "Location is required".to_string());
    }

    match parse_number(&input.roof_area) {
        Some(area) if area > MAX_ROOF_AREA_SQFT => {
            errors.insert(Field::RoofArea, "Maximum 10,000 sq ft allowed".to_string());
        }
        Some(area) if area >= MIN_ROOF_AREA_SQFT => {}
        _ => {
            errors.insert(Field::RoofArea, "Minimum 100 sq ft required".to_string());
        }
    }

    match parse_number(&input.monthly_bill) {
        Some(bill) if bill > MAX_MONTHLY_BILL => {
            errors.insert(Field::MonthlyBill, "Please enter valid amount".to_string());
        }
        Some(bill) if bill >= MIN_MONTHLY_BILL => {}
        _ => {
            errors.insert(Field::MonthlyBill, "Minimum ₹100 required".to_string());
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("100", "100")]
    #[case("1200", "3000")]
    #[case("10000", "100000")]
    #[case(" 2500.5 ", "99999.99")]
    fn accepts_values_inside_bounds(#[case] roof_area: &str, #[case] monthly_bill: &str) {
        let errors = validate(&RawFormInput::new("Chennai", roof_area, monthly_bill));
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn small_roof_only_flags_roof_area() {
        let errors = validate(&RawFormInput::new("Pune", "50", "3000"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&Field::RoofArea], "Minimum 100 sq ft required");
    }

    #[rstest]
    #[case("", "Minimum 100 sq ft required")]
    #[case("abc", "Minimum 100 sq ft required")]
    #[case("NaN", "Minimum 100 sq ft required")]
    #[case("inf", "Minimum 100 sq ft required")]
    #[case("99.9", "Minimum 100 sq ft required")]
    #[case("10000.1", "Maximum 10,000 sq ft allowed")]
    fn roof_area_messages(#[case] roof_area: &str, #[case] expected: &str) {
        let errors = validate(&RawFormInput::new("Pune", roof_area, "3000"));
        assert_eq!(errors.get(&Field::RoofArea).map(String::as_str), Some(expected));
    }

    #[rstest]
    #[case("", "Minimum ₹100 required")]
    #[case("-5", "Minimum ₹100 required")]
    #[case("99", "Minimum ₹100 required")]
    #[case("100001", "Please enter valid amount")]
    fn monthly_bill_messages(#[case] monthly_bill: &str, #[case] expected: &str) {
        let errors = validate(&RawFormInput::new("Pune", "1200", monthly_bill));
        assert_eq!(errors.get(&Field::MonthlyBill).map(String::as_str), Some(expected));
    }

    #[test]
    fn reports_all_failing_fields_together() {
        let errors = validate(&RawFormInput::new("   ", "20000", "10"));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[&Field::Location], "Location is required");
        assert_eq!(errors[&Field::RoofArea], "Maximum 10,000 sq ft allowed");
        assert_eq!(errors[&Field::MonthlyBill], "Minimum ₹100 required");
    }
}
