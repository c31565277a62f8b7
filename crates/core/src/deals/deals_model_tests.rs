//! Tests for deal input parsing and validation.

#[cfg(test)]
mod tests {
    use crate::deals::{compute, DealInputs, DerivedMetrics, Field};
    use crate::errors::{Error, ValidationError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn sample_payload() -> serde_json::Value {
        json!({
            "sale_price": 300000,
            "down_payment_percent": 20,
            "mortgage_rate": 6,
            "loan_term_years": 30,
            "closing_costs": 5000,
            "pmi_rate": 0.5,
            "property_tax_rate": 1.2,
            "annual_homeowners_insurance": 1200,
            "annual_hoa_fees": 0,
            "upfront_repairs": 2000,
            "projected_monthly_rent": 2200,
            "vacancy_rate_annual": 5,
            "monthly_maintenance_and_repairs": 100,
            "capex": 50,
            "monthly_management_fees": 150,
            "horizon": 5,
            "annualized_appreciation": 3
        })
    }

    fn validation_error<T: std::fmt::Debug>(result: crate::errors::Result<T>) -> ValidationError {
        match result {
            Err(Error::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_value_reads_every_field() {
        let inputs = DealInputs::from_json_value(&sample_payload()).unwrap();
        assert_eq!(inputs.sale_price, dec!(300000));
        assert_eq!(inputs.pmi_rate, dec!(0.5));
        assert_eq!(inputs.property_tax_rate, dec!(1.2));
        assert_eq!(inputs.loan_term_years, 30);
        assert_eq!(inputs.horizon, 5);
        assert_eq!(inputs.annualized_appreciation, dec!(3));
    }

    #[test]
    fn test_from_json_value_accepts_numeric_strings() {
        let mut payload = sample_payload();
        payload["sale_price"] = json!("250000");
        payload["mortgage_rate"] = json!(" 7.25 ");
        payload["loan_term_years"] = json!("15");

        let inputs = DealInputs::from_json_value(&payload).unwrap();
        assert_eq!(inputs.sale_price, dec!(250000));
        assert_eq!(inputs.mortgage_rate, dec!(7.25));
        assert_eq!(inputs.loan_term_years, 15);
    }

    #[test]
    fn test_from_json_value_normalizes_keys() {
        let payload = json!({
            "Sale Price": 300000,
            "Down Payment Percent": 20,
            "Mortgage Rate": 6,
            "Loan Term (Years)": 30,
            "Closing Costs": 5000,
            "PMI Rate": 0.5,
            "Property Tax Rate": 1.2,
            "Annual Homeowners Insurance": 1200,
            "Annual HOA Fees": 0,
            "Upfront Repairs": 2000,
            "Projected Monthly Rent": 2200,
            "Vacancy Rate Annual": 5,
            "Monthly Maintenance and Repairs": 100,
            "Capex": 50,
            "Monthly Management Fees": 150,
            "Horizon": 5,
            "Annualized Appreciation": 3
        });
        // "Loan Term (Years)" normalizes to "loan_term_years"
        let inputs = DealInputs::from_json_value(&payload).unwrap();
        assert_eq!(inputs.loan_term_years, 30);
        assert_eq!(inputs.annual_hoa_fees, Decimal::ZERO);
    }

    #[test]
    fn test_from_json_value_ignores_unknown_and_derived_keys() {
        let mut payload = sample_payload();
        payload["name"] = json!("Maple St duplex");
        payload["description"] = json!("");
        payload["monthly_cashflow"] = json!(-48.92);

        assert!(DealInputs::from_json_value(&payload).is_ok());
    }

    #[test]
    fn test_from_json_value_missing_field() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("capex");
        assert_eq!(
            validation_error(DealInputs::from_json_value(&payload)),
            ValidationError::MissingField("capex".to_string())
        );
    }

    #[test]
    fn test_from_json_value_blank_string_is_missing() {
        let mut payload = sample_payload();
        payload["horizon"] = json!("  ");
        assert_eq!(
            validation_error(DealInputs::from_json_value(&payload)),
            ValidationError::MissingField("horizon".to_string())
        );
    }

    #[test]
    fn test_from_json_value_invalid_number() {
        let mut payload = sample_payload();
        payload["mortgage_rate"] = json!("six");
        assert!(matches!(
            validation_error(DealInputs::from_json_value(&payload)),
            ValidationError::InvalidNumber { field, .. } if field == "mortgage_rate"
        ));

        payload["mortgage_rate"] = json!(true);
        assert!(matches!(
            validation_error(DealInputs::from_json_value(&payload)),
            ValidationError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_from_json_value_rejects_fractional_term() {
        let mut payload = sample_payload();
        payload["loan_term_years"] = json!(29.5);
        assert!(matches!(
            validation_error(DealInputs::from_json_value(&payload)),
            ValidationError::NotIntegral { field, .. } if field == "loan_term_years"
        ));
    }

    #[test]
    fn test_from_json_value_rejects_out_of_range() {
        let mut payload = sample_payload();
        payload["vacancy_rate_annual"] = json!(101);
        match validation_error(DealInputs::from_json_value(&payload)) {
            ValidationError::OutOfRange {
                field, min, max, ..
            } => {
                assert_eq!(field, "vacancy_rate_annual");
                assert_eq!(min, "0");
                assert_eq!(max, "100");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_from_json_value_requires_object() {
        assert!(matches!(
            validation_error(DealInputs::from_json_value(&json!([1, 2, 3]))),
            ValidationError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_value_lookup_splits_inputs_and_derived() {
        let inputs = DealInputs::from_json_value(&sample_payload()).unwrap();
        assert_eq!(inputs.value(Field::LoanTermYears), Some(dec!(30)));
        assert_eq!(inputs.value(Field::MonthlyCashflow), None);
    }

    #[test]
    fn test_serde_round_trip_uses_field_names() {
        let inputs = DealInputs::from_json_value(&sample_payload()).unwrap();
        let json = serde_json::to_value(&inputs).unwrap();
        assert_eq!(json["loan_term_years"], 30);
        let back: DealInputs = serde_json::from_value(json).unwrap();
        assert_eq!(back, inputs);
    }

    #[test]
    fn test_metrics_rebuild_from_field_values() {
        let inputs = DealInputs::from_json_value(&sample_payload()).unwrap();
        let metrics = compute(&inputs).unwrap();

        let rebuilt = DerivedMetrics::from_values(|field| metrics.value(field)).unwrap();
        assert_eq!(rebuilt, metrics);

        let missing = DerivedMetrics::from_values(|field| {
            (field != Field::PmiPayment).then(|| metrics.value(field)).flatten()
        });
        assert_eq!(
            validation_error(missing),
            ValidationError::MissingField("pmi_payment".to_string())
        );
    }
}
