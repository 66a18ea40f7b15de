//! Input checks applied before anything reaches the pricing engine

use arbor_types::{CustomerInfo, LineItem, PricingConfig, ServiceKind, ValidationError};

/// A line item request that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidLineItem {
    pub service: ServiceKind,
    pub dimension: f64,
    pub quantity: u32,
}

pub fn validate_line_item(
    service: Option<ServiceKind>,
    dimension: f64,
    quantity: u32,
) -> Result<ValidLineItem, ValidationError> {
    let service = service.ok_or(ValidationError::MissingService)?;
    let dimension = validate_dimension(dimension)?;
    if quantity < 1 {
        return Err(ValidationError::ZeroQuantity);
    }
    Ok(ValidLineItem {
        service,
        dimension,
        quantity,
    })
}

pub fn validate_dimension(dimension: f64) -> Result<f64, ValidationError> {
    if !dimension.is_finite() {
        return Err(ValidationError::NonNumericDimension(dimension.to_string()));
    }
    if dimension <= 0.0 {
        return Err(ValidationError::NonPositiveDimension(dimension));
    }
    Ok(dimension)
}

/// Parse a dimension typed by the user
pub fn parse_dimension(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NonNumericDimension(trimmed.to_string()))?;
    validate_dimension(value)
}

pub fn validate_truckloads(truckloads: u32) -> Result<u32, ValidationError> {
    if truckloads < 1 {
        return Err(ValidationError::ZeroTruckloads);
    }
    Ok(truckloads)
}

pub fn validate_customer(customer: &CustomerInfo) -> Result<(), ValidationError> {
    if customer.name.trim().is_empty() {
        return Err(ValidationError::MissingCustomerField("name"));
    }
    if customer.address.trim().is_empty() {
        return Err(ValidationError::MissingCustomerField("address"));
    }
    Ok(())
}

/// Upper bound on any single unit price
pub const MAX_UNIT_PRICE: f64 = 1_000_000.0;

/// Every price must be a finite number in `0..=MAX_UNIT_PRICE`
pub fn validate_pricing(pricing: &PricingConfig) -> Result<(), ValidationError> {
    let fields = [
        (ServiceKind::Trim.key(), pricing.trim),
        (ServiceKind::Cut.key(), pricing.cut),
        (ServiceKind::Grind.key(), pricing.grind),
        ("haulAwayPerLoad", pricing.haul_away_per_load),
    ];
    for (field, value) in fields {
        if !(0.0..=MAX_UNIT_PRICE).contains(&value) {
            return Err(ValidationError::InvalidPrice {
                field,
                value,
                max: MAX_UNIT_PRICE,
            });
        }
    }
    Ok(())
}

/// A computed amount must be finite before it is stored
pub fn validate_cost(label: &'static str, cost: f64) -> Result<f64, ValidationError> {
    if !cost.is_finite() {
        return Err(ValidationError::CostOutOfRange(label));
    }
    Ok(cost)
}

pub fn ensure_has_items(line_items: &[LineItem]) -> Result<(), ValidationError> {
    if line_items.is_empty() {
        return Err(ValidationError::EmptyEstimate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_line_item() {
        let valid = validate_line_item(Some(ServiceKind::Cut), 15.0, 2).unwrap();
        assert_eq!(valid.service, ServiceKind::Cut);
        assert_eq!(valid.dimension, 15.0);
        assert_eq!(valid.quantity, 2);
    }

    #[test]
    fn test_missing_service() {
        assert_eq!(
            validate_line_item(None, 15.0, 1),
            Err(ValidationError::MissingService)
        );
    }

    #[test]
    fn test_non_positive_dimension() {
        assert_eq!(
            validate_line_item(Some(ServiceKind::Trim), 0.0, 1),
            Err(ValidationError::NonPositiveDimension(0.0))
        );
        assert_eq!(
            validate_line_item(Some(ServiceKind::Trim), -3.0, 1),
            Err(ValidationError::NonPositiveDimension(-3.0))
        );
    }

    #[test]
    fn test_zero_quantity() {
        assert_eq!(
            validate_line_item(Some(ServiceKind::Grind), 10.0, 0),
            Err(ValidationError::ZeroQuantity)
        );
    }

    #[test]
    fn test_non_finite_dimension() {
        assert!(matches!(
            validate_dimension(f64::NAN),
            Err(ValidationError::NonNumericDimension(_))
        ));
        assert!(matches!(
            validate_dimension(f64::INFINITY),
            Err(ValidationError::NonNumericDimension(_))
        ));
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension(" 12.5 "), Ok(12.5));
        assert_eq!(
            parse_dimension("tall"),
            Err(ValidationError::NonNumericDimension("tall".to_string()))
        );
        assert_eq!(
            parse_dimension("-1"),
            Err(ValidationError::NonPositiveDimension(-1.0))
        );
    }

    #[test]
    fn test_truckloads() {
        assert_eq!(validate_truckloads(2), Ok(2));
        assert_eq!(validate_truckloads(0), Err(ValidationError::ZeroTruckloads));
    }

    #[test]
    fn test_customer_requires_name_and_address() {
        assert!(validate_customer(&CustomerInfo::new("Jane", "12 Elm St")).is_ok());
        assert_eq!(
            validate_customer(&CustomerInfo::new("  ", "12 Elm St")),
            Err(ValidationError::MissingCustomerField("name"))
        );
        assert_eq!(
            validate_customer(&CustomerInfo::new("Jane", "")),
            Err(ValidationError::MissingCustomerField("address"))
        );
    }

    #[test]
    fn test_pricing_rejects_negative_and_nan() {
        assert!(validate_pricing(&PricingConfig::default()).is_ok());

        let negative = PricingConfig {
            cut: -1.0,
            ..PricingConfig::default()
        };
        assert_eq!(
            validate_pricing(&negative),
            Err(ValidationError::InvalidPrice {
                field: "CUT",
                value: -1.0,
                max: MAX_UNIT_PRICE,
            })
        );

        let nan = PricingConfig {
            haul_away_per_load: f64::NAN,
            ..PricingConfig::default()
        };
        assert!(matches!(
            validate_pricing(&nan),
            Err(ValidationError::InvalidPrice {
                field: "haulAwayPerLoad",
                ..
            })
        ));
    }

    #[test]
    fn test_pricing_rejects_huge_price() {
        let huge = PricingConfig {
            grind: 1e300,
            ..PricingConfig::default()
        };
        assert!(matches!(
            validate_pricing(&huge),
            Err(ValidationError::InvalidPrice { field: "GRIND", .. })
        ));

        let at_limit = PricingConfig {
            trim: MAX_UNIT_PRICE,
            ..PricingConfig::default()
        };
        assert!(validate_pricing(&at_limit).is_ok());
    }

    #[test]
    fn test_cost_must_be_finite() {
        assert_eq!(validate_cost("Line item", 450.0), Ok(450.0));
        assert_eq!(
            validate_cost("Line item", f64::INFINITY),
            Err(ValidationError::CostOutOfRange("Line item"))
        );
        assert_eq!(
            validate_cost("Haul-away", f64::NAN),
            Err(ValidationError::CostOutOfRange("Haul-away"))
        );
    }

    #[test]
    fn test_zero_prices_are_allowed() {
        let free = PricingConfig {
            trim: 0.0,
            cut: 0.0,
            grind: 0.0,
            haul_away_per_load: 0.0,
        };
        assert!(validate_pricing(&free).is_ok());
    }

    #[test]
    fn test_empty_estimate_rejected() {
        assert_eq!(ensure_has_items(&[]), Err(ValidationError::EmptyEstimate));
    }
}
