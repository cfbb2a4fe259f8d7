use serde::{Deserialize, Serialize};

use crate::event_sourcing::DomainEvent;

// ============================================================================
// Product Events - Facts about an inventory item
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProductEvent {
    Registered(ProductRegistered),
    PriceSet(PriceSet),
    StockIncreased(StockIncreased),
    StockReduced(StockReduced),
    DiscountApplied(DiscountApplied),
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::Registered(_) => "ProductRegistered",
            ProductEvent::PriceSet(_) => "PriceSet",
            ProductEvent::StockIncreased(_) => "StockIncreased",
            ProductEvent::StockReduced(_) => "StockReduced",
            ProductEvent::DiscountApplied(_) => "DiscountApplied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRegistered {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSet {
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockIncreased {
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReduced {
    pub quantity: u32,
}

/// Discount applied; `price_after` is already clamped at zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountApplied {
    pub discount: f64,
    pub price_after: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let event = ProductEvent::StockIncreased(StockIncreased { amount: 5 });
        assert_eq!(event.event_type(), "StockIncreased");
    }

    #[test]
    fn test_event_json_shape() {
        let event = ProductEvent::DiscountApplied(DiscountApplied {
            discount: 100.0,
            price_after: 900.0,
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DiscountApplied");
        assert_eq!(json["data"]["price_after"], 900.0);

        let back: ProductEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
