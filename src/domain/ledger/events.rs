use serde::{Deserialize, Serialize};

use crate::event_sourcing::DomainEvent;

// ============================================================================
// Ledger Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum LedgerEvent {
    Opened(LedgerOpened),
    DiscountGranted(DiscountGranted),
    TaxApplied(TaxApplied),
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
}

impl DomainEvent for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::Opened(_) => "LedgerOpened",
            LedgerEvent::DiscountGranted(_) => "DiscountGranted",
            LedgerEvent::TaxApplied(_) => "TaxApplied",
            LedgerEvent::ItemAdded(_) => "ItemAdded",
            LedgerEvent::ItemRemoved(_) => "ItemRemoved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerOpened {
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountGranted {
    pub discount: f64,
}

/// Tax charged on the total at the time of the command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxApplied {
    pub rate: f64,
    pub tax_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub price: f64,
}
