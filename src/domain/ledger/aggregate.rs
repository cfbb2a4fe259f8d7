use serde::{Deserialize, Serialize};

use crate::domain::money::is_non_negative;
use crate::event_sourcing::Aggregate;
use super::commands::LedgerCommand;
use super::errors::LedgerError;
use super::events::*;

// ============================================================================
// LedgerOrder Aggregate
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerOrder {
    id: u32,
    version: i64,
    total_amount: f64,
}

impl LedgerOrder {
    pub fn new(id: u32, total_amount: f64) -> Result<Self, LedgerError> {
        let (ledger, _) = Self::create(id, &LedgerCommand::Open { total_amount })?;
        Ok(ledger)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn apply_discount(&mut self, discount: f64) -> Result<(), LedgerError> {
        self.run(&LedgerCommand::ApplyDiscount { discount })
    }

    /// Add `total * rate` to the total
    pub fn apply_tax(&mut self, rate: f64) -> Result<(), LedgerError> {
        self.run(&LedgerCommand::ApplyTax { rate })
    }

    pub fn add_item(&mut self, price: f64) -> Result<(), LedgerError> {
        self.run(&LedgerCommand::AddItem { price })
    }

    pub fn remove_item(&mut self, price: f64) -> Result<(), LedgerError> {
        self.run(&LedgerCommand::RemoveItem { price })
    }

    fn run(&mut self, command: &LedgerCommand) -> Result<(), LedgerError> {
        self.execute(command)?;
        tracing::debug!(ledger_id = self.id, total = self.total_amount, version = self.version, "Ledger updated");
        Ok(())
    }
}

impl Aggregate for LedgerOrder {
    type Id = u32;
    type Event = LedgerEvent;
    type Command = LedgerCommand;
    type Error = LedgerError;

    fn handle_create(_id: &u32, command: &LedgerCommand) -> Result<LedgerEvent, LedgerError> {
        match command {
            LedgerCommand::Open { total_amount } => {
                if !is_non_negative(*total_amount) {
                    return Err(LedgerError::NegativeTotal(*total_amount));
                }
                Ok(LedgerEvent::Opened(LedgerOpened { total_amount: *total_amount }))
            }
            _ => Err(LedgerError::NotInitialized),
        }
    }

    fn apply_first_event(id: &u32, event: &LedgerEvent) -> Result<Self, LedgerError> {
        match event {
            LedgerEvent::Opened(e) => {
                if !is_non_negative(e.total_amount) {
                    return Err(LedgerError::NegativeTotal(e.total_amount));
                }
                Ok(Self {
                    id: *id,
                    version: 1,
                    total_amount: e.total_amount,
                })
            }
            _ => Err(LedgerError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &LedgerEvent) -> Result<(), LedgerError> {
        let total = match event {
            LedgerEvent::Opened(_) => return Ok(()),
            LedgerEvent::DiscountGranted(e) => self.total_amount - e.discount,
            LedgerEvent::TaxApplied(e) => self.total_amount + e.tax_amount,
            LedgerEvent::ItemAdded(e) => self.total_amount + e.price,
            LedgerEvent::ItemRemoved(e) => self.total_amount - e.price,
        };
        ensure_total(total)?;

        self.total_amount = total;
        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &LedgerCommand) -> Result<Vec<LedgerEvent>, LedgerError> {
        let total = self.total_amount;

        let event = match *command {
            LedgerCommand::Open { .. } => return Err(LedgerError::NotInitialized),

            LedgerCommand::ApplyDiscount { discount } => {
                if !is_non_negative(discount) {
                    return Err(LedgerError::NegativeDiscount(discount));
                }
                if discount > total {
                    return Err(LedgerError::DiscountExceedsTotal { discount, total });
                }
                LedgerEvent::DiscountGranted(DiscountGranted { discount })
            }

            LedgerCommand::ApplyTax { rate } => {
                if !is_non_negative(rate) {
                    return Err(LedgerError::NegativeTaxRate(rate));
                }
                let tax_amount = total * rate;
                ensure_total(total + tax_amount)?;
                LedgerEvent::TaxApplied(TaxApplied { rate, tax_amount })
            }

            LedgerCommand::AddItem { price } => {
                if !is_non_negative(price) {
                    return Err(LedgerError::NegativeItemPrice(price));
                }
                ensure_total(total + price)?;
                LedgerEvent::ItemAdded(ItemAdded { price })
            }

            LedgerCommand::RemoveItem { price } => {
                if !is_non_negative(price) {
                    return Err(LedgerError::NegativeItemPrice(price));
                }
                if price > total {
                    return Err(LedgerError::ItemPriceExceedsTotal { price, total });
                }
                LedgerEvent::ItemRemoved(ItemRemoved { price })
            }
        };

        Ok(vec![event])
    }

    fn aggregate_id(&self) -> &u32 {
        &self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

/// Totals stay finite and non-negative, whatever the operation
fn ensure_total(total: f64) -> Result<(), LedgerError> {
    if is_non_negative(total) {
        Ok(())
    } else {
        Err(LedgerError::TotalOutOfRange { total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 0.001;

    fn assert_total(ledger: &LedgerOrder, expected: f64) {
        assert!(
            (ledger.total_amount() - expected).abs() < EPSILON,
            "expected total {}, got {}",
            expected,
            ledger.total_amount()
        );
    }

    #[test]
    fn test_new_ledger() {
        let ledger = LedgerOrder::new(1, 1000.0).unwrap();
        assert_eq!(ledger.id(), 1);
        assert_total(&ledger, 1000.0);

        assert!(LedgerOrder::new(2, 0.0).is_ok());
    }

    #[test]
    fn test_negative_total_rejected() {
        let err = LedgerOrder::new(1, -1.0).unwrap_err();
        assert_eq!(err.to_string(), "Total amount must be non-negative");
    }

    #[test]
    fn test_apply_discount() {
        let mut ledger = LedgerOrder::new(1, 1000.0).unwrap();
        ledger.apply_discount(200.0).unwrap();
        assert_total(&ledger, 800.0);

        // Discount equal to the total empties it
        ledger.apply_discount(800.0).unwrap();
        assert_total(&ledger, 0.0);
    }

    #[test]
    fn test_discount_exceeding_total() {
        let mut ledger = LedgerOrder::new(1, 500.0).unwrap();
        assert_eq!(
            ledger.apply_discount(600.0),
            Err(LedgerError::DiscountExceedsTotal { discount: 600.0, total: 500.0 })
        );
        assert_eq!(ledger.apply_discount(-1.0), Err(LedgerError::NegativeDiscount(-1.0)));
        assert_total(&ledger, 500.0);
    }

    #[test]
    fn test_apply_tax() {
        let mut ledger = LedgerOrder::new(1, 1000.0).unwrap();
        ledger.apply_tax(0.1).unwrap();
        assert_total(&ledger, 1100.0);

        ledger.apply_tax(0.0).unwrap();
        assert_total(&ledger, 1100.0);

        assert_eq!(
            ledger.apply_tax(-0.05).unwrap_err().to_string(),
            "Tax rate must not be negative"
        );
    }

    #[test]
    fn test_add_and_remove_item() {
        let mut ledger = LedgerOrder::new(1, 500.0).unwrap();
        ledger.add_item(250.0).unwrap();
        assert_total(&ledger, 750.0);

        ledger.remove_item(200.0).unwrap();
        assert_total(&ledger, 550.0);
    }

    #[test]
    fn test_item_validation() {
        let mut ledger = LedgerOrder::new(1, 500.0).unwrap();

        assert_eq!(ledger.add_item(-1.0), Err(LedgerError::NegativeItemPrice(-1.0)));
        assert_eq!(ledger.remove_item(-1.0), Err(LedgerError::NegativeItemPrice(-1.0)));
        assert_eq!(
            ledger.remove_item(500.01).unwrap_err().to_string(),
            "Item price exceeds total amount"
        );
        assert_total(&ledger, 500.0);
        assert_eq!(ledger.version(), 1);
    }

    #[test]
    fn test_tax_event_records_amount() {
        let ledger = LedgerOrder::new(1, 200.0).unwrap();
        let events = ledger.handle_command(&LedgerCommand::ApplyTax { rate: 0.25 }).unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::TaxApplied(TaxApplied { rate: 0.25, tax_amount: 50.0 })]
        );
    }

    #[test]
    fn test_total_overflow_rejected() {
        let mut ledger = LedgerOrder::new(1, f64::MAX).unwrap();

        assert_eq!(
            ledger.add_item(f64::MAX),
            Err(LedgerError::TotalOutOfRange { total: f64::INFINITY })
        );
        assert!(matches!(ledger.apply_tax(1.0), Err(LedgerError::TotalOutOfRange { .. })));

        assert_eq!(ledger.total_amount(), f64::MAX);
        assert_eq!(ledger.version(), 1);

        // Total is still usable after the rejections
        ledger.apply_tax(0.0).unwrap();
        assert_eq!(ledger.total_amount(), f64::MAX);
    }

    #[test]
    fn test_replay_rejects_negative_total() {
        let opened = LedgerEvent::Opened(LedgerOpened { total_amount: 100.0 });
        let mut ledger = LedgerOrder::apply_first_event(&1, &opened).unwrap();

        let removed = LedgerEvent::ItemRemoved(ItemRemoved { price: 150.0 });
        assert!(matches!(ledger.apply_event(&removed), Err(LedgerError::TotalOutOfRange { .. })));
        assert_total(&ledger, 100.0);

        let negative = LedgerEvent::Opened(LedgerOpened { total_amount: -1.0 });
        assert!(LedgerOrder::apply_first_event(&1, &negative).is_err());
    }

    proptest! {
        #[test]
        fn total_never_negative(
            start in 0.0f64..10_000.0,
            ops in proptest::collection::vec((0u8..4, -100.0f64..5_000.0), 0..20)
        ) {
            let mut ledger = LedgerOrder::new(1, start).unwrap();
            for (op, value) in ops {
                let _ = match op {
                    0 => ledger.apply_discount(value),
                    1 => ledger.apply_tax(value / 10_000.0),
                    2 => ledger.add_item(value),
                    _ => ledger.remove_item(value),
                };
                prop_assert!(ledger.total_amount() >= 0.0);
            }
        }
    }
}
