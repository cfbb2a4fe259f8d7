use serde::{Deserialize, Serialize};

use crate::event_sourcing::Aggregate;
use crate::domain::money::is_non_negative;
use super::value_objects::{MAX_STOCK, discounted_price};
use super::events::*;
use super::commands::ProductCommand;
use super::errors::ProductError;

// ============================================================================
// Product Aggregate - Domain Logic
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    // Identity
    id: u32,
    version: i64,

    // Current State (derived from events)
    name: String,
    price: f64,
    stock: u32,
}

impl Product {
    /// Register a product; the initial price goes through the same rule as `set_price`
    pub fn new(id: u32, name: impl Into<String>, price: f64, stock: u32) -> Result<Self, ProductError> {
        let command = ProductCommand::Register {
            name: name.into(),
            price,
            stock,
        };
        let (product, _) = Self::create(id, &command)?;
        Ok(product)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn set_price(&mut self, price: f64) -> Result<(), ProductError> {
        self.run(&ProductCommand::SetPrice { price })
    }

    /// Add units; fails without touching stock when the result would exceed MAX_STOCK
    pub fn increase_stock(&mut self, amount: i32) -> Result<(), ProductError> {
        self.run(&ProductCommand::IncreaseStock { amount })
    }

    pub fn reduce_stock(&mut self, quantity: i32) -> Result<(), ProductError> {
        self.run(&ProductCommand::ReduceStock { quantity })
    }

    /// Lower the price by `discount`, flooring at zero
    pub fn apply_discount(&mut self, discount: f64) -> Result<(), ProductError> {
        self.run(&ProductCommand::ApplyDiscount { discount })
    }

    fn run(&mut self, command: &ProductCommand) -> Result<(), ProductError> {
        let events = self.execute(command)?;
        tracing::debug!(
            product_id = self.id,
            version = self.version,
            price = self.price,
            stock = self.stock,
            event_count = events.len(),
            "Product updated"
        );
        Ok(())
    }

    fn validate_price(price: f64) -> Result<(), ProductError> {
        if !is_non_negative(price) {
            return Err(ProductError::NegativePrice(price));
        }
        Ok(())
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for Product {
    type Id = u32;
    type Event = ProductEvent;
    type Command = ProductCommand;
    type Error = ProductError;

    fn handle_create(_id: &u32, command: &ProductCommand) -> Result<ProductEvent, ProductError> {
        match command {
            ProductCommand::Register { name, price, stock } => {
                Self::validate_price(*price)?;
                if *stock > MAX_STOCK {
                    return Err(ProductError::InvalidInitialStock(*stock));
                }

                Ok(ProductEvent::Registered(ProductRegistered {
                    name: name.clone(),
                    price: *price,
                    stock: *stock,
                }))
            }
            _ => Err(ProductError::NotInitialized),
        }
    }

    fn apply_first_event(id: &u32, event: &ProductEvent) -> Result<Self, ProductError> {
        match event {
            ProductEvent::Registered(e) => {
                Self::validate_price(e.price)?;
                if e.stock > MAX_STOCK {
                    return Err(ProductError::InvalidInitialStock(e.stock));
                }
                Ok(Self {
                    id: *id,
                    version: 1,
                    name: e.name.clone(),
                    price: e.price,
                    stock: e.stock,
                })
            }
            _ => Err(ProductError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &ProductEvent) -> Result<(), ProductError> {
        match event {
            ProductEvent::Registered(_) => {
                // First event already applied
                return Ok(());
            }
            // Replayed streams are not trusted to respect the invariants
            ProductEvent::PriceSet(e) => {
                Self::validate_price(e.price)?;
                self.price = e.price;
            }
            ProductEvent::StockIncreased(e) => {
                self.stock = self
                    .stock
                    .checked_add(e.amount)
                    .filter(|stock| *stock <= MAX_STOCK)
                    .ok_or(ProductError::StockOverflow {
                        current: self.stock,
                        amount: e.amount,
                    })?;
            }
            ProductEvent::StockReduced(e) => {
                self.stock = self
                    .stock
                    .checked_sub(e.quantity)
                    .ok_or(ProductError::InsufficientStock {
                        requested: e.quantity,
                        available: self.stock,
                    })?;
            }
            ProductEvent::DiscountApplied(e) => {
                Self::validate_price(e.price_after)?;
                self.price = e.price_after;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &ProductCommand) -> Result<Vec<ProductEvent>, ProductError> {
        match command {
            ProductCommand::Register { .. } => Err(ProductError::NotInitialized),

            ProductCommand::SetPrice { price } => {
                Self::validate_price(*price)?;
                Ok(vec![ProductEvent::PriceSet(PriceSet { price: *price })])
            }

            ProductCommand::IncreaseStock { amount } => {
                if *amount < 0 {
                    return Err(ProductError::NegativeAmount(*amount));
                }
                if *amount == 0 {
                    return Err(ProductError::ZeroAmount);
                }
                let amount = amount.unsigned_abs();
                if self.stock + amount > MAX_STOCK {
                    return Err(ProductError::StockOverflow {
                        current: self.stock,
                        amount,
                    });
                }

                Ok(vec![ProductEvent::StockIncreased(StockIncreased { amount })])
            }

            ProductCommand::ReduceStock { quantity } => {
                if *quantity <= 0 {
                    return Err(ProductError::NonPositiveQuantity(*quantity));
                }
                let quantity = quantity.unsigned_abs();
                if quantity > self.stock {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }

                Ok(vec![ProductEvent::StockReduced(StockReduced { quantity })])
            }

            ProductCommand::ApplyDiscount { discount } => {
                if !is_non_negative(*discount) {
                    return Err(ProductError::NegativeDiscount(*discount));
                }

                Ok(vec![ProductEvent::DiscountApplied(DiscountApplied {
                    discount: *discount,
                    price_after: discounted_price(self.price, *discount),
                })])
            }
        }
    }

    fn aggregate_id(&self) -> &u32 {
        &self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;
    use crate::event_sourcing::{EventEnvelope, EventStore};

    fn laptop(price: f64, stock: u32) -> Product {
        Product::new(1, "Laptop", price, stock).unwrap()
    }

    #[test]
    fn test_new_product() {
        let product = laptop(1000.0, 50);
        assert_eq!(product.id(), 1);
        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.price(), 1000.0);
        assert_eq!(product.stock(), 50);
        assert_eq!(product.version(), 1);
    }

    #[test]
    fn test_increase_stock_with_valid_amount() {
        let mut product = laptop(1000.0, 50);
        product.increase_stock(20).unwrap();
        assert_eq!(product.stock(), 70);
    }

    #[test]
    fn test_increase_stock_up_to_capacity() {
        let mut product = laptop(1000.0, 90);
        product.increase_stock(10).unwrap();
        assert_eq!(product.stock(), MAX_STOCK);
    }

    #[test]
    fn test_increase_stock_exceeding_limit_leaves_stock() {
        let mut product = laptop(1000.0, 90);
        let err = product.increase_stock(40).unwrap_err();

        assert_eq!(err.to_string(), "Stock cannot exceed 100.");
        assert_eq!(product.stock(), 90);
        assert_eq!(product.version(), 1);
    }

    #[test]
    fn test_increase_stock_rejects_non_positive_amount() {
        let mut product = laptop(1000.0, 50);

        assert_eq!(product.increase_stock(-10), Err(ProductError::NegativeAmount(-10)));
        assert_eq!(product.increase_stock(0), Err(ProductError::ZeroAmount));
        assert_eq!(
            product.increase_stock(-1).unwrap_err().to_string(),
            "Amount cannot be negative."
        );
        assert_eq!(product.stock(), 50);
    }

    #[test]
    fn test_reduce_stock() {
        let mut product = laptop(1000.0, 50);
        product.reduce_stock(50).unwrap();
        assert_eq!(product.stock(), 0);
    }

    #[test]
    fn test_reduce_stock_rejects_invalid_quantities() {
        let mut product = laptop(1000.0, 5);

        assert_eq!(product.reduce_stock(0), Err(ProductError::NonPositiveQuantity(0)));
        assert_eq!(product.reduce_stock(-1), Err(ProductError::NonPositiveQuantity(-1)));
        assert_eq!(
            product.reduce_stock(6),
            Err(ProductError::InsufficientStock { requested: 6, available: 5 })
        );
        assert_eq!(product.stock(), 5);
    }

    #[test]
    fn test_apply_valid_discount() {
        let mut product = laptop(1000.0, 50);
        product.apply_discount(100.0).unwrap();
        assert_eq!(product.price(), 900.0);
    }

    #[test]
    fn test_apply_discount_not_below_zero() {
        let mut product = laptop(50.0, 50);
        product.apply_discount(100.0).unwrap();
        assert_eq!(product.price(), 0.0);
    }

    #[test]
    fn test_apply_negative_discount() {
        let mut product = laptop(50.0, 50);
        let err = product.apply_discount(-1.0).unwrap_err();
        assert_eq!(err.to_string(), "Discount cannot be negative.");
        assert_eq!(product.price(), 50.0);
    }

    #[test]
    fn test_set_price_with_negative_value() {
        let err = Product::new(1, "Laptop", -100.0, 50).unwrap_err();
        assert_eq!(err.to_string(), "Price cannot be negative.");

        let mut product = laptop(10.0, 1);
        assert!(product.set_price(-0.5).is_err());
        assert!(product.set_price(f64::NAN).is_err());
        assert_eq!(product.price(), 10.0);

        product.set_price(0.0).unwrap();
        assert_eq!(product.price(), 0.0);
    }

    #[test]
    fn test_initial_stock_over_capacity() {
        assert_eq!(
            Product::new(1, "Laptop", 10.0, 101).unwrap_err(),
            ProductError::InvalidInitialStock(101)
        );
    }

    #[test]
    fn test_accessors_do_not_mutate() {
        let product = laptop(1000.0, 50);
        for _ in 0..3 {
            assert_eq!(product.price(), 1000.0);
            assert_eq!(product.stock(), 50);
        }
        assert_eq!(product.version(), 1);
    }

    #[test]
    fn test_commands_before_registration_are_rejected() {
        assert_eq!(
            Product::handle_create(&1, &ProductCommand::SetPrice { price: 1.0 }).unwrap_err(),
            ProductError::NotInitialized
        );
        let product = laptop(1.0, 1);
        assert!(product
            .handle_command(&ProductCommand::Register { name: "x".into(), price: 1.0, stock: 1 })
            .is_err());
    }

    fn corrupt_stream(events: Vec<ProductEvent>) -> anyhow::Result<Product> {
        let store: EventStore<u32, ProductEvent> = EventStore::new("Product");
        let correlation_id = Uuid::new_v4();
        let envelopes = events
            .into_iter()
            .enumerate()
            .map(|(i, event)| EventEnvelope::new(1, i as i64 + 1, event, correlation_id))
            .collect();
        store.append_events(&1, 0, envelopes)?;
        store.load_aggregate(&1)
    }

    fn registered(price: f64, stock: u32) -> ProductEvent {
        ProductEvent::Registered(ProductRegistered {
            name: "Laptop".to_string(),
            price,
            stock,
        })
    }

    #[test]
    fn test_replay_rejects_stock_below_zero() {
        let err = corrupt_stream(vec![
            registered(10.0, 0),
            ProductEvent::StockReduced(StockReduced { quantity: 5 }),
        ])
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to apply event: Cannot remove 5 units, only 0 in stock."
        );
    }

    #[test]
    fn test_replay_rejects_stock_above_capacity() {
        assert!(corrupt_stream(vec![registered(10.0, 101)]).is_err());
        assert!(corrupt_stream(vec![
            registered(10.0, 90),
            ProductEvent::StockIncreased(StockIncreased { amount: 20 }),
        ])
        .is_err());
        assert!(corrupt_stream(vec![
            registered(10.0, 90),
            ProductEvent::StockIncreased(StockIncreased { amount: u32::MAX }),
        ])
        .is_err());
    }

    #[test]
    fn test_replay_rejects_negative_price() {
        assert!(corrupt_stream(vec![
            registered(10.0, 5),
            ProductEvent::PriceSet(PriceSet { price: -1.0 }),
        ])
        .is_err());

        let product = corrupt_stream(vec![
            registered(10.0, 5),
            ProductEvent::StockReduced(StockReduced { quantity: 5 }),
        ])
        .unwrap();
        assert_eq!(product.stock(), 0);
    }

    proptest! {
        #[test]
        fn stock_stays_within_bounds(start in 0u32..=MAX_STOCK, amount in -50i32..150) {
            let mut product = laptop(10.0, start);
            match product.increase_stock(amount) {
                Ok(()) => prop_assert_eq!(product.stock(), start + amount as u32),
                Err(_) => prop_assert_eq!(product.stock(), start),
            }
            prop_assert!(product.stock() <= MAX_STOCK);
        }

        #[test]
        fn reduce_never_underflows(start in 0u32..=MAX_STOCK, quantity in -10i32..120) {
            let mut product = laptop(10.0, start);
            let _ = product.reduce_stock(quantity);
            prop_assert!(product.stock() <= start);
        }

        #[test]
        fn discount_floors_at_zero(price in 0.0f64..10_000.0, discount in 0.0f64..20_000.0) {
            let mut product = laptop(price, 1);
            product.apply_discount(discount).unwrap();
            prop_assert_eq!(product.price(), (price - discount).max(0.0));
        }
    }
}
