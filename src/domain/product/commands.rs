// ============================================================================
// Product Commands - Represent caller intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum ProductCommand {
    Register {
        name: String,
        price: f64,
        stock: u32,
    },
    SetPrice {
        price: f64,
    },
    IncreaseStock {
        amount: i32,
    },
    ReduceStock {
        quantity: i32,
    },
    ApplyDiscount {
        discount: f64,
    },
}
