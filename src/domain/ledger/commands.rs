// ============================================================================
// Ledger Commands
// ============================================================================

#[derive(Debug, Clone)]
pub enum LedgerCommand {
    Open { total_amount: f64 },
    ApplyDiscount { discount: f64 },
    ApplyTax { rate: f64 },
    AddItem { price: f64 },
    RemoveItem { price: f64 },
}
