use super::ledger::LedgerError;
use super::order::OrderError;
use super::payment::PaymentError;
use super::product::ProductError;
use super::student::StudentError;

// ============================================================================
// Domain Errors
// ============================================================================
//
// Every variant is an invalid argument supplied by the caller; nothing here
// is retried or recovered internally.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Student(#[from] StudentError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl DomainError {
    /// Name of the entity whose rule was violated
    pub fn entity(&self) -> &'static str {
        match self {
            DomainError::Student(_) => "Student",
            DomainError::Product(_) => "Product",
            DomainError::Ledger(_) => "LedgerOrder",
            DomainError::Order(_) => "Order",
            DomainError::Payment(_) => "Payment",
        }
    }
}
