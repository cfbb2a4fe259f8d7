// ============================================================================
// Student Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentError {
    #[error("Grade must be between 0 and 100")]
    ScoreOutOfRange(i32),
}
