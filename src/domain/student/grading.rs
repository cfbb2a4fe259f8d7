use super::entity::Student;

/// Produces the printable evaluation line for a student
#[derive(Debug, Clone, Copy, Default)]
pub struct GradingSystem;

impl GradingSystem {
    pub fn new() -> Self {
        Self
    }

    /// `"<name>: <letter grade>"`
    pub fn evaluate_student(&self, student: &Student) -> String {
        format!("{}: {}", student.name(), student.letter_grade())
    }
}
