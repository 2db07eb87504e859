//! Input validation for process configurations.
//!
//! Checks structural integrity of a [`ConfigBuilder`] before any
//! preprocessing runs. Detects:
//! - Duplicate process names
//! - Duplicate stock declarations
//! - Missing objective
//! - Negative quantities
//! - Empty names
//!
//! All problems are collected and reported together.

use crate::models::{ConfigBuilder, Item};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same name.
    DuplicateProcess,
    /// A stock is declared more than once.
    DuplicateStock,
    /// No objective key was given.
    MissingObjective,
    /// A stock, need or result quantity is negative.
    NegativeQuantity,
    /// A process, item or objective name is empty.
    EmptyName,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a configuration draft.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(draft: &ConfigBuilder) -> ValidationResult {
    let mut errors = Vec::new();

    let mut stock_names = HashSet::new();
    for stock in &draft.stocks {
        check_item(stock, "stock", &mut errors);
        if !stock_names.insert(stock.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateStock,
                format!("Duplicate stock: {}", stock.name),
            ));
        }
    }

    let mut process_names = HashSet::new();
    for process in &draft.processes {
        if process.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Process with empty name",
            ));
        }
        if !process_names.insert(process.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateProcess,
                format!("Duplicate process name: {}", process.name),
            ));
        }
        for need in &process.needs {
            check_item(need, &format!("need of '{}'", process.name), &mut errors);
        }
        for result in &process.results {
            check_item(result, &format!("result of '{}'", process.name), &mut errors);
        }
    }

    if draft.objective.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingObjective,
            "No objective to optimize",
        ));
    }
    if draft.objective.iter().any(|k| k.trim().is_empty()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyName,
            "Empty objective key",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_item(item: &Item, role: &str, errors: &mut Vec<ValidationError>) {
    if item.name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyName,
            format!("Empty item name in {role}"),
        ));
    }
    if item.qty < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeQuantity,
            format!("Negative quantity {} for '{}' in {role}", item.qty, item.name),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn sample() -> ConfigBuilder {
        ConfigBuilder::new()
            .with_stock("euro", 100)
            .with_process(Process::new("buy").with_need("euro", 10).with_result("item", 1))
            .with_objective("item")
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_config(&sample()).is_ok());
    }

    #[test]
    fn test_duplicate_process_name() {
        let draft = sample().with_process(Process::new("buy").with_need("euro", 1));
        let errors = validate_config(&draft).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateProcess && e.message.contains("buy")));
    }

    #[test]
    fn test_duplicate_stock() {
        let draft = sample().with_stock("euro", 3);
        let errors = validate_config(&draft).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateStock));
    }

    #[test]
    fn test_missing_objective() {
        let mut draft = sample();
        draft.objective.clear();
        let errors = validate_config(&draft).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingObjective));
    }

    #[test]
    fn test_negative_quantity() {
        let draft = sample().with_process(Process::new("bad").with_need("euro", -1));
        let errors = validate_config(&draft).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeQuantity));
    }

    #[test]
    fn test_multiple_errors() {
        let draft = ConfigBuilder::new()
            .with_stock("", -5)
            .with_process(Process::new("a"))
            .with_process(Process::new("a"));
        let errors = validate_config(&draft).unwrap_err();
        // empty name, negative qty, duplicate process, missing objective
        assert!(errors.len() >= 4);
    }
}
