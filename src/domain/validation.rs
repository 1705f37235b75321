//! Field validation for the quote request form.
//!
//! Each wizard step owns a subset of the fields; advancing a step
//! validates only that subset. Validation failures are data, not errors:
//! they are surfaced inline next to the field and block the transition.

use super::models::FormValues;

/// Identifies a form field for inline error display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    ProductName,
    Quantity,
    Size,
    Description,
    Deadline,
    AdditionalNotes,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Full name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Company => "Company (optional)",
            Field::ProductName => "Product name",
            Field::Quantity => "Quantity",
            Field::Size => "Size",
            Field::Description => "Description",
            Field::Deadline => "Desired date (optional)",
            Field::AdditionalNotes => "Additional notes (optional)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Minimal structural email check: one `@`, a non-empty local part, and a
/// dot somewhere inside the domain.
///
/// # Examples
///
/// ```
/// use devis::domain::is_valid_email;
///
/// assert!(is_valid_email("client@example.com"));
/// assert!(!is_valid_email("not-an-email"));
/// assert!(!is_valid_email("a@b"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    domain.contains('.')
}

/// Validates the contact step (name, email, phone; company is optional).
pub fn validate_contact(values: &FormValues) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if values.name.trim().chars().count() < 2 {
        errors.push(FieldError::new(
            Field::Name,
            "Name must contain at least 2 characters",
        ));
    }
    if !is_valid_email(&values.email) {
        errors.push(FieldError::new(Field::Email, "Invalid email address"));
    }
    if values.phone.trim().chars().count() < 8 {
        errors.push(FieldError::new(Field::Phone, "Invalid phone number"));
    }

    errors
}

/// Validates the product step (product name, quantity, size, description;
/// deadline is optional).
pub fn validate_product(values: &FormValues) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if values.product_name.trim().chars().count() < 2 {
        errors.push(FieldError::new(Field::ProductName, "Product name required"));
    }
    match values.quantity_value() {
        Some(q) if q >= 1 => {}
        _ => errors.push(FieldError::new(Field::Quantity, "Minimum quantity is 1")),
    }
    if values.size.trim().is_empty() {
        errors.push(FieldError::new(Field::Size, "Size required"));
    }
    if values.description.trim().chars().count() < 10 {
        errors.push(FieldError::new(
            Field::Description,
            "Description must contain at least 10 characters",
        ));
    }

    errors
}

/// Validates the whole form. The review step has no fields of its own, so
/// this is the gate for submission.
pub fn validate_all(values: &FormValues) -> Vec<FieldError> {
    let mut errors = validate_contact(values);
    errors.extend(validate_product(values));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> FormValues {
        FormValues {
            name: "Sami Ben Ali".to_string(),
            email: "sami@atelier.tn".to_string(),
            phone: "21612345".to_string(),
            company: String::new(),
            product_name: "Veste de Chef".to_string(),
            quantity: "4".to_string(),
            size: "L".to_string(),
            description: "Broderie du logo sur la poche avant".to_string(),
            deadline: String::new(),
            additional_notes: String::new(),
        }
    }

    #[test]
    fn test_valid_form_passes_everything() {
        let values = valid_values();
        assert!(validate_contact(&values).is_empty());
        assert!(validate_product(&values).is_empty());
        assert!(validate_all(&values).is_empty());
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user name@domain.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_contact_errors_carry_fields() {
        let mut values = valid_values();
        values.name = "X".to_string();
        values.email = "not-an-email".to_string();
        values.phone = "123".to_string();

        let errors = validate_contact(&values);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == Field::Name));
        assert!(errors.iter().any(|e| e.field == Field::Email));
        assert!(errors.iter().any(|e| e.field == Field::Phone));
    }

    #[test]
    fn test_company_is_optional() {
        let mut values = valid_values();
        values.company.clear();
        assert!(validate_contact(&values).is_empty());
    }

    #[test]
    fn test_quantity_must_be_positive_integer() {
        let mut values = valid_values();

        values.quantity = "0".to_string();
        assert!(validate_product(&values)
            .iter()
            .any(|e| e.field == Field::Quantity));

        values.quantity = "-2".to_string();
        assert!(validate_product(&values)
            .iter()
            .any(|e| e.field == Field::Quantity));

        values.quantity = "douze".to_string();
        assert!(validate_product(&values)
            .iter()
            .any(|e| e.field == Field::Quantity));

        values.quantity = "1".to_string();
        assert!(validate_product(&values).is_empty());
    }

    #[test]
    fn test_description_minimum_length() {
        let mut values = valid_values();
        values.description = "trop court".to_string();
        assert!(validate_product(&values).is_empty());

        values.description = "court".to_string();
        let errors = validate_product(&values);
        assert!(errors.iter().any(|e| e.field == Field::Description));
    }

    #[test]
    fn test_product_errors_do_not_leak_into_contact() {
        let mut values = valid_values();
        values.description.clear();
        values.size.clear();
        assert!(validate_contact(&values).is_empty());
        assert_eq!(validate_product(&values).len(), 2);
    }
}
