/// Schema validation of incoming user payloads
///
/// A [`UserValidator`] turns a raw request body into a [`UserPayload`] or a
/// list of field errors. The default [`SchemaValidator`] requires the three
/// string fields, trims surrounding whitespace and rejects blanks.
///
/// # Rules
///
/// | Input | Error |
/// |---|---|
/// | body is not JSON | `non_field_errors`: "Invalid JSON body" |
/// | body is not an object | `non_field_errors`: "Expected a JSON object" |
/// | field missing | "This field is required." |
/// | field is `null` | "This field may not be null." |
/// | field is not a string | "Not a valid string." |
/// | field blank after trimming | "This field may not be blank." |
///
/// Unknown fields are ignored. Every field is checked, so one response can
/// carry several errors; they are reported in declaration order
/// (`first_name`, `last_name`, `email`).
///
/// # Example
///
/// ```
/// use userhub_shared::validation::{SchemaValidator, UserValidator};
///
/// let body = br#"{"first_name": " Ada ", "last_name": "Lovelace", "email": "ada@example.com"}"#;
/// let payload = SchemaValidator.validate(body).unwrap();
/// assert_eq!(payload.first_name, "Ada");
///
/// let errors = SchemaValidator.validate(br#"{"first_name": "Ada"}"#).unwrap_err();
/// assert_eq!(errors.errors.len(), 2);
/// ```

use crate::error::{FieldError, InvalidInput};
use crate::models::user::UserPayload;
use serde_json::{Map, Value};
use validator::Validate;

/// Converts untyped input into a typed [`UserPayload`]
pub trait UserValidator: Send + Sync {
    fn validate(&self, raw: &[u8]) -> Result<UserPayload, InvalidInput>;
}

/// Default validator backed by `serde_json` and the `validator` rules on
/// [`UserPayload`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_STRING: &str = "Not a valid string.";

/// Payload fields in declaration order
const FIELDS: [&str; 3] = ["first_name", "last_name", "email"];

fn field_position(name: &str) -> usize {
    FIELDS
        .iter()
        .position(|field| *field == name)
        .unwrap_or(FIELDS.len())
}

impl UserValidator for SchemaValidator {
    fn validate(&self, raw: &[u8]) -> Result<UserPayload, InvalidInput> {
        let body: Value = serde_json::from_slice(raw)
            .map_err(|_| InvalidInput::non_field("Invalid JSON body"))?;

        let Value::Object(fields) = body else {
            return Err(InvalidInput::non_field("Expected a JSON object"));
        };

        let mut errors = Vec::new();
        let first_name = string_field(&fields, "first_name", &mut errors);
        let last_name = string_field(&fields, "last_name", &mut errors);
        let email = string_field(&fields, "email", &mut errors);

        let payload = UserPayload {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
        };

        if let Err(rule_errors) = payload.validate() {
            for (field, field_errors) in rule_errors.field_errors() {
                // A field that was absent or mistyped already has its error.
                if errors.iter().any(|e: &FieldError| e.field.as_str() == &*field) {
                    continue;
                }
                errors.extend(field_errors.iter().map(|error| {
                    FieldError::new(
                        field.to_string(),
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Validation failed".to_string()),
                    )
                }));
            }
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            errors.sort_by_key(|e| field_position(&e.field));
            Err(InvalidInput { errors })
        }
    }
}

/// Extracts and trims one string field, recording a type error if needed
fn string_field(
    fields: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(value)) => Some(value.trim().to_string()),
        Some(Value::Null) => {
            errors.push(FieldError::new(name, NOT_NULL));
            None
        }
        Some(_) => {
            errors.push(FieldError::new(name, NOT_STRING));
            None
        }
        None => {
            errors.push(FieldError::new(name, REQUIRED));
            None
        }
    }
}
