//! Conversion of `validator` results into field-level [`CoreError`]s.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{CoreError, FieldError};

/// Validate `value`, mapping failures to [`CoreError::InvalidFields`].
pub fn validate_entity<T: Validate>(entity: &'static str, value: &T) -> Result<(), CoreError> {
    value
        .validate()
        .map_err(|errors| invalid_fields(entity, &errors))
}

/// Flatten `errors` (including nested struct and list errors) into a sorted
/// list of `field: message` pairs.
pub fn invalid_fields(entity: &'static str, errors: &ValidationErrors) -> CoreError {
    let mut fields = field_errors("", errors);
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    CoreError::InvalidFields { entity, fields }
}

/// Flatten `errors` with every field path prefixed by `prefix` (if non-empty).
pub fn field_errors(prefix: &str, errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields = Vec::new();
    flatten(prefix, errors, &mut fields);
    fields
}

/// Combine field errors gathered from several sources into one result.
pub fn collect_field_errors(
    entity: &'static str,
    mut fields: Vec<FieldError>,
) -> Result<(), CoreError> {
    if fields.is_empty() {
        return Ok(());
    }
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    Err(CoreError::InvalidFields { entity, fields })
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| describe_code(&err.code));
                    out.push(FieldError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

fn describe_code(code: &str) -> String {
    match code {
        "length" => "has an invalid length".to_string(),
        "range" => "is out of range".to_string(),
        other => format!("failed `{other}` check"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 0.0, max = 1.0))]
        level: f64,
    }

    #[test]
    fn prefixed_field_errors() {
        let bad = Named {
            name: String::new(),
            level: 0.5,
        };
        let errors = bad.validate().unwrap_err();
        let fields = field_errors("provider_settings.dialogue", &errors);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "provider_settings.dialogue.name");
        assert!(collect_field_errors("Named", Vec::new()).is_ok());
        assert!(collect_field_errors("Named", fields).is_err());
    }

    #[test]
    fn valid_value_passes() {
        let ok = Named {
            name: "x".into(),
            level: 0.5,
        };
        assert!(validate_entity("Named", &ok).is_ok());
    }

    #[test]
    fn every_failing_field_is_reported() {
        let bad = Named {
            name: String::new(),
            level: 4.0,
        };
        match validate_entity("Named", &bad) {
            Err(CoreError::InvalidFields { entity, fields }) => {
                assert_eq!(entity, "Named");
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].field, "level");
                assert_eq!(fields[0].message, "is out of range");
                assert_eq!(fields[1].field, "name");
                assert_eq!(fields[1].message, "must not be empty");
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }
}
