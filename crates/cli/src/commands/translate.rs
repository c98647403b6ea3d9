//! Resolve a translation value from the command line.

use kacamata_core::{Locale, Translation, has_translation, resolve};
use kacamata_storefront::storage::{SafeParse, safe_json_parse};
use serde_json::Value;
use tracing::info;

use super::{CommandError, print_line};

/// Interpret a command-line argument as a translation value.
///
/// JSON input is read as a legacy string or a localized object; anything
/// that is not JSON is taken as a legacy plain string. `null` means absent.
///
/// # Errors
///
/// Returns an error for JSON that is neither a string nor a localized
/// object.
pub fn parse_value(input: &str) -> Result<Option<Translation>, CommandError> {
    match safe_json_parse::<Value>(input) {
        SafeParse::Parsed(Value::Null) => Ok(None),
        SafeParse::Parsed(json @ (Value::String(_) | Value::Object(_))) => serde_json::from_value(json)
            .map(Some)
            .map_err(|e| CommandError::InvalidInput(format!("not a translation value: {e}"))),
        SafeParse::Parsed(json) => Err(CommandError::InvalidInput(format!(
            "not a translation value: {json}"
        ))),
        SafeParse::Invalid => Ok(Some(Translation::Legacy(input.to_owned()))),
    }
}

/// Print the text `input` resolves to for `locale`.
///
/// # Errors
///
/// Returns an error if `input` is not a usable translation value.
pub fn run(input: &str, locale: Locale) -> Result<(), CommandError> {
    let value = parse_value(input)?;
    info!(
        locale = locale.as_str(),
        translated = has_translation(value.as_ref(), locale),
        "Resolving translation"
    );
    print_line(resolve(value.as_ref(), locale));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kacamata_core::LocalizedText;

    use super::*;

    #[test]
    fn test_parse_plain_text_is_legacy() {
        assert_eq!(
            parse_value("Kacamata Hitam").unwrap(),
            Some(Translation::Legacy("Kacamata Hitam".to_owned()))
        );
    }

    #[test]
    fn test_parse_json_string_is_legacy() {
        assert_eq!(
            parse_value(r#""Sunglasses""#).unwrap(),
            Some(Translation::Legacy("Sunglasses".to_owned()))
        );
    }

    #[test]
    fn test_parse_localized_object() {
        let value = parse_value(r#"{"en":"Sunglasses","id":"Kacamata Hitam"}"#).unwrap();
        assert_eq!(
            value,
            Some(Translation::Localized(LocalizedText {
                en: Some("Sunglasses".to_owned()),
                id: Some("Kacamata Hitam".to_owned()),
            }))
        );
        assert_eq!(resolve(value.as_ref(), Locale::Id), "Kacamata Hitam");
    }

    #[test]
    fn test_parse_null_is_absent() {
        assert_eq!(parse_value("null").unwrap(), None);
        assert_eq!(resolve(None, Locale::En), "");
    }

    #[test]
    fn test_parse_rejects_other_json() {
        for input in ["42", r#"["Kacamata"]"#, "true"] {
            assert!(
                matches!(parse_value(input), Err(CommandError::InvalidInput(_))),
                "{input}"
            );
        }
        assert!(matches!(
            parse_value(r#"{"en":5}"#),
            Err(CommandError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_indonesian_only_object() {
        let value = parse_value(r#"{"id":"Hanya Indonesia"}"#).unwrap();
        assert_eq!(resolve(value.as_ref(), Locale::Id), "Hanya Indonesia");
        assert_eq!(resolve(value.as_ref(), Locale::En), "");
    }
}
