use crate::common::error::{Result, SerializeValues};
use snafu::ResultExt;

/// Normalizes the free-form values input for the values-file deploy profile. An empty
/// input becomes an empty YAML mapping, a structured YAML/JSON mapping or sequence is
/// re-serialized canonically, and any other input is passed through unchanged for helm
/// to interpret.
pub(crate) fn values_blob(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Ok("{}\n".to_string());
    }

    match serde_yaml::from_str::<serde_yaml::Value>(raw) {
        Ok(parsed) if parsed.is_mapping() || parsed.is_sequence() => {
            serde_yaml::to_string(&parsed).context(SerializeValues)
        }
        _ => Ok(raw.to_string()),
    }
}
