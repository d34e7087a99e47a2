/// Controls whose values never leave the page when masking is on.
pub fn is_sensitive(input_type: Option<&str>) -> bool {
    matches!(input_type, Some("password"))
}

/// Applies the masking policy to one field value: sensitive values are
/// withheld entirely rather than sent blanked, so downstream consumers can
/// distinguish "masked" from "legitimately empty".
pub fn field_value(input_type: Option<&str>, value: Option<String>, mask: bool) -> Option<String> {
    if mask && is_sensitive(input_type) {
        None
    } else {
        value
    }
}
