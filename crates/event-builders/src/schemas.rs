//! Schema identifiers are a bit-exact contract with downstream consumers;
//! never edit without a coordinated schema-registry change.

pub const LINK_CLICK: &str =
    "iglu:com.snowplowanalytics.snowplow/link_click/jsonschema/1-0-1";
pub const FOCUS_FORM: &str =
    "iglu:com.snowplowanalytics.snowplow/focus_form/jsonschema/1-0-0";
pub const CHANGE_FORM: &str =
    "iglu:com.snowplowanalytics.snowplow/change_form/jsonschema/1-0-0";
pub const SUBMIT_FORM: &str =
    "iglu:com.snowplowanalytics.snowplow/submit_form/jsonschema/1-0-0";
