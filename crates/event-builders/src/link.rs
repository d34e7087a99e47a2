use autotrack_dom::NodeName;
use perceiver_element::ElementDescriptor;
use serde::Serialize;
use url::Url;

use crate::errors::BuildError;
use crate::model::SelfDescribing;
use crate::schemas;

/// Raw anchor metadata captured at click time.
#[derive(Clone, Debug, Default)]
pub struct LinkMeta {
    pub href: Option<String>,
    pub target: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
struct LinkClickData {
    #[serde(rename = "targetUrl")]
    target_url: String,
    #[serde(rename = "elementId", skip_serializing_if = "Option::is_none")]
    element_id: Option<String>,
    #[serde(rename = "elementClasses")]
    element_classes: Vec<String>,
    #[serde(rename = "elementTarget")]
    element_target: String,
    #[serde(rename = "elementContent", skip_serializing_if = "Option::is_none")]
    element_content: Option<String>,
}

/// Builds a `link_click` payload. The href is resolved absolute against
/// the document base; an anchor without one cannot produce a conformant
/// payload and fails the build.
pub fn build_link_click(
    descriptor: &ElementDescriptor,
    meta: &LinkMeta,
    base: &Url,
) -> Result<SelfDescribing, BuildError> {
    if descriptor.node_name != NodeName::A {
        return Err(BuildError::UnsupportedDescriptor(
            descriptor.node_name.to_string(),
        ));
    }
    let href = meta.href.as_deref().ok_or(BuildError::MissingHref)?;
    let resolved = base
        .join(href)
        .map_err(|err| BuildError::InvalidHref(format!("{href:?}: {err}")))?;

    let data = LinkClickData {
        target_url: resolved.to_string(),
        element_id: descriptor.id.clone(),
        element_classes: descriptor.classes.clone(),
        element_target: meta
            .target
            .clone()
            .unwrap_or_else(|| "_self".to_string()),
        element_content: meta.content.clone().filter(|content| !content.is_empty()),
    };
    SelfDescribing::new(schemas::LINK_CLICK, &data)
}
