use crate::property::PropertyId;
use thiserror::Error;

/// Validation failure while resolving one layer.
///
/// A malformed key would corrupt the merged timeline for every property
/// sharing it, so no partial pose sequence is produced for the layer; sibling
/// layers are unaffected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    #[error("layer `{layer}`: {property} keyframe #{index} has a missing or non-numeric time")]
    InvalidKeyTime {
        layer: String,
        property: PropertyId,
        index: usize,
    },

    #[error("layer `{layer}`: {property} keyframe #{index} is missing its start/end values")]
    MissingKeyValue {
        layer: String,
        property: PropertyId,
        index: usize,
    },
}
