use keyframer_data::{Property, Transform};
use std::fmt;

/// The set of properties the converter recognizes on a layer transform.
///
/// The `Ord` derive fixes the iteration order of pose value maps, which keeps
/// resolution output deterministic across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyId {
    Position,
    Rotation,
    Scale,
    Opacity,
    Anchor,
}

impl PropertyId {
    pub const ALL: [PropertyId; 5] = [
        PropertyId::Position,
        PropertyId::Rotation,
        PropertyId::Scale,
        PropertyId::Opacity,
        PropertyId::Anchor,
    ];

    /// Rotation, position and scale share one layer-wide "has animated
    /// transform" flag: when any of them is keyed, the non-default others are
    /// carried into the animated set as constants.
    pub const TRANSFORM_GROUP: [PropertyId; 3] = [
        PropertyId::Position,
        PropertyId::Rotation,
        PropertyId::Scale,
    ];

    /// Key of this property inside the export's `ks` block.
    pub fn short_key(self) -> &'static str {
        match self {
            PropertyId::Position => "p",
            PropertyId::Rotation => "r",
            PropertyId::Scale => "s",
            PropertyId::Opacity => "o",
            PropertyId::Anchor => "a",
        }
    }

    /// Semantic default; a constant property equal to this value is elided
    /// from the output entirely. Anchor has no default and is never elided.
    pub fn default_value(self) -> Option<f32> {
        match self {
            PropertyId::Position => Some(0.0),
            PropertyId::Rotation => Some(0.0),
            PropertyId::Scale => Some(100.0),
            PropertyId::Opacity => Some(100.0),
            PropertyId::Anchor => None,
        }
    }

    pub fn in_transform_group(self) -> bool {
        Self::TRANSFORM_GROUP.contains(&self)
    }

    /// Look up this property's raw key data on a transform block.
    pub fn of(self, transform: &Transform) -> &Property {
        match self {
            PropertyId::Position => &transform.p,
            PropertyId::Rotation => &transform.r,
            PropertyId::Scale => &transform.s,
            PropertyId::Opacity => &transform.o,
            PropertyId::Anchor => &transform.a,
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyId::Position => "position",
            PropertyId::Rotation => "rotation",
            PropertyId::Scale => "scale",
            PropertyId::Opacity => "opacity",
            PropertyId::Anchor => "anchor",
        };
        f.write_str(name)
    }
}
