pub mod model;

pub use model::{AnimationJson, Asset, Keyframe, Layer, Property, Transform, Value};
