//! Turns a layer's sparse, independently-timed property tracks into a dense,
//! time-normalized pose sequence ready for emission as CSS keyframes.
//!
//! Two stages compose:
//! - [`classify`] splits a layer's raw transform block into animated tracks
//!   and static values, dropping properties that sit at their defaults.
//! - [`resolve_layer`] merges all animated tracks' timestamps into one sorted
//!   timeline and samples every track at each instant.
//!
//! Both stages are pure and per-layer; independent layers can be resolved
//! concurrently without coordination.

pub mod classify;
pub mod error;
pub mod math;
pub mod property;
pub mod resolve;

pub use classify::{
    animated_layer_names, classify, has_animated_transform, AnimatedTrack, Classification,
    Segment, StaticValue, TrackKeys,
};
pub use error::ResolveError;
pub use property::PropertyId;
pub use resolve::{resolve_layer, Pose, ResolvedLayer};
