//! Property Track Classifier: splits a layer's raw key data into animated
//! tracks and static values, dropping properties that equal their defaults.

use crate::error::ResolveError;
use crate::property::PropertyId;
use keyframer_data::{AnimationJson, Transform, Value};

/// One segment between two consecutive authored keyframes.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Frame number at which this segment starts.
    pub time: f32,
    pub start: Vec<f32>,
    pub end: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackKeys {
    /// A property carried into the animated set without authored keys: its
    /// value repeats unchanged in every pose. Produced for non-default
    /// transform properties pulled in by the layer-wide flag, and for keyed
    /// properties with a single authored keyframe.
    Constant(Vec<f32>),
    /// Authored segments plus the frame number of the terminal keyframe.
    Segments {
        segments: Vec<Segment>,
        end_time: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedTrack {
    pub property: PropertyId,
    pub keys: TrackKeys,
}

/// A constant, non-default property; emitted once in the base declaration
/// block rather than per keyframe.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticValue {
    pub property: PropertyId,
    pub value: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub tracks: Vec<AnimatedTrack>,
    pub statics: Vec<StaticValue>,
    /// Distinct authored key times across all keyed tracks, rounded to whole
    /// frames and sorted ascending. The first entry is the earliest animated
    /// timestamp, which seeds the resolver's segment scan.
    pub key_times: Vec<f32>,
}

/// True when any of the transform-group properties is marked as keyed.
pub fn has_animated_transform(transform: &Transform) -> bool {
    PropertyId::TRANSFORM_GROUP
        .iter()
        .any(|id| id.of(transform).a == 1)
}

/// Names of layers with at least one keyed property; these are the candidates
/// offered for conversion.
pub fn animated_layer_names(data: &AnimationJson) -> Vec<String> {
    data.layers
        .iter()
        .filter(|layer| PropertyId::ALL.iter().any(|id| id.of(&layer.ks).a == 1))
        .map(|layer| layer.display_name())
        .collect()
}

fn is_default(id: PropertyId, value: &Value) -> bool {
    match value {
        // Absent from the export: nothing to emit.
        Value::Default => true,
        Value::Static(v) => id
            .default_value()
            .is_some_and(|d| v.iter().all(|&x| x == d)),
        Value::Animated(_) => false,
    }
}

/// Split one layer's transform block into animated tracks and static values.
///
/// `layer_name` is only used to attribute validation errors.
pub fn classify(layer_name: &str, transform: &Transform) -> Result<Classification, ResolveError> {
    let has_at = has_animated_transform(transform);
    let mut out = Classification::default();

    for id in PropertyId::ALL {
        let prop = id.of(transform);
        let keyed = prop.a == 1 && matches!(prop.k, Value::Animated(_));

        if keyed {
            let Value::Animated(keys) = &prop.k else {
                unreachable!()
            };
            if keys.is_empty() {
                continue;
            }

            let mut times = Vec::with_capacity(keys.len());
            for (index, key) in keys.iter().enumerate() {
                let t = key.t.ok_or_else(|| ResolveError::InvalidKeyTime {
                    layer: layer_name.to_string(),
                    property: id,
                    index,
                })?;
                times.push(t);
                let rounded = t.round();
                if !out.key_times.contains(&rounded) {
                    out.key_times.push(rounded);
                }
            }

            let missing = |index| ResolveError::MissingKeyValue {
                layer: layer_name.to_string(),
                property: id,
                index,
            };

            let keys = if keys.len() < 2 {
                TrackKeys::Constant(keys[0].s.clone().ok_or_else(|| missing(0))?)
            } else {
                let mut segments = Vec::with_capacity(keys.len() - 1);
                for i in 0..keys.len() - 1 {
                    let start = keys[i].s.clone().ok_or_else(|| missing(i))?;
                    // Older exports carry an explicit `e`; newer ones imply it
                    // from the next keyframe's `s`.
                    let end = keys[i]
                        .e
                        .clone()
                        .or_else(|| keys[i + 1].s.clone())
                        .ok_or_else(|| missing(i))?;
                    segments.push(Segment {
                        time: times[i],
                        start,
                        end,
                    });
                }
                TrackKeys::Segments {
                    segments,
                    end_time: times[keys.len() - 1],
                }
            };
            out.tracks.push(AnimatedTrack { property: id, keys });
        } else if id.in_transform_group() && has_at && !is_default(id, &prop.k) {
            if let Value::Static(v) = &prop.k {
                out.tracks.push(AnimatedTrack {
                    property: id,
                    keys: TrackKeys::Constant(v.clone()),
                });
            }
        } else if !is_default(id, &prop.k) {
            if let Value::Static(v) = &prop.k {
                out.statics.push(StaticValue {
                    property: id,
                    value: v.clone(),
                });
            }
        }
    }

    out.key_times.sort_by(|a, b| a.total_cmp(b));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyframer_data::Transform;
    use serde_json::json;

    fn transform(v: serde_json::Value) -> Transform {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn default_valued_properties_are_dropped() {
        let ks = transform(json!({
            "o": { "a": 0, "k": 100 },
            "r": { "a": 0, "k": 0 },
            "s": { "a": 0, "k": [100, 100, 100] },
            "p": { "a": 0, "k": [0, 0, 0] }
        }));
        let cls = classify("drop", &ks).unwrap();
        assert!(cls.tracks.is_empty());
        assert!(cls.statics.is_empty());
        assert!(cls.key_times.is_empty());
    }

    #[test]
    fn non_default_static_is_recorded() {
        let ks = transform(json!({ "o": { "a": 0, "k": 40 } }));
        let cls = classify("static", &ks).unwrap();
        assert!(cls.tracks.is_empty());
        assert_eq!(
            cls.statics,
            vec![StaticValue {
                property: PropertyId::Opacity,
                value: vec![40.0],
            }]
        );
    }

    #[test]
    fn anchor_is_never_treated_as_default() {
        let ks = transform(json!({ "a": { "a": 0, "k": [50, 50, 0] } }));
        let cls = classify("anchor", &ks).unwrap();
        assert_eq!(cls.statics.len(), 1);
        assert_eq!(cls.statics[0].property, PropertyId::Anchor);
    }

    #[test]
    fn transform_flag_pulls_static_siblings_into_tracks() {
        // Rotation is keyed; the non-default scale rides along as a constant
        // track while opacity stays static and position stays dropped.
        let ks = transform(json!({
            "r": { "a": 1, "k": [
                { "t": 0, "s": [0], "e": [180] },
                { "t": 20 }
            ]},
            "s": { "a": 0, "k": [50, 50, 100] },
            "p": { "a": 0, "k": [0, 0, 0] },
            "o": { "a": 0, "k": 80 }
        }));
        let cls = classify("group", &ks).unwrap();

        let props: Vec<PropertyId> = cls.tracks.iter().map(|t| t.property).collect();
        assert_eq!(props, vec![PropertyId::Rotation, PropertyId::Scale]);
        assert_eq!(
            cls.tracks[1].keys,
            TrackKeys::Constant(vec![50.0, 50.0, 100.0])
        );
        assert_eq!(cls.statics.len(), 1);
        assert_eq!(cls.statics[0].property, PropertyId::Opacity);
        assert_eq!(cls.key_times, vec![0.0, 20.0]);
    }

    #[test]
    fn opacity_is_not_pulled_in_by_the_transform_flag() {
        let ks = transform(json!({
            "p": { "a": 1, "k": [
                { "t": 0, "s": [0, 0, 0], "e": [10, 10, 0] },
                { "t": 10 }
            ]},
            "o": { "a": 0, "k": 60 }
        }));
        let cls = classify("opacity", &ks).unwrap();
        assert_eq!(cls.tracks.len(), 1);
        assert_eq!(cls.tracks[0].property, PropertyId::Position);
        assert_eq!(cls.statics[0].property, PropertyId::Opacity);
    }

    #[test]
    fn key_times_are_rounded_and_deduplicated() {
        let ks = transform(json!({
            "o": { "a": 1, "k": [
                { "t": 0.4, "s": [100], "e": [50] },
                { "t": 9.6, "s": [50], "e": [0] },
                { "t": 20 }
            ]},
            "p": { "a": 1, "k": [
                { "t": 0, "s": [0, 0, 0], "e": [5, 5, 0] },
                { "t": 10 }
            ]}
        }));
        let cls = classify("merge", &ks).unwrap();
        assert_eq!(cls.key_times, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn missing_key_time_is_an_error() {
        let ks = transform(json!({
            "o": { "a": 1, "k": [
                { "t": "not-a-number", "s": [100], "e": [0] },
                { "t": 30 }
            ]}
        }));
        let err = classify("bad-time", &ks).unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidKeyTime {
                layer: "bad-time".to_string(),
                property: PropertyId::Opacity,
                index: 0,
            }
        );
    }

    #[test]
    fn missing_start_value_is_an_error() {
        let ks = transform(json!({
            "o": { "a": 1, "k": [
                { "t": 0, "e": [0] },
                { "t": 30 }
            ]}
        }));
        let err = classify("bad-value", &ks).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingKeyValue {
                layer: "bad-value".to_string(),
                property: PropertyId::Opacity,
                index: 0,
            }
        );
    }

    #[test]
    fn end_value_falls_back_to_next_start() {
        let ks = transform(json!({
            "o": { "a": 1, "k": [
                { "t": 0, "s": [100] },
                { "t": 15, "s": [40] },
                { "t": 30, "s": [0] }
            ]}
        }));
        let cls = classify("fallback", &ks).unwrap();
        match &cls.tracks[0].keys {
            TrackKeys::Segments { segments, end_time } => {
                assert_eq!(segments.len(), 2);
                assert_eq!(segments[0].end, vec![40.0]);
                assert_eq!(segments[1].end, vec![0.0]);
                assert_eq!(*end_time, 30.0);
            }
            other => panic!("expected segments, got {other:?}"),
        }
    }

    #[test]
    fn single_keyframe_track_becomes_constant() {
        let ks = transform(json!({
            "o": { "a": 1, "k": [{ "t": 5, "s": [30] }] }
        }));
        let cls = classify("single", &ks).unwrap();
        assert_eq!(cls.tracks[0].keys, TrackKeys::Constant(vec![30.0]));
        assert_eq!(cls.key_times, vec![5.0]);
    }
}
