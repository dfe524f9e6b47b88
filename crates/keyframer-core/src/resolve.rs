//! Keyframe Resolution Engine: merges all animated tracks onto one shared
//! timeline and samples an interpolated value per property at each instant.

use crate::classify::{classify, AnimatedTrack, StaticValue, TrackKeys};
use crate::error::ResolveError;
use crate::math::{clamp, linear, round2};
use crate::property::PropertyId;
use keyframer_data::Layer;
use std::collections::BTreeMap;

const FALLBACK_FRAME_RATE: f32 = 30.0;

/// A fully-resolved snapshot of all animated properties at one timeline
/// instant. `rate` is the normalized progress through `[ip, op]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub rate: f32,
    pub values: BTreeMap<PropertyId, Vec<f32>>,
}

/// Everything a formatter needs to emit one layer: the classified tracks and
/// statics plus the ordered pose sequence. Derived, read-only, per-request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayer {
    pub name: String,
    pub frame_rate: f32,
    pub ip: f32,
    pub op: f32,
    pub tracks: Vec<AnimatedTrack>,
    pub statics: Vec<StaticValue>,
    pub poses: Vec<Pose>,
}

impl ResolvedLayer {
    /// Animation duration in milliseconds, truncated to whole frames the way
    /// the emitted `animation:` declaration expects it.
    pub fn duration_ms(&self) -> i64 {
        let frames = (self.op - self.ip).floor();
        (frames * 1000.0 / self.frame_rate) as i64
    }
}

/// Resolve one layer into its ordered pose sequence.
///
/// Pure and synchronous; independent layers may be resolved in parallel. A
/// layer with zero animated tracks degenerates to the two-point `{ip, op}`
/// timeline rather than an error.
pub fn resolve_layer(layer: &Layer, frame_rate: f32) -> Result<ResolvedLayer, ResolveError> {
    let name = layer.display_name();
    let fr = if frame_rate.is_finite() && frame_rate > 0.0 {
        frame_rate
    } else {
        FALLBACK_FRAME_RATE
    };
    let ms_per_frame = 1000.0 / fr;
    let start_ms = layer.ip * ms_per_frame;
    let end_ms = layer.op * ms_per_frame;

    let classification = classify(&name, &layer.ks)?;
    tracing::debug!(
        layer = %name,
        tracks = classification.tracks.len(),
        statics = classification.statics.len(),
        "classified property tracks"
    );
    if classification.tracks.is_empty() {
        tracing::warn!(layer = %name, "no animated tracks; emitting a static two-pose timeline");
    }

    // The scan below starts from the earliest keyed timestamp across *all*
    // tracks, not per property; this coupling is part of the format.
    let first_key_ms = classification.key_times.first().map(|t| t * ms_per_frame);

    let mut frames = classification.key_times.clone();
    if !frames.contains(&layer.ip) {
        frames.push(layer.ip);
    }
    if !frames.contains(&layer.op) {
        frames.push(layer.op);
    }
    frames.sort_by(|a, b| a.total_cmp(b));
    frames.dedup();

    let poses = frames
        .iter()
        .map(|&frame| {
            let progress = clamp(frame * ms_per_frame, start_ms, end_ms);
            let values = classification
                .tracks
                .iter()
                .map(|track| {
                    (
                        track.property,
                        sample(track, progress, first_key_ms, ms_per_frame),
                    )
                })
                .collect();
            Pose {
                rate: linear(frame, layer.ip, layer.op),
                values,
            }
        })
        .collect();

    Ok(ResolvedLayer {
        name,
        frame_rate: fr,
        ip: layer.ip,
        op: layer.op,
        tracks: classification.tracks,
        statics: classification.statics,
        poses,
    })
}

/// Value of one track at `progress` (milliseconds, already clamped to the
/// layer bounds).
///
/// Boundaries are scanned in time order: the bracketing segment is the first
/// whose end boundary exceeds the query. Before the first key the track holds
/// the first segment's start value; at or past the last boundary it holds the
/// last segment's end value. No extrapolation on either side.
fn sample(
    track: &AnimatedTrack,
    progress: f32,
    first_key_ms: Option<f32>,
    ms_per_frame: f32,
) -> Vec<f32> {
    match &track.keys {
        TrackKeys::Constant(value) => value.clone(),
        TrackKeys::Segments { segments, end_time } => {
            let mut prev = first_key_ms.unwrap_or(segments[0].time * ms_per_frame);
            if progress < prev {
                return segments[0].start.clone();
            }

            let last = segments.len() - 1;
            for (i, segment) in segments.iter().enumerate() {
                let next = if i < last {
                    segments[i + 1].time
                } else {
                    *end_time
                } * ms_per_frame;

                if progress < next {
                    let rate = linear(progress, prev, next);
                    return segment
                        .start
                        .iter()
                        .enumerate()
                        .map(|(j, &s)| {
                            let e = segment.end.get(j).copied().unwrap_or(s);
                            round2(s + (e - s) * rate)
                        })
                        .collect();
                }
                prev = next;
            }

            segments[last].end.clone()
        }
    }
}
