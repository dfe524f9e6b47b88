//! Formats a resolved layer into stylesheet source text.
//!
//! Static values land in a base `.<name>-style` block; poses become the
//! percentage-keyed entries of a `@keyframes <name>-ani` block. Transform
//! properties are composed into a single `transform:` declaration in
//! position, rotation, scale order.

use keyframer_core::math::round2;
use keyframer_core::{PropertyId, ResolvedLayer};
use keyframer_data::Asset;

#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Emit absolute positioning plus width/height/background declarations
    /// derived from the first pose and the linked image asset.
    pub layout: bool,
    /// Convert pixel lengths to `rem`.
    pub rem: bool,
    /// Root font size used for the px-to-rem ratio.
    pub font_size: f32,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            layout: true,
            rem: false,
            font_size: 1000.0,
        }
    }
}

const TRANSFORM_ORDER: [PropertyId; 3] = [
    PropertyId::Position,
    PropertyId::Rotation,
    PropertyId::Scale,
];
const OTHER_ORDER: [PropertyId; 2] = [PropertyId::Opacity, PropertyId::Anchor];

struct CssMeta {
    /// CSS property this id contributes to.
    prop: &'static str,
    /// Multiplier from export units to CSS units (export scale/opacity are
    /// percentages, CSS wants fractions).
    scale: f32,
    /// Whether components are lengths that take px/rem units.
    length: bool,
    unit: &'static str,
}

fn meta(id: PropertyId) -> CssMeta {
    match id {
        PropertyId::Position => CssMeta {
            prop: "transform",
            scale: 1.0,
            length: true,
            unit: "",
        },
        PropertyId::Rotation => CssMeta {
            prop: "transform",
            scale: 1.0,
            length: false,
            unit: "deg",
        },
        PropertyId::Scale => CssMeta {
            prop: "transform",
            scale: 0.01,
            length: false,
            unit: "",
        },
        PropertyId::Opacity => CssMeta {
            prop: "opacity",
            scale: 0.01,
            length: false,
            unit: "",
        },
        PropertyId::Anchor => CssMeta {
            prop: "transform-origin",
            scale: 1.0,
            length: true,
            unit: "",
        },
    }
}

fn wrap(id: PropertyId, parts: &[String]) -> String {
    let part = |i: usize| parts.get(i).map(String::as_str).unwrap_or("0");
    match id {
        PropertyId::Position => format!("translate({}, {})", part(0), part(1)),
        PropertyId::Rotation => format!("rotate({})", part(0)),
        PropertyId::Scale => format!("scale({}, {})", part(0), part(1)),
        PropertyId::Opacity => part(0).to_string(),
        PropertyId::Anchor => format!("{} {}", part(0), part(1)),
    }
}

/// Zero prints unit-less; everything else keeps its unit suffix.
fn pass_unit(value: f32, unit: &str) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}{unit}")
    }
}

fn render_value(id: PropertyId, value: &[f32], origin: &[f32], opts: &FormatOptions) -> String {
    let m = meta(id);
    let parts: Vec<String> = value
        .iter()
        .enumerate()
        .map(|(i, &raw)| {
            let v = if id == PropertyId::Position {
                raw - origin.get(i).copied().unwrap_or(0.0)
            } else {
                raw
            };
            if m.length {
                if opts.rem {
                    pass_unit(round2(m.scale * v / opts.font_size), "rem")
                } else {
                    pass_unit(round2(v), "px")
                }
            } else {
                pass_unit(round2(m.scale * v), m.unit)
            }
        })
        .collect();
    wrap(id, &parts)
}

/// Render every present property of `order`, either as bare transform
/// functions (`as_transform`) or as full `prop: value;` declarations.
fn render_props<'a>(
    order: &[PropertyId],
    lookup: impl Fn(PropertyId) -> Option<&'a Vec<f32>>,
    as_transform: bool,
    origin: &[f32],
    opts: &FormatOptions,
) -> Vec<String> {
    order
        .iter()
        .filter_map(|&id| {
            let value = lookup(id)?;
            let rendered = render_value(id, value, origin, opts);
            if as_transform {
                Some(rendered)
            } else {
                Some(format!("{}: {};", meta(id).prop, rendered))
            }
        })
        .collect()
}

fn base_declarations(
    layer: &ResolvedLayer,
    asset: Option<&Asset>,
    origin: &[f32],
    opts: &FormatOptions,
) -> String {
    let statics = |id: PropertyId| {
        layer
            .statics
            .iter()
            .find(|s| s.property == id)
            .map(|s| &s.value)
    };
    let transform = render_props(&TRANSFORM_ORDER, statics, true, origin, opts);
    let other = render_props(&OTHER_ORDER, statics, false, origin, opts);

    let mut decls = Vec::new();
    if opts.layout {
        decls.push(layout_declarations(asset, origin, opts));
    }
    if !transform.is_empty() {
        decls.push(format!("transform: {};", transform.join(" ")));
    }
    decls.extend(other);
    decls.push(format!(
        "animation: {}-ani {}ms linear infinite;",
        layer.name,
        layer.duration_ms()
    ));
    decls.join("\n  ")
}

fn length(value: f32, opts: &FormatOptions) -> String {
    if opts.rem {
        pass_unit(round2(value / opts.font_size), "rem")
    } else {
        pass_unit(round2(value), "px")
    }
}

fn layout_declarations(asset: Option<&Asset>, origin: &[f32], opts: &FormatOptions) -> String {
    let top = length(origin.first().copied().unwrap_or(0.0), opts);
    let left = length(origin.get(1).copied().unwrap_or(0.0), opts);

    let mut decls = vec![
        "position: absolute;".to_string(),
        format!("top: {top};"),
        format!("left: {left};"),
    ];

    if let Some(asset) = asset {
        let (Some(w), Some(h)) = (asset.w, asset.h) else {
            return decls.join("\n  ");
        };
        let width = length(w as f32, opts);
        let height = length(h as f32, opts);
        let url = format!(
            "./{}{}",
            asset.u.as_deref().unwrap_or(""),
            asset.p.as_deref().unwrap_or("")
        );
        decls.push(format!("width: {width};"));
        decls.push(format!("height: {height};"));
        decls.push(format!("background-image: url('{url}');"));
        decls.push(format!("background-size: {width} {height};"));
    }

    decls.join("\n  ")
}

fn keyframe_entries(layer: &ResolvedLayer, origin: &[f32], opts: &FormatOptions) -> String {
    layer
        .poses
        .iter()
        .map(|pose| {
            let values = |id: PropertyId| pose.values.get(&id);
            let transform = render_props(&TRANSFORM_ORDER, values, true, origin, opts);
            let other = render_props(&OTHER_ORDER, values, false, origin, opts);

            let mut decls = Vec::new();
            if !transform.is_empty() {
                decls.push(format!("transform: {};", transform.join(" ")));
            }
            decls.extend(other);

            format!(
                "  {}% {{\n    {}\n  }}",
                round2(pose.rate * 100.0),
                decls.join("\n    ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the stylesheet source for one resolved layer: a documentation
/// comment, the base selector, and the `@keyframes` block.
///
/// With `layout` enabled the first pose's position becomes the layer's CSS
/// offset, and per-pose translations are emitted relative to it.
pub fn stylesheet_source(
    layer: &ResolvedLayer,
    asset: Option<&Asset>,
    opts: &FormatOptions,
) -> String {
    let zero = Vec::new();
    let origin: &Vec<f32> = if opts.layout {
        layer
            .poses
            .first()
            .and_then(|pose| pose.values.get(&PropertyId::Position))
            .unwrap_or(&zero)
    } else {
        &zero
    };

    format!(
        "/**\n * {name} animation style\n */\n\n.{name}-style {{\n  {style}\n}}\n@keyframes {name}-ani {{\n{keys}\n}}\n",
        name = layer.name,
        style = base_declarations(layer, asset, origin, opts),
        keys = keyframe_entries(layer, origin, opts),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyframer_core::resolve_layer;
    use keyframer_data::Layer;
    use serde_json::json;

    fn resolved(v: serde_json::Value) -> ResolvedLayer {
        let layer: Layer = serde_json::from_value(v).unwrap();
        resolve_layer(&layer, 30.0).unwrap()
    }

    fn fade_layer() -> ResolvedLayer {
        resolved(json!({
            "nm": "fade",
            "ip": 0, "op": 30,
            "ks": {
                "o": { "a": 1, "k": [
                    { "t": 0, "s": [100], "e": [0] },
                    { "t": 30 }
                ]},
                "r": { "a": 0, "k": 45 }
            }
        }))
    }

    #[test]
    fn keyframes_block_has_percentage_entries() {
        let layer = fade_layer();
        let css = stylesheet_source(&layer, None, &FormatOptions::default());
        assert!(css.contains("@keyframes fade-ani {"), "css:\n{css}");
        assert!(css.contains("0% {"));
        assert!(css.contains("100% {"));
        assert!(css.contains("opacity: 1;"));
        assert!(css.contains("opacity: 0;"));
    }

    #[test]
    fn static_rotation_lands_in_base_block_only() {
        let layer = fade_layer();
        let css = stylesheet_source(&layer, None, &FormatOptions::default());
        let (base, keys) = css.split_once("@keyframes").unwrap();
        assert!(base.contains("transform: rotate(45deg);"));
        assert!(!keys.contains("rotate"));
    }

    #[test]
    fn animation_declaration_uses_frame_duration() {
        let layer = fade_layer();
        let css = stylesheet_source(&layer, None, &FormatOptions::default());
        assert!(css.contains("animation: fade-ani 1000ms linear infinite;"));
    }

    #[test]
    fn layout_places_layer_at_first_pose_position() {
        let layer = resolved(json!({
            "nm": "move",
            "ip": 0, "op": 30,
            "ks": {
                "p": { "a": 1, "k": [
                    { "t": 0, "s": [120, 40, 0], "e": [220, 40, 0] },
                    { "t": 30 }
                ]}
            }
        }));
        let asset = Asset {
            id: "img_0".to_string(),
            nm: None,
            w: Some(200),
            h: Some(100),
            u: Some("images/".to_string()),
            p: Some("logo.png".to_string()),
        };
        let css = stylesheet_source(&layer, Some(&asset), &FormatOptions::default());
        assert!(css.contains("position: absolute;"));
        assert!(css.contains("top: 120px;"));
        assert!(css.contains("left: 40px;"));
        assert!(css.contains("width: 200px;"));
        assert!(css.contains("background-image: url('./images/logo.png');"));
        // Translations are relative to the first pose.
        assert!(css.contains("translate(0, 0)"));
        assert!(css.contains("translate(100px, 0)"));
    }

    #[test]
    fn without_layout_translations_are_absolute() {
        let layer = resolved(json!({
            "nm": "move",
            "ip": 0, "op": 30,
            "ks": {
                "p": { "a": 1, "k": [
                    { "t": 0, "s": [120, 40, 0], "e": [220, 40, 0] },
                    { "t": 30 }
                ]}
            }
        }));
        let opts = FormatOptions {
            layout: false,
            ..FormatOptions::default()
        };
        let css = stylesheet_source(&layer, None, &opts);
        assert!(!css.contains("position: absolute;"));
        assert!(css.contains("translate(120px, 40px)"));
        assert!(css.contains("translate(220px, 40px)"));
    }

    #[test]
    fn rem_lengths_divide_by_the_root_font_size() {
        let layer = resolved(json!({
            "nm": "move",
            "ip": 0, "op": 30,
            "ks": {
                "p": { "a": 1, "k": [
                    { "t": 0, "s": [0, 0, 0], "e": [500, 250, 0] },
                    { "t": 30 }
                ]}
            }
        }));
        let opts = FormatOptions {
            layout: false,
            rem: true,
            font_size: 1000.0,
        };
        let css = stylesheet_source(&layer, None, &opts);
        assert!(css.contains("translate(0.5rem, 0.25rem)"), "css:\n{css}");
    }

    #[test]
    fn scale_track_is_emitted_as_a_fraction() {
        let layer = resolved(json!({
            "nm": "grow",
            "ip": 0, "op": 30,
            "ks": {
                "s": { "a": 1, "k": [
                    { "t": 0, "s": [100, 100, 100], "e": [150, 150, 100] },
                    { "t": 30 }
                ]}
            }
        }));
        let css = stylesheet_source(&layer, None, &FormatOptions::default());
        assert!(css.contains("scale(1, 1)"));
        assert!(css.contains("scale(1.5, 1.5)"));
    }
}
