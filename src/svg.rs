//! Self-contained SVG document for a rendered figure.

use crate::geometry::{Figure, LayerStyle, Polygon};
use std::fmt::Write as _;

const ROTATE_STYLE: &str = r#"<style>
.snowflake.rotate { transform-origin: 50% 50%; animation: snowflake-spin 60s linear infinite; }
@keyframes snowflake-spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }
</style>
"#;

pub fn to_svg(figure: &Figure) -> String {
    let mut out = String::new();
    let class = if figure.rotate {
        "snowflake rotate"
    } else {
        "snowflake"
    };
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" viewBox="0 0 {} {}">"#,
        class,
        fmt(figure.view_box),
        fmt(figure.view_box)
    );
    out.push_str("<title>Snowflake</title>\n");
    if figure.rotate {
        out.push_str(ROTATE_STYLE);
    }

    for layer in &figure.layers {
        open_layer(&mut out, layer);
        for arm in &figure.arms {
            out.push_str("<g class=\"arm\">");
            for polygon in &arm.polygons {
                let _ = write!(&mut out, r#"<path d="{}"/>"#, path_data(polygon));
            }
            out.push_str("</g>\n");
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn open_layer(out: &mut String, layer: &LayerStyle) {
    let _ = write!(out, r#"<g fill="{}""#, escape_xml(&layer.fill));
    if let Some(stroke) = &layer.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}" stroke-linejoin="round""#,
            escape_xml(&stroke.color),
            fmt(stroke.width)
        );
    }
    out.push_str(">\n");
}

/// `M x y L x y ... z`
pub fn path_data(polygon: &Polygon) -> String {
    let mut d = String::new();
    for (idx, p) in polygon.points.iter().enumerate() {
        let cmd = if idx == 0 { 'M' } else { 'L' };
        if idx > 0 {
            d.push(' ');
        }
        let _ = write!(&mut d, "{}{} {}", cmd, fmt(p.x), fmt(p.y));
    }
    if !polygon.points.is_empty() {
        d.push_str(" z");
    }
    d
}

/// Three fractional digits at most, no `-0`, non-finite values as `0`
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    let s = rounded.to_string();
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
