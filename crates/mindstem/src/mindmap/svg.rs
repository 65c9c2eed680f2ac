//! SVG output for scenes

use anyhow::Result;
use std::fmt::{self, Write as _};
use tracing::{debug, span, Level};

use super::scene::{Scene, SceneElement, Stroke};
use crate::core::{Point, Renderer};

/// Serializes a [`Scene`] as standalone SVG markup
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    background: bool,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self { background: true }
    }

    /// Include or omit the full-canvas background rectangle
    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a coordinate without trailing zeros
fn num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn pt(p: Point) -> String {
    format!("{} {}", num(p.x), num(p.y))
}

/// Escape text for use in XML content and attribute values
///
/// Characters XML cannot carry at all (most C0 controls, U+FFFE, U+FFFF)
/// become U+FFFD.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c < ' ' || c == '\u{FFFE}' || c == '\u{FFFF}' => out.push('\u{FFFD}'),
            _ => out.push(ch),
        }
    }
    out
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#"stroke="{}" stroke-width="{}""#,
        stroke.color,
        num(stroke.width)
    );
    if stroke.round_cap {
        attrs.push_str(r#" stroke-linecap="round""#);
    }
    if stroke.opacity < 1.0 {
        attrs.push_str(&format!(r#" opacity="{}""#, num(stroke.opacity)));
    }
    attrs
}

impl SvgRenderer {
    fn write_element(
        &self,
        out: &mut String,
        element: &SceneElement,
        font_family: &str,
    ) -> fmt::Result {
        match element {
            SceneElement::Line { from, to, stroke } => writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y),
                stroke_attrs(stroke)
            ),
            SceneElement::Curve {
                from,
                c1,
                c2,
                to,
                stroke,
            } => writeln!(
                out,
                r#"  <path d="M {} C {}, {}, {}" fill="none" {}/>"#,
                pt(*from),
                pt(*c1),
                pt(*c2),
                pt(*to),
                stroke_attrs(stroke)
            ),
            SceneElement::Rect {
                bounds,
                radius,
                fill,
                stroke,
                ..
            } => writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" {}/>"#,
                num(bounds.x),
                num(bounds.y),
                num(bounds.width),
                num(bounds.height),
                num(*radius),
                fill,
                stroke_attrs(stroke)
            ),
            SceneElement::Label {
                anchor,
                lines,
                line_height,
                font_size,
                bold,
                color,
                ..
            } => {
                let weight = if *bold { r#" font-weight="bold""# } else { "" };
                write!(
                    out,
                    r#"  <text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" fill="{}" font-size="{}" font-family="{}"{}>"#,
                    num(anchor.x),
                    num(anchor.y),
                    color,
                    num(*font_size),
                    escape_xml(font_family),
                    weight
                )?;
                for (i, line) in lines.iter().enumerate() {
                    let dy = if i == 0 { 0.0 } else { *line_height };
                    write!(
                        out,
                        r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                        num(anchor.x),
                        num(dy),
                        escape_xml(line)
                    )?;
                }
                writeln!(out, "</text>")
            }
        }
    }
}

impl Renderer<Scene> for SvgRenderer {
    type Output = String;

    fn render(&self, scene: &Scene) -> Result<String> {
        let render_span = span!(
            Level::INFO,
            "render_svg",
            element_count = scene.elements.len(),
            background = self.background
        );
        let _enter = render_span.enter();

        let (w, h) = (num(scene.size.width), num(scene.size.height));
        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        if self.background {
            writeln!(
                out,
                r#"  <rect width="{w}" height="{h}" fill="{}"/>"#,
                scene.background
            )?;
        }
        for element in &scene.elements {
            self.write_element(&mut out, element, &scene.font_family)?;
        }
        writeln!(out, "</svg>")?;

        debug!(bytes = out.len(), "SVG rendered");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "svg"
    }

    fn format(&self) -> &'static str {
        "svg"
    }
}
