//! SVG backend for recorded paint commands.
//!
//! The output is a standalone `<svg>` element suitable for inlining into an
//! HTML page or a print stylesheet. Accessibility metadata (`role="img"`,
//! `<title>`, `<desc>`, per-group titles) is emitted alongside the drawing.

use crate::color::Color;
use crate::context::{FillStyle, LineCap, LineJoin, PaintCommand, StrokeStyle, TextAnchor};
use crate::gradient::Gradient;
use crate::path::{Path, PathCommand};
use crate::primitives::Rect;

/// Document-level attributes of an SVG surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    /// Prefix for element ids (gradients, title, desc). Must be unique per page.
    pub id: String,
    pub width: f32,
    pub height: f32,
    /// Scale to the container width instead of a fixed pixel width.
    pub responsive: bool,
    pub title: String,
    pub desc: Option<String>,
}

impl SvgDocument {
    pub fn new(id: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            responsive: false,
            title: String::new(),
            desc: None,
        }
    }
}

/// Serialize `commands` into an SVG document.
pub fn render_svg(doc: &SvgDocument, commands: &[PaintCommand]) -> String {
    let mut w = SvgWriter::new(&doc.id);
    w.open_root(doc);
    for cmd in commands {
        w.command(cmd);
    }
    w.close_root();
    tracing::trace!(id = %doc.id, commands = commands.len(), "rendered svg");
    w.out
}

struct SvgWriter {
    /// Escaped for attribute values.
    id: String,
    out: String,
    gradients: usize,
    open_groups: usize,
}

impl SvgWriter {
    fn new(id: &str) -> Self {
        Self {
            id: escape_xml(id),
            out: String::with_capacity(4096),
            gradients: 0,
            open_groups: 0,
        }
    }

    fn open_root(&mut self, doc: &SvgDocument) {
        let w = num(doc.width);
        let h = num(doc.height);
        let size = if doc.responsive {
            "width=\"100%\" preserveAspectRatio=\"xMidYMid meet\"".to_string()
        } else {
            format!("width=\"{w}\" height=\"{h}\"")
        };
        let labelled_by = if doc.desc.is_some() {
            format!("{id}-title {id}-desc", id = self.id)
        } else {
            format!("{id}-title", id = self.id)
        };
        self.out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-labelledby=\"{labelled_by}\" {size} viewBox=\"0 0 {w} {h}\">"
        ));
        self.out.push_str(&format!(
            "<title id=\"{}-title\">{}</title>",
            self.id,
            escape_xml(&doc.title)
        ));
        if let Some(desc) = &doc.desc {
            self.out.push_str(&format!(
                "<desc id=\"{}-desc\">{}</desc>",
                self.id,
                escape_xml(desc)
            ));
        }
    }

    fn close_root(&mut self) {
        // Tolerate unbalanced groups from a partially recorded context.
        while self.open_groups > 0 {
            self.out.push_str("</g>");
            self.open_groups -= 1;
        }
        self.out.push_str("</svg>");
    }

    fn command(&mut self, cmd: &PaintCommand) {
        match cmd {
            PaintCommand::FillRect {
                rect,
                radius,
                style,
            } => {
                let fill = self.fill(style);
                self.out.push_str(&format!(
                    "<rect {}{} {fill}/>",
                    rect_attrs(rect),
                    radius_attrs(*radius)
                ));
            }
            PaintCommand::StrokeLine { from, to, style } => {
                self.out.push_str(&format!(
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {}/>",
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y),
                    stroke_attrs(style)
                ));
            }
            PaintCommand::FillCircle { circle, style } => {
                let fill = self.fill(style);
                self.out.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {fill}/>",
                    num(circle.center.x),
                    num(circle.center.y),
                    num(circle.radius)
                ));
            }
            PaintCommand::StrokeCircle { circle, style } => {
                self.out.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" {}/>",
                    num(circle.center.x),
                    num(circle.center.y),
                    num(circle.radius),
                    stroke_attrs(style)
                ));
            }
            PaintCommand::FillPath { path, style } => {
                let fill = self.fill(style);
                self.out
                    .push_str(&format!("<path d=\"{}\" {fill}/>", path_data(path)));
            }
            PaintCommand::StrokePath { path, style } => {
                self.out.push_str(&format!(
                    "<path d=\"{}\" fill=\"none\" {}/>",
                    path_data(path),
                    stroke_attrs(style)
                ));
            }
            PaintCommand::DrawText {
                text,
                position,
                style,
            } => {
                let anchor = match style.anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                let weight = if style.bold {
                    " font-weight=\"600\""
                } else {
                    ""
                };
                self.out.push_str(&format!(
                    "<text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"{anchor}\"{weight} {}>{}</text>",
                    num(position.x),
                    num(position.y),
                    num(style.size),
                    paint_attrs("fill", style.color),
                    escape_xml(text)
                ));
            }
            PaintCommand::BeginGroup { title, opacity } => {
                self.open_groups += 1;
                if *opacity < 1.0 {
                    self.out
                        .push_str(&format!("<g opacity=\"{}\">", num(*opacity)));
                } else {
                    self.out.push_str("<g>");
                }
                if let Some(title) = title {
                    self.out
                        .push_str(&format!("<title>{}</title>", escape_xml(title)));
                }
            }
            PaintCommand::EndGroup => {
                if self.open_groups > 0 {
                    self.open_groups -= 1;
                    self.out.push_str("</g>");
                }
            }
        }
    }

    /// Fill attributes; gradients get an inline `<defs>` entry first.
    fn fill(&mut self, style: &FillStyle) -> String {
        match style {
            FillStyle::Color(c) => paint_attrs("fill", *c),
            FillStyle::Gradient(g) => {
                let gid = format!("{}-grad{}", self.id, self.gradients);
                self.gradients += 1;
                self.gradient_def(&gid, g);
                format!("fill=\"url(#{gid})\"")
            }
        }
    }

    fn gradient_def(&mut self, gid: &str, g: &Gradient) {
        self.out.push_str(&format!(
            "<defs><linearGradient id=\"{gid}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
            num(g.start.x),
            num(g.start.y),
            num(g.end.x),
            num(g.end.y)
        ));
        for stop in &g.stops {
            self.out.push_str(&format!(
                "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
                num(stop.offset.clamp(0.0, 1.0)),
                stop.color.to_hex_rgb(),
                num(stop.color.a)
            ));
        }
        self.out.push_str("</linearGradient></defs>");
    }
}

fn rect_attrs(rect: &Rect) -> String {
    format!(
        "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
        num(rect.x),
        num(rect.y),
        num(rect.width.max(0.0)),
        num(rect.height.max(0.0))
    )
}

fn radius_attrs(radius: f32) -> String {
    if radius > 0.0 {
        format!(" rx=\"{}\"", num(radius))
    } else {
        String::new()
    }
}

fn paint_attrs(attr: &str, color: Color) -> String {
    if color.a >= 1.0 {
        format!("{attr}=\"{}\"", color.to_hex_rgb())
    } else {
        format!(
            "{attr}=\"{}\" {attr}-opacity=\"{}\"",
            color.to_hex_rgb(),
            num(color.a)
        )
    }
}

fn stroke_attrs(style: &StrokeStyle) -> String {
    let mut s = format!(
        "{} stroke-width=\"{}\"",
        paint_attrs("stroke", style.color),
        num(style.width)
    );
    match style.line_cap {
        LineCap::Butt => {}
        LineCap::Round => s.push_str(" stroke-linecap=\"round\""),
        LineCap::Square => s.push_str(" stroke-linecap=\"square\""),
    }
    match style.line_join {
        LineJoin::Miter => {}
        LineJoin::Round => s.push_str(" stroke-linejoin=\"round\""),
        LineJoin::Bevel => s.push_str(" stroke-linejoin=\"bevel\""),
    }
    if let Some(dash) = style.dash {
        s.push_str(&format!(
            " stroke-dasharray=\"{} {}\" stroke-dashoffset=\"{}\"",
            num(dash.length),
            num(dash.gap),
            num(dash.offset)
        ));
    }
    s
}

/// SVG path data (`M`, `L`, `C`, `Z`) for a path.
pub fn path_data(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(path.commands().len());
    for cmd in path.commands() {
        parts.push(match *cmd {
            PathCommand::MoveTo(p) => format!("M{} {}", num(p.x), num(p.y)),
            PathCommand::LineTo(p) => format!("L{} {}", num(p.x), num(p.y)),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => format!(
                "C{} {} {} {} {} {}",
                num(control1.x),
                num(control1.y),
                num(control2.x),
                num(control2.y),
                num(end.x),
                num(end.y)
            ),
            PathCommand::Close => "Z".to_string(),
        });
    }
    parts.join(" ")
}

/// Compact number formatting: two decimals, trailing zeroes trimmed.
fn num(v: f32) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{v:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathBuilder;

    #[test]
    fn num_trims_and_normalizes() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.345), "12.35");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(f32::NAN), "0");
    }

    #[test]
    fn path_data_uses_absolute_commands() {
        let p = PathBuilder::new()
            .move_to(0.0, 1.5)
            .line_to(10.0, 2.0)
            .cubic_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
            .close()
            .build();
        assert_eq!(path_data(&p), "M0 1.5 L10 2 C1 2 3 4 5 6 Z");
    }

    #[test]
    fn id_is_escaped_in_attributes() {
        let mut doc = SvgDocument::new("x\"><script>", 10.0, 10.0);
        doc.title = "t".to_string();
        let svg = render_svg(&doc, &[]);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("aria-labelledby=\"x&quot;&gt;&lt;script&gt;-title\""));
        assert!(svg.contains("<title id=\"x&quot;&gt;&lt;script&gt;-title\">t</title>"));
    }

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(escape_xml("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }
}
