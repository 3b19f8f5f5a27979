use std::fmt::Write;

/// A vector graphic as a plain value. The pipeline rebuilds one of these
/// from scratch on every run and only then serializes it, so repeated runs
/// with the same inputs produce byte-identical markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub round_caps: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: Option<f64>,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Option<String>,
    },
    Path {
        d: String,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Group {
        translate: Option<(f64, f64)>,
        fill: Option<String>,
        nodes: Vec<Node>,
    },
    Text {
        x: f64,
        y: f64,
        size: f64,
        fill: String,
        content: String,
    },
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        href: String,
    },
}

impl Document {
    /// Serializes the document to SVG markup. Attribute order and number
    /// formatting are fixed so the output is deterministic.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\">\n",
            num(self.width),
            num(self.height),
        );
        for node in &self.nodes {
            write_node(&mut out, node, 1);
        }
        out += "</svg>\n";
        out
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
    match node {
        Node::Rect {
            x,
            y,
            width,
            height,
            radius,
            fill,
            stroke,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                num(*x),
                num(*y),
                num(*width),
                num(*height)
            );
            if let Some(r) = radius {
                let _ = write!(out, " rx=\"{0}\" ry=\"{0}\"", num(*r));
            }
            write_paint(out, fill, stroke);
            *out += "/>\n";
        }
        Node::Circle { cx, cy, r, fill } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                num(*cx),
                num(*cy),
                num(*r)
            );
            write_paint(out, fill, &None);
            *out += "/>\n";
        }
        Node::Path { d, fill, stroke } => {
            let _ = write!(out, "<path d=\"{}\"", d);
            write_paint(out, fill, stroke);
            *out += "/>\n";
        }
        Node::Group {
            translate,
            fill,
            nodes,
        } => {
            *out += "<g";
            if let Some((tx, ty)) = translate {
                let _ = write!(out, " transform=\"translate({},{})\"", num(*tx), num(*ty));
            }
            if let Some(fill) = fill {
                let _ = write!(out, " fill=\"{}\"", fill);
            }
            *out += ">\n";
            for child in nodes {
                write_node(out, child, depth + 1);
            }
            for _ in 0..depth {
                out.push('\t');
            }
            *out += "</g>\n";
        }
        Node::Text {
            x,
            y,
            size,
            fill,
            content,
        } => {
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" \
                 font-family=\"sans-serif\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>\n",
                num(*x),
                num(*y),
                num(*size),
                fill,
                content
            );
        }
        Node::Image {
            x,
            y,
            width,
            height,
            href,
        } => {
            let _ = write!(
                out,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"{}\"/>\n",
                num(*x),
                num(*y),
                num(*width),
                num(*height),
                href
            );
        }
    }
}

fn write_paint(out: &mut String, fill: &Option<String>, stroke: &Option<Stroke>) {
    if let Some(fill) = fill {
        let _ = write!(out, " fill=\"{}\"", fill);
    }
    if let Some(stroke) = stroke {
        let _ = write!(
            out,
            " stroke=\"{}\" stroke-width=\"{}\"",
            stroke.color,
            num(stroke.width)
        );
        if stroke.round_caps {
            *out += " stroke-linecap=\"round\"";
        }
    }
}

/// Formats a coordinate with at most two decimal places and no trailing
/// zeros, so 256.0 prints as "256" and 38.4 as "38.4".
pub fn num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
