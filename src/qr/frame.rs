use crate::qr::customization::{Customization, FrameStyle};
use crate::qr::encoder::BaseGraphic;
use crate::qr::restyle::ModuleLayer;
use crate::qr::svg::{Document, Node, Stroke, num};
use std::fmt::Write;

/// Symmetric margin added around the QR area by every frame style.
pub const PADDING: f64 = 20.0;

/// Height of the "scan me" speech bubble block above the QR area.
pub const BUBBLE_HEIGHT: f64 = 60.0;

/// Gap between the bubble block and the QR area.
pub const BUBBLE_GAP: f64 = 15.0;

/// Corner bracket leg length, as a fraction of the base size.
const CORNER_LEG_RATIO: f64 = 0.15;

/// Stroke width shared by the box border, corner brackets and bubble border.
const FRAME_STROKE: f64 = 4.0;

/// Corner radius of the box and bubble borders.
const FRAME_RADIUS: f64 = 12.0;

/// Radius of a single dot in the dotted frame.
const DOT_RADIUS: f64 = 3.0;

/// Center-to-center spacing between dots in the dotted frame.
const DOT_SPACING: f64 = 3.5 * DOT_RADIUS;

/// Bubble body dimensions and caption.
const BUBBLE_BODY_WIDTH: f64 = 140.0;
const BUBBLE_BODY_HEIGHT: f64 = 44.0;
const BUBBLE_TAIL_HALF_WIDTH: f64 = 8.0;
const BUBBLE_TEXT_SIZE: f64 = 16.0;
const BUBBLE_TEXT: &str = "SCAN ME";

/// Final canvas dimensions and the offset of the QR content within them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub qr_x: f64,
    pub qr_y: f64,
}

/// Computes the canvas layout for a frame style around a base of the given
/// size.
pub fn layout(frame: FrameStyle, base_size: f64) -> Layout {
    match frame {
        FrameStyle::None => Layout {
            width: base_size,
            height: base_size,
            qr_x: 0.0,
            qr_y: 0.0,
        },
        FrameStyle::Box | FrameStyle::Corners | FrameStyle::DotsFrame => Layout {
            width: base_size + 2.0 * PADDING,
            height: base_size + 2.0 * PADDING,
            qr_x: PADDING,
            qr_y: PADDING,
        },
        FrameStyle::ScanMeBubble => Layout {
            width: base_size + 2.0 * PADDING,
            height: base_size + 2.0 * PADDING + BUBBLE_HEIGHT + BUBBLE_GAP,
            qr_x: PADDING,
            qr_y: PADDING + BUBBLE_HEIGHT + BUBBLE_GAP,
        },
    }
}

/// Composes the final vector graphic: frame layer first, then the module
/// layer (plus background rect and logo) inside one positioning group
/// translated to the computed content offset.
pub fn compose(base: &BaseGraphic, layer: ModuleLayer, customization: &Customization) -> Document {
    let frame = customization.frame_style;
    let lo = layout(frame, base.size);

    let mut nodes = frame_nodes(frame, &lo, &base.foreground, &base.background);

    let mut content = Vec::new();
    // Framed styles drop the solid background fill and let the page show
    // through; the bubble frame redraws its own background in the border
    // rect instead.
    let background_fill = match frame {
        FrameStyle::None => base.background.clone(),
        _ => "none".to_string(),
    };
    content.push(Node::Rect {
        x: 0.0,
        y: 0.0,
        width: base.size,
        height: base.size,
        radius: None,
        fill: Some(background_fill),
        stroke: None,
    });
    match layer {
        ModuleLayer::PassThrough { path_data } => content.push(Node::Path {
            d: path_data,
            fill: Some(base.foreground.clone()),
            stroke: None,
        }),
        ModuleLayer::Shapes(shapes) => content.push(Node::Group {
            translate: None,
            fill: Some(base.foreground.clone()),
            nodes: shapes,
        }),
    }
    if let Some(logo) = &base.logo {
        content.push(Node::Image {
            x: logo.x,
            y: logo.y,
            width: logo.width,
            height: logo.height,
            href: logo.href.clone(),
        });
    }

    nodes.push(Node::Group {
        translate: Some((lo.qr_x, lo.qr_y)),
        fill: None,
        nodes: content,
    });

    Document {
        width: lo.width,
        height: lo.height,
        nodes,
    }
}

fn frame_nodes(frame: FrameStyle, lo: &Layout, foreground: &str, background: &str) -> Vec<Node> {
    match frame {
        FrameStyle::None => Vec::new(),
        FrameStyle::Box => vec![border_rect(
            FRAME_STROKE / 2.0,
            FRAME_STROKE / 2.0,
            lo.width - FRAME_STROKE,
            lo.height - FRAME_STROKE,
            "none",
            foreground,
        )],
        FrameStyle::Corners => corner_brackets(lo, foreground),
        FrameStyle::DotsFrame => dot_ring(lo, foreground),
        FrameStyle::ScanMeBubble => {
            let mut nodes = vec![border_rect(
                PADDING / 2.0,
                BUBBLE_HEIGHT + BUBBLE_GAP + PADDING / 2.0,
                lo.width - PADDING,
                lo.height - BUBBLE_HEIGHT - BUBBLE_GAP - PADDING,
                background,
                foreground,
            )];
            nodes.extend(bubble(lo, foreground, background));
            nodes
        }
    }
}

fn border_rect(x: f64, y: f64, width: f64, height: f64, fill: &str, stroke: &str) -> Node {
    Node::Rect {
        x,
        y,
        width,
        height,
        radius: Some(FRAME_RADIUS),
        fill: Some(fill.to_string()),
        stroke: Some(Stroke {
            color: stroke.to_string(),
            width: FRAME_STROKE,
            round_caps: false,
        }),
    }
}

/// Four independent L-shaped strokes, one per canvas corner.
fn corner_brackets(lo: &Layout, foreground: &str) -> Vec<Node> {
    let leg = CORNER_LEG_RATIO * (lo.width - 2.0 * PADDING);
    let inset = FRAME_STROKE / 2.0;
    let right = lo.width - inset;
    let bottom = lo.height - inset;

    let legs = [
        format!(
            "M{},{} V{} H{}",
            num(inset),
            num(inset + leg),
            num(inset),
            num(inset + leg)
        ),
        format!(
            "M{},{} H{} V{}",
            num(right - leg),
            num(inset),
            num(right),
            num(inset + leg)
        ),
        format!(
            "M{},{} V{} H{}",
            num(right),
            num(bottom - leg),
            num(bottom),
            num(right - leg)
        ),
        format!(
            "M{},{} H{} V{}",
            num(inset + leg),
            num(bottom),
            num(inset),
            num(bottom - leg)
        ),
    ];

    legs.into_iter()
        .map(|d| Node::Path {
            d,
            fill: Some("none".to_string()),
            stroke: Some(Stroke {
                color: foreground.to_string(),
                width: FRAME_STROKE,
                round_caps: true,
            }),
        })
        .collect()
}

/// A ring of evenly spaced dots just inside the padded bounds: full rows
/// along the top and bottom edges, columns along the sides with the
/// corner-adjacent points left to the rows.
fn dot_ring(lo: &Layout, foreground: &str) -> Vec<Node> {
    let inset = PADDING / 2.0;
    let epsilon = 0.01;
    let mut dots = Vec::new();

    let mut x = inset;
    while x <= lo.width - inset + epsilon {
        dots.push((x, inset));
        dots.push((x, lo.height - inset));
        x += DOT_SPACING;
    }
    let mut y = inset + DOT_SPACING;
    while y <= lo.height - inset - DOT_SPACING + epsilon {
        dots.push((inset, y));
        dots.push((lo.width - inset, y));
        y += DOT_SPACING;
    }

    dots.into_iter()
        .map(|(cx, cy)| Node::Circle {
            cx,
            cy,
            r: DOT_RADIUS,
            fill: Some(foreground.to_string()),
        })
        .collect()
}

/// The speech bubble: a rounded body with a centered downward tail and the
/// caption, centered horizontally above the QR area.
fn bubble(lo: &Layout, foreground: &str, background: &str) -> Vec<Node> {
    let body_x = (lo.width - BUBBLE_BODY_WIDTH) / 2.0;
    let body_y = 4.0;
    let body_bottom = body_y + BUBBLE_BODY_HEIGHT;
    let center_x = lo.width / 2.0;

    let mut tail = String::new();
    let _ = write!(
        tail,
        "M{},{} L{},{} L{},{} z",
        num(center_x - BUBBLE_TAIL_HALF_WIDTH),
        num(body_bottom),
        num(center_x + BUBBLE_TAIL_HALF_WIDTH),
        num(body_bottom),
        num(center_x),
        num(body_bottom + 10.0)
    );

    vec![
        Node::Rect {
            x: body_x,
            y: body_y,
            width: BUBBLE_BODY_WIDTH,
            height: BUBBLE_BODY_HEIGHT,
            radius: Some(BUBBLE_BODY_HEIGHT / 2.0),
            fill: Some(foreground.to_string()),
            stroke: None,
        },
        Node::Path {
            d: tail,
            fill: Some(foreground.to_string()),
            stroke: None,
        },
        Node::Text {
            x: center_x,
            y: body_y + BUBBLE_BODY_HEIGHT / 2.0,
            size: BUBBLE_TEXT_SIZE,
            fill: background.to_string(),
            content: BUBBLE_TEXT.to_string(),
        },
    ]
}
