pub mod customization;
pub mod encoder;
pub mod export;
pub mod frame;
pub mod restyle;
pub mod svg;

use anyhow::Result;
use customization::Customization;

/// Runs the full styling pipeline: encode the payload, restyle the module
/// shapes, compose the frame. Pure in its inputs, so repeated runs with the
/// same payload and customization produce identical documents.
pub fn render(payload: &str, customization: &Customization) -> Result<svg::Document> {
    let base = encoder::encode(payload, customization)?;
    let layer = restyle::module_layer(&base, customization.module_style);
    Ok(frame::compose(&base, layer, customization))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::customization::{FrameStyle, ModuleStyle};

    fn customization(style: ModuleStyle, frame: FrameStyle) -> Customization {
        Customization {
            module_style: style,
            frame_style: frame,
            ..Customization::default()
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let custom = customization(ModuleStyle::Dots, FrameStyle::ScanMeBubble);
        let first = render("https://example.com", &custom).unwrap();
        let second = render("https://example.com", &custom).unwrap();

        assert_eq!(first.to_svg_string(), second.to_svg_string());
    }

    #[test]
    fn test_plain_squares_without_frame() {
        let custom = customization(ModuleStyle::Squares, FrameStyle::None);
        let base = encoder::encode("https://example.com", &custom).unwrap();
        let document = render("https://example.com", &custom).unwrap();
        let svg = document.to_svg_string();

        assert_eq!((document.width, document.height), (256.0, 256.0));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains(&base.path_data));
    }

    #[test]
    fn test_dots_emit_one_circle_per_module() {
        let custom = customization(ModuleStyle::Dots, FrameStyle::None);
        let base = encoder::encode("https://example.com", &custom).unwrap();
        let svg = render("https://example.com", &custom).unwrap().to_svg_string();

        assert_eq!(svg.matches("<circle").count(), base.module_count);
        // The original compound path is gone, not merely hidden.
        assert_eq!(svg.matches("<path").count(), 0);
    }

    #[test]
    fn test_box_frame_grows_canvas() {
        let custom = customization(ModuleStyle::Squares, FrameStyle::Box);
        let document = render("https://example.com", &custom).unwrap();

        assert_eq!((document.width, document.height), (296.0, 296.0));
    }

    #[test]
    fn test_bubble_frame_layout_and_caption() {
        let custom = customization(ModuleStyle::Squares, FrameStyle::ScanMeBubble);
        let document = render("https://example.com", &custom).unwrap();
        let svg = document.to_svg_string();

        assert_eq!((document.width, document.height), (296.0, 371.0));
        assert!(svg.contains(">SCAN ME</text>"));
        assert!(svg.contains("transform=\"translate(20,95)\""));
    }

    #[test]
    fn test_logo_is_carried_inside_the_content_group() {
        let mut custom = customization(ModuleStyle::Squares, FrameStyle::Box);
        custom.logo = Some("data:image/png;base64,AAAA".to_string());
        let svg = render("https://example.com", &custom).unwrap().to_svg_string();

        assert!(svg.contains("<image x=\"104\" y=\"104\" width=\"48\" height=\"48\""));
    }
}
