use crate::qr::customization::ModuleStyle;
use crate::qr::encoder::BaseGraphic;
use crate::qr::svg::Node;

/// Corner radius of a rounded module, as a fraction of the module size.
const ROUNDED_RADIUS_RATIO: f64 = 0.3;

/// A single square module recovered from the encoder's compound path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Module {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// The module layer of the final graphic: either the encoder's compound
/// path passed through untouched, or a set of generated shapes replacing it.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleLayer {
    PassThrough { path_data: String },
    Shapes(Vec<Node>),
}

/// Builds the module layer for the requested style. When the compound path
/// cannot be parsed at all, the restyler degrades to passing the original
/// path through rather than dropping the symbol.
pub fn module_layer(base: &BaseGraphic, style: ModuleStyle) -> ModuleLayer {
    if style == ModuleStyle::Squares {
        return ModuleLayer::PassThrough {
            path_data: base.path_data.clone(),
        };
    }

    let modules = parse_modules(&base.path_data);
    if modules.is_empty() {
        tracing::debug!("no parseable modules, keeping the original path");
        return ModuleLayer::PassThrough {
            path_data: base.path_data.clone(),
        };
    }

    let shapes = modules
        .iter()
        .map(|module| match style {
            ModuleStyle::Rounded => Node::Rect {
                x: module.x,
                y: module.y,
                width: module.size,
                height: module.size,
                radius: Some(ROUNDED_RADIUS_RATIO * module.size),
                fill: None,
                stroke: None,
            },
            ModuleStyle::Dots => Node::Circle {
                cx: module.x + module.size / 2.0,
                cy: module.y + module.size / 2.0,
                r: module.size / 2.0,
                fill: None,
            },
            ModuleStyle::Squares => unreachable!(),
        })
        .collect();

    ModuleLayer::Shapes(shapes)
}

/// Parses the encoder's compound path back into individual modules. Each
/// sub-path has the shape `M<x>,<y>h<s>v<s>h-<s>z`; anything that deviates
/// from it is skipped so one bad token never takes down the rest.
pub fn parse_modules(path_data: &str) -> Vec<Module> {
    let mut modules = Vec::new();
    for sub_path in path_data.split(['z', 'Z']) {
        let sub_path = sub_path.trim();
        if sub_path.is_empty() {
            continue;
        }
        match parse_module(sub_path) {
            Some(module) => modules.push(module),
            None => tracing::debug!(token = sub_path, "skipping malformed module token"),
        }
    }
    modules
}

fn parse_module(sub_path: &str) -> Option<Module> {
    let rest = sub_path
        .strip_prefix('M')
        .or_else(|| sub_path.strip_prefix('m'))?;

    // The corner coordinates sit between the move and the first
    // horizontal-line command; the module size is that command's magnitude.
    let (corner, tail) = rest.split_once(['h', 'H'])?;
    let mut coordinates = corner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());
    let x: f64 = coordinates.next()?.parse().ok()?;
    let y: f64 = coordinates.next()?.parse().ok()?;

    let size_token = tail.split(['v', 'V']).next()?.trim();
    let size: f64 = size_token.parse::<f64>().ok()?.abs();

    if !x.is_finite() || !y.is_finite() || !(size > 0.0) {
        return None;
    }
    Some(Module { x, y, size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::customization::Customization;
    use crate::qr::encoder;

    #[test]
    fn test_parse_single_module() {
        let modules = parse_modules("M10,20h8v8h-8z");

        assert_eq!(modules.len(), 1);
        assert_eq!(
            modules[0],
            Module {
                x: 10.0,
                y: 20.0,
                size: 8.0
            }
        );
    }

    #[test]
    fn test_parse_space_separated_coordinates() {
        let modules = parse_modules("M10 20h8v8h-8z");

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].x, 10.0);
        assert_eq!(modules[0].y, 20.0);
    }

    #[test]
    fn test_malformed_token_is_skipped() {
        let modules = parse_modules("M10,10h8v8h-8z M20,abch8v8h-8z M30,10h8v8h-8z");

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].x, 10.0);
        assert_eq!(modules[1].x, 30.0);
    }

    #[test]
    fn test_non_positive_size_is_skipped() {
        let modules = parse_modules("M10,10h0v0h-0z M30,10h8v8h-8z");

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].x, 30.0);
    }

    #[test]
    fn test_squares_pass_through_preserves_geometry() {
        let base = encoder::encode("https://example.com", &Customization::default()).unwrap();
        let layer = module_layer(&base, ModuleStyle::Squares);

        assert_eq!(
            layer,
            ModuleLayer::PassThrough {
                path_data: base.path_data.clone()
            }
        );
    }

    #[test]
    fn test_dots_emit_one_circle_per_module() {
        let base = encoder::encode("https://example.com", &Customization::default()).unwrap();
        let layer = module_layer(&base, ModuleStyle::Dots);

        let ModuleLayer::Shapes(shapes) = layer else {
            panic!("expected generated shapes");
        };
        assert_eq!(shapes.len(), base.module_count);
        let Node::Circle { cx, cy, r, .. } = &shapes[0] else {
            panic!("expected a circle");
        };
        let first = parse_modules(&base.path_data)[0];
        assert_eq!(*cx, first.x + first.size / 2.0);
        assert_eq!(*cy, first.y + first.size / 2.0);
        assert_eq!(*r, first.size / 2.0);
    }

    #[test]
    fn test_rounded_corner_radius_is_three_tenths_of_size() {
        let modules = parse_modules("M10,10h8v8h-8z");
        let base = BaseGraphic {
            size: 256.0,
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            path_data: "M10,10h8v8h-8z".to_string(),
            module_count: modules.len(),
            version: 1,
            logo: None,
        };

        let ModuleLayer::Shapes(shapes) = module_layer(&base, ModuleStyle::Rounded) else {
            panic!("expected generated shapes");
        };
        let Node::Rect { x, y, radius, .. } = &shapes[0] else {
            panic!("expected a rect");
        };
        assert_eq!((*x, *y), (10.0, 10.0));
        assert_eq!(*radius, Some(0.3 * 8.0));
    }

    #[test]
    fn test_unparseable_path_degrades_to_pass_through() {
        let base = BaseGraphic {
            size: 256.0,
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            path_data: "not a path at all".to_string(),
            module_count: 0,
            version: 1,
            logo: None,
        };

        let layer = module_layer(&base, ModuleStyle::Dots);
        assert_eq!(
            layer,
            ModuleLayer::PassThrough {
                path_data: "not a path at all".to_string()
            }
        );
    }
}
