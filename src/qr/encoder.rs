use crate::qr::customization::Customization;
use crate::qr::svg::num;
use anyhow::{Context, Result};
use qrcode::{Color, QrCode, Version};
use std::fmt::Write;

/// Edge length of the base QR canvas, in user units.
pub const BASE_SIZE: f64 = 256.0;

/// Quiet zone width around the symbol, in modules.
pub const QUIET_ZONE: usize = 4;

/// Edge length of an embedded logo, in user units.
pub const LOGO_SIZE: f64 = 48.0;

/// The stock vector rendering of a QR code, before any restyling or
/// framing. The module path uses the `M<x>,<y>h<s>v<s>h-<s>z` sub-path
/// grammar, one sub-path per dark module; the restyler parses this grammar
/// back, so it is the one structural contract between the two stages.
#[derive(Debug, Clone)]
pub struct BaseGraphic {
    pub size: f64,
    pub foreground: String,
    pub background: String,
    pub path_data: String,
    pub module_count: usize,
    pub version: i16,
    pub logo: Option<Logo>,
}

/// A logo placed over the symbol center. The modules underneath have been
/// excavated by the encoder, so the overlay never hides data the decoder
/// still needs.
#[derive(Debug, Clone)]
pub struct Logo {
    pub href: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Encodes a payload into the base vector graphic using the given colors,
/// error correction level and optional logo.
pub fn encode(payload: &str, customization: &Customization) -> Result<BaseGraphic> {
    let code = QrCode::with_error_correction_level(payload, customization.ec_level.into())
        .context("Could not encode payload as a QR symbol")?;

    let modules_across = code.width() + 2 * QUIET_ZONE;
    let module_size = BASE_SIZE / modules_across as f64;

    let logo = customization.logo.as_ref().map(|href| {
        let offset = (BASE_SIZE - LOGO_SIZE) / 2.0;
        Logo {
            href: href.clone(),
            x: offset,
            y: offset,
            width: LOGO_SIZE,
            height: LOGO_SIZE,
        }
    });

    let colors = code.to_colors();
    let mut path_data = String::new();
    let mut module_count = 0;
    for row in 0..code.width() {
        for column in 0..code.width() {
            if colors[row * code.width() + column] != Color::Dark {
                continue;
            }

            let x = (column + QUIET_ZONE) as f64 * module_size;
            let y = (row + QUIET_ZONE) as f64 * module_size;
            if let Some(logo) = &logo {
                if excavated(x, y, module_size, logo) {
                    continue;
                }
            }

            if module_count > 0 {
                path_data.push(' ');
            }
            let _ = write!(
                path_data,
                "M{},{}h{2}v{2}h-{2}z",
                num(x),
                num(y),
                num(module_size)
            );
            module_count += 1;
        }
    }

    let version = match code.version() {
        Version::Normal(v) | Version::Micro(v) => v,
    };
    tracing::debug!(version, module_count, "encoded base graphic");

    Ok(BaseGraphic {
        size: BASE_SIZE,
        foreground: customization.foreground.clone(),
        background: customization.background.clone(),
        path_data,
        module_count,
        version,
        logo,
    })
}

// A module is excavated when its rectangle intersects the logo rectangle.
fn excavated(x: f64, y: f64, size: f64, logo: &Logo) -> bool {
    x < logo.x + logo.width && x + size > logo.x && y < logo.y + logo.height && y + size > logo.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customization() -> Customization {
        Customization::default()
    }

    #[test]
    fn test_encode_produces_module_grammar() {
        let base = encode("https://example.com", &customization()).unwrap();

        assert_eq!(base.size, 256.0);
        assert!(base.module_count > 0);
        assert!(base.path_data.starts_with('M'));
        assert!(base.path_data.ends_with('z'));
        // One closed sub-path per dark module.
        assert_eq!(base.path_data.matches('z').count(), base.module_count);
        assert_eq!(base.path_data.matches('M').count(), base.module_count);
    }

    #[test]
    fn test_encode_respects_error_correction_level() {
        let low = encode("https://example.com", &customization()).unwrap();
        let mut custom = customization();
        custom.ec_level = crate::qr::customization::EcLevel::H;
        let high = encode("https://example.com", &custom).unwrap();

        // Higher correction needs a larger symbol for the same payload.
        assert!(high.version > low.version);
    }

    #[test]
    fn test_logo_excavates_center_modules() {
        let plain = encode("https://example.com", &customization()).unwrap();
        let mut custom = customization();
        custom.logo = Some("data:image/png;base64,AAAA".to_string());
        let excavated = encode("https://example.com", &custom).unwrap();

        assert!(excavated.module_count < plain.module_count);
        let logo = excavated.logo.unwrap();
        assert_eq!(logo.x, (256.0 - 48.0) / 2.0);
        assert_eq!(logo.width, 48.0);
    }

    #[test]
    fn test_empty_payload_is_rejected_gracefully() {
        // qrcode accepts empty input; a clearly oversized payload is the
        // failure path worth pinning down.
        let oversized = "x".repeat(8000);
        assert!(encode(&oversized, &customization()).is_err());
    }
}
