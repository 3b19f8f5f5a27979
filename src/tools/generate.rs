use crate::args::{ColorInput, StringInput};
use crate::qr;
use crate::qr::customization::{Customization, CustomizationUpdate, EcLevel, FrameStyle, ModuleStyle};
use crate::qr::export;
use crate::tool::{Output, Tool};
use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};
use clap::{Command, CommandFactory, Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "generate",
    about = "Generate a styled QR code and export it as SVG or PNG"
)]
pub struct GenerateTool {
    /// The text or URL to encode as QR code
    payload: StringInput,

    /// Module (foreground) color, any CSS notation
    #[arg(long = "fg")]
    foreground: Option<ColorInput>,

    /// Background color, any CSS notation
    #[arg(long = "bg")]
    background: Option<ColorInput>,

    /// Module shape
    #[arg(short, long)]
    style: Option<ModuleStyle>,

    /// Decorative frame around the code
    #[arg(long)]
    frame: Option<FrameStyle>,

    /// Error correction level
    #[arg(long = "ec-level")]
    ec_level: Option<EcLevel>,

    /// Image file to embed as a centered logo
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Export format (defaults from the output extension, else svg)
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Save the export to a file instead of writing it to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
enum ExportFormat {
    Svg,
    Png,
}

impl Tool for GenerateTool {
    fn cli() -> Command {
        GenerateTool::command()
    }

    fn execute(&self) -> Result<Option<Output>> {
        let customization = Customization::default().merged(CustomizationUpdate {
            foreground: self.foreground.as_ref().map(|color| color.0.clone()),
            background: self.background.as_ref().map(|color| color.0.clone()),
            module_style: self.style,
            frame_style: self.frame,
            logo: self
                .logo
                .as_deref()
                .map(logo_data_uri)
                .transpose()
                .context("Could not read the logo image")?,
            ec_level: self.ec_level,
        });

        let document = qr::render(self.payload.as_ref(), &customization)
            .context("Could not render the QR code")?;

        let format = self.format.unwrap_or_else(|| match &self.output {
            Some(path) => match path.extension().and_then(|ext| ext.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("png") => ExportFormat::Png,
                _ => ExportFormat::Svg,
            },
            None => ExportFormat::Svg,
        });

        let bytes = match format {
            ExportFormat::Svg => export::to_svg(&document).into_bytes(),
            ExportFormat::Png => {
                export::to_png(&document).context("Could not rasterize the QR code")?
            }
        };

        match &self.output {
            Some(path) => {
                fs::write(path, &bytes).context("Could not write the export file")?;
                Ok(None)
            }
            None => match format {
                // SVG is text, keep it printable; PNG goes out raw.
                ExportFormat::Svg => Ok(Some(Output::Text(
                    String::from_utf8(bytes).context("Generated SVG was not valid UTF-8")?,
                ))),
                ExportFormat::Png => Ok(Some(Output::Bytes(bytes))),
            },
        }
    }
}

/// Reads an image file into an embeddable `data:` URI.
fn logo_data_uri(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
    let format = image::guess_format(&bytes).context("Could not recognize the image format")?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        general_purpose::STANDARD.encode(&bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(payload: &str) -> GenerateTool {
        GenerateTool {
            payload: StringInput(payload.to_string()),
            foreground: None,
            background: None,
            style: None,
            frame: None,
            ec_level: None,
            logo: None,
            format: None,
            output: None,
        }
    }

    #[test]
    fn test_default_generate_emits_svg_text() {
        let result = tool("https://example.com").execute().unwrap().unwrap();

        let Output::Text(svg) = result else {
            unreachable!()
        };
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("width=\"256\" height=\"256\""));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let mut first = tool("https://example.com");
        first.style = Some(ModuleStyle::Rounded);
        first.frame = Some(FrameStyle::DotsFrame);
        let mut second = tool("https://example.com");
        second.style = Some(ModuleStyle::Rounded);
        second.frame = Some(FrameStyle::DotsFrame);

        let Output::Text(a) = first.execute().unwrap().unwrap() else {
            unreachable!()
        };
        let Output::Text(b) = second.execute().unwrap().unwrap() else {
            unreachable!()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_png_format_produces_png_bytes() {
        let mut png = tool("https://example.com");
        png.format = Some(ExportFormat::Png);
        png.frame = Some(FrameStyle::Box);

        let Output::Bytes(bytes) = png.execute().unwrap().unwrap() else {
            unreachable!()
        };
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (592, 592));
    }

    #[test]
    fn test_custom_colors_reach_the_markup() {
        let mut colored = tool("https://example.com");
        colored.foreground = Some("#112233".parse().unwrap());
        colored.background = Some("white".parse().unwrap());

        let Output::Text(svg) = colored.execute().unwrap().unwrap() else {
            unreachable!()
        };
        assert!(svg.contains("fill=\"#112233\""));
        assert!(svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn test_missing_logo_file_is_an_error() {
        let mut broken = tool("https://example.com");
        broken.logo = Some(PathBuf::from("/definitely/not/here.png"));

        assert!(broken.execute().is_err());
    }
}
