use crate::args::StringInput;
use crate::qr::customization::EcLevel;
use crate::tool::{Output, Tool};
use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser};
use qrcode::QrCode;

#[derive(Parser, Debug)]
#[command(name = "preview", about = "Render a QR code in the terminal")]
pub struct PreviewTool {
    /// The text or URL to encode as QR code
    payload: StringInput,

    /// Error correction level
    #[arg(long = "ec-level", default_value = "m")]
    ec_level: EcLevel,
}

impl Tool for PreviewTool {
    fn cli() -> Command {
        PreviewTool::command()
    }

    fn execute(&self) -> Result<Option<Output>> {
        let code = QrCode::with_error_correction_level(self.payload.as_ref(), self.ec_level.into())
            .context("Could not encode payload as a QR symbol")?;

        let string = code
            .render::<char>()
            .quiet_zone(false)
            .module_dimensions(2, 1)
            .build();

        Ok(Some(Output::Text(string)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_renders_text() {
        let tool = PreviewTool {
            payload: StringInput("https://example.com".to_string()),
            ec_level: EcLevel::M,
        };
        let result = tool.execute().unwrap().unwrap();

        let Output::Text(text) = result else {
            unreachable!()
        };
        assert!(text.lines().count() > 10);
    }
}
