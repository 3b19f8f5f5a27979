use crate::args::StringInput;
use crate::qr::customization::{Customization, CustomizationUpdate, EcLevel, FrameStyle, ModuleStyle};
use crate::qr::{encoder, frame, restyle};
use crate::tool::{Output, Tool};
use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(
    name = "info",
    about = "Report symbol and canvas metrics for a payload without exporting it"
)]
pub struct InfoTool {
    /// The text or URL to encode as QR code
    payload: StringInput,

    /// Module shape
    #[arg(short, long)]
    style: Option<ModuleStyle>,

    /// Decorative frame around the code
    #[arg(long)]
    frame: Option<FrameStyle>,

    /// Error correction level
    #[arg(long = "ec-level")]
    ec_level: Option<EcLevel>,
}

impl Tool for InfoTool {
    fn cli() -> Command {
        InfoTool::command()
    }

    fn execute(&self) -> Result<Option<Output>> {
        let customization = Customization::default().merged(CustomizationUpdate {
            module_style: self.style,
            frame_style: self.frame,
            ec_level: self.ec_level,
            ..Default::default()
        });

        let base = encoder::encode(self.payload.as_ref(), &customization)
            .context("Could not encode payload as a QR symbol")?;
        let layer = restyle::module_layer(&base, customization.module_style);
        let document = frame::compose(&base, layer, &customization);

        Ok(Some(Output::JsonValue(json!({
            "payload": self.payload.as_ref(),
            "qr_version": base.version,
            "module_count": base.module_count,
            "canvas_width": document.width,
            "canvas_height": document.height,
            "customization": customization,
        }))))
    }
}
