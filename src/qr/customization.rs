use clap::ValueEnum;
use serde::Serialize;

/// Visual customization of a generated QR code. The record is always fully
/// populated; edits arrive as a [`CustomizationUpdate`] merged over a
/// complete record, so no field is ever left unset.
#[derive(Debug, Clone, Serialize)]
pub struct Customization {
    pub foreground: String,
    pub background: String,
    pub module_style: ModuleStyle,
    pub frame_style: FrameStyle,
    /// Embedded logo as a `data:` URI, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub ec_level: EcLevel,
}

impl Default for Customization {
    fn default() -> Self {
        Customization {
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            module_style: ModuleStyle::Squares,
            frame_style: FrameStyle::None,
            logo: None,
            ec_level: EcLevel::M,
        }
    }
}

/// A partial edit of a [`Customization`].
#[derive(Debug, Clone, Default)]
pub struct CustomizationUpdate {
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub module_style: Option<ModuleStyle>,
    pub frame_style: Option<FrameStyle>,
    pub logo: Option<String>,
    pub ec_level: Option<EcLevel>,
}

impl Customization {
    /// Merges a partial update over this record, producing a new complete
    /// record. Fields absent from the update keep their previous values.
    pub fn merged(&self, update: CustomizationUpdate) -> Customization {
        Customization {
            foreground: update.foreground.unwrap_or_else(|| self.foreground.clone()),
            background: update.background.unwrap_or_else(|| self.background.clone()),
            module_style: update.module_style.unwrap_or(self.module_style),
            frame_style: update.frame_style.unwrap_or(self.frame_style),
            logo: update.logo.or_else(|| self.logo.clone()),
            ec_level: update.ec_level.unwrap_or(self.ec_level),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStyle {
    Squares,
    Rounded,
    Dots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameStyle {
    None,
    Box,
    Corners,
    ScanMeBubble,
    DotsFrame,
}

/// QR error correction level, passed through to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EcLevel {
    L,
    M,
    Q,
    H,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}
