use crate::args::StringInput;
use crate::tool::{Output, Tool};
use clap::{Command, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "payload",
    about = "Build QR payload strings for common content types"
)]
pub struct PayloadTool {
    #[command(subcommand)]
    command: PayloadCommand,
}

#[derive(Subcommand, Debug)]
enum PayloadCommand {
    /// Wi-Fi network credentials
    Wifi {
        /// Network name
        ssid: String,
        /// Network password (omit for open networks)
        password: Option<String>,
        /// Security protocol
        #[arg(long, default_value = "wpa")]
        security: WifiSecurity,
    },
    /// An email draft
    Email {
        /// Recipient address
        to: String,
        /// Subject line
        #[arg(long)]
        subject: Option<String>,
        /// Message body
        #[arg(long)]
        body: Option<StringInput>,
    },
    /// A prefilled text message
    Sms {
        /// Phone number
        number: String,
        /// Message text
        message: Option<StringInput>,
    },
    /// A phone number to dial
    Tel {
        /// Phone number
        number: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
enum WifiSecurity {
    Wpa,
    Wep,
    Nopass,
}

impl WifiSecurity {
    fn token(self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::Nopass => "nopass",
        }
    }
}

impl Tool for PayloadTool {
    fn cli() -> Command {
        PayloadTool::command()
    }

    fn execute(&self) -> anyhow::Result<Option<Output>> {
        let payload = match &self.command {
            PayloadCommand::Wifi {
                ssid,
                password,
                security,
            } => format!(
                "WIFI:T:{};S:{};P:{};;",
                security.token(),
                escape_wifi(ssid),
                escape_wifi(password.as_deref().unwrap_or(""))
            ),
            PayloadCommand::Email { to, subject, body } => {
                let mut query = Vec::new();
                if let Some(subject) = subject {
                    query.push(format!("subject={}", urlencoding::encode(subject)));
                }
                if let Some(body) = body {
                    query.push(format!("body={}", urlencoding::encode(body.as_ref())));
                }
                if query.is_empty() {
                    format!("mailto:{}", to)
                } else {
                    format!("mailto:{}?{}", to, query.join("&"))
                }
            }
            PayloadCommand::Sms { number, message } => match message {
                Some(message) => format!("smsto:{}:{}", number, message),
                None => format!("smsto:{}", number),
            },
            PayloadCommand::Tel { number } => format!("tel:{}", number),
        };

        Ok(Some(Output::Text(payload)))
    }
}

// The Wi-Fi grammar gives \ ; , : " a structural meaning.
fn escape_wifi(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
