// Represents a tool under qrstyler.
pub trait Tool {
    // The contribution of this tool to the qrstyler CLI. The clap::Command
    // returned here will be set up as a subcommand on the qrstyler binary.
    fn cli() -> clap::Command;

    // Run the tool. All the context that the tool requires should be
    // using the cli above.
    fn execute(&self) -> anyhow::Result<Option<Output>>;
}

#[derive(Debug)]
pub enum Output {
    Bytes(Vec<u8>),
    Text(String),
    JsonValue(serde_json::Value),
}
