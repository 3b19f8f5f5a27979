pub mod generate;
pub mod info;
pub mod payload;
pub mod preview;
