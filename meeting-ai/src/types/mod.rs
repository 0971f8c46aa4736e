pub mod analysis;
pub mod transcript;
