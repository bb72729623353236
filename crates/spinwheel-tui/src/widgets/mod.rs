pub mod spinner;
pub mod wheel;
