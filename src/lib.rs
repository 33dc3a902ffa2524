#[cfg(target_os = "espidf")]
pub mod board;
pub mod config;
pub mod ws2812;
