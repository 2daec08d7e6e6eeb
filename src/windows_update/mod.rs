pub mod client;
pub mod powershell;
mod scripts;

pub use client::WindowsUpdateClient;
