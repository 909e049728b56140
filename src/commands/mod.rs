pub mod clipboard;
pub mod settings;
pub mod transform;
