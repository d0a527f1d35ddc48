//! Image preparation stages.
//!
//! - **discovery**: Find image files in the paths a user supplied
//! - **validate**: Size and magic-byte checks before decoding
//! - **encode**: Decode-check and base64 the original bytes

pub mod discovery;
pub mod encode;
pub mod validate;

// Re-exports for convenient access
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use encode::{EncodedImage, ImageEncoder};
pub use validate::Validator;
