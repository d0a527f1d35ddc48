//! Alt text provider integrations.
//!
//! Two structurally different HTTP integrations (AltText.ai's images API and
//! OpenAI's text completions) behind one [`AltTextProvider`] trait.

pub(crate) mod alttext_ai;
pub(crate) mod openai;
pub(crate) mod provider;

pub use alttext_ai::{NO_ALT_TEXT, NO_ERROR_DETAILS, UNKNOWN_ERROR_CODE};
pub use provider::{AltTextProvider, GenerationRequest, ProviderFactory};
