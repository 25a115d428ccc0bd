//! Natural-language rendering of decoded calls.
//!
//! A registry maps canonical function signatures to word/placeholder
//! templates; calldata whose selector matches a registered signature is
//! ABI-decoded and rendered into a sentence like
//! `Send 21 TST to 0x7a9a...86E2`. Rendering is strictly best-effort: any
//! failure yields "no description", never an error.

pub mod amount;
pub mod engine;
pub mod registry;
pub mod template;

pub use engine::HumanDescriptionEngine;
pub use registry::{TemplateEntry, TemplateRegistry};
pub use template::{DescriptionError, Fragment, Template};
