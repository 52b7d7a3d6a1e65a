//! The code-generation engine.
//!
//! - [`imports`]: the alias namespace for external module references
//! - [`names`]: casing and type-reference helpers exposed to templates
//! - [`render`]: executes one template against one data context
//! - [`generator`]: accumulates parsed declarations and writes the file

pub mod generator;
pub mod imports;
pub mod names;
pub mod render;

pub use generator::Generator;
pub use imports::Importer;
