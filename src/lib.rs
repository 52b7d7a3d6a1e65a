#![forbid(unsafe_code)]
//! Code-generation back end for an IDL compiler.
//!
//! Given declarative type descriptions rendered through templates, this crate
//! assembles one well-formed, deterministic Rust source file:
//!
//! ```text
//! template + data → minijinja render → syn::parse_file → imports / decls
//!                 → Generator accumulates → prettyplease → formatted file
//! ```
//!
//! The entry point is [`Generator`]: call
//! [`declare_from_template`](Generator::declare_from_template) once per
//! snippet, then [`write`](Generator::write) to emit the whole file. Imported
//! module paths are tracked by an [`Importer`] that assigns collision-free
//! local aliases across all snippets of a run.
//!
//! ## Panic Policy
//!
//! Production code returns `Result` and propagates with `?`; `.unwrap()` and
//! `.expect()` are acceptable in tests only. Import alias collisions are never
//! an error: the resolver always disambiguates deterministically.

pub mod codegen;
pub mod error;
pub mod typespec;

pub use error::{DeclareError, WriteError};
pub use codegen::Generator;
pub use codegen::imports::{ImportBinding, ImportOrigin, Importer};
pub use typespec::{Requiredness, TypeSpec};
