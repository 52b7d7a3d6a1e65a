//! Error types for the code-generation pipeline.
//!
//! All of these are developer-facing build-time diagnostics. They separate
//! faults in the template text, faults while executing it against data,
//! faults in the *generated* text, and faults assembling the final file.

use thiserror::Error;

/// Error from [`Generator::declare_from_template`](crate::Generator::declare_from_template).
///
/// A failed declare leaves the generator exactly as it was before the call:
/// no declarations are admitted and no imports registered by the failing
/// render are kept.
#[derive(Debug, Error)]
pub enum DeclareError {
    /// The template text itself is malformed; detected before any execution.
    #[error("template syntax error: {0}")]
    TemplateSyntax(#[source] minijinja::Error),

    /// The data or a function call did not line up with the template at
    /// render time: a referenced field is absent on the data, or a template
    /// function was called with the wrong arity or argument type. The
    /// underlying error carries the template source location.
    #[error("template execution error: {0}")]
    TemplateExecution(#[source] minijinja::Error),

    /// The rendered output is not a valid Rust compilation unit. The fault is
    /// in the generated text, not in the template syntax, which makes this a
    /// template-authoring bug; the excerpt shows the offending output.
    #[error("rendered snippet is not valid Rust: {source}\n{excerpt}")]
    RenderedSyntax {
        source: syn::Error,
        excerpt: String,
    },
}

/// Error from [`Generator::write`](crate::Generator::write).
///
/// On failure nothing is written to the sink.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The consolidated import block could not be assembled into valid Rust
    /// (a registered path or alias that does not parse as a `use` item).
    #[error("failed to format import block: {0}")]
    Format(#[source] syn::Error),

    /// The sink rejected the write.
    #[error("failed to write generated file: {0}")]
    Io(#[from] std::io::Error),
}
