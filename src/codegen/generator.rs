//! Declaration assembly: the accumulator for one generated output file.
//!
//! Each `declare_from_template` call renders a snippet, parses it as a
//! self-contained Rust compilation unit, merges its `use` statements into the
//! import namespace, and appends its remaining top-level items to the
//! cumulative declaration sequence. `write` emits the whole file at once.

use std::io::Write;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::debug;

use super::imports::Importer;
use super::render::{self, FILE_HEADER};
use crate::error::{DeclareError, WriteError};

/// Accumulator for one generated output file.
///
/// Created once per file-generation run, mutated by every
/// [`declare_from_template`](Self::declare_from_template) call, and consumed
/// by [`write`](Self::write). The final output is a pure function of the
/// ordered sequence of declare calls: identical sequences yield byte-identical
/// files. A `Generator` is not meant to be shared between concurrent runs;
/// parallel generation uses one instance per output file.
#[derive(Default)]
pub struct Generator {
    importer: Importer,
    decls: Vec<syn::Item>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a minijinja template that generates Rust code and includes all
    /// declarations from the rendered output in the generated file.
    ///
    /// For example,
    ///
    /// ```rust
    /// # use idlgen::Generator;
    /// let mut generator = Generator::new();
    /// generator.declare_from_template(
    ///     "pub type {{ pascal_case(name) }} = i32;",
    ///     serde_json::json!({ "name": "my_type" }),
    /// )?;
    /// # Ok::<(), idlgen::DeclareError>(())
    /// ```
    ///
    /// will generate
    ///
    /// ```text
    /// pub type MyType = i32;
    /// ```
    ///
    /// `use` statements written literally in the rendered output are merged
    /// into the same import namespace as `import(...)` calls; everything else
    /// is appended, in encountered order, after all previously declared
    /// items. See [`codegen::render`](crate::codegen::render) for the functions
    /// available inside templates.
    ///
    /// On any failure the generator is left exactly as it was before the
    /// call: no declarations are admitted, and imports requested by the
    /// failing render are rolled back.
    #[tracing::instrument(skip_all)]
    pub fn declare_from_template<D: Serialize>(
        &mut self,
        template: &str,
        data: D,
    ) -> Result<(), DeclareError> {
        // Render against a scratch copy of the importer so a failure anywhere
        // below leaves `self` untouched.
        let scratch = Arc::new(Mutex::new(self.importer.clone()));
        let rendered = render::render(template, data, Arc::clone(&scratch))?;

        let file = syn::parse_file(&rendered).map_err(|source| {
            let line = source.span().start().line;
            DeclareError::RenderedSyntax {
                excerpt: excerpt_around(&rendered, line),
                source,
            }
        })?;

        // The render environment and its closures are gone, so the scratch
        // handle is normally unique again; cloning covers the shared case
        // without a panic path.
        let mut importer = match Arc::try_unwrap(scratch) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()),
            Err(shared) => shared
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
        };

        let mut decls = Vec::new();
        let mut merged_imports = 0usize;
        for item in file.items {
            match item {
                syn::Item::Use(item_use) => {
                    let prefix = if item_use.leading_colon.is_some() {
                        "::".to_string()
                    } else {
                        String::new()
                    };
                    merge_use_tree(&mut importer, prefix, &item_use.tree);
                    merged_imports += 1;
                }
                other => decls.push(other),
            }
        }
        debug!(merged_imports, decls = decls.len(), "declared from template");

        self.importer = importer;
        self.decls.extend(decls);
        Ok(())
    }

    /// Assembles the final compilation unit — the consolidated import block,
    /// if any, followed by all accumulated declarations in declare order —
    /// formats it canonically, and writes the complete result to `sink` in
    /// one operation.
    ///
    /// Idempotent for unchanged state: repeated calls write the same bytes.
    /// Declaring after a write is permitted and simply extends the sequence
    /// for a subsequent write. On failure nothing is written.
    #[tracing::instrument(skip_all)]
    pub fn write<W: Write>(&self, mut sink: W) -> Result<(), WriteError> {
        let mut items: Vec<syn::Item> = self
            .importer
            .final_block()?
            .into_iter()
            .map(syn::Item::Use)
            .collect();
        items.extend(self.decls.iter().cloned());

        let file = syn::File {
            shebang: None,
            attrs: Vec::new(),
            items,
        };
        let formatted = prettyplease::unparse(&file);

        let mut out = String::with_capacity(FILE_HEADER.len() + formatted.len());
        out.push_str(FILE_HEADER);
        out.push_str(&formatted);
        sink.write_all(out.as_bytes())?;
        Ok(())
    }

    /// The import resolver for this generator, for inspection.
    pub fn importer(&self) -> &Importer {
        &self.importer
    }

    /// Number of declarations accumulated so far.
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }
}

/// Flatten a `use` tree into (path, alias) leaves and merge each into the
/// importer. Groups recurse, `self` leaves bind their prefix, and globs are
/// carried through verbatim.
fn merge_use_tree(importer: &mut Importer, prefix: String, tree: &syn::UseTree) {
    match tree {
        syn::UseTree::Path(path) => {
            let next = join_path(&prefix, &path.ident.to_string());
            merge_use_tree(importer, next, &path.tree);
        }
        syn::UseTree::Name(name) => {
            // A `self` leaf (`use std::fmt::{self, Debug};`) binds the prefix
            // itself; `path::self` is not a valid standalone import.
            if name.ident == "self" {
                importer.merge_literal(&prefix, None);
            } else {
                let path = join_path(&prefix, &name.ident.to_string());
                importer.merge_literal(&path, None);
            }
        }
        syn::UseTree::Rename(rename) => {
            let rename_to = rename.rename.to_string();
            if rename.ident == "self" {
                importer.merge_literal(&prefix, Some(&rename_to));
            } else {
                let path = join_path(&prefix, &rename.ident.to_string());
                importer.merge_literal(&path, Some(&rename_to));
            }
        }
        syn::UseTree::Glob(_) => {
            importer.merge_glob(&prefix);
        }
        syn::UseTree::Group(group) => {
            for item in &group.items {
                merge_use_tree(importer, prefix.clone(), item);
            }
        }
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else if prefix == "::" {
        format!("::{segment}")
    } else {
        format!("{prefix}::{segment}")
    }
}

/// A few numbered lines of rendered output around `line`, for the
/// rendered-syntax diagnostic.
fn excerpt_around(rendered: &str, line: usize) -> String {
    const CONTEXT: usize = 2;
    // Fallback spans report line 0; clamp so the window still shows output.
    let first = line.saturating_sub(CONTEXT).max(1);
    let last = first + 2 * CONTEXT;
    rendered
        .lines()
        .enumerate()
        .map(|(idx, text)| (idx + 1, text))
        .filter(|(n, _)| *n >= first && *n <= last)
        .map(|(n, text)| format!("{n:>4} | {text}"))
        .collect::<Vec<_>>()
        .join("\n")
}
