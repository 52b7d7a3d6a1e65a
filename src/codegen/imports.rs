//! Import namespace for generated code.
//!
//! Every external module a generated file references goes through one
//! [`Importer`], which assigns collision-free local aliases and emits the
//! consolidated `use` block. The table is local to its owning generator and
//! lives for exactly one file-generation run.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::WriteError;

/// Where an import binding came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportOrigin {
    /// Requested through the `import` template function.
    Programmatic,
    /// Written as a literal `use` statement inside a rendered snippet.
    Literal,
}

/// One imported module path and the local alias it resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportBinding {
    pub path: String,
    pub alias: String,
    pub origin: ImportOrigin,
}

/// Alias table for one generated file.
///
/// Each distinct path maps to exactly one alias for the lifetime of a run,
/// and no two paths share an alias. Collisions are resolved by appending an
/// increasing numeric suffix in request order; registration never fails.
#[derive(Clone, Debug, Default)]
pub struct Importer {
    /// path → binding, ordered so the final block is deterministic
    bindings: BTreeMap<String, ImportBinding>,
    /// alias → path, for collision checks
    claimed: HashMap<String, String>,
    /// glob imports (`use path::*;`) carried through from rendered snippets
    globs: BTreeSet<String>,
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register intent to reference the module `path` and return the alias
    /// generated code should use for it. Idempotent: repeated requests for
    /// the same path return the same alias.
    ///
    /// The default alias is the last `::` segment of the path; if a different
    /// path already claimed it, suffixes `2, 3, …` are tried in order.
    pub fn request(&mut self, path: &str) -> String {
        if let Some(binding) = self.bindings.get(path) {
            return binding.alias.clone();
        }
        let alias = self.claim(last_segment(path));
        self.insert(path, alias.clone(), ImportOrigin::Programmatic);
        alias
    }

    /// Absorb an import written literally inside a rendered snippet into the
    /// same namespace. The first binding for a path wins; a colliding
    /// explicit alias is suffix-disambiguated rather than rejected.
    ///
    /// When disambiguation renames a literal alias, references to the old
    /// name inside the snippet are not rewritten; templates that need a
    /// stable name should use the `import` function instead.
    pub fn merge_literal(&mut self, path: &str, requested_alias: Option<&str>) -> String {
        if let Some(binding) = self.bindings.get(path) {
            return binding.alias.clone();
        }
        let preferred = requested_alias.unwrap_or_else(|| last_segment(path));
        let alias = self.claim(preferred);
        self.insert(path, alias.clone(), ImportOrigin::Literal);
        alias
    }

    /// Carry a glob import (`use path::*;`) through verbatim. Globs bind no
    /// alias and so never participate in collision resolution.
    pub fn merge_glob(&mut self, path: &str) {
        self.globs.insert(path.to_string());
    }

    /// Whether anything has been registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty() && self.globs.is_empty()
    }

    /// The binding for `path`, if one was registered.
    pub fn binding(&self, path: &str) -> Option<&ImportBinding> {
        self.bindings.get(path)
    }

    /// The consolidated import block: one `use` item per binding plus any
    /// glob imports, sorted by path so repeated runs over identical inputs
    /// are byte-identical. Empty if nothing was ever registered.
    pub fn final_block(&self) -> Result<Vec<syn::ItemUse>, WriteError> {
        let mut entries: Vec<(String, String)> =
            Vec::with_capacity(self.bindings.len() + self.globs.len());
        for (path, binding) in &self.bindings {
            let stmt = if binding.alias == last_segment(path) {
                format!("use {path};")
            } else {
                format!("use {path} as {};", binding.alias)
            };
            entries.push((path.clone(), stmt));
        }
        for path in &self.globs {
            entries.push((path.clone(), format!("use {path}::*;")));
        }
        entries.sort();
        entries
            .into_iter()
            .map(|(_, stmt)| syn::parse_str(&stmt).map_err(WriteError::Format))
            .collect()
    }

    /// Find a free alias, starting from `preferred`.
    fn claim(&self, preferred: &str) -> String {
        if !self.claimed.contains_key(preferred) {
            return preferred.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{preferred}{n}");
            if !self.claimed.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn insert(&mut self, path: &str, alias: String, origin: ImportOrigin) {
        self.claimed.insert(alias.clone(), path.to_string());
        self.bindings.insert(
            path.to_string(),
            ImportBinding {
                path: path.to_string(),
                alias,
                origin,
            },
        );
    }
}

/// Last `::` segment of a module path; the default alias.
fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
