//! Snippet rendering: one template executed against one data context.
//!
//! Templates are minijinja text. Undefined behavior is strict, so a template
//! referencing a field absent on its data fails the render instead of
//! silently emitting nothing. The function library registered here is the
//! complete configuration surface templates see; `import` is the only
//! side-effecting function in it.

use std::sync::{Arc, Mutex};

use minijinja::value::{Value, ViaDeserialize};
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

use super::imports::Importer;
use super::names;
use crate::error::DeclareError;
use crate::typespec::{Requiredness, TypeSpec};

/// Header injected at the top of every rendered unit and of the final file.
pub const FILE_HEADER: &str = "// Code generated by idlgen. DO NOT EDIT.\n\n";

/// Render `template` against `data` with the template function library bound
/// to `importer`.
///
/// Import requests made by the template mutate `importer` as they execute;
/// callers that need rollback on failure pass a scratch copy and commit it
/// themselves.
pub fn render<D: Serialize>(
    template: &str,
    data: D,
    importer: Arc<Mutex<Importer>>,
) -> Result<String, DeclareError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    register_functions(&mut env, importer);

    let tmpl = env
        .template_from_str(template)
        .map_err(DeclareError::TemplateSyntax)?;
    let body = tmpl.render(data).map_err(DeclareError::TemplateExecution)?;

    let mut out = String::with_capacity(FILE_HEADER.len() + body.len() + 1);
    out.push_str(FILE_HEADER);
    out.push_str(&body);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// The functions available inside template text:
///
/// - `pascal_case(s)`: normalize an ALLCAPS / snake_case / camelCase string
///   to PascalCase.
/// - `import(path)`: register `path` with the import resolver and return the
///   alias to reference it by, avoiding manual alias bookkeeping:
///   `{% set fmt = import("std::fmt") %}impl {{ fmt }}::Display for …`
/// - `def_name(spec)`: the identifier used to *define* a user-declared type.
/// - `type_ref(spec, requiredness)`: a reference to `spec` as a value;
///   wrapped in `Option` when the requiredness is optional.
/// - `Required()` / `Optional()` / `required(bool)`: requiredness values,
///   so templates never spell the enum in host syntax.
fn register_functions(env: &mut Environment<'_>, importer: Arc<Mutex<Importer>>) {
    env.add_function("pascal_case", |s: String| names::pascal_case(&s));

    env.add_function("import", move |path: String| -> Result<String, minijinja::Error> {
        let mut importer = importer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(importer.request(&path))
    });

    env.add_function(
        "def_name",
        |spec: ViaDeserialize<TypeSpec>| -> Result<String, minijinja::Error> {
            names::type_decl_name(&spec).ok_or_else(|| {
                minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    "def_name expects a user-declared (named) type",
                )
            })
        },
    );

    env.add_function(
        "type_ref",
        |spec: ViaDeserialize<TypeSpec>, requiredness: ViaDeserialize<Requiredness>| {
            names::type_reference(&spec, *requiredness)
        },
    );

    env.add_function("Required", || Value::from_serialize(Requiredness::Required));
    env.add_function("Optional", || Value::from_serialize(Requiredness::Optional));
    env.add_function("required", |required: bool| {
        Value::from_serialize(Requiredness::from(required))
    });
}
