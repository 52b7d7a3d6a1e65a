//! Type descriptors supplied by the IDL front end.
//!
//! The generator treats these as opaque: it only resolves names and
//! references through the helpers in [`codegen::names`](crate::codegen::names).
//! Both types derive serde so they can travel inside template data contexts.

use serde::{Deserialize, Serialize};

/// Descriptor of an IDL data type: primitive, user-declared, or container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeSpec {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    /// A user-declared type, referenced by its IDL name.
    Named { name: std::string::String },
    List { elem: Box<TypeSpec> },
    Set { elem: Box<TypeSpec> },
    Map { key: Box<TypeSpec>, value: Box<TypeSpec> },
}

/// Whether a field or parameter must always carry a value.
///
/// Governs whether its generated reference is wrapped in the indirect
/// (`Option`) form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requiredness {
    Required,
    Optional,
}

impl From<bool> for Requiredness {
    fn from(required: bool) -> Self {
        if required {
            Requiredness::Required
        } else {
            Requiredness::Optional
        }
    }
}
