//! Casing and type-reference helpers exposed to templates.
//!
//! All functions here are pure. Container references use fully qualified
//! `::std::collections` paths so reference formatting never has to touch the
//! import namespace.

use crate::typespec::{Requiredness, TypeSpec};

/// Normalize an identifier-like string in ALLCAPS, snake_case, or camelCase
/// form to PascalCase. Idempotent: applying it twice gives the same result.
pub fn pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split(|c: char| c == '_' || c == '-' || c.is_whitespace()) {
        if word.is_empty() {
            continue;
        }
        // Words with any lowercase are treated as camelCase and keep their
        // interior casing; ALLCAPS words are folded to a single capital.
        let keep_tail = word.chars().any(|c| c.is_lowercase());
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for c in chars {
                if keep_tail {
                    out.push(c);
                } else {
                    out.extend(c.to_lowercase());
                }
            }
        }
    }
    out
}

/// Canonical identifier used when *defining* a user-declared type, as opposed
/// to referencing it. `None` for primitives and containers, which have no
/// definition site in generated code.
pub fn type_decl_name(spec: &TypeSpec) -> Option<String> {
    match spec {
        TypeSpec::Named { name } => Some(pascal_case(name)),
        _ => None,
    }
}

/// Textual Rust reference to `spec` as a field or parameter value.
///
/// `Optional` wraps the direct form in `Option`; `Required` is the direct
/// form itself. The two differ only by that wrapping.
pub fn type_reference(spec: &TypeSpec, requiredness: Requiredness) -> String {
    let direct = direct_reference(spec);
    match requiredness {
        Requiredness::Required => direct,
        Requiredness::Optional => format!("Option<{direct}>"),
    }
}

fn direct_reference(spec: &TypeSpec) -> String {
    match spec {
        TypeSpec::Bool => "bool".to_string(),
        TypeSpec::I8 => "i8".to_string(),
        TypeSpec::I16 => "i16".to_string(),
        TypeSpec::I32 => "i32".to_string(),
        TypeSpec::I64 => "i64".to_string(),
        TypeSpec::Double => "f64".to_string(),
        TypeSpec::String => "String".to_string(),
        TypeSpec::Binary => "Vec<u8>".to_string(),
        TypeSpec::Named { name } => pascal_case(name),
        TypeSpec::List { elem } => format!("Vec<{}>", direct_reference(elem)),
        TypeSpec::Set { elem } => {
            format!("::std::collections::HashSet<{}>", direct_reference(elem))
        }
        TypeSpec::Map { key, value } => format!(
            "::std::collections::HashMap<{}, {}>",
            direct_reference(key),
            direct_reference(value)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_converges_across_conventions() {
        assert_eq!(pascal_case("MY_FIELD"), "MyField");
        assert_eq!(pascal_case("my_field"), "MyField");
        assert_eq!(pascal_case("myField"), "MyField");
        assert_eq!(pascal_case("MyField"), "MyField");
    }

    #[test]
    fn pascal_case_edge_cases() {
        assert_eq!(pascal_case(""), "");
        assert_eq!(pascal_case("_"), "");
        assert_eq!(pascal_case("a"), "A");
        assert_eq!(pascal_case("HTTP_STATUS_CODE"), "HttpStatusCode");
        assert_eq!(pascal_case("__leading__junk__"), "LeadingJunk");
    }

    #[test]
    fn decl_name_only_for_named_types() {
        let named = TypeSpec::Named {
            name: "user_record".to_string(),
        };
        assert_eq!(type_decl_name(&named).as_deref(), Some("UserRecord"));
        assert_eq!(type_decl_name(&TypeSpec::I32), None);
        assert_eq!(
            type_decl_name(&TypeSpec::List {
                elem: Box::new(named)
            }),
            None
        );
    }

    #[test]
    fn optional_differs_from_required_only_by_wrapping() {
        let spec = TypeSpec::Named {
            name: "point".to_string(),
        };
        let required = type_reference(&spec, Requiredness::Required);
        let optional = type_reference(&spec, Requiredness::Optional);
        assert_eq!(required, "Point");
        assert_eq!(optional, format!("Option<{required}>"));
    }

    #[test]
    fn container_references() {
        let list = TypeSpec::List {
            elem: Box::new(TypeSpec::String),
        };
        assert_eq!(type_reference(&list, Requiredness::Required), "Vec<String>");

        let map = TypeSpec::Map {
            key: Box::new(TypeSpec::String),
            value: Box::new(TypeSpec::List {
                elem: Box::new(TypeSpec::I64),
            }),
        };
        assert_eq!(
            type_reference(&map, Requiredness::Optional),
            "Option<::std::collections::HashMap<String, Vec<i64>>>"
        );
    }

    #[test]
    fn binary_is_byte_vector() {
        assert_eq!(
            type_reference(&TypeSpec::Binary, Requiredness::Required),
            "Vec<u8>"
        );
    }
}
