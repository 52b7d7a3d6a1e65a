//! End-to-end tests for the code-generation engine
//!
//! These drive a `Generator` the way an IDL compiler driver would: many
//! template snippets declared in sequence, one formatted file written at the
//! end.

use idlgen::{Generator, Requiredness, TypeSpec};
use serde::Serialize;

fn write_to_string(generator: &Generator) -> String {
    let mut out = Vec::new();
    generator.write(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[derive(Serialize)]
struct StructCtx {
    spec: TypeSpec,
    fields: Vec<FieldCtx>,
}

#[derive(Serialize)]
struct FieldCtx {
    name: String,
    ty: TypeSpec,
    required: bool,
}

const STRUCT_TEMPLATE: &str = "\
pub struct {{ def_name(spec) }} {
{%- for field in fields %}
    pub {{ field.name }}: {{ type_ref(field.ty, required(field.required)) }},
{%- endfor %}
}";

#[test]
fn generates_a_struct_from_a_typespec_model() {
    let ctx = StructCtx {
        spec: TypeSpec::Named {
            name: "user_record".to_string(),
        },
        fields: vec![
            FieldCtx {
                name: "id".to_string(),
                ty: TypeSpec::I64,
                required: true,
            },
            FieldCtx {
                name: "nickname".to_string(),
                ty: TypeSpec::String,
                required: false,
            },
            FieldCtx {
                name: "tags".to_string(),
                ty: TypeSpec::List {
                    elem: Box::new(TypeSpec::String),
                },
                required: true,
            },
        ],
    };

    let mut generator = Generator::new();
    generator.declare_from_template(STRUCT_TEMPLATE, &ctx).unwrap();
    let out = write_to_string(&generator);

    assert!(out.contains("pub struct UserRecord {"));
    assert!(out.contains("pub id: i64,"));
    assert!(out.contains("pub nickname: Option<String>,"));
    assert!(out.contains("pub tags: Vec<String>,"));
}

#[test]
fn full_run_is_deterministic() {
    let build = || {
        let mut generator = Generator::new();
        generator
            .declare_from_template(
                "{% set util = import(\"b::util\") %}pub fn late() -> {{ util }}::Widget {\n    todo!()\n}",
                serde_json::json!({}),
            )
            .unwrap();
        generator
            .declare_from_template(
                "{% set util = import(\"a::util\") %}use std::fmt;\npub fn early() -> {{ util }}::Widget {\n    todo!()\n}",
                serde_json::json!({}),
            )
            .unwrap();
        generator
            .declare_from_template(
                "pub type {{ pascal_case(name) }} = i64;",
                serde_json::json!({ "name": "user_id" }),
            )
            .unwrap();
        write_to_string(&generator)
    };

    let first = build();
    let second = build();
    assert_eq!(first, second);

    // The import block is sorted by path regardless of request order.
    let a = first.find("use a::util as util2;").unwrap();
    let b = first.find("use b::util;").unwrap();
    let fmt = first.find("use std::fmt;").unwrap();
    assert!(a < b && b < fmt);
}

#[test]
fn declarations_across_snippets_precede_in_call_order() {
    let mut generator = Generator::new();
    for n in 0..10 {
        generator
            .declare_from_template(
                "pub const ORD_{{ n }}: usize = {{ n }};",
                serde_json::json!({ "n": n }),
            )
            .unwrap();
    }
    let out = write_to_string(&generator);
    let positions: Vec<usize> = (0..10)
        .map(|n| out.find(&format!("ORD_{n}:")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn output_parses_as_a_rust_file() {
    let ctx = StructCtx {
        spec: TypeSpec::Named {
            name: "point".to_string(),
        },
        fields: vec![FieldCtx {
            name: "x".to_string(),
            ty: TypeSpec::Double,
            required: true,
        }],
    };

    let mut generator = Generator::new();
    generator
        .declare_from_template(
            "{% set fmt = import(\"std::fmt\") %}pub struct Marker; // display via {{ fmt }}",
            serde_json::json!({}),
        )
        .unwrap();
    generator.declare_from_template(STRUCT_TEMPLATE, &ctx).unwrap();

    let out = write_to_string(&generator);
    syn::parse_file(&out).expect("generated file must be valid Rust");
}

#[test]
fn mixed_literal_and_programmatic_imports_share_one_namespace() {
    let mut generator = Generator::new();
    // Programmatic request claims the default alias first.
    generator
        .declare_from_template(
            "{% set codec = import(\"wire::codec\") %}pub fn encode() -> {{ codec }}::Frame {\n    todo!()\n}",
            serde_json::json!({}),
        )
        .unwrap();
    // A literal import of a different path asking for the same alias gets
    // disambiguated instead of erroring.
    generator
        .declare_from_template(
            "use legacy::framing as codec;\npub struct Bridge;",
            serde_json::json!({}),
        )
        .unwrap();

    let out = write_to_string(&generator);
    assert!(out.contains("use wire::codec;"));
    assert!(out.contains("use legacy::framing as codec2;"));
}
