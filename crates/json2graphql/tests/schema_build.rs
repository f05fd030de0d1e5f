//! End-to-end schema building and execution tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_graphql::{Request, Value};
use json2graphql::{
    FieldFuture, ResolverFn, SchemaBuilder, SchemaError, SchemaOptions, resolver,
};
use serde_json::json;

/// Shared key/value store handed to resolvers through request data.
type Store = Arc<Mutex<HashMap<String, String>>>;

fn string_arg(ctx: &json2graphql::ResolverContext<'_>, name: &str) -> String {
    ctx.args
        .get(name)
        .and_then(|v| v.string().ok().map(str::to_string))
        .unwrap_or_default()
}

fn get_value() -> ResolverFn {
    resolver(|ctx| {
        FieldFuture::new(async move {
            let name = string_arg(&ctx, "name");
            let store = ctx.data::<Store>()?;
            let value = store.lock().unwrap().get(&name).cloned().unwrap_or_default();
            Ok(Some(Value::from(value)))
        })
    })
}

fn put_value() -> ResolverFn {
    resolver(|ctx| {
        FieldFuture::new(async move {
            let name = string_arg(&ctx, "name");
            let value = string_arg(&ctx, "value");
            let store = ctx.data::<Store>()?;
            store.lock().unwrap().insert(name, value.clone());
            Ok(Some(Value::from(value)))
        })
    })
}

fn noop() -> ResolverFn {
    resolver(|_ctx| FieldFuture::new(async { Ok(None::<Value>) }))
}

#[tokio::test]
async fn put_then_get_round_trip() {
    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("getValue", get_value());
    builder.bind_resolver("putValue", put_value());
    builder.query_field(
        "get",
        r#"{
            "args": { "name": { "type": "String" } },
            "type": "String",
            "resolve": "getValue"
        }"#,
    );
    builder.mutation_field(
        "put",
        r#"{
            "args": {
                "name": { "type": "String!" },
                "value": { "type": "String" }
            },
            "type": "String",
            "resolve": "putValue"
        }"#,
    );

    let schema = builder.finish().expect("schema should build");
    let store: Store = Arc::new(Mutex::new(HashMap::new()));

    let put = Request::new(r#"mutation { put(name: "answer", value: "42") }"#)
        .data(store.clone());
    let response = schema.execute(put).await;
    assert!(response.errors.is_empty(), "put failed: {:?}", response.errors);
    assert_eq!(response.data.into_json().unwrap(), json!({ "put": "42" }));

    let get = Request::new(r#"{ get(name: "answer") }"#).data(store.clone());
    let response = schema.execute(get).await;
    assert!(response.errors.is_empty(), "get failed: {:?}", response.errors);
    assert_eq!(response.data.into_json().unwrap(), json!({ "get": "42" }));
}

#[test]
fn query_only_schema_has_no_mutation_root() {
    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("getValue", noop());
    builder.query_field("get", r#"{ "type": "String", "resolve": "getValue" }"#);

    let schema = builder.finish().expect("schema should build");
    let sdl = schema.sdl();
    assert!(sdl.contains("type Query"));
    assert!(sdl.contains("get: String"));
    assert!(!sdl.contains("type Mutation"));
}

#[test]
fn recursive_type_chain_fails_with_trace() {
    let mut builder = SchemaBuilder::new();
    builder.query_field("top", r#"{ "type": "[middle!]" }"#);
    builder.field("middle", "one", r#"{ "type": "[bottom]" }"#);
    builder.field("bottom", "one", r#"{ "type": "[deep!]!" }"#);
    builder.field("deep", "one", r#"{ "type": "[middle]!" }"#);

    let err = builder.finish().err().expect("recursion not found");
    assert_eq!(err.error_code(), "RECURSION_DETECTED");
    match err.root_cause() {
        SchemaError::RecursionDetected(chain) => {
            assert_eq!(chain, "middle, bottom, deep, middle");
        }
        other => panic!("expected recursion, got {other}"),
    }
    // The outermost context identifies the failing root.
    assert!(err.to_string().starts_with("bad query:"));
}

#[test]
fn diamond_reference_shares_one_node() {
    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("r", noop());
    builder.query_field("a", r#"{ "type": "A", "resolve": "r" }"#);
    builder.query_field("b", r#"{ "type": "B", "resolve": "r" }"#);
    builder.field("A", "c", r#"{ "type": "C", "resolve": "r" }"#);
    builder.field("B", "c", r#"{ "type": "C", "resolve": "r" }"#);
    builder.field("C", "leaf", r#"{ "type": "String", "resolve": "r" }"#);

    let schema = builder.finish().expect("diamond should resolve");
    let sdl = schema.sdl();
    assert_eq!(sdl.matches("type C {").count(), 1);
    assert_eq!(sdl.matches("c: C").count(), 2);
}

#[test]
fn conflicts_are_reported_together() {
    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("getValue", noop());
    builder.bind_resolver("getValue", noop());
    builder.field("Thing", "name", r#"{ "type": "String", "resolve": "getValue" }"#);
    builder.field("Thing", "name", r#"{ "type": "Int", "resolve": "getValue" }"#);
    builder.query_field("get", r#"{ "type": "String", "resolve": "getValue" }"#);

    let err = builder.finish().err().expect("conflicts should fail finish");
    assert_eq!(err.error_code(), "INVALID_SCHEMA");
    let msg = err.to_string();
    assert!(msg.contains("resolver name \"getValue\" already bound"));
    assert!(msg.contains("field \"name\" already declared on type \"Thing\""));
}

#[test]
fn unreferenced_declarations_are_inert() {
    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("r", noop());
    builder.query_field("get", r#"{ "type": "String", "resolve": "r" }"#);
    // Never reached from a root; its broken reference is never resolved.
    builder.field("Orphan", "broken", r#"{ "type": "Ghost", "resolve": "r" }"#);

    let schema = builder.finish().expect("unreferenced types are inert");
    assert!(!schema.sdl().contains("Orphan"));
}

#[test]
fn unknown_type_error_names_the_path() {
    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("r", noop());
    builder.query_field("get", r#"{ "type": "Ghost", "resolve": "r" }"#);

    let err = builder.finish().err().expect("unknown type should fail");
    assert_eq!(err.error_code(), "UNKNOWN_OBJECT_TYPE");
    let msg = err.to_string();
    assert!(msg.starts_with("bad query:"), "unexpected message: {msg}");
    assert!(msg.contains("bad field get"));
    assert!(msg.contains("unknown object type \"Ghost\""));
}

#[test]
fn empty_schema_fails_even_when_valid() {
    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("r", noop());
    builder.mutation_field("put", r#"{ "type": "String", "resolve": "r" }"#);

    let err = builder.finish().err().expect("no query fields");
    assert!(matches!(err, SchemaError::EmptySchema));
}

#[test]
fn list_wrappers_render_in_sdl() {
    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("r", noop());
    builder.query_field("things", r#"{ "type": "[Thing!]!", "resolve": "r" }"#);
    builder.field("Thing", "name", r#"{ "type": "String!", "resolve": "r" }"#);

    let schema = builder.finish().expect("schema should build");
    let sdl = schema.sdl();
    assert!(sdl.contains("things: [Thing!]!"));
    assert!(sdl.contains("name: String!"));
}

#[tokio::test]
async fn load_document_from_file() {
    let path = std::env::temp_dir().join(format!("json2graphql-doc-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{
            "query": {
                "get": {
                    "args": { "name": { "type": "String" } },
                    "type": "String",
                    "resolve": "getValue"
                }
            },
            "types": {}
        }"#,
    )
    .unwrap();

    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("getValue", get_value());
    builder.load_file(&path).expect("document should load");
    let schema = builder.finish().expect("schema should build");
    std::fs::remove_file(&path).ok();

    let store: Store = Arc::new(Mutex::new(HashMap::new()));
    store.lock().unwrap().insert("name".into(), "loaded".into());
    let response = schema
        .execute(Request::new(r#"{ get(name: "name") }"#).data(store))
        .await;
    assert!(response.errors.is_empty());
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({ "get": "loaded" })
    );
}

#[test]
fn malformed_document_file_fails_loudly() {
    let path = std::env::temp_dir().join(format!("json2graphql-bad-{}.json", std::process::id()));
    std::fs::write(&path, "{ not json").unwrap();

    let mut builder = SchemaBuilder::new();
    let err = builder.load_file(&path).err().expect("bad document");
    std::fs::remove_file(&path).ok();
    assert_eq!(err.error_code(), "MALFORMED_DOCUMENT");
}

#[test]
fn options_apply_at_assembly() {
    let options = SchemaOptions {
        max_depth: Some(5),
        max_complexity: Some(100),
        introspection: false,
    };
    options.validate().unwrap();

    let mut builder = SchemaBuilder::new();
    builder.bind_resolver("r", noop());
    builder.query_field("get", r#"{ "type": "String", "resolve": "r" }"#);
    builder
        .finish_with_options(options)
        .expect("schema should build with limits");
}

#[test]
fn build_consumes_the_registry() {
    // Two independent registries never share resolution state: the same
    // declarations build twice without false cycle reports.
    for _ in 0..2 {
        let mut builder = SchemaBuilder::new();
        builder.bind_resolver("r", noop());
        builder.query_field("thing", r#"{ "type": "Thing", "resolve": "r" }"#);
        builder.field("Thing", "name", r#"{ "type": "String", "resolve": "r" }"#);
        builder.finish().expect("independent builds succeed");
    }
}
