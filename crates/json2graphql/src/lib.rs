//! # json2graphql
//!
//! Build executable GraphQL schemas from flat JSON field declarations.
//!
//! Declarations name their types with a compact expression grammar
//! (`"String"`, `"Thing!"`, `"[Thing!]!"`) and reference each other by name,
//! forwards and backwards. The builder collects them together with named
//! resolver bindings, validates the whole set in one pass and resolves the
//! reachable type graph into an [`async_graphql::dynamic::Schema`] with a
//! query root and, when mutation fields were declared, a mutation root.
//!
//! ```ignore
//! let mut builder = SchemaBuilder::new();
//! builder.bind_resolver(
//!     "getValue",
//!     resolver(|ctx| FieldFuture::new(async move { /* ... */ })),
//! );
//! builder.query_field(
//!     "get",
//!     r#"{ "args": { "name": { "type": "String" } },
//!          "type": "String",
//!          "resolve": "getValue" }"#,
//! );
//! let schema = builder.finish()?;
//! ```
//!
//! Declaration conflicts (duplicate fields, resolvers, root fields) are
//! collected rather than thrown, and reported together when `finish()` runs.
//! Object-type cycles are a modeling error and fail the build with the full
//! recursion trace.
//!
//! ## Modules
//!
//! - [`registry`] - declaration collection and the build entry point
//! - [`decl`] - declaration document shapes
//! - [`expr`] - the type-expression grammar
//! - [`config`] - schema assembly options
//! - [`error`] - error types

pub mod config;
pub mod decl;
pub mod error;
pub mod expr;
pub mod registry;
mod schema;

pub use config::SchemaOptions;
pub use decl::{ArgDecl, FieldDecl, SchemaDocument};
pub use error::SchemaError;
pub use expr::{ScalarKind, TypeExpr};
pub use registry::{ResolverFn, SchemaBuilder, resolver};

// Engine types resolver bindings are written against.
pub use async_graphql::Value;
pub use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};

/// Result type for schema building.
pub type Result<T> = std::result::Result<T, SchemaError>;
