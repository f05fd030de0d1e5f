//! Declaration document shapes.
//!
//! Fields are declared with a small JSON document:
//!
//! ```json
//! {
//!     "args": { "name": { "type": "String" } },
//!     "type": "String",
//!     "resolve": "getValue"
//! }
//! ```
//!
//! Root (query/mutation) fields use the identical shape. Maps preserve
//! declaration order.

use indexmap::IndexMap;
use serde::Deserialize;

/// One declared argument: `{ "type": "String!" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgDecl {
    /// Type expression for the argument value.
    #[serde(rename = "type")]
    pub type_expr: String,
}

/// One declared field.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDecl {
    /// Arguments by name.
    #[serde(default)]
    pub args: IndexMap<String, ArgDecl>,

    /// Type expression for the field value.
    #[serde(rename = "type")]
    pub type_expr: String,

    /// Name of the resolver binding producing the field value.
    #[serde(default)]
    pub resolve: Option<String>,
}

impl FieldDecl {
    /// Creates a field declaration with the given type expression.
    #[must_use]
    pub fn new(type_expr: impl Into<String>) -> Self {
        Self {
            args: IndexMap::new(),
            type_expr: type_expr.into(),
            resolve: None,
        }
    }

    /// Sets the resolver binding name.
    #[must_use]
    pub fn resolve(mut self, name: impl Into<String>) -> Self {
        self.resolve = Some(name.into());
        self
    }

    /// Adds an argument declaration.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        self.args.insert(
            name.into(),
            ArgDecl {
                type_expr: type_expr.into(),
            },
        );
        self
    }
}

/// A declared object type: uniquely named fields.
#[derive(Debug, Clone, Default)]
pub struct ObjectDecl {
    /// Fields by name, in declaration order.
    pub fields: IndexMap<String, FieldDecl>,
}

/// A whole declaration document, as loaded from a file.
///
/// ```json
/// {
///     "query": { "get": { "type": "String", "resolve": "getValue" } },
///     "mutation": { },
///     "types": { "Thing": { "name": { "type": "String", "resolve": "thingName" } } }
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct SchemaDocument {
    /// Query root fields.
    #[serde(default)]
    pub query: IndexMap<String, FieldDecl>,

    /// Mutation root fields.
    #[serde(default)]
    pub mutation: IndexMap<String, FieldDecl>,

    /// Named object types.
    #[serde(default)]
    pub types: IndexMap<String, IndexMap<String, FieldDecl>>,
}
