//! The declaration registry.
//!
//! [`SchemaBuilder`] collects resolver bindings and field declarations for
//! object types and the two roots, then turns them into an executable schema
//! in one `finish()` call. Conflicting declarations never abort the
//! declaration phase; they accumulate and are reported together, so a caller
//! sees every structural problem in one pass.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_graphql::dynamic::{FieldFuture, ResolverContext, Schema};
use indexmap::IndexMap;
use tracing::debug;

use crate::config::SchemaOptions;
use crate::decl::{FieldDecl, ObjectDecl, SchemaDocument};
use crate::error::SchemaError;
use crate::schema::assemble;

/// A named resolver binding. The builder never invokes it; it only checks
/// that each declared `resolve` name has a binding. The engine calls it at
/// query time with the request context (arguments, parent value, data).
pub type ResolverFn =
    Arc<dyn for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync>;

/// Wraps a closure into a [`ResolverFn`] binding.
pub fn resolver<F>(f: F) -> ResolverFn
where
    F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Collects declarations and builds the schema.
///
/// # Example
///
/// ```ignore
/// let mut builder = SchemaBuilder::new();
/// builder.bind_resolver("getValue", resolver(|ctx| { ... }));
/// builder.query_field("get", r#"{ "type": "String", "resolve": "getValue" }"#);
/// let schema = builder.finish()?;
/// ```
#[derive(Default)]
pub struct SchemaBuilder {
    resolvers: HashMap<String, ResolverFn>,
    types: IndexMap<String, ObjectDecl>,
    query: IndexMap<String, FieldDecl>,
    mutation: IndexMap<String, FieldDecl>,
    errors: Vec<SchemaError>,
}

impl SchemaBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a resolver name to a function.
    ///
    /// Rebinding an already-bound name records a `DuplicateResolver` conflict
    /// and keeps the first binding.
    pub fn bind_resolver(&mut self, name: impl Into<String>, f: ResolverFn) -> &mut Self {
        let name = name.into();
        if self.resolvers.contains_key(&name) {
            self.errors.push(SchemaError::DuplicateResolver(name));
        } else {
            self.resolvers.insert(name, f);
        }
        self
    }

    /// Binds several resolvers at once.
    pub fn bind_resolvers<N>(
        &mut self,
        bindings: impl IntoIterator<Item = (N, ResolverFn)>,
    ) -> &mut Self
    where
        N: Into<String>,
    {
        for (name, f) in bindings {
            self.bind_resolver(name, f);
        }
        self
    }

    /// Declares a field on a named object type from its JSON declaration.
    ///
    /// The object type is created on first use. A second declaration of the
    /// same field name records a `DuplicateField` conflict; undecodable JSON
    /// records a `MalformedDocument` conflict.
    pub fn field(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        json: &str,
    ) -> &mut Self {
        let (type_name, field_name) = (type_name.into(), field_name.into());
        match serde_json::from_str::<FieldDecl>(json) {
            Ok(decl) => self.field_decl(type_name, field_name, decl),
            Err(e) => {
                self.errors.push(SchemaError::MalformedDocument(format!(
                    "field {type_name}.{field_name}: {e}"
                )));
                self
            }
        }
    }

    /// Declares a field on a named object type from an already-decoded
    /// declaration.
    pub fn field_decl(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        decl: FieldDecl,
    ) -> &mut Self {
        let type_name = type_name.into();
        let field_name = field_name.into();
        let object = self.types.entry(type_name.clone()).or_default();
        if object.fields.contains_key(&field_name) {
            self.errors.push(SchemaError::DuplicateField {
                type_name,
                field: field_name,
            });
        } else {
            object.fields.insert(field_name, decl);
        }
        self
    }

    /// Declares a query root field from its JSON declaration.
    pub fn query_field(&mut self, name: impl Into<String>, json: &str) -> &mut Self {
        let name = name.into();
        match serde_json::from_str::<FieldDecl>(json) {
            Ok(decl) => self.query_field_decl(name, decl),
            Err(e) => {
                self.errors
                    .push(SchemaError::MalformedDocument(format!("query {name}: {e}")));
                self
            }
        }
    }

    /// Declares a query root field from an already-decoded declaration.
    pub fn query_field_decl(&mut self, name: impl Into<String>, decl: FieldDecl) -> &mut Self {
        let name = name.into();
        if self.query.contains_key(&name) {
            self.errors.push(SchemaError::DuplicateQueryField(name));
        } else {
            self.query.insert(name, decl);
        }
        self
    }

    /// Declares a mutation root field from its JSON declaration.
    pub fn mutation_field(&mut self, name: impl Into<String>, json: &str) -> &mut Self {
        let name = name.into();
        match serde_json::from_str::<FieldDecl>(json) {
            Ok(decl) => self.mutation_field_decl(name, decl),
            Err(e) => {
                self.errors.push(SchemaError::MalformedDocument(format!(
                    "mutation {name}: {e}"
                )));
                self
            }
        }
    }

    /// Declares a mutation root field from an already-decoded declaration.
    pub fn mutation_field_decl(&mut self, name: impl Into<String>, decl: FieldDecl) -> &mut Self {
        let name = name.into();
        if self.mutation.contains_key(&name) {
            self.errors.push(SchemaError::DuplicateMutationField(name));
        } else {
            self.mutation.insert(name, decl);
        }
        self
    }

    /// Merges a whole declaration document into the builder.
    ///
    /// Conflicts with earlier declarations accumulate exactly as if each
    /// field had been declared individually.
    pub fn load_document(&mut self, doc: SchemaDocument) -> &mut Self {
        for (type_name, fields) in doc.types {
            for (field_name, decl) in fields {
                self.field_decl(type_name.clone(), field_name, decl);
            }
        }
        for (name, decl) in doc.query {
            self.query_field_decl(name, decl);
        }
        for (name, decl) in doc.mutation {
            self.mutation_field_decl(name, decl);
        }
        self
    }

    /// Reads a declaration document from a JSON file and merges it.
    ///
    /// # Errors
    ///
    /// Returns `Internal` when the file cannot be read and
    /// `MalformedDocument` when it does not decode.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, SchemaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::Internal(format!("unable to read schema file {}: {e}", path.display()))
        })?;
        let doc: SchemaDocument = serde_json::from_str(&text)
            .map_err(|e| SchemaError::MalformedDocument(e.to_string()))?;
        debug!(
            path = %path.display(),
            types = doc.types.len(),
            query_fields = doc.query.len(),
            mutation_fields = doc.mutation.len(),
            "loaded declaration document"
        );
        Ok(self.load_document(doc))
    }

    /// The conflicts accumulated so far.
    #[must_use]
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    /// Builds the schema with default options.
    ///
    /// # Errors
    ///
    /// See [`finish_with_options`](Self::finish_with_options).
    pub fn finish(self) -> Result<Schema, SchemaError> {
        self.finish_with_options(SchemaOptions::default())
    }

    /// Builds the schema, consuming the builder.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidSchema` when any declaration conflict accumulated,
    /// reporting all of them in one message; with `EmptySchema` when no query
    /// field was declared; or with the first resolution error (unknown type,
    /// unknown resolver, recursion) wrapped with its path context.
    pub fn finish_with_options(self, options: SchemaOptions) -> Result<Schema, SchemaError> {
        if !self.errors.is_empty() {
            let joined = self
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SchemaError::InvalidSchema(joined));
        }
        if self.query.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        debug!(
            types = self.types.len(),
            query_fields = self.query.len(),
            mutation_fields = self.mutation.len(),
            "building schema from declarations"
        );
        assemble(
            &self.types,
            &self.resolvers,
            &self.query,
            &self.mutation,
            &options,
        )
    }
}
