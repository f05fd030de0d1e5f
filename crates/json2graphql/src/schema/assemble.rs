//! Final schema assembly.
//!
//! Resolves the two roots, registers every materialized object type with the
//! engine and finishes the schema. A build either returns a fully valid
//! schema or exactly one error; there is no partial artifact.

use std::collections::HashMap;

use async_graphql::dynamic::Schema;
use indexmap::IndexMap;
use tracing::debug;

use super::resolve::GraphResolver;
use crate::config::SchemaOptions;
use crate::decl::{FieldDecl, ObjectDecl};
use crate::error::SchemaError;
use crate::registry::ResolverFn;

pub(crate) fn assemble(
    types: &IndexMap<String, ObjectDecl>,
    resolvers: &HashMap<String, ResolverFn>,
    query: &IndexMap<String, FieldDecl>,
    mutation: &IndexMap<String, FieldDecl>,
    options: &SchemaOptions,
) -> Result<Schema, SchemaError> {
    let mut graph = GraphResolver::new(types, resolvers);

    let query_root = graph
        .resolve_root("Query", query)
        .map_err(|e| e.with_context("bad query"))?;

    // A mutation root with zero fields is rejected by the engine, so the
    // root is only assembled when mutation fields were declared.
    let mutation_root = if mutation.is_empty() {
        None
    } else {
        Some(
            graph
                .resolve_root("Mutation", mutation)
                .map_err(|e| e.with_context("bad mutation"))?,
        )
    };

    let objects = graph.into_objects();
    debug!(
        object_types = objects.len(),
        has_mutation = mutation_root.is_some(),
        "assembling schema"
    );

    let mutation_name = mutation_root.as_ref().map(|_| "Mutation");
    let mut builder = Schema::build("Query", mutation_name, None);
    for (_, object) in objects {
        builder = builder.register(object);
    }
    builder = builder.register(query_root);
    if let Some(mutation_root) = mutation_root {
        builder = builder.register(mutation_root);
    }

    if let Some(depth) = options.max_depth {
        builder = builder.limit_depth(depth);
    }
    if let Some(complexity) = options.max_complexity {
        builder = builder.limit_complexity(complexity);
    }
    if !options.introspection {
        builder = builder.disable_introspection();
    }

    builder
        .finish()
        .map_err(|e| SchemaError::InvalidSchema(e.to_string()))
}
