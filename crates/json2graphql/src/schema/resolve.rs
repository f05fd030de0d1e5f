//! Lazy graph resolution.
//!
//! Declarations reference each other by name, forwards and backwards, so the
//! resolver builds concrete object types on demand: a memo table holds every
//! finished node (one per type name, shared by all references) and an ordered
//! in-progress list catches illegal self-reference. Both live only for one
//! build call. Types never reached from a root are accepted but inert.

use std::collections::HashMap;

use async_graphql::dynamic::{Field, InputValue, Object, TypeRef};
use indexmap::IndexMap;
use tracing::trace;

use crate::decl::{FieldDecl, ObjectDecl};
use crate::error::SchemaError;
use crate::expr::TypeExpr;
use crate::registry::ResolverFn;

pub(crate) struct GraphResolver<'a> {
    types: &'a IndexMap<String, ObjectDecl>,
    resolvers: &'a HashMap<String, ResolverFn>,
    /// Concrete nodes, built at most once per build call.
    resolved: IndexMap<String, Object>,
    /// Names currently being resolved, in entry order.
    in_progress: Vec<String>,
}

impl<'a> GraphResolver<'a> {
    pub(crate) fn new(
        types: &'a IndexMap<String, ObjectDecl>,
        resolvers: &'a HashMap<String, ResolverFn>,
    ) -> Self {
        Self {
            types,
            resolvers,
            resolved: IndexMap::new(),
            in_progress: Vec::new(),
        }
    }

    /// Resolves a root object from its field declarations.
    ///
    /// Roots use the reserved names and are not declared in the type table,
    /// so they never enter the recursion trace.
    pub(crate) fn resolve_root(
        &mut self,
        name: &str,
        fields: &IndexMap<String, FieldDecl>,
    ) -> Result<Object, SchemaError> {
        trace!(root = name, fields = fields.len(), "resolving root object");
        self.build_fields(Object::new(name), fields)
    }

    /// Consumes the resolver, yielding every materialized object type.
    pub(crate) fn into_objects(self) -> IndexMap<String, Object> {
        self.resolved
    }

    /// Ensures a concrete node exists for the named object type.
    fn resolve_object(&mut self, name: &str) -> Result<(), SchemaError> {
        if self.resolved.contains_key(name) {
            return Ok(());
        }
        if self.in_progress.iter().any(|entered| entered == name) {
            let mut chain = self.in_progress.join(", ");
            chain.push_str(", ");
            chain.push_str(name);
            return Err(SchemaError::RecursionDetected(chain));
        }

        self.in_progress.push(name.to_string());
        let built = self.build_object(name);
        // The entry leaves the list on success and error alike.
        self.in_progress.pop();

        let object = built?;
        self.resolved.insert(name.to_string(), object);
        Ok(())
    }

    fn build_object(&mut self, name: &str) -> Result<Object, SchemaError> {
        let types = self.types;
        let Some(decl) = types.get(name) else {
            return Err(SchemaError::UnknownObjectType(name.to_string()));
        };
        trace!(type_name = name, fields = decl.fields.len(), "building object type");
        self.build_fields(Object::new(name), &decl.fields)
    }

    fn build_fields(
        &mut self,
        mut object: Object,
        fields: &IndexMap<String, FieldDecl>,
    ) -> Result<Object, SchemaError> {
        for (name, decl) in fields {
            let field = self
                .build_field(name, decl)
                .map_err(|e| e.with_context(format!("bad field {name}")))?;
            object = object.field(field);
        }
        Ok(object)
    }

    fn build_field(&mut self, name: &str, decl: &FieldDecl) -> Result<Field, SchemaError> {
        let ty = self
            .resolve_type(&decl.type_expr)
            .map_err(|e| e.with_context(format!("bad type {:?}", decl.type_expr)))?;

        let mut args = Vec::with_capacity(decl.args.len());
        for (arg_name, arg) in &decl.args {
            let arg_ty = self
                .resolve_type(&arg.type_expr)
                .map_err(|e| e.with_context(format!("bad argument {arg_name}")))?;
            args.push(InputValue::new(arg_name.as_str(), arg_ty));
        }

        let resolve_name = decl.resolve.as_deref().unwrap_or_default();
        let Some(bound) = self.resolvers.get(resolve_name) else {
            return Err(SchemaError::UnknownResolver(resolve_name.to_string()));
        };
        let bound = bound.clone();

        let mut field = Field::new(name.to_string(), ty, move |ctx| bound(ctx));
        for arg in args {
            field = field.argument(arg);
        }
        Ok(field)
    }

    /// Interprets a type expression, materializing any object type it names.
    fn resolve_type(&mut self, raw: &str) -> Result<TypeRef, SchemaError> {
        let expr = TypeExpr::parse(raw)?;
        match expr.base_scalar() {
            Some(scalar) => Ok(expr.type_ref(scalar.type_name())),
            None => {
                self.resolve_object(&expr.base)?;
                Ok(expr.type_ref(&expr.base))
            }
        }
    }
}
