//! The type-expression grammar.
//!
//! A type expression is the compact string form used in field declarations:
//! a base name (built-in scalar or declared object type), optionally wrapped
//! in a list with `[...]` and marked non-null with `!` on the item and/or the
//! list itself, e.g. `"String"`, `"Thing!"`, `"[Thing!]!"`.
//!
//! Parsing deliberately reproduces the historical two-phase stripping order
//! (list brackets first, then the item `!`), including its lenient treatment
//! of a missing closing bracket. Existing declaration strings depend on these
//! boundaries.

use async_graphql::dynamic::TypeRef;

use crate::error::SchemaError;

/// The five built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Int,
    Float,
    Boolean,
    Id,
}

impl ScalarKind {
    /// Maps a base name onto a built-in scalar, if it is one.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Self::String),
            "Int" => Some(Self::Int),
            "Float" => Some(Self::Float),
            "Boolean" => Some(Self::Boolean),
            "ID" => Some(Self::Id),
            _ => None,
        }
    }

    /// The GraphQL type name for this scalar.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::String => TypeRef::STRING,
            Self::Int => TypeRef::INT,
            Self::Float => TypeRef::FLOAT,
            Self::Boolean => TypeRef::BOOLEAN,
            Self::Id => TypeRef::ID,
        }
    }
}

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    /// Scalar name or pending object-type reference.
    pub base: String,
    /// The expression was list-wrapped.
    pub is_list: bool,
    /// The list wrapper itself is non-null (`[...]!`).
    pub list_non_null: bool,
    /// The item inside the list (or the bare base) is non-null.
    pub item_non_null: bool,
}

impl TypeExpr {
    /// Parses a type expression string.
    ///
    /// Bracket handling runs first: a leading `[` marks a list; the trailing
    /// `]` is stripped when present, and when the expression instead ends
    /// with `!` the list is non-null and the `]` (if now exposed) is stripped
    /// after the `!`. A missing `]` is tolerated. A trailing `!` on the
    /// remaining text then marks the item non-null.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeExpression` when nothing remains for the base name.
    pub fn parse(expr: &str) -> Result<Self, SchemaError> {
        let mut rest = expr;
        let mut is_list = false;
        let mut list_non_null = false;

        if rest.starts_with('[') {
            is_list = true;
            if rest.ends_with(']') {
                rest = &rest[1..rest.len() - 1];
            } else if rest.ends_with('!') {
                list_non_null = true;
                rest = &rest[..rest.len() - 1];
                if rest.ends_with(']') {
                    rest = &rest[1..rest.len() - 1];
                }
            } else {
                rest = &rest[1..];
            }
        }

        let item_non_null = rest.ends_with('!');
        if item_non_null {
            rest = &rest[..rest.len() - 1];
        }

        if rest.is_empty() {
            return Err(SchemaError::InvalidTypeExpression(expr.to_string()));
        }

        Ok(Self {
            base: rest.to_string(),
            is_list,
            list_non_null,
            item_non_null,
        })
    }

    /// Returns the built-in scalar this expression names, if any.
    #[must_use]
    pub fn base_scalar(&self) -> Option<ScalarKind> {
        ScalarKind::from_name(&self.base)
    }

    /// Builds the type reference for this expression around a resolved base
    /// type name, applying the non-null and list wrappers in order.
    #[must_use]
    pub fn type_ref(&self, base_name: &str) -> TypeRef {
        let mut ty = TypeRef::Named(base_name.to_string().into());
        if self.item_non_null {
            ty = TypeRef::NonNull(Box::new(ty));
        }
        if self.is_list {
            ty = TypeRef::List(Box::new(ty));
            if self.list_non_null {
                ty = TypeRef::NonNull(Box::new(ty));
            }
        }
        ty
    }
}
