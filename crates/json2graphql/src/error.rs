//! Error types for schema building.
//!
//! Declaration-time conflicts (duplicate names) are collected by the builder
//! and reported together from `finish()`; resolution-time errors abort the
//! build immediately and carry contextual path information describing which
//! field, argument or type triggered them.

/// Errors produced while declaring or building a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A resolver name was bound twice.
    #[error("resolver name {0:?} already bound")]
    DuplicateResolver(String),

    /// A field name was declared twice on the same object type.
    #[error("field {field:?} already declared on type {type_name:?}")]
    DuplicateField {
        /// Object type carrying the field.
        type_name: String,
        /// The conflicting field name.
        field: String,
    },

    /// A query root field was declared twice.
    #[error("query field {0:?} already declared")]
    DuplicateQueryField(String),

    /// A mutation root field was declared twice.
    #[error("mutation field {0:?} already declared")]
    DuplicateMutationField(String),

    /// A type expression could not be parsed.
    #[error("invalid type expression {0:?}")]
    InvalidTypeExpression(String),

    /// A field or argument referenced an object type that was never declared.
    #[error("unknown object type {0:?}")]
    UnknownObjectType(String),

    /// A field referenced a resolver name with no binding.
    #[error("unknown resolver {0:?}")]
    UnknownResolver(String),

    /// An object type referenced itself while still being resolved.
    /// The payload is the chain of type names, ending with the repeated one.
    #[error("type recursion detected: {0}")]
    RecursionDetected(String),

    /// The builder was finished with zero query fields.
    #[error("schema contains no query fields")]
    EmptySchema,

    /// Aggregate of every declaration-time conflict, or an engine-level
    /// schema validation failure.
    #[error("schema contains errors: {0}")]
    InvalidSchema(String),

    /// An external resource (e.g. a declaration file) could not be read.
    #[error("internal error: {0}")]
    Internal(String),

    /// A declaration document failed to decode.
    #[error("malformed declaration document: {0}")]
    MalformedDocument(String),

    /// A resolution error wrapped with path context.
    #[error("{context}: {source}")]
    Context {
        /// Which field, argument or root the error occurred under.
        context: String,
        /// The wrapped error.
        #[source]
        source: Box<SchemaError>,
    },
}

impl SchemaError {
    /// Wraps this error with path context (`bad field x: ...`).
    pub(crate) fn with_context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Unwraps context layers down to the originating error.
    #[must_use]
    pub fn root_cause(&self) -> &SchemaError {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateResolver(_) => "DUPLICATE_RESOLVER",
            Self::DuplicateField { .. } => "DUPLICATE_FIELD",
            Self::DuplicateQueryField(_) => "DUPLICATE_QUERY_FIELD",
            Self::DuplicateMutationField(_) => "DUPLICATE_MUTATION_FIELD",
            Self::InvalidTypeExpression(_) => "INVALID_TYPE_EXPRESSION",
            Self::UnknownObjectType(_) => "UNKNOWN_OBJECT_TYPE",
            Self::UnknownResolver(_) => "UNKNOWN_RESOLVER",
            Self::RecursionDetected(_) => "RECURSION_DETECTED",
            Self::EmptySchema => "EMPTY_SCHEMA",
            Self::InvalidSchema(_) => "INVALID_SCHEMA",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::MalformedDocument(_) => "MALFORMED_DOCUMENT",
            Self::Context { source, .. } => source.error_code(),
        }
    }
}
