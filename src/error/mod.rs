//! Error handling for named constructor mapping.
//!
//! Build-time variants surface while a resolver is being constructed, before any
//! row is processed. Resolution-time variants surface per call and never affect
//! other calls against the same resolver.

use crate::config::CaseFold;

/// Boxed error returned by target factories.
///
/// Any `std::error::Error + Send + Sync` (and `anyhow::Error`) converts into it
/// with `?`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Precise reason a factory declaration failed extraction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionIssue {
    /// Some, but not all, parameters carry a name
    #[error("inconsistent names: {named} of {total} parameters named")]
    InconsistentNaming {
        /// Number of named parameters
        named: usize,
        /// Total number of parameters
        total: usize,
    },
    /// A declared name is empty or whitespace only
    #[error("blank name at parameter {position}")]
    BlankName {
        /// Zero-based parameter position
        position: usize,
    },
    /// The same name (after case folding) is declared twice
    #[error("not unique name: '{name}'")]
    DuplicateName {
        /// The offending name as declared
        name: String,
    },
}

/// Specialized error type for schema extraction, resolution and construction
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    /// A factory declaration is malformed
    #[error("schema extraction error, type: '{type_name}', factory: '{factory}': {issue}")]
    SchemaExtraction {
        type_name: String,
        factory: String,
        issue: ExtractionIssue,
    },

    /// Two factories declare the same name set
    #[error(
        "named constructors with duplicate names set found, type: '{type_name}', first: '{first}', second: '{second}'"
    )]
    DuplicateSchema {
        type_name: String,
        first: String,
        second: String,
    },

    /// A type has no usable factory
    #[error("no named constructors found for type: '{type_name}'")]
    NoEligibleSchema { type_name: String },

    /// No schema's names are covered by the record's keys
    #[error(
        "no named constructor found for type: '{type_name}', input keys: [{}], candidates: [{}]",
        .keys.join(", "),
        .candidates.join("; ")
    )]
    NoMatchingSchema {
        type_name: String,
        keys: Vec<String>,
        candidates: Vec<String>,
    },

    /// More than one schema of the winning size matches the record
    #[error(
        "ambiguous named constructors for type: '{type_name}', input keys: [{}], matching: [{}]",
        .keys.join(", "),
        .candidates.join("; ")
    )]
    AmbiguousSchema {
        type_name: String,
        keys: Vec<String>,
        candidates: Vec<String>,
    },

    /// The bound factory failed
    #[error("object instantiation error, named constructor: '{schema}', arguments: '{record}'")]
    ConstructionInvocation {
        schema: String,
        record: String,
        #[source]
        source: BoxError,
    },

    /// The discriminator column is absent, null or not text
    #[error("null or absent value of disc column: '{column}' in row data: '{record}'")]
    MissingDiscriminator { column: String, record: String },

    /// No subtype is registered for the discriminator value
    #[error(
        "cannot find subclass for discriminator: '{value}', keys: [{}], row data: '{record}'",
        .known.join(", ")
    )]
    UnknownDiscriminator {
        value: String,
        known: Vec<String>,
        record: String,
    },

    /// The discriminator column name is blank
    #[error("provided discriminator column is blank")]
    InvalidDiscriminatorColumn,

    /// A discriminated resolver was finalized without subtypes
    #[error("no subtypes registered for discriminator column: '{column}'")]
    EmptyDiscriminatorTable { column: String },

    /// The same discriminator value was registered twice
    #[error("discriminator value registered twice: '{value}', column: '{column}'")]
    DuplicateDiscriminator { value: String, column: String },

    /// A prebuilt subtype resolver folds names differently from the builder
    #[error(
        "subtype case fold mismatch, discriminator: '{value}', type: '{type_name}', expected: {expected:?}, found: {found:?}"
    )]
    SubtypeCaseFold {
        value: String,
        type_name: String,
        expected: CaseFold,
        found: CaseFold,
    },

    /// A row index past the end of a row source
    #[error("row index out of bounds: {row}, rows: {rows}")]
    RowOutOfBounds { row: usize, rows: usize },

    /// A row source column holds a type that has no `Value` counterpart
    #[error("unsupported column type, column: '{column}', type: {data_type}")]
    UnsupportedColumn { column: String, data_type: String },

    /// A configuration or record could not be parsed from JSON
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapperError {
    /// Whether the error can only arise while a resolver is being built
    #[must_use]
    pub const fn is_build_time(&self) -> bool {
        matches!(
            self,
            Self::SchemaExtraction { .. }
                | Self::DuplicateSchema { .. }
                | Self::NoEligibleSchema { .. }
                | Self::InvalidDiscriminatorColumn
                | Self::EmptyDiscriminatorTable { .. }
                | Self::DuplicateDiscriminator { .. }
                | Self::SubtypeCaseFold { .. }
        )
    }
}

/// Result type for mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;
