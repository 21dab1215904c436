//! Declarative token type catalog
//!
//! This module turns external catalog records into the immutable
//! [`TokenTypeRegistry`] the lexer scans against:
//!
//! - **[`CatalogRecord`]** - one declarative entry (symbols, regexes,
//!   subtypes) as it arrives from the TOML catalog file
//! - **[`TokenType`]** - a validated matcher with a stable numeric id
//! - **[`TokenTypeRegistry`]** - all types, grouped by category, with the
//!   five-way multiple-match search policy
//!
//! Registry construction is all-or-nothing: the first malformed record
//! aborts with a [`ConfigError`]. After construction the registry is
//! read-only for the lifetime of any number of lexer runs.

pub mod error;
pub mod loader;
pub mod record;
pub mod registry;
pub mod token_type;

// Re-export key types for convenience
pub use error::{ConfigError, ConflictError};
pub use loader::{load_catalog, load_registry, parse_catalog};
pub use record::{Catalog, CatalogRecord, IdValue, SubtypeRecord};
pub use registry::{MatchMode, MultiMatchPolicy, SearchHit, TokenTypeRegistry};
pub use token_type::{Subtype, SubtypeMatch, TokenType};
