// Internal modules
pub mod catalog;
pub mod config;
pub mod lexer;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod preprocess;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use catalog::{
    Catalog, CatalogRecord, ConfigError, ConflictError, MatchMode, MultiMatchPolicy, SubtypeMatch,
    TokenType, TokenTypeRegistry,
};
pub use config::ScanPreferences;
pub use lexer::{scan_lines, HistoryLimits, LexError, LexerState, Matcher, SpeculativeMatcher};
pub use pipeline::{PipelineError, ScanResult, TokenDump};
pub use preprocess::{preprocess, PreprocessError, PreprocessOptions};
pub use tokens::Token;
pub use utils::{Position, Span};
