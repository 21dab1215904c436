pub mod compile_time {
    pub mod preprocess {
        /// Maximum raw source size accepted by the preprocessor (10MB)
        pub const MAX_SOURCE_SIZE: usize = 10 * 1024 * 1024;

        /// Maximum number of logical lines after preprocessing
        pub const MAX_LINE_COUNT: usize = 100_000;

        /// Statement terminator appended to lines lacking one
        pub const DEFAULT_TERMINATOR: char = ';';

        /// Default comment pattern: everything from the first `~>` marker
        /// (one or more tildes) to the end of the line is dropped.
        pub const DEFAULT_COMMENT_PATTERN: &str = r"^(.*?)(~+>.*)$";
    }

    pub mod lexical {
        /// Maximum depth of the snapshot backup stack. The oldest snapshot
        /// is evicted when the cap is exceeded; restoring past the cap is a
        /// backtrack-range error, never a silent success with stale state.
        pub const MAX_SNAPSHOT_HISTORY: usize = 64;

        /// Maximum depth of the outer branch history (stacks of snapshot
        /// stacks entered for nested speculative branches).
        pub const MAX_BRANCH_HISTORY: usize = 16;

        /// Maximum number of tokens emitted in a single scan
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Maximum payload length for a single token
        pub const MAX_PAYLOAD_LENGTH: usize = 4_096;
    }

    pub mod catalog {
        /// Maximum number of token types accepted from one catalog
        pub const MAX_TYPE_COUNT: usize = 4_096;

        /// Maximum number of literal symbols per token type
        pub const MAX_SYMBOLS_PER_TYPE: usize = 256;
    }
}
