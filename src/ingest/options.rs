use crate::parsers::DispatchPolicy;
use crate::utils::DEFAULT_MAX_FILE_BYTES;

/// Knobs for one ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// How file names map to parsers
    pub dispatch: DispatchPolicy,
    /// Rewrite columns holding only "Yes"/"No" as 1/0
    pub recode_yes_no: bool,
    /// Files larger than this fail without being parsed
    pub max_file_bytes: u64,
    /// Parse files on the rayon pool; merging into the store stays sequential
    pub parallel: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            dispatch: DispatchPolicy::Strict,
            recode_yes_no: false,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            parallel: false,
        }
    }
}

impl IngestOptions {
    pub fn with_dispatch(mut self, dispatch: DispatchPolicy) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn with_recode_yes_no(mut self, enabled: bool) -> Self {
        self.recode_yes_no = enabled;
        self
    }

    pub fn with_max_file_bytes(mut self, max: u64) -> Self {
        self.max_file_bytes = max;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = IngestOptions::default();
        assert_eq!(options.dispatch, DispatchPolicy::Strict);
        assert!(!options.recode_yes_no);
        assert!(!options.parallel);
        assert_eq!(options.max_file_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_builders() {
        let options = IngestOptions::default()
            .with_dispatch(DispatchPolicy::SpreadsheetFallback)
            .with_recode_yes_no(true)
            .with_max_file_bytes(10)
            .with_parallel(true);
        assert_eq!(options.dispatch, DispatchPolicy::SpreadsheetFallback);
        assert!(options.recode_yes_no);
        assert_eq!(options.max_file_bytes, 10);
        assert!(options.parallel);
    }
}
