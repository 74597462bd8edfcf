use std::path::PathBuf;

use crate::scheduler::PolicyKind;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Everything one trace run needs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub trace_path: PathBuf,
    pub out_path: PathBuf,
    pub policy: PolicyKind,
    /// Sort completion records by job id before writing them.
    pub sort_output: bool,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl SimConfig {
    pub fn new(
        trace_path: impl Into<PathBuf>,
        out_path: impl Into<PathBuf>,
        policy: PolicyKind,
    ) -> Self {
        Self {
            trace_path: trace_path.into(),
            out_path: out_path.into(),
            policy,
            sort_output: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn with_sort_output(mut self, sort_output: bool) -> Self {
        self.sort_output = sort_output;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_by_default() {
        let cfg = SimConfig::new("trace.txt", "out.txt", PolicyKind::Srpt);
        assert_eq!(cfg.trace_path, PathBuf::from("trace.txt"));
        assert_eq!(cfg.out_path, PathBuf::from("out.txt"));
        assert_eq!(cfg.policy, PolicyKind::Srpt);
        assert!(cfg.sort_output);
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn builders_override_defaults() {
        let cfg = SimConfig::new("a", "b", PolicyKind::Ps)
            .with_sort_output(false)
            .with_log_filter("schedsim=debug");
        assert!(!cfg.sort_output);
        assert_eq!(cfg.log_filter, "schedsim=debug");
    }
}
