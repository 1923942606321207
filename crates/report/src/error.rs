use core_types::Benchmark;
use thiserror::Error;

/// The assembler's inputs disagree about which instruments were analysed.
///
/// Every variant is fatal: no partial report is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("{0} has moving averages but no impact analysis")]
    MissingImpacts(Benchmark),

    #[error("{0} has an impact analysis but no moving averages")]
    MissingMovingAverages(Benchmark),

    #[error("{0} has more than one impact analysis")]
    DuplicateImpacts(Benchmark),

    #[error("{0} has more than one MA({1}) series")]
    DuplicateWindow(Benchmark, usize),

    #[error("{0} has more than one context entry")]
    DuplicateContext(Benchmark),

    #[error("context supplied for {0}, which was not analysed")]
    UnknownContext(Benchmark),
}
