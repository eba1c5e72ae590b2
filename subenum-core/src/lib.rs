pub mod colors;
pub mod engine;
pub mod error;
pub mod output;
pub mod sink;
pub mod sources;
pub mod validation;

pub use error::{Result, SubenumError};
pub use validation::{accept_candidate, normalize_domain};

pub use engine::{
    enumerate, merge, Enumeration, ProgressCallback, SourceReport, SubdomainEnumerator,
};
pub use output::{EnumerationReport, OutputFormat, OutputFormatter};
pub use sink::{ConsoleSink, FileSink, ResultSink, SavedFiles, DEFAULT_OUTPUT_DIR};
pub use sources::{HttpSource, Source, SourceClient, SourceId, SourceOutcome};
