//! aq-readings: sensor reading ingestion, export and analysis.
//!
//! Side channel to the flow network: dissolved-oxygen voltage readings
//! arrive from field sensors, get stored, and can be exported as TSV or
//! handed to an external peak/slope analysis process.

pub mod analysis;
pub mod error;
pub mod export;
pub mod store;

pub use analysis::{AnalysisClient, AnalysisReport, AnalysisStats, ExtremePoint, TimedValue};
pub use error::{AnalysisError, AnalysisResult, StoreError, StoreResult};
pub use export::to_tsv;
pub use store::{MemoryStore, Reading, ReadingStore};
