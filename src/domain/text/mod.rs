pub mod analysis;
pub mod classify;
pub mod correction;
pub mod lexicon;
pub mod plausible;
pub mod protected;
pub mod segment;

pub use analysis::{Analysis, AnalysisReason, AnalysisStats, Analyzer, Thresholds};
pub use classify::{Verdict, classify, is_mismatch};
pub use correction::Correction;
pub use segment::{SegmentMode, Word, segment, word_at, words};
