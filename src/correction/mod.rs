pub mod engine;
pub mod fingerprint;
pub mod history;
pub mod splice;

pub use engine::{BatchFix, CorrectionEngine, PENDING_BATCH_TIMEOUT, PendingBatch, Restored, WordFix};
pub use history::{BatchKind, History, UndoRecord};
pub use splice::splice_corrections;
