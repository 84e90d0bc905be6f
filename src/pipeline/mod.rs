// Record pipelines: the pure stages live under `processing`

pub mod processing;

// Re-export the two pipelines so callers can skip the stage path
pub use processing::directory;
pub use processing::ranking;
