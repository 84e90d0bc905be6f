// Pipeline processing: validation, normalization and selection stages

pub mod directory;
pub mod ranking;
