// Application layer: use cases that run a pipeline end to end, plus output ports

pub mod directory_join_use_case;
pub mod ports;
pub mod ranking_use_case;

pub use directory_join_use_case::{DirectoryJoinReport, DirectoryJoinUseCase};
pub use ports::{publish, ReportOutputPort};
pub use ranking_use_case::{RankingReport, RankingUseCase};
