pub mod logger;
pub mod model;

pub use logger::{CsiLogger, DEFAULT_LOG_DIR};
pub use model::error::CsiLogError;
pub use model::record::{CsiRecord, CSV_HEADER};
pub use model::sample::{
    ChannelCoefficients, ChannelMatrix, PrbCoefficients, QualityMetrics, RES_PER_PRB,
};
