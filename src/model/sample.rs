use num_complex::Complex32;

/// Number of resource elements in one PRB.
pub const RES_PER_PRB: usize = 12;

/// Channel coefficients for a single PRB, one entry per resource element.
pub type PrbCoefficients = Vec<Complex32>;

/// Channel coefficients indexed `[prb][re]`, the 1x1 MIMO layout.
pub type ChannelCoefficients = Vec<PrbCoefficients>;

/// Full channel matrix indexed `[port][layer][prb][re]`.
pub type ChannelMatrix = Vec<Vec<ChannelCoefficients>>;

/// Signal-quality metrics for one measurement snapshot.
///
/// NaN marks a metric as not available, matching what the estimators
/// upstream hand over when a quantity was not computed for the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct QualityMetrics {
    pub rsrp_db: f32,
    pub rsrq_db: f32,
    pub sinr_db: f32,
}

impl Default for QualityMetrics {
    fn default() -> Self {
        QualityMetrics {
            rsrp_db: f32::NAN,
            rsrq_db: f32::NAN,
            sinr_db: f32::NAN,
        }
    }
}

impl QualityMetrics {
    pub fn new(rsrp_db: f32, rsrq_db: f32, sinr_db: f32) -> Self {
        QualityMetrics {
            rsrp_db,
            rsrq_db,
            sinr_db,
        }
    }

    /// Returns None when RSRP is not available
    pub fn rsrp(&self) -> Option<f32> {
        available(self.rsrp_db)
    }

    /// Returns None when RSRQ is not available
    pub fn rsrq(&self) -> Option<f32> {
        available(self.rsrq_db)
    }

    /// Returns None when SINR is not available
    pub fn sinr(&self) -> Option<f32> {
        available(self.sinr_db)
    }
}

fn available(value_db: f32) -> Option<f32> {
    if value_db.is_nan() {
        None
    } else {
        Some(value_db)
    }
}
