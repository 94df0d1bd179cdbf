use serde::{Deserialize, Serialize};

/// Column order of every log file. The serde field names below must stay
/// in sync with this list.
pub const CSV_HEADER: [&str; 17] = [
    "timestamp",
    "slot",
    "symbol",
    "rnti",
    "prb_start",
    "nof_prb",
    "prb_idx",
    "re_idx",
    "rx_port",
    "tx_layer",
    "csi_real",
    "csi_imag",
    "csi_magnitude",
    "csi_phase",
    "rsrp_db",
    "rsrq_db",
    "sinr_db",
];

/// One CSV row: a single channel coefficient plus the snapshot context.
///
/// The three trailing dB columns are populated only on the first row of a
/// logging call; an absent metric serializes as an empty field.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CsiRecord {
    pub timestamp: String,
    pub slot: u32,
    pub symbol: u32,
    pub rnti: u16,
    pub prb_start: u32,
    pub nof_prb: u32,
    /// Absolute PRB index (prb_start + offset within the snapshot).
    pub prb_idx: u32,
    pub re_idx: u32,
    pub rx_port: u32,
    pub tx_layer: u32,
    #[serde(serialize_with = "serialize_scientific")]
    pub csi_real: f32,
    #[serde(serialize_with = "serialize_scientific")]
    pub csi_imag: f32,
    #[serde(serialize_with = "serialize_scientific")]
    pub csi_magnitude: f32,
    #[serde(serialize_with = "serialize_scientific")]
    pub csi_phase: f32,
    pub rsrp_db: Option<f32>,
    pub rsrq_db: Option<f32>,
    pub sinr_db: Option<f32>,
}

fn serialize_scientific<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("{:.6e}", value))
}
