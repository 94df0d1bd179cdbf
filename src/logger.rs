use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::model::error::CsiLogError;
use crate::model::record::{CsiRecord, CSV_HEADER};
use crate::model::sample::{ChannelCoefficients, ChannelMatrix, QualityMetrics, RES_PER_PRB};

/// Directory used when a log call arrives before any explicit init.
pub const DEFAULT_LOG_DIR: &str = "/tmp/csi_logs";

struct LoggerState {
    writer: Option<csv::Writer<File>>,
    directory: PathBuf,
    current_file: Option<PathBuf>,
    initialized: bool,
    rotation_counter: u64,
}

/// CSV logger for channel measurements extracted from uplink reference signals.
///
/// The embedding pipeline constructs one instance and shares it across its
/// worker threads. A single lock serializes every operation, so the rows of
/// one logging call are always contiguous in the output file.
pub struct CsiLogger {
    state: Mutex<LoggerState>,
}

impl CsiLogger {
    pub fn new() -> Self {
        CsiLogger {
            state: Mutex::new(LoggerState {
                writer: None,
                directory: PathBuf::from(DEFAULT_LOG_DIR),
                current_file: None,
                initialized: false,
                rotation_counter: 0,
            }),
        }
    }

    /// Creates the log directory and opens a fresh timestamped file.
    ///
    /// Failures are reported on stderr and returned; the caller is free to
    /// ignore the result, in which case subsequent log calls skip silently.
    pub fn init(&self, directory: impl AsRef<Path>) -> Result<(), CsiLogError> {
        self.state.lock().init_with(directory.as_ref())
    }

    /// Appends one row per (port, layer, prb, re) coefficient of the matrix.
    ///
    /// Returns the number of rows written; 0 when no file is open. Only the
    /// first row of the call carries the quality metrics.
    pub fn log_csi(
        &self,
        slot: u32,
        symbol: u32,
        rnti: u16,
        prb_start: u32,
        nof_prb: u32,
        channel_matrix: &ChannelMatrix,
        metrics: QualityMetrics,
    ) -> usize {
        let mut state = self.state.lock();
        if !state.initialized {
            let _ = state.init_with(Path::new(DEFAULT_LOG_DIR));
        }

        let timestamp = local_timestamp();
        let Some(writer) = state.writer.as_mut() else {
            return 0;
        };

        let mut rows = 0;
        for (port, layers) in channel_matrix.iter().enumerate() {
            for (layer, prbs) in layers.iter().enumerate() {
                for (prb_idx, prb_data) in prbs.iter().enumerate() {
                    // Each PRB carries at most 12 REs; anything beyond is dropped.
                    for (re_idx, value) in prb_data.iter().take(RES_PER_PRB).enumerate() {
                        // Quality metrics are per snapshot, not per RE; they go
                        // on the first row of the call only.
                        let first_row = port == 0 && layer == 0 && prb_idx == 0 && re_idx == 0;
                        let record = CsiRecord {
                            timestamp: timestamp.clone(),
                            slot,
                            symbol,
                            rnti,
                            prb_start,
                            nof_prb,
                            prb_idx: prb_start + prb_idx as u32,
                            re_idx: re_idx as u32,
                            rx_port: port as u32,
                            tx_layer: layer as u32,
                            csi_real: value.re,
                            csi_imag: value.im,
                            csi_magnitude: value.norm(),
                            csi_phase: value.arg(),
                            rsrp_db: if first_row { metrics.rsrp() } else { None },
                            rsrq_db: if first_row { metrics.rsrq() } else { None },
                            sinr_db: if first_row { metrics.sinr() } else { None },
                        };
                        if writer.serialize(&record).is_ok() {
                            rows += 1;
                        }
                    }
                }
            }
        }

        let _ = writer.flush();
        rows
    }

    /// 1x1 MIMO variant: coefficients indexed `[prb][re]`, port and layer
    /// reported as 0, RSRP only on the first row, RSRQ/SINR always empty.
    pub fn log_csi_simple(
        &self,
        slot: u32,
        symbol: u32,
        rnti: u16,
        prb_start: u32,
        nof_prb: u32,
        channel_coeffs: &ChannelCoefficients,
        rsrp_db: f32,
    ) -> usize {
        let mut state = self.state.lock();
        if !state.initialized {
            let _ = state.init_with(Path::new(DEFAULT_LOG_DIR));
        }

        let timestamp = local_timestamp();
        let Some(writer) = state.writer.as_mut() else {
            return 0;
        };

        let metrics = QualityMetrics {
            rsrp_db,
            ..QualityMetrics::default()
        };

        let mut rows = 0;
        for (prb_idx, prb_data) in channel_coeffs.iter().take(nof_prb as usize).enumerate() {
            for (re_idx, value) in prb_data.iter().take(RES_PER_PRB).enumerate() {
                let first_row = prb_idx == 0 && re_idx == 0;
                let record = CsiRecord {
                    timestamp: timestamp.clone(),
                    slot,
                    symbol,
                    rnti,
                    prb_start,
                    nof_prb,
                    prb_idx: prb_start + prb_idx as u32,
                    re_idx: re_idx as u32,
                    rx_port: 0,
                    tx_layer: 0,
                    csi_real: value.re,
                    csi_imag: value.im,
                    csi_magnitude: value.norm(),
                    csi_phase: value.arg(),
                    rsrp_db: if first_row { metrics.rsrp() } else { None },
                    rsrq_db: None,
                    sinr_db: None,
                };
                if writer.serialize(&record).is_ok() {
                    rows += 1;
                }
            }
        }

        let _ = writer.flush();
        rows
    }

    /// Closes the current file if open. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if let Some(mut writer) = state.writer.take() {
            let _ = writer.flush();
        }
        state.current_file = None;
        state.initialized = false;
    }

    /// Path of the currently open log file, if any.
    pub fn current_file(&self) -> Option<PathBuf> {
        self.state.lock().current_file.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }
}

impl Default for CsiLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerState {
    fn init_with(&mut self, directory: &Path) -> Result<(), CsiLogError> {
        self.directory = directory.to_path_buf();

        if let Err(err) = fs::create_dir_all(&self.directory) {
            let err = CsiLogError::DirectoryCreation(self.directory.clone(), err);
            eprintln!("{}", err);
            return Err(err);
        }

        let rotated = self.rotate_file();
        // A failed rotation still marks the logger initialized; log calls
        // skip until a later init opens a file again.
        self.initialized = true;
        if let Err(err) = &rotated {
            eprintln!("{}", err);
        }
        rotated
    }

    fn rotate_file(&mut self) -> Result<(), CsiLogError> {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
        self.current_file = None;

        let now = chrono::Local::now();
        let file_name = format!(
            "csi_{}_{:03}_{}.csv",
            now.format("%Y%m%d_%H%M%S"),
            now.timestamp_subsec_millis(),
            self.rotation_counter
        );
        self.rotation_counter += 1;
        let path = self.directory.join(file_name);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| CsiLogError::FileOpen(path.clone(), err))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;

        self.current_file = Some(path);
        self.writer = Some(writer);
        Ok(())
    }
}

fn local_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}
