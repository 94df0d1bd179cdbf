use std::env;
use std::f32::consts::TAU;
use std::process;

use num_complex::Complex32;

use csi_logger::{ChannelCoefficients, ChannelMatrix, CsiLogError, CsiLogger, QualityMetrics};

// Fixed UE identifier for the synthetic capture.
const RNTI: u16 = 0x4601;
const PORTS: usize = 2;
const LAYERS: usize = 1;
const PRB_START: u32 = 0;
const NOF_PRB: u32 = 4;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), CsiLogError> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        return Err(CsiLogError::InvalidArguments(
            "Usage: cargo run -- <output-dir> [num-slots]".to_string(),
        ));
    }

    let output_dir = &args[1];
    let num_slots: u32 = if args.len() == 3 {
        args[2].parse().map_err(|_| {
            CsiLogError::InvalidArguments(format!("invalid slot count: {}", args[2]))
        })?
    } else {
        20
    };

    let logger = CsiLogger::new();
    logger.init(output_dir)?;

    for slot in 0..num_slots {
        let matrix = synthetic_matrix(slot);
        let metrics = QualityMetrics::new(
            -84.0 - 0.1 * slot as f32,
            -10.5 - 0.05 * slot as f32,
            18.0 + 0.1 * slot as f32,
        );
        logger.log_csi(slot, slot % 14, RNTI, PRB_START, NOF_PRB, &matrix, metrics);

        // Interleave the occasional 1x1 probe the way a sounding schedule would.
        if slot % 5 == 0 {
            let coeffs = synthetic_coeffs(slot);
            logger.log_csi_simple(slot, slot % 14, RNTI, PRB_START, NOF_PRB, &coeffs, -86.5);
        }
    }

    if let Some(path) = logger.current_file() {
        println!("{}", path.display());
    }
    logger.close();

    Ok(())
}

/// Deterministic phase-ramp channel: amplitude decays across PRBs, phase
/// advances per RE and drifts slowly with the slot index.
fn synthetic_matrix(slot: u32) -> ChannelMatrix {
    (0..PORTS)
        .map(|port| {
            (0..LAYERS)
                .map(|_| synthetic_port_coeffs(slot, port))
                .collect()
        })
        .collect()
}

fn synthetic_coeffs(slot: u32) -> ChannelCoefficients {
    synthetic_port_coeffs(slot, 0)
}

fn synthetic_port_coeffs(slot: u32, port: usize) -> ChannelCoefficients {
    (0..NOF_PRB as usize)
        .map(|prb| {
            (0..12)
                .map(|re| {
                    let amplitude = 1.0 / (1.0 + 0.1 * prb as f32);
                    let phase = TAU * (prb * 12 + re) as f32 / 48.0
                        + 0.01 * slot as f32
                        + 0.25 * port as f32;
                    Complex32::from_polar(amplitude, phase)
                })
                .collect()
        })
        .collect()
}
