//! Basic Condition Monitoring Example
//!
//! This example demonstrates the simplest use case of GearGuard:
//! driving the monitoring engine with synthetic vibration windows for two
//! machinery components and watching the classification evolve as one of
//! them degrades.
//!
//! ## What You'll Learn
//!
//! - Configuring and starting the monitoring engine
//! - Feeding per-component raw sample windows tick by tick
//! - Reading classifications and adaptive thresholds
//! - Flushing session readings into the durable history
//! - Predicting batches-to-threshold from the trend
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_monitoring
//! ```

use gearguard_core::{
    export::write_csv, EngineConfig, FlushOutcome, JsonFileStore, MonitoringEngine,
};

/// Deterministic stand-in for a vibration sensor feed.
///
/// In production this is the acquisition boundary; the engine does not care
/// whether windows come from hardware or from a formula.
fn synthetic_window(amplitude: f32, phase: usize) -> Vec<f32> {
    (0..8)
        .map(|i| amplitude * (0.7 * (phase + i) as f32).sin())
        .collect()
}

fn main() {
    println!("GearGuard Basic Monitoring Example");
    println!("==================================\n");

    let config = EngineConfig {
        components: vec!["ENG1".into(), "PG3".into()],
        sample_rate_hz: 1000.0,
        cutoff_hz: 100.0,
        filter_order: 2,
        history_cap: 100,
        flush_interval: 10,
    };

    let store = JsonFileStore::new("gearguard_history.json");
    let mut engine = MonitoringEngine::new(config, store).expect("valid configuration");

    // 50 rounds: ENG1 stays healthy, PG3's vibration amplitude creeps up
    for round in 0..50 {
        let eng1 = synthetic_window(0.4, round);
        let pg3 = synthetic_window(0.4 + 0.02 * round as f32, round);

        for (component, window) in [("ENG1", eng1), ("PG3", pg3)] {
            match engine.process_tick(component, &window) {
                Ok(report) => {
                    if round % 10 == 0 {
                        println!(
                            "round {:2} {:5} rms={:.3} limit={:.3} critical={:.3} -> {:?}",
                            round,
                            component,
                            report.rms,
                            report.thresholds.limit,
                            report.thresholds.critical,
                            report.status,
                        );
                    }
                }
                Err(err) => println!("round {:2} {:5} skipped: {}", round, component, err),
            }
        }

        if let FlushOutcome::FlushFailed(err) = engine.complete_round() {
            println!("flush failed (will retry): {}", err);
        }
    }

    // Make sure the tail of the session reaches the durable record
    engine.flush_now();

    println!();
    for component in ["ENG1", "PG3"] {
        match engine.batches_to_threshold(component, 0.8) {
            Some(batches) => println!("{}: ~{} flush periods until 0.8", component, batches),
            None => println!("{}: no rising trend toward 0.8", component),
        }
    }

    println!("\nHistory as CSV:");
    let mut csv = Vec::new();
    write_csv(engine.history(), &mut csv).expect("in-memory write");
    print!("{}", String::from_utf8_lossy(&csv));
}
