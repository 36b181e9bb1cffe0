//! Example: Pouch Cell - Reduced Model vs Reference Solution
//!
//! Compares a reduced "2+1D" pouch cell model against a reference solution
//! exported on an unstructured mesh:
//!
//! - Reference: scattered (y, z) nodes, non-dimensional, sampled in time
//! - Candidate: closed-form fields evaluated on the reference grid
//! - Errors: absolute and relative, per field, exported as CSV
//!
//! **Physical System**:
//! - Current collector: 0.207 m × 0.137 m
//! - Discharge: 1 C over one hour
//!
//! **Parameters**:
//! - L = 0.137 m (characteristic length, `L_z`)
//! - τ = 3600 s (discharge timescale)
//! - Reference: 400 scattered nodes, 13 time samples (every 5 min)
//! - Grid: 41 × 28 mesh edges

use fieldref::{
    comparison::{Comparator, ErrorMode},
    external::{EdgeMesh, ParameterValues},
    fields::FieldName,
    output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter},
    reference::{ReferenceConfiguration, ReferenceModel, ScatteredDataset},
};
use ndarray::Array2;

use std::time::Instant;

// ====== Closed-form pouch cell fields (non-dimensional y, z, t) ======

fn negative_potential(y: f64, z: f64, t: f64) -> f64 {
    -1e-4 * (1.0 + t) * (y * y + 0.5 * z)
}

fn positive_potential(y: f64, z: f64, t: f64) -> f64 {
    4.2 - 0.5 * t + 2e-4 * (1.0 + t) * ((1.5 - y) * (1.5 - y) + 0.5 * (1.0 - z))
}

fn temperature(y: f64, z: f64, t: f64) -> f64 {
    298.15 + 4.0 * t * (1.0 - 0.2 * (y - 0.75).powi(2) - 0.3 * (z - 0.5).powi(2))
}

fn voltage(t: f64) -> f64 {
    4.2 - 0.5 * t - 0.05 * t * t
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Pouch Cell - Reduced Model vs Reference Solution");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Scales ======

    let length = 0.137; // L_z [m]
    let timescale = 3600.0; // tau_discharge [s]
    let y_extent = 0.207 / length; // non-dimensional width

    println!("Scales:");
    println!("  L   : {} m", length);
    println!("  τ   : {} s\n", timescale);

    // ====== Reference dataset ======

    let nodes = 400;
    let g = 1.324_717_957_244_746_f64;
    let mut y = vec![0.0, y_extent, 0.0, y_extent];
    let mut z = vec![0.0, 0.0, 1.0, 1.0];
    for k in 1..=nodes - 4 {
        y.push(y_extent * (0.5 + k as f64 / g).fract());
        z.push((0.5 + k as f64 / (g * g)).fract());
    }

    let times: Vec<f64> = (0..13).map(|i| 300.0 * i as f64).collect();
    let sample = |f: fn(f64, f64, f64) -> f64| {
        Array2::from_shape_fn((nodes, times.len()), |(k, i)| f(y[k], z[k], times[i] / timescale))
    };

    let dataset = ScatteredDataset::builder(times.clone(), y.clone(), z.clone())
        .spatial(FieldName::NegativeCollectorPotential, sample(negative_potential))
        .spatial(FieldName::PositiveCollectorPotential, sample(positive_potential))
        .spatial(FieldName::Temperature, sample(temperature))
        .series(
            FieldName::TerminalVoltage,
            times.iter().map(|t| voltage(t / timescale)).collect::<Vec<f64>>(),
        )
        .build()?;

    // ====== Reference model ======

    let start = Instant::now();
    let model = ReferenceModel::build(
        &dataset,
        &EdgeMesh::uniform("current collector", y_extent, 1.0, 41, 28),
        &ParameterValues::new(length, timescale),
        &ReferenceConfiguration::default(),
    )?;
    println!("Reference model:");
    println!("  Fields   : {:?}", model.available_fields());
    println!("  Grid     : {:?} (z × y)", model.grid().shape());
    println!("  Method   : {}", model.method_name());
    println!("  Outside  : {} node(s)", model.outside_nodes());
    println!("  Built in : {:.2?}\n", start.elapsed());

    // ====== Candidate: the reduced model drops the second-order terms ======

    let reduced_potential = |y: &[f64], z: &[f64], t: f64| {
        Array2::from_shape_fn((y.len(), z.len()), |(i, j)| -1e-4 * (1.0 + t) * (y[i] * y[i] + 0.45 * z[j]))
    };
    let reduced_temperature =
        |y: &[f64], z: &[f64], t: f64| Array2::from_elem((y.len(), z.len()), 298.15 + 3.9 * t);
    let reduced_voltage = |t: &[f64]| t.iter().map(|&t| 4.2 - 0.5 * t).collect::<Vec<f64>>();

    // ====== Comparison and export ======

    let output_dir = std::env::temp_dir().join("pouch_comparison");
    std::fs::create_dir_all(&output_dir)?;

    let metadata = CsvMetadata::from_model(&model).with_candidate("2+1D reduced model");
    let exporter = CsvExporter::new(CsvConfig::default().with_metadata(metadata));

    let t = 1800.0;
    for mode in [ErrorMode::Absolute, ErrorMode::Relative] {
        let comparator = Comparator::new(&model, mode);
        println!("Errors ({mode}) at t = {t} s:");

        let potential = comparator.compare_field(FieldName::NegativeCollectorPotential, &reduced_potential, t)?;
        println!("  phi_s_cn    : {}", potential.summary());
        exporter.export_field(&potential, &output_dir.join(format!("phi_s_cn_{mode}.csv")))?;

        let heat = comparator.compare_field(FieldName::Temperature, &reduced_temperature, t)?;
        println!("  temperature : {}", heat.summary());
        exporter.export_field(&heat, &output_dir.join(format!("temperature_{mode}.csv")))?;

        let series = comparator.compare_series(FieldName::TerminalVoltage, &reduced_voltage, &times)?;
        println!("  voltage     : {}\n", series.summary());
        exporter.export_series(&series, &output_dir.join(format!("voltage_{mode}.csv")))?;
    }

    println!("CSV files written to {}", output_dir.display());
    Ok(())
}
