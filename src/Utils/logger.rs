use crate::somelinalg::omega_search::OmegaTrial;
use csv::Writer;
use nalgebra::DVector;
use std::fs::File;
use std::io;

/// Persists an omega scan history, one row per trial.
pub fn save_omega_history_to_csv(history: &[OmegaTrial], filename: &str) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(&["omega", "steps", "converged"])?;
    for trial in history {
        writer.write_record(&[
            trial.omega.to_string(),
            trial.steps.to_string(),
            trial.converged.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Persists a solution vector with one named column per unknown.
pub fn save_vector_to_csv(
    x: &DVector<f64>,
    headers: &Vec<String>,
    filename: &str,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(headers)?;
    writer.write_record(x.iter().map(|val| val.to_string()))?;

    writer.flush()?;
    Ok(())
}
