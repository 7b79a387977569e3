use anyhow::Context;

use clinic_app::{ClinicConfig, ClinicContext};
use clinic_observability::LogFormat;

fn main() -> anyhow::Result<()> {
    let format = match std::env::var("CLINIC_LOG_FORMAT") {
        Ok(raw) => LogFormat::parse(&raw).unwrap_or_default(),
        Err(_) => LogFormat::default(),
    };
    clinic_observability::init_with(format);

    let config = ClinicConfig::from_env();
    let context = ClinicContext::open(&config)
        .with_context(|| format!("failed to open clinic data in {}", config.data_dir.display()))?;

    let summary = context.summary();
    tracing::info!(
        doctors = summary.doctors,
        patients = summary.patients,
        appointments = summary.appointments,
        consultations = summary.consultations,
        specialties = summary.specialties,
        "clinic data loaded"
    );

    Ok(())
}
