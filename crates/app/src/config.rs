//! Runtime configuration.

use std::path::PathBuf;

use clinic_scheduling::TransitionPolicy;

pub const DOCTORS_FILE: &str = "doctors.json";
pub const PATIENTS_FILE: &str = "patients.json";
pub const APPOINTMENTS_FILE: &str = "appointments.json";
pub const CONSULTATIONS_FILE: &str = "consultations.json";
pub const SPECIALTIES_FILE: &str = "specialties.json";

/// Where collections are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// One JSON file per collection under `data_dir`.
    #[default]
    Json,
    /// Process memory only; nothing survives a restart.
    Memory,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

fn parse_policy(value: &str) -> Option<TransitionPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "permissive" => Some(TransitionPolicy::Permissive),
        "strict" => Some(TransitionPolicy::Strict),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicConfig {
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub transition_policy: TransitionPolicy,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage: StorageBackend::Json,
            transition_policy: TransitionPolicy::Permissive,
        }
    }
}

impl ClinicConfig {
    /// JSON storage rooted at `data_dir`, other settings default.
    pub fn json(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            ..Self::default()
        }
    }

    /// Read `CLINIC_DATA_DIR`, `CLINIC_STORAGE` and `CLINIC_STATUS_TRANSITIONS`.
    ///
    /// Unset variables keep their default; unrecognised values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("CLINIC_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("CLINIC_STORAGE") {
            match StorageBackend::parse(&raw) {
                Some(storage) => config.storage = storage,
                None => tracing::warn!(value = %raw, "unknown CLINIC_STORAGE; using json"),
            }
        }

        if let Some(raw) = lookup("CLINIC_STATUS_TRANSITIONS") {
            match parse_policy(&raw) {
                Some(policy) => config.transition_policy = policy,
                None => tracing::warn!(
                    value = %raw,
                    "unknown CLINIC_STATUS_TRANSITIONS; using permissive"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(ClinicConfig::from_lookup(lookup(&[])), ClinicConfig::default());
    }

    #[test]
    fn reads_all_settings() {
        let config = ClinicConfig::from_lookup(lookup(&[
            ("CLINIC_DATA_DIR", "/var/lib/clinic"),
            ("CLINIC_STORAGE", "Memory"),
            ("CLINIC_STATUS_TRANSITIONS", "strict"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/clinic"));
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.transition_policy, TransitionPolicy::Strict);
    }

    #[test]
    fn unknown_values_fall_back() {
        let config = ClinicConfig::from_lookup(lookup(&[
            ("CLINIC_STORAGE", "postgres"),
            ("CLINIC_STATUS_TRANSITIONS", "whatever"),
        ]));

        assert_eq!(config.storage, StorageBackend::Json);
        assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
    }
}
