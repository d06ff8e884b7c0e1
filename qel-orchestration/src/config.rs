//! Configuração da simulação
//!
//! Todos os campos têm padrão; um arquivo TOML só precisa listar o que muda:
//!
//! ```toml
//! tick_interval_ms = 1000
//! policy = "cost-based"
//! seed = 42
//!
//! [building]
//! highest_floor = 8
//!
//! [registry]
//! request_timeout_secs = 15
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use qel_dispatch::{BuildingConfig, DispatchPolicy, Millis, MotionConfig, RegistryConfig};
use qel_quantum::MAX_QUBITS;
use crate::error::{OrchestrationError, OrchestrationResult};
use crate::events::{DEFAULT_LOG_CAPACITY, MAX_LOG_CAPACITY};
use crate::pacer::PacerConfig;

/// Configuração completa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Duração lógica de um tick (ms)
    pub tick_interval_ms: Millis,
    /// Política inicial
    pub policy: DispatchPolicy,
    /// Qubits do registrador
    pub qubits: usize,
    /// Entradas mantidas no log
    pub log_capacity: usize,
    /// Semente do sensor e da medição; sem semente usa entropia do sistema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub building: BuildingConfig,
    pub registry: RegistryConfig,
    pub motion: MotionConfig,
    pub pacing: PacerConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            policy: DispatchPolicy::Fcfs,
            qubits: 3,
            log_capacity: DEFAULT_LOG_CAPACITY,
            seed: None,
            building: BuildingConfig::default(),
            registry: RegistryConfig::default(),
            motion: MotionConfig::default(),
            pacing: PacerConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Lê TOML de uma string e valida
    pub fn from_toml_str(source: &str) -> OrchestrationResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| OrchestrationError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Lê TOML de um arquivo e valida
    pub fn load(path: impl AsRef<Path>) -> OrchestrationResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| OrchestrationError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Serializa como TOML
    pub fn to_toml(&self) -> OrchestrationResult<String> {
        toml::to_string_pretty(self).map_err(|e| OrchestrationError::ConfigParse(e.to_string()))
    }

    /// Verifica limites
    pub fn validate(&self) -> OrchestrationResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(OrchestrationError::InvalidConfiguration(
                "tick_interval_ms must be positive".into(),
            ));
        }
        if self.qubits == 0 || self.qubits > MAX_QUBITS {
            return Err(OrchestrationError::InvalidConfiguration(format!(
                "qubits must be in 1..={}, got {}",
                MAX_QUBITS, self.qubits
            )));
        }
        if self.log_capacity == 0 || self.log_capacity > MAX_LOG_CAPACITY {
            return Err(OrchestrationError::InvalidConfiguration(format!(
                "log_capacity must be in 1..={}, got {}",
                MAX_LOG_CAPACITY, self.log_capacity
            )));
        }
        self.building.validate()?;
        self.registry.validate()?;
        Ok(())
    }
}
