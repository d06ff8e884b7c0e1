//! Erros de orquestração

use thiserror::Error;
use qel_dispatch::DispatchError;
use qel_quantum::QuantumError;

pub type OrchestrationResult<T> = Result<T, OrchestrationError>;

/// Erros de orquestração
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrchestrationError {
    /// Erro do registrador quântico
    #[error("Quantum error: {0}")]
    Quantum(#[from] QuantumError),

    /// Erro do despacho
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Configuração inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Falha ao ler arquivo de configuração
    #[error("Failed to read config {path}: {message}")]
    ConfigIo { path: String, message: String },

    /// TOML inválido
    #[error("Failed to parse config: {0}")]
    ConfigParse(String),
}
