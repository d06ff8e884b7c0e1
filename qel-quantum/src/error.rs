//! Tipos de erro para qel-quantum

use thiserror::Error;

/// Resultado customizado para operações quânticas
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Erros que podem ocorrer em operações quânticas
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantumError {
    #[error("Invalid qubit index {index}: register has {qubits} qubits")]
    InvalidQubitIndex { index: usize, qubits: usize },

    #[error("Invalid gate arguments: {0}")]
    InvalidGateArgs(String),

    #[error("Invalid register size: {requested} qubits (allowed 1..={max})")]
    InvalidRegisterSize { requested: usize, max: usize },

    #[error("Cannot parse gate '{0}'")]
    ParseGate(String),
}
