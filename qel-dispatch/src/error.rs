//! Erros do despacho

use thiserror::Error;
use crate::types::LocationId;

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Erros de despacho
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Já existe chamada ativa para o andar
    #[error("Floor {0} already has an active call")]
    DuplicateRequest(LocationId),

    /// Andar fora do prédio
    #[error("Floor {location} outside building range {lowest}..={highest}")]
    UnknownLocation {
        location: LocationId,
        lowest: LocationId,
        highest: LocationId,
    },

    /// Configuração inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
