//! Configuração do prédio, das chamadas e do movimento

use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};
use crate::error::{DispatchError, DispatchResult};
use crate::types::{LocationId, Millis};

/// Maior número de andares aceito por `validate`
pub const MAX_FLOORS: i64 = 1024;

/// Andares atendidos pelo elevador
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    /// Andar mais baixo
    pub lowest_floor: LocationId,
    /// Andar mais alto
    pub highest_floor: LocationId,
    /// Andar inicial e de reset
    pub home_floor: LocationId,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            lowest_floor: 1,
            highest_floor: 5,
            home_floor: 1,
        }
    }
}

impl BuildingConfig {
    /// Andar pertence ao prédio?
    pub fn contains(&self, location: LocationId) -> bool {
        (self.lowest_floor..=self.highest_floor).contains(&location)
    }

    /// Todos os andares, de baixo para cima
    pub fn floors(&self) -> RangeInclusive<LocationId> {
        self.lowest_floor..=self.highest_floor
    }

    /// Andar nas extremidades (térreo ou topo)?
    pub fn is_edge(&self, location: LocationId) -> bool {
        location == self.lowest_floor || location == self.highest_floor
    }

    /// Rejeita andares fora do prédio
    pub fn check(&self, location: LocationId) -> DispatchResult<()> {
        if self.contains(location) {
            Ok(())
        } else {
            Err(DispatchError::UnknownLocation {
                location,
                lowest: self.lowest_floor,
                highest: self.highest_floor,
            })
        }
    }

    pub fn validate(&self) -> DispatchResult<()> {
        if self.lowest_floor > self.highest_floor {
            return Err(DispatchError::InvalidConfiguration(format!(
                "lowest_floor {} above highest_floor {}",
                self.lowest_floor, self.highest_floor
            )));
        }
        let span = i64::from(self.highest_floor) - i64::from(self.lowest_floor) + 1;
        if span > MAX_FLOORS {
            return Err(DispatchError::InvalidConfiguration(format!(
                "building spans {} floors, at most {} allowed",
                span, MAX_FLOORS
            )));
        }
        if !self.contains(self.home_floor) {
            return Err(DispatchError::InvalidConfiguration(format!(
                "home_floor {} outside {}..={}",
                self.home_floor, self.lowest_floor, self.highest_floor
            )));
        }
        Ok(())
    }
}

/// Contadores das chamadas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Segundos até a chamada expirar
    pub request_timeout_secs: i32,
    /// Segundos tolerados sem presença detectada
    pub presence_grace_secs: i32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            presence_grace_secs: 5,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> DispatchResult<()> {
        if self.request_timeout_secs <= 0 || self.presence_grace_secs <= 0 {
            return Err(DispatchError::InvalidConfiguration(
                "request_timeout_secs and presence_grace_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Temporização do movimento
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Tempo com portas abertas após a chegada (ms)
    pub door_dwell_ms: Millis,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { door_dwell_ms: 2500 }
    }
}
