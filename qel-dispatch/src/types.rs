//! Tipos compartilhados do despacho

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// Identificador de andar
pub type LocationId = i32;

/// Tempo lógico em milissegundos
pub type Millis = u64;

/// Confiança de presença por andar
pub type ConfidenceMap = HashMap<LocationId, f64>;

/// ID único de chamada (`<andar>-<sequência>`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub(crate) fn new(location: LocationId, sequence: u64) -> Self {
        Self(format!("{}-{}", location, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direção do elevador
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Stopped,
}

impl Direction {
    /// Direção de `from` para `to`
    pub fn between(from: LocationId, to: LocationId) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Self::Up,
            std::cmp::Ordering::Less => Self::Down,
            std::cmp::Ordering::Equal => Self::Stopped,
        }
    }

    /// Deslocamento de um andar nesta direção
    pub fn step(&self) -> LocationId {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            Self::Stopped => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leitura do sensor de presença para um andar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    pub location: LocationId,
    pub detected: bool,
    /// Confiança em [0, 1]
    pub confidence: f64,
    pub last_update: Millis,
}

impl PresenceSnapshot {
    /// Leitura vazia (sem presença)
    pub fn absent(location: LocationId, now: Millis) -> Self {
        Self {
            location,
            detected: false,
            confidence: 0.0,
            last_update: now,
        }
    }
}
