//! Políticas de despacho
//!
//! Funções puras sobre `(chamadas, posição, confiança)`. Chamadas sem presença
//! detectada nunca são candidatas.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::DispatchError;
use crate::registry::FloorRequest;
use crate::types::{ConfidenceMap, LocationId};

/// Peso do tempo de espera no custo
pub const WAIT_WEIGHT: f64 = 0.1;
/// Peso da falta de confiança no custo
pub const PRESENCE_WEIGHT: f64 = 2.0;

/// Política de seleção da próxima chamada
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchPolicy {
    /// Primeira chamada a chegar
    #[default]
    Fcfs,
    /// Menor custo (distância + espera + confiança)
    CostBased,
}

impl DispatchPolicy {
    /// Seleciona a próxima chamada
    pub fn select<'a>(
        &self,
        requests: &'a [FloorRequest],
        position: LocationId,
        confidence: &ConfidenceMap,
    ) -> Option<&'a FloorRequest> {
        match self {
            Self::Fcfs => fcfs(requests),
            Self::CostBased => cost_based(requests, position, confidence),
        }
    }

    /// Nome descritivo
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::CostBased => "cost optimization",
        }
    }
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DispatchPolicy {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "cost" | "cost-based" | "quantum" => Ok(Self::CostBased),
            other => Err(DispatchError::InvalidConfiguration(format!(
                "unknown dispatch policy '{}'",
                other
            ))),
        }
    }
}

/// FCFS: a chamada mais antiga com presença; empate fica com a primeira inserida
pub fn fcfs(requests: &[FloorRequest]) -> Option<&FloorRequest> {
    requests
        .iter()
        .filter(|r| r.presence_detected)
        .fold(None, |oldest: Option<&FloorRequest>, current| match oldest {
            Some(best) if best.created_at <= current.created_at => Some(best),
            _ => Some(current),
        })
}

/// Custo de atender `request` a partir de `position`:
/// `|posição - andar| + 0.1 * espera + 2 * (1 - confiança)`
pub fn dispatch_cost(position: LocationId, request: &FloorRequest, confidence: f64) -> f64 {
    let distance = (i64::from(position) - i64::from(request.location)).abs() as f64;
    let wait_penalty = WAIT_WEIGHT * request.waited_secs() as f64;
    let presence_penalty = PRESENCE_WEIGHT * (1.0 - confidence);
    distance + wait_penalty + presence_penalty
}

/// Menor custo; confiança ausente vale 0; empate fica com o primeiro encontrado
pub fn cost_based<'a>(
    requests: &'a [FloorRequest],
    position: LocationId,
    confidence: &ConfidenceMap,
) -> Option<&'a FloorRequest> {
    let mut best: Option<(&FloorRequest, f64)> = None;

    for request in requests.iter().filter(|r| r.presence_detected) {
        let presence = confidence.get(&request.location).copied().unwrap_or(0.0);
        let cost = dispatch_cost(position, request, presence);
        tracing::trace!(location = request.location, cost, "candidate cost");

        match best {
            Some((_, min_cost)) if cost >= min_cost => {}
            _ => best = Some((request, cost)),
        }
    }

    best.map(|(request, _)| request)
}
