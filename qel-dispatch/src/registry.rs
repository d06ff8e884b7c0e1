//! Registro de chamadas ativas

use serde::{Deserialize, Serialize};
use crate::config::{BuildingConfig, RegistryConfig};
use crate::error::{DispatchError, DispatchResult};
use crate::presence::PresenceSource;
use crate::types::{LocationId, Millis, PresenceSnapshot, RequestId};

/// Chamada pendente de um andar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorRequest {
    pub id: RequestId,
    pub location: LocationId,
    /// Instante da chamada (tempo lógico)
    pub created_at: Millis,
    /// Segundos até expirar
    pub seconds_remaining: i32,
    /// Presença detectada no último tick
    pub presence_detected: bool,
    /// Segundos tolerados sem presença
    pub presence_grace_secs: i32,
    /// Valor inicial de `seconds_remaining`
    pub timeout_secs: i32,
}

impl FloorRequest {
    /// Segundos de espera desde a chamada
    pub fn waited_secs(&self) -> i32 {
        self.timeout_secs - self.seconds_remaining
    }

    fn expiry_reason(&self) -> Option<ExpiryReason> {
        if self.seconds_remaining <= 0 {
            Some(ExpiryReason::Timeout)
        } else if self.presence_grace_secs <= 0 {
            Some(ExpiryReason::Abandoned)
        } else {
            None
        }
    }
}

/// Motivo da expiração
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryReason {
    /// Tempo esgotado
    Timeout,
    /// Ninguém detectado durante o período de tolerância
    Abandoned,
}

/// Chamada removida por expiração
#[derive(Debug, Clone, PartialEq)]
pub struct Expiry {
    pub request: FloorRequest,
    pub reason: ExpiryReason,
}

/// Registro de chamadas, em ordem de inserção
#[derive(Debug, Clone)]
pub struct RequestRegistry {
    config: RegistryConfig,
    building: BuildingConfig,
    requests: Vec<FloorRequest>,
    /// Contador para IDs únicos
    next_id: u64,
}

impl RequestRegistry {
    /// Cria novo registro
    pub fn new(config: RegistryConfig, building: BuildingConfig) -> Self {
        Self {
            config,
            building,
            requests: Vec::new(),
            next_id: 0,
        }
    }

    /// Gera ID único
    fn generate_id(&mut self, location: LocationId) -> RequestId {
        let id = RequestId::new(location, self.next_id);
        self.next_id += 1;
        id
    }

    /// Registra uma chamada e avisa o sensor do andar.
    ///
    /// Falha com `DuplicateRequest` se o andar já tem chamada ativa.
    pub fn submit<P>(
        &mut self,
        location: LocationId,
        now: Millis,
        presence: &mut P,
    ) -> DispatchResult<RequestId>
    where
        P: PresenceSource + ?Sized,
    {
        self.building.check(location)?;

        if self.contains_location(location) {
            return Err(DispatchError::DuplicateRequest(location));
        }

        let id = self.generate_id(location);
        self.requests.push(FloorRequest {
            id: id.clone(),
            location,
            created_at: now,
            seconds_remaining: self.config.request_timeout_secs,
            presence_detected: true,
            presence_grace_secs: self.config.presence_grace_secs,
            timeout_secs: self.config.request_timeout_secs,
        });

        presence.trigger_elevated(location, now);
        tracing::debug!(%id, location, "request registered");
        Ok(id)
    }

    /// Avança um segundo: decrementa contadores, atualiza presença e remove
    /// chamadas expiradas. Timeout tem precedência sobre abandono.
    pub fn tick(&mut self, snapshots: &[PresenceSnapshot]) -> Vec<Expiry> {
        let mut expired = Vec::new();
        let mut active = Vec::with_capacity(self.requests.len());

        for mut request in self.requests.drain(..) {
            request.seconds_remaining -= 1;
            request.presence_detected = snapshots
                .iter()
                .find(|s| s.location == request.location)
                .is_some_and(|s| s.detected);

            if request.presence_detected {
                request.presence_grace_secs = self.config.presence_grace_secs;
            } else {
                request.presence_grace_secs -= 1;
            }

            match request.expiry_reason() {
                Some(reason) => {
                    tracing::debug!(id = %request.id, location = request.location, ?reason, "request expired");
                    expired.push(Expiry { request, reason });
                }
                None => active.push(request),
            }
        }

        self.requests = active;
        expired
    }

    /// Remove uma chamada. Sem efeito se já não existe.
    pub fn remove(&mut self, id: &RequestId) -> Option<FloorRequest> {
        let position = self.requests.iter().position(|r| &r.id == id)?;
        Some(self.requests.remove(position))
    }

    /// Chamadas ativas em ordem de inserção
    pub fn active_requests(&self) -> &[FloorRequest] {
        &self.requests
    }

    /// Busca chamada por ID
    pub fn get(&self, id: &RequestId) -> Option<&FloorRequest> {
        self.requests.iter().find(|r| &r.id == id)
    }

    /// Andar já tem chamada ativa?
    pub fn contains_location(&self, location: LocationId) -> bool {
        self.requests.iter().any(|r| r.location == location)
    }

    /// Conta chamadas
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Limpa todas as chamadas
    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

impl Default for RequestRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default(), BuildingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::FixedPresence;

    fn present(location: LocationId) -> PresenceSnapshot {
        PresenceSnapshot { location, detected: true, confidence: 0.9, last_update: 0 }
    }

    #[test]
    fn test_submit_defaults() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();

        let id = registry.submit(3, 1000, &mut presence).unwrap();
        let request = registry.get(&id).unwrap();

        assert_eq!(request.location, 3);
        assert_eq!(request.created_at, 1000);
        assert_eq!(request.seconds_remaining, 10);
        assert_eq!(request.presence_grace_secs, 5);
        assert!(request.presence_detected);
        assert_eq!(request.waited_secs(), 0);
    }

    #[test]
    fn test_submit_triggers_sensor() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();

        registry.submit(2, 500, &mut presence).unwrap();
        let reading = presence.snapshot(2).unwrap();
        assert!(reading.detected);
        assert_eq!(reading.last_update, 500);
    }

    #[test]
    fn test_duplicate_submit() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();

        registry.submit(4, 0, &mut presence).unwrap();
        let result = registry.submit(4, 10, &mut presence);
        assert_eq!(result, Err(DispatchError::DuplicateRequest(4)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_submit_outside_building() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();

        assert!(matches!(
            registry.submit(6, 0, &mut presence),
            Err(DispatchError::UnknownLocation { location: 6, .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unique_ids_after_resubmit() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();

        let first = registry.submit(1, 0, &mut presence).unwrap();
        registry.remove(&first);
        let second = registry.submit(1, 0, &mut presence).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_tick_updates_presence_and_grace() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();
        registry.submit(2, 0, &mut presence).unwrap();
        registry.submit(3, 0, &mut presence).unwrap();

        let expired = registry.tick(&[present(2)]);
        assert!(expired.is_empty());

        let requests = registry.active_requests();
        assert_eq!(requests[0].seconds_remaining, 9);
        assert!(requests[0].presence_detected);
        assert_eq!(requests[0].presence_grace_secs, 5);

        // Sem leitura para o andar 3 = sem presença
        assert!(!requests[1].presence_detected);
        assert_eq!(requests[1].presence_grace_secs, 4);
    }

    #[test]
    fn test_timeout_even_with_presence() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();
        registry.submit(5, 0, &mut presence).unwrap();

        for _ in 0..9 {
            assert!(registry.tick(&[present(5)]).is_empty());
        }
        let expired = registry.tick(&[present(5)]);

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].reason, ExpiryReason::Timeout);
        assert_eq!(expired[0].request.location, 5);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_abandoned_without_presence() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();
        registry.submit(3, 0, &mut presence).unwrap();

        for _ in 0..4 {
            assert!(registry.tick(&[]).is_empty());
        }
        let expired = registry.tick(&[]);

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].reason, ExpiryReason::Abandoned);
        assert_eq!(expired[0].request.seconds_remaining, 5);
    }

    #[test]
    fn test_timeout_checked_before_abandoned() {
        let config = RegistryConfig { request_timeout_secs: 3, presence_grace_secs: 3 };
        let mut registry = RequestRegistry::new(config, BuildingConfig::default());
        let mut presence = FixedPresence::default();
        registry.submit(1, 0, &mut presence).unwrap();

        registry.tick(&[]);
        registry.tick(&[]);
        let expired = registry.tick(&[]);

        // Ambos os contadores chegam a zero no mesmo tick
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].reason, ExpiryReason::Timeout);
    }

    #[test]
    fn test_presence_resets_grace() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();
        registry.submit(2, 0, &mut presence).unwrap();

        registry.tick(&[]);
        registry.tick(&[]);
        assert_eq!(registry.active_requests()[0].presence_grace_secs, 3);

        registry.tick(&[present(2)]);
        assert_eq!(registry.active_requests()[0].presence_grace_secs, 5);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();
        let id = registry.submit(2, 0, &mut presence).unwrap();

        assert!(registry.remove(&id).is_some());
        assert!(registry.remove(&id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear_registry() {
        let mut registry = RequestRegistry::default();
        let mut presence = FixedPresence::default();
        registry.submit(1, 0, &mut presence).unwrap();
        registry.submit(2, 0, &mut presence).unwrap();

        registry.clear();
        assert_eq!(registry.len(), 0);
    }
}
