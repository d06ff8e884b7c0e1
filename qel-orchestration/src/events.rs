//! Log de eventos da simulação
//!
//! Histórico limitado, mais recente primeiro. Cada entrada também é emitida
//! via `tracing`.

use std::collections::VecDeque;
use std::fmt;
use serde::{Deserialize, Serialize};
use qel_dispatch::Millis;

/// Capacidade padrão do log
pub const DEFAULT_LOG_CAPACITY: usize = 25;
/// Maior capacidade aceita na configuração
pub const MAX_LOG_CAPACITY: usize = 10_000;

/// Classificação de uma entrada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Info,
    Success,
    Warning,
    /// Roteamento, medição e expiração por timeout
    Quantum,
    /// Sensor de presença
    Sensor,
    /// Chamada abandonada sem presença
    Presence,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Quantum => "quantum",
            Self::Sensor => "sensor",
            Self::Presence => "presence",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entrada do log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Tempo lógico (ms)
    pub timestamp: Millis,
    pub message: String,
    pub kind: EventKind,
}

/// Log limitado, mais recente primeiro
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    /// Cria log com capacidade
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adiciona entrada no topo; descarta a mais antiga se cheio
    pub fn push(&mut self, timestamp: Millis, kind: EventKind, message: impl Into<String>) {
        let message = message.into();

        match kind {
            EventKind::Warning => tracing::warn!(timestamp, kind = %kind, "{}", message),
            _ => tracing::info!(timestamp, kind = %kind, "{}", message),
        }

        self.entries.push_front(LogEntry { timestamp, message, kind });
        self.entries.truncate(self.capacity);
    }

    /// Entradas, mais recente primeiro
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entrada mais recente
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Entradas de um tipo
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Cópia das entradas
    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Limpa o histórico
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = EventLog::default();
        log.push(0, EventKind::Info, "first");
        log.push(1000, EventKind::Success, "second");

        assert_eq!(log.latest().unwrap().message, "second");
        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn test_bounded_history() {
        let mut log = EventLog::default();
        for i in 0..40 {
            log.push(i, EventKind::Info, format!("entry {}", i));
        }

        assert_eq!(log.len(), DEFAULT_LOG_CAPACITY);
        assert_eq!(log.latest().unwrap().message, "entry 39");
        assert_eq!(log.entries().last().unwrap().message, "entry 15");
    }

    #[test]
    fn test_filter_by_kind() {
        let mut log = EventLog::with_capacity(10);
        log.push(0, EventKind::Warning, "dup");
        log.push(0, EventKind::Quantum, "route");
        log.push(0, EventKind::Warning, "dup again");

        assert_eq!(log.of_kind(EventKind::Warning).count(), 2);
        assert_eq!(log.of_kind(EventKind::Sensor).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::default();
        log.push(0, EventKind::Info, "x");
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_kind_serialization() {
        let entry = LogEntry { timestamp: 5, message: "m".into(), kind: EventKind::Presence };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "presence");
    }
}
