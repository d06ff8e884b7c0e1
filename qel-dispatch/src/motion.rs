//! Máquina de estados do movimento do elevador

use serde::{Deserialize, Serialize};
use crate::config::MotionConfig;
use crate::types::{Direction, LocationId, Millis};

/// Estado visível do elevador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatorMotionState {
    /// Andar atual
    pub position: LocationId,
    pub is_moving: bool,
    pub doors_open: bool,
    pub direction: Direction,
}

impl ElevatorMotionState {
    /// Parado, portas fechadas
    pub fn parked(position: LocationId) -> Self {
        Self {
            position,
            is_moving: false,
            doors_open: false,
            direction: Direction::Stopped,
        }
    }
}

/// Fase interna da máquina
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    Idle,
    Moving { target: LocationId },
    /// Portas abertas até `close_at`
    DoorsOpen { close_at: Millis },
}

/// Resultado de um despacho
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Movimento iniciado
    Started { target: LocationId, direction: Direction },
    /// Já está no andar alvo (no-op)
    AlreadyAtTarget,
    /// Em movimento ou com portas abertas (no-op)
    Busy,
}

/// Evento produzido por um passo da máquina
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// Avançou um andar
    Moved { position: LocationId, direction: Direction },
    /// Chegou ao alvo e abriu as portas
    Arrived { position: LocationId },
    /// Fechou as portas e voltou a ficar livre
    DoorsClosed { position: LocationId },
}

/// Controlador do movimento: Idle → Moving → DoorsOpen → Idle
#[derive(Debug, Clone)]
pub struct MotionController {
    config: MotionConfig,
    home: LocationId,
    state: ElevatorMotionState,
    phase: MotionPhase,
}

impl MotionController {
    /// Cria parado no andar `home`
    pub fn new(home: LocationId, config: MotionConfig) -> Self {
        Self {
            config,
            home,
            state: ElevatorMotionState::parked(home),
            phase: MotionPhase::Idle,
        }
    }

    /// Estado visível
    pub fn state(&self) -> ElevatorMotionState {
        self.state
    }

    /// Fase interna
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Andar atual
    pub fn position(&self) -> LocationId {
        self.state.position
    }

    /// Livre para receber despacho?
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, MotionPhase::Idle)
    }

    /// Inicia movimento para `target`. Ignora se ocupado ou já no andar.
    pub fn dispatch(&mut self, target: LocationId) -> DispatchOutcome {
        if !self.is_idle() {
            tracing::debug!(target, phase = ?self.phase, "dispatch ignored: elevator busy");
            return DispatchOutcome::Busy;
        }
        if target == self.state.position {
            tracing::debug!(target, "dispatch ignored: already at target");
            return DispatchOutcome::AlreadyAtTarget;
        }

        let direction = Direction::between(self.state.position, target);
        self.state.is_moving = true;
        self.state.direction = direction;
        self.phase = MotionPhase::Moving { target };
        DispatchOutcome::Started { target, direction }
    }

    /// Avança a máquina no instante `now`.
    ///
    /// Em movimento anda um andar por chamada; ao chegar abre as portas e
    /// agenda o fechamento para `now + door_dwell_ms`.
    pub fn step(&mut self, now: Millis) -> Option<MotionEvent> {
        match self.phase {
            MotionPhase::Idle => None,
            MotionPhase::Moving { target } => {
                self.state.position += self.state.direction.step();

                if self.state.position == target {
                    self.state.is_moving = false;
                    self.state.doors_open = true;
                    self.state.direction = Direction::Stopped;
                    self.phase = MotionPhase::DoorsOpen {
                        close_at: now + self.config.door_dwell_ms,
                    };
                    Some(MotionEvent::Arrived { position: target })
                } else {
                    Some(MotionEvent::Moved {
                        position: self.state.position,
                        direction: self.state.direction,
                    })
                }
            }
            MotionPhase::DoorsOpen { close_at } if now >= close_at => {
                self.state.doors_open = false;
                self.phase = MotionPhase::Idle;
                Some(MotionEvent::DoorsClosed { position: self.state.position })
            }
            MotionPhase::DoorsOpen { .. } => None,
        }
    }

    /// Descarta movimento e fechamento pendente, volta ao andar inicial
    pub fn reset(&mut self) {
        self.state = ElevatorMotionState::parked(self.home);
        self.phase = MotionPhase::Idle;
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(1, MotionConfig::default())
    }
}
