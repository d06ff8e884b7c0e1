//! # Quantum Gates — Portas do registrador
//!
//! Implementa as portas suportadas pelo simulador sobre o vetor de amplitudes.
//!
//! ## Gates Implementadas
//!
//! - **Single-qubit**: H (Hadamard), X, Y, Z (Pauli)
//! - **Two-qubit**: CNOT
//!
//! Cada kernel percorre o vetor uma vez, visitando cada par `(i, i ^ (1 << k))`
//! a partir do índice com bit `k` = 0, e lê os dois valores antes de escrever.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use crate::error::{QuantumError, QuantumResult};

/// Tipo de porta suportada
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard: cria superposição
    H,
    /// Pauli-X (NOT quântico)
    X,
    /// Pauli-Y
    Y,
    /// Pauli-Z (phase flip)
    Z,
    /// NOT controlado
    Cnot,
}

impl GateKind {
    /// Nome descritivo
    pub fn name(&self) -> &'static str {
        match self {
            Self::H => "H",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Cnot => "CNOT",
        }
    }

    /// Porta exige qubit de controle?
    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Cnot)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GateKind {
    type Err = QuantumError;

    fn from_str(s: &str) -> QuantumResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(Self::H),
            "X" => Ok(Self::X),
            "Y" => Ok(Self::Y),
            "Z" => Ok(Self::Z),
            "CNOT" | "CX" => Ok(Self::Cnot),
            _ => Err(QuantumError::ParseGate(s.to_string())),
        }
    }
}

/// Aplicação de uma porta: tipo, qubit alvo e controle opcional
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateOp {
    pub kind: GateKind,
    /// Qubit alvo
    pub qubit: usize,
    /// Qubit de controle (somente CNOT)
    pub control: Option<usize>,
}

impl GateOp {
    /// Porta de um qubit
    pub const fn single(kind: GateKind, qubit: usize) -> Self {
        Self { kind, qubit, control: None }
    }

    /// CNOT com controle e alvo
    pub const fn cnot(control: usize, target: usize) -> Self {
        Self {
            kind: GateKind::Cnot,
            qubit: target,
            control: Some(control),
        }
    }

    /// Valida índices e argumentos contra um registrador de `qubits` qubits
    pub fn validate(&self, qubits: usize) -> QuantumResult<()> {
        if self.qubit >= qubits {
            return Err(QuantumError::InvalidQubitIndex { index: self.qubit, qubits });
        }

        match (self.kind, self.control) {
            (GateKind::Cnot, None) => Err(QuantumError::InvalidGateArgs(
                "CNOT requires a control qubit".into(),
            )),
            (GateKind::Cnot, Some(control)) if control >= qubits => {
                Err(QuantumError::InvalidQubitIndex { index: control, qubits })
            }
            (GateKind::Cnot, Some(control)) if control == self.qubit => Err(
                QuantumError::InvalidGateArgs(format!(
                    "CNOT control and target must differ (both {})",
                    control
                )),
            ),
            (kind, Some(_)) if !kind.is_controlled() => Err(QuantumError::InvalidGateArgs(
                format!("{} does not take a control qubit", kind),
            )),
            _ => Ok(()),
        }
    }

    /// Aplica ao vetor de amplitudes. Assume `validate` já executado.
    pub(crate) fn apply_to(&self, amplitudes: &mut [Complex64]) {
        match self.kind {
            GateKind::H => hadamard(amplitudes, self.qubit),
            GateKind::X => pauli_x(amplitudes, self.qubit),
            GateKind::Y => pauli_y(amplitudes, self.qubit),
            GateKind::Z => pauli_z(amplitudes, self.qubit),
            GateKind::Cnot => {
                if let Some(control) = self.control {
                    cnot(amplitudes, control, self.qubit);
                }
            }
        }
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.control {
            Some(control) => write!(f, "{}{},{}", self.kind, control, self.qubit),
            None => write!(f, "{}{}", self.kind, self.qubit),
        }
    }
}

/// Forma textual: `H0`, `Y2`, `CNOT1,0` (controle 1, alvo 0)
impl FromStr for GateOp {
    type Err = QuantumError;

    fn from_str(s: &str) -> QuantumResult<Self> {
        let text = s.trim();
        let parse_err = || QuantumError::ParseGate(s.to_string());
        let split = text.find(|c: char| c.is_ascii_digit()).ok_or_else(parse_err)?;
        let (name, args) = text.split_at(split);
        let kind: GateKind = name.parse().map_err(|_| parse_err())?;
        let index = |raw: &str| raw.trim().parse::<usize>().map_err(|_| parse_err());

        if kind.is_controlled() {
            let (control, target) = args.split_once(',').ok_or_else(parse_err)?;
            Ok(Self::cnot(index(control)?, index(target)?))
        } else {
            Ok(Self::single(kind, index(args)?))
        }
    }
}

// =============================================================================
// Kernels
// =============================================================================

fn hadamard(amplitudes: &mut [Complex64], qubit: usize) {
    let mask = 1usize << qubit;
    for i in 0..amplitudes.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (a, b) = (amplitudes[i], amplitudes[j]);
            amplitudes[i] = (a + b) * FRAC_1_SQRT_2;
            amplitudes[j] = (a - b) * FRAC_1_SQRT_2;
        }
    }
}

fn pauli_x(amplitudes: &mut [Complex64], qubit: usize) {
    let mask = 1usize << qubit;
    for i in 0..amplitudes.len() {
        if i & mask == 0 {
            amplitudes.swap(i, i | mask);
        }
    }
}

fn pauli_y(amplitudes: &mut [Complex64], qubit: usize) {
    let mask = 1usize << qubit;
    let i_unit = Complex64::i();
    for i in 0..amplitudes.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (a, b) = (amplitudes[i], amplitudes[j]);
            amplitudes[i] = -i_unit * b;
            amplitudes[j] = i_unit * a;
        }
    }
}

fn pauli_z(amplitudes: &mut [Complex64], qubit: usize) {
    let mask = 1usize << qubit;
    for (i, amp) in amplitudes.iter_mut().enumerate() {
        if i & mask != 0 {
            *amp = -*amp;
        }
    }
}

fn cnot(amplitudes: &mut [Complex64], control: usize, target: usize) {
    let control_mask = 1usize << control;
    let target_mask = 1usize << target;
    for i in 0..amplitudes.len() {
        if i & control_mask != 0 && i & target_mask == 0 {
            amplitudes.swap(i, i | target_mask);
        }
    }
}

// =============================================================================
// Testes
// =============================================================================
