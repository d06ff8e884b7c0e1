//! Registrador quântico (vetor de estado)

use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{QuantumError, QuantumResult};
use crate::gates::{GateKind, GateOp};

/// Limite de qubits aceito pelo registrador (2^24 amplitudes)
pub const MAX_QUBITS: usize = 24;

/// Registrador de `n` qubits com `2^n` amplitudes complexas.
///
/// O índice de cada amplitude é o inteiro cujos bits são os valores dos
/// qubits: o bit `k` corresponde ao qubit `k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumRegister {
    /// Número de qubits
    qubits: usize,
    /// Amplitudes indexadas pelo estado de base
    amplitudes: Vec<Complex64>,
    /// Portas aplicadas desde o último reset
    history: Vec<GateOp>,
    /// Número de medições realizadas
    measurement_count: u64,
}

impl QuantumRegister {
    /// Cria registrador no estado fundamental |0…0⟩
    pub fn new(qubits: usize) -> QuantumResult<Self> {
        if qubits == 0 || qubits > MAX_QUBITS {
            return Err(QuantumError::InvalidRegisterSize {
                requested: qubits,
                max: MAX_QUBITS,
            });
        }

        Ok(Self {
            qubits,
            amplitudes: ground_state(1 << qubits),
            history: Vec::new(),
            measurement_count: 0,
        })
    }

    /// Número de qubits
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Dimensão do espaço (2^n)
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitudes atuais
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Portas aplicadas desde o último reset
    pub fn history(&self) -> &[GateOp] {
        &self.history
    }

    /// Número de medições realizadas
    pub fn measurement_count(&self) -> u64 {
        self.measurement_count
    }

    /// Aplica uma porta. Em caso de erro o estado não muda.
    pub fn apply(&mut self, op: GateOp) -> QuantumResult<()> {
        op.validate(self.qubits)?;
        op.apply_to(&mut self.amplitudes);
        self.history.push(op);
        tracing::debug!(gate = %op, "gate applied");
        Ok(())
    }

    /// Aplica porta a partir dos argumentos soltos
    pub fn apply_gate(
        &mut self,
        kind: GateKind,
        qubit: usize,
        control: Option<usize>,
    ) -> QuantumResult<()> {
        self.apply(GateOp { kind, qubit, control })
    }

    /// Probabilidade de cada estado de base (`re² + im²`)
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Soma das probabilidades
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Mede usando o gerador fornecido
    pub fn measure_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let draw: f64 = rng.gen_range(0.0..1.0);
        self.measure_with_draw(draw)
    }

    /// Mede usando o gerador da thread
    pub fn measure(&mut self) -> usize {
        self.measure_with(&mut rand::thread_rng())
    }

    /// Mede com um sorteio fixo em `[0, 1)` e colapsa o estado.
    ///
    /// Percorre as probabilidades em ordem acumulando a soma e retorna o
    /// primeiro índice cuja soma alcança o sorteio. Estados de probabilidade
    /// zero nunca são escolhidos. Se o erro de ponto flutuante deixar o
    /// sorteio acima da soma final, retorna o índice 0.
    pub fn measure_with_draw(&mut self, draw: f64) -> usize {
        let mut cumulative = 0.0;
        let mut outcome = None;

        for (index, probability) in self.probabilities().into_iter().enumerate() {
            if probability == 0.0 {
                continue;
            }
            cumulative += probability;
            if cumulative >= draw {
                outcome = Some(index);
                break;
            }
        }

        let index = outcome.unwrap_or_else(|| {
            tracing::debug!(draw, cumulative, "draw beyond cumulative probability, falling back to |0⟩");
            0
        });

        self.collapse_to(index);
        self.measurement_count += 1;
        index
    }

    /// Restaura o estado fundamental e limpa o histórico
    pub fn reset(&mut self) {
        self.amplitudes = ground_state(self.amplitudes.len());
        self.history.clear();
    }

    /// Rótulo do estado de base, qubit mais alto à esquerda (ex.: `|101⟩`)
    pub fn basis_label(&self, index: usize) -> String {
        basis_label(index, self.qubits)
    }

    fn collapse_to(&mut self, index: usize) {
        for amp in self.amplitudes.iter_mut() {
            *amp = Complex64::new(0.0, 0.0);
        }
        self.amplitudes[index] = Complex64::new(1.0, 0.0);
    }
}

/// Rótulo `|q_{n-1}…q_0⟩` para um índice
pub fn basis_label(index: usize, qubits: usize) -> String {
    format!("|{:0width$b}⟩", index, width = qubits)
}

fn ground_state(dimension: usize) -> Vec<Complex64> {
    let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];
    amplitudes[0] = Complex64::new(1.0, 0.0);
    amplitudes
}
