//! Transient analysis of the diode rectifier test circuit.
//!
//! Integrates the extended nodal equations with an implicit Euler scheme,
//! a Newton correction at every step, and an adaptive time step, then
//! writes the node potentials to `t.txt` / `phi1.txt` / `phi2.txt` /
//! `phi4.txt` / `phi5.txt` in the working directory, one value per line —
//! the files the viewer reads as its baseline dataset.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use nalgebra::{DMatrix, DVector};

// ---------------------------------------------------------------------------
// Circuit parameters
// ---------------------------------------------------------------------------

/// Coil inductance (H).
const L: f64 = 1e-3;
/// Input and output capacitances (F).
const C1: f64 = 1e-6;
const C2: f64 = 1e-10;
const C3: f64 = 1e-10;
/// Load resistances (Ohm).
const R1: f64 = 1_000.0;
const R2: f64 = 1_000.0;
/// Diode saturation current (A) and thermal voltage (V).
const I_T: f64 = 1e-12;
const MFT: f64 = 0.026;
/// Diode junction capacitance (F) and bulk resistance (Ohm).
const C_B: f64 = 2e-12;
const R_B: f64 = 20.0;
/// Leakage resistance across the junction (Ohm).
const R_U: f64 = 1e6;

/// Source EMF amplitude (V) and period (s).
const E_AMPLITUDE: f64 = 10.0;
const E_PERIOD: f64 = 1e-4;

fn source_emf(t: f64) -> f64 {
    E_AMPLITUDE * (2.0 * std::f64::consts::PI / E_PERIOD * t).sin()
}

// ---------------------------------------------------------------------------
// Integration settings
// ---------------------------------------------------------------------------

const T_END: f64 = 1e-3;
const DT_START: f64 = 1e-9;
const DT_MIN: f64 = 1e-10;
const DT_MAX: f64 = 1e-5;

const NEWTON_STEPS: usize = 7;
const EPSILON: f64 = 1e-3;

/// Local error thresholds for the step controller.
const DELTA_REJECT: f64 = 1e-5;
const DELTA_HOLD: f64 = 1e-7;

/// Output grid spacing (s).
const SAVE_DT: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Unknown vector layout
// ---------------------------------------------------------------------------

const N_VARS: usize = 16;

// derivatives of the reactive states
const D_UC1: usize = 0;
const D_UC2: usize = 1;
const D_UCB: usize = 2;
const D_IL: usize = 3;
const D_UC3: usize = 4;
// reactive states: capacitor voltages and the coil current
const UC1: usize = 5;
const UC2: usize = 6;
const UCB: usize = 7;
const IL: usize = 8;
const UC3: usize = 9;
// node potentials
const PHI1: usize = 10;
const PHI2: usize = 11;
const PHI3: usize = 12;
const PHI4: usize = 13;
const PHI5: usize = 14;
// source branch current
const I_E: usize = 15;

/// Reactive-branch states accepted at the previous time point.
#[derive(Debug, Clone, Copy, Default)]
struct PrevState {
    uc1: f64,
    uc2: f64,
    ucb: f64,
    il: f64,
    uc3: f64,
}

impl PrevState {
    fn from_solution(x: &DVector<f64>) -> Self {
        PrevState {
            uc1: x[UC1],
            uc2: x[UC2],
            ucb: x[UCB],
            il: x[IL],
            uc3: x[UC3],
        }
    }
}

// ---------------------------------------------------------------------------
// Circuit equations
// ---------------------------------------------------------------------------

/// Residual of the nodal system at time `t` with step `dt`.
fn residual(x: &DVector<f64>, prev: &PrevState, t: f64, dt: f64) -> DVector<f64> {
    let diode_current = I_T * ((x[UCB] / MFT).exp() - 1.0);

    let i_r1 = x[UC1] / R1;
    let i_r2 = x[PHI5] / R2;
    let i_ru = x[UCB] / R_U;
    let i_rb = (x[PHI4] - x[PHI3]) / R_B;

    let i_c1 = C1 * x[D_UC1];
    let i_c2 = C2 * x[D_UC2];
    let i_cb = C_B * x[D_UCB];
    let i_c3 = C3 * x[D_UC3];

    let mut v = DVector::zeros(N_VARS);

    // backward differences tying each derivative to its state
    v[0] = x[D_UC1] - (x[UC1] - prev.uc1) / dt;
    v[1] = x[D_UC2] - (x[UC2] - prev.uc2) / dt;
    v[2] = x[D_UCB] - (x[UCB] - prev.ucb) / dt;
    v[3] = x[D_IL] - (x[IL] - prev.il) / dt;
    v[4] = x[D_UC3] - (x[UC3] - prev.uc3) / dt;

    // branch equations
    v[5] = x[UC1] - (x[PHI2] - x[PHI1]);
    v[6] = x[UC2] - (x[PHI5] - x[PHI4]);
    v[7] = x[UCB] - (x[PHI3] - x[PHI2]);
    v[8] = L * x[D_IL] - (x[PHI2] - x[PHI1]);
    v[9] = x[UC3] - x[PHI5];

    // current balance per node
    v[10] = -i_r1 - i_c1 - x[IL] + x[I_E];
    v[11] = -i_cb - i_ru - diode_current + i_r1 + i_c1 + x[IL];
    v[12] = -i_rb + i_cb + i_ru + diode_current;
    v[13] = -i_c2 + i_rb;
    v[14] = i_r2 + i_c2 + i_c3;

    // source branch pins node 1 to the EMF
    v[15] = x[PHI1] - source_emf(t);

    v
}

/// Analytic Jacobian of [`residual`].
fn jacobian(x: &DVector<f64>, dt: f64) -> DMatrix<f64> {
    // diode conductance plus the leakage path
    let diode_slope = 1.0 / R_U + I_T / MFT * (x[UCB] / MFT).exp();

    let mut j = DMatrix::zeros(N_VARS, N_VARS);

    let derivative_pairs = [
        (D_UC1, UC1),
        (D_UC2, UC2),
        (D_UCB, UCB),
        (D_IL, IL),
        (D_UC3, UC3),
    ];
    for (row, (deriv, state)) in derivative_pairs.into_iter().enumerate() {
        j[(row, deriv)] = 1.0;
        j[(row, state)] = -1.0 / dt;
    }

    j[(5, UC1)] = 1.0;
    j[(5, PHI1)] = 1.0;
    j[(5, PHI2)] = -1.0;

    j[(6, UC2)] = 1.0;
    j[(6, PHI4)] = 1.0;
    j[(6, PHI5)] = -1.0;

    j[(7, UCB)] = 1.0;
    j[(7, PHI2)] = 1.0;
    j[(7, PHI3)] = -1.0;

    j[(8, D_IL)] = L;
    j[(8, PHI1)] = 1.0;
    j[(8, PHI2)] = -1.0;

    j[(9, UC3)] = 1.0;
    j[(9, PHI5)] = -1.0;

    j[(10, D_UC1)] = -C1;
    j[(10, UC1)] = -1.0 / R1;
    j[(10, IL)] = -1.0;
    j[(10, I_E)] = 1.0;

    j[(11, D_UC1)] = C1;
    j[(11, D_UCB)] = -C_B;
    j[(11, UC1)] = 1.0 / R1;
    j[(11, UCB)] = -diode_slope;
    j[(11, IL)] = 1.0;

    j[(12, D_UCB)] = C_B;
    j[(12, UCB)] = diode_slope;
    j[(12, PHI3)] = 1.0 / R_B;
    j[(12, PHI4)] = -1.0 / R_B;

    j[(13, D_UC2)] = -C2;
    j[(13, PHI3)] = -1.0 / R_B;
    j[(13, PHI4)] = 1.0 / R_B;

    j[(14, D_UC2)] = C2;
    j[(14, D_UC3)] = C3;
    j[(14, PHI5)] = 1.0 / R2;

    j[(15, PHI1)] = 1.0;

    j
}

// ---------------------------------------------------------------------------
// Newton iteration
// ---------------------------------------------------------------------------

struct NewtonOutcome {
    x: DVector<f64>,
    converged: bool,
}

/// Norm of the correction over the non-derivative unknowns. The derivative
/// slots are excluded since they follow the states directly.
fn correction_norm(correction: &DVector<f64>) -> f64 {
    correction.rows(UC1, N_VARS - UC1).norm()
}

/// One implicit Euler step solved by Newton iteration.
fn solve_step(x0: &DVector<f64>, prev: &PrevState, t: f64, dt: f64) -> Result<NewtonOutcome> {
    let mut x = x0.clone();
    for _ in 0..NEWTON_STEPS {
        let rhs = -residual(&x, prev, t, dt);
        let correction = jacobian(&x, dt)
            .lu()
            .solve(&rhs)
            .context("singular Jacobian in Newton step")?;
        x += &correction;
        if correction_norm(&correction) < EPSILON {
            return Ok(NewtonOutcome { x, converged: true });
        }
    }
    Ok(NewtonOutcome { x, converged: false })
}

// ---------------------------------------------------------------------------
// Adaptive step control
// ---------------------------------------------------------------------------

/// Outcome of the local error check after a converged step.
enum StepDecision {
    /// Error too large; redo the step with half the increment.
    Reject,
    /// Step accepted; integrate the next one with this increment.
    Accept { next_dt: f64 },
}

/// Crude second-derivative estimate used as the local error measure.
fn curvature(curr: f64, prev: f64, prev_prev: f64, dt: f64, prev_dt: f64) -> f64 {
    0.5 * (((curr - prev) - (prev - prev_prev) * dt / prev_dt) * dt / (dt + prev_dt)).abs()
}

fn control_step(
    x: &DVector<f64>,
    x_prev: &DVector<f64>,
    x_prev_prev: &DVector<f64>,
    dt: f64,
    prev_dt: f64,
) -> StepDecision {
    let delta = [PHI1, PHI2, PHI3, PHI4, PHI5]
        .into_iter()
        .map(|i| curvature(x[i], x_prev[i], x_prev_prev[i], dt, prev_dt))
        .fold(0.0_f64, f64::max);

    if delta > DELTA_REJECT {
        StepDecision::Reject
    } else if delta > DELTA_HOLD {
        StepDecision::Accept { next_dt: dt }
    } else {
        StepDecision::Accept {
            next_dt: (dt * 2.0).min(DT_MAX),
        }
    }
}

// ---------------------------------------------------------------------------
// Output recording
// ---------------------------------------------------------------------------

/// Accumulates output rows on a fixed time grid.
struct Recorder {
    t: Vec<f64>,
    phi1: Vec<f64>,
    phi2: Vec<f64>,
    phi4: Vec<f64>,
    phi5: Vec<f64>,
    next_save_t: f64,
}

impl Recorder {
    fn new(start: f64) -> Self {
        Recorder {
            t: Vec::new(),
            phi1: Vec::new(),
            phi2: Vec::new(),
            phi4: Vec::new(),
            phi5: Vec::new(),
            next_save_t: start,
        }
    }

    /// Record the accepted solution for every grid point passed by
    /// `t_accepted`, holding the solution value across the gap.
    fn sample(&mut self, t_accepted: f64, x: &DVector<f64>) {
        while t_accepted >= self.next_save_t {
            self.t.push(self.next_save_t);
            self.phi1.push(x[PHI1]);
            self.phi2.push(x[PHI2]);
            self.phi4.push(x[PHI4]);
            self.phi5.push(x[PHI5]);
            self.next_save_t += SAVE_DT;
        }
    }
}

fn write_series(path: &Path, values: &[f64]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for v in values {
        writeln!(out, "{v:.6e}").with_context(|| format!("writing {}", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

fn run() -> Result<()> {
    let t_start = DT_START;
    let mut t = t_start;
    let mut dt = DT_START;
    let mut prev_dt = dt;

    let mut prev = PrevState::default();
    let mut guess = DVector::zeros(N_VARS);
    let mut x_prev = DVector::zeros(N_VARS);
    let mut x_prev_prev = DVector::zeros(N_VARS);

    let mut recorder = Recorder::new(t_start);
    let mut accepted: u64 = 0;

    while t < T_END {
        let outcome = solve_step(&guess, &prev, t, dt)?;
        if !outcome.converged {
            dt /= 2.0;
            if dt < DT_MIN {
                bail!("Newton failed to converge at t = {t:.3e} with the minimal time step");
            }
            continue;
        }
        let x = outcome.x;

        match control_step(&x, &x_prev, &x_prev_prev, dt, prev_dt) {
            StepDecision::Reject => {
                dt /= 2.0;
                if dt < DT_MIN {
                    bail!("time step underflow at t = {t:.3e}");
                }
            }
            StepDecision::Accept { next_dt } => {
                recorder.sample(t, &x);

                // linear prediction of the next solution
                guess = &x * 2.0 - &x_prev;
                prev = PrevState::from_solution(&x);
                prev_dt = dt;
                t += dt;
                dt = next_dt;
                x_prev_prev = std::mem::replace(&mut x_prev, x);

                accepted += 1;
                if accepted % 100_000 == 0 {
                    log::info!("t = {t:.6e}, dt = {dt:.3e}, {} rows", recorder.t.len());
                }
            }
        }
    }

    write_series(Path::new("t.txt"), &recorder.t)?;
    write_series(Path::new("phi1.txt"), &recorder.phi1)?;
    write_series(Path::new("phi2.txt"), &recorder.phi2)?;
    write_series(Path::new("phi4.txt"), &recorder.phi4)?;
    write_series(Path::new("phi5.txt"), &recorder.phi5)?;
    log::info!(
        "wrote {} samples per signal after {accepted} accepted steps",
        recorder.t.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run()
}
