//! Kepler equation solver
use log::warn;

/// [KeplerOptions] tune the eccentric anomaly solver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeplerOptions {
    /// Convergence criterion on |E(n+1) - E(n)| (rad)
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance"))]
    pub tolerance: f64,
    /// Maximal number of Newton-Raphson iterations
    #[cfg_attr(feature = "serde", serde(default = "default_max_iter"))]
    pub max_iter: usize,
}

fn default_tolerance() -> f64 {
    1.0E-8
}

fn default_max_iter() -> usize {
    100
}

impl Default for KeplerOptions {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

impl KeplerOptions {
    /// Copies and returns [KeplerOptions] with desired convergence criterion
    pub fn with_tolerance(&self, tolerance: f64) -> Self {
        let mut s = *self;
        s.tolerance = tolerance;
        s
    }
    /// Copies and returns [KeplerOptions] with desired iteration cap
    pub fn with_max_iter(&self, max_iter: usize) -> Self {
        let mut s = *self;
        s.max_iter = max_iter;
        s
    }
}

/// The solver ran out of iterations: the returned angle
/// is the last iterate and may not be accurate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceWarning {
    /// Iterations performed
    pub iterations: usize,
    /// Last Newton step magnitude (rad)
    pub last_step: f64,
}

impl std::fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "kepler solver did not converge after {} iterations (last step {:e} rad)",
            self.iterations, self.last_step
        )
    }
}

/// Eccentric anomaly solution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly (rad)
    pub e_k: f64,
    /// Iterations performed
    pub iterations: usize,
    /// Present when the iteration cap was reached
    pub warning: Option<ConvergenceWarning>,
}

impl KeplerSolution {
    /// Returns true if the solver converged
    pub fn converged(&self) -> bool {
        self.warning.is_none()
    }
}

/// Solves E - e.sin(E) = M for the eccentric anomaly E, by Newton-Raphson
/// iterations starting at E = M.
/// ## Inputs
/// - m: mean anomaly (rad)
/// - e: eccentricity, must lie within [0, 1[ (the caller is in charge of that)
/// - opts: [KeplerOptions]
pub fn solve(m: f64, e: f64, opts: &KeplerOptions) -> KeplerSolution {
    if e == 0.0 {
        return KeplerSolution {
            e_k: m,
            iterations: 0,
            warning: None,
        };
    }

    let mut e_k = m;
    let mut last_step = f64::INFINITY;

    for iteration in 1..=opts.max_iter {
        let (sin_e_k, cos_e_k) = e_k.sin_cos();
        let step = (e_k - e * sin_e_k - m) / (1.0 - e * cos_e_k);
        e_k -= step;
        last_step = step.abs();
        if last_step < opts.tolerance {
            return KeplerSolution {
                e_k,
                iterations: iteration,
                warning: None,
            };
        }
    }

    let warning = ConvergenceWarning {
        iterations: opts.max_iter,
        last_step,
    };
    warn!("{}", warning);

    KeplerSolution {
        e_k,
        iterations: opts.max_iter,
        warning: Some(warning),
    }
}
