//! The 4PL least-squares problem handed to the Levenberg-Marquardt solver.

use levenberg_marquardt::LeastSquaresProblem;
use nalgebra::{DVector, Dyn, OMatrix, Owned, U4, Vector4};

use crate::domain::FitParams;
use crate::model;

/// Residual problem over the parameter vector `(a, b, ln c, d)`.
///
/// `c` is optimized in log space so every trial step the solver takes
/// keeps it positive and `(x / c)^b` stays real. The transform is a
/// bijection onto `c > 0`, so the minimum is the same one the natural
/// parameterization has.
pub struct FourPlProblem {
    params: Vector4<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl FourPlProblem {
    /// `seed.c` must be positive; the fitter checks this before building
    /// the problem.
    pub fn new(x: Vec<f64>, y: Vec<f64>, seed: &FitParams) -> Self {
        Self {
            params: Vector4::new(seed.a, seed.b, seed.c.ln(), seed.d),
            x,
            y,
        }
    }

    /// Current parameters decoded back to natural `(a, b, c, d)` space.
    pub fn decode(&self) -> FitParams {
        FitParams {
            a: self.params[0],
            b: self.params[1],
            c: self.params[2].exp(),
            d: self.params[3],
        }
    }
}

impl LeastSquaresProblem<f64, Dyn, U4> for FourPlProblem {
    type ParameterStorage = Owned<f64, U4>;
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, U4>;

    fn set_params(&mut self, p: &Vector4<f64>) {
        self.params.copy_from(p);
    }

    fn params(&self) -> Vector4<f64> {
        self.params
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let p = self.decode();
        let mut r = DVector::zeros(self.x.len());
        for (i, (&x, &y)) in self.x.iter().zip(&self.y).enumerate() {
            r[i] = model::forward(&p, x) - y;
        }
        Some(r)
    }

    fn jacobian(&self) -> Option<OMatrix<f64, Dyn, U4>> {
        let p = self.decode();
        let mut jac = OMatrix::<f64, Dyn, U4>::zeros_generic(Dyn(self.x.len()), U4);
        for (row, &x) in self.x.iter().enumerate() {
            let [d_a, d_b, d_c, d_d] = model::partials(&p, x);
            jac[(row, 0)] = d_a;
            jac[(row, 1)] = d_b;
            // chain rule through c = exp(ln c)
            jac[(row, 2)] = d_c * p.c;
            jac[(row, 3)] = d_d;
        }
        Some(jac)
    }
}
