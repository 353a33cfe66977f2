// The data being compared: a precomputed gamma LUT and the x^(1/2.2) power law.
// Visual: these become the two curves on the chart.

use crate::error::Error;
use log::debug;

/// Display gamma of the reference curve; the curve itself is x^(1/GAMMA).
pub const GAMMA: f64 = 2.2;

/// Precomputed gamma-correction outputs at 11 evenly spaced inputs over [0, 1].
pub const GAMMA_LUT: [f64; 11] = [
    0.0,
    0.3504950718773984,
    0.48243595264750255,
    0.57750428843709,
    0.6596458942714417,
    0.731034378464739,
    0.7925580792857235,
    0.8509817015104557,
    0.9029435754464383,
    0.9534255851019492,
    1.0,
];

/// `n` evenly spaced values from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + (end - start) * (i as f64 / last) })
                .collect()
        }
    }
}

/// Raise every value to `1/gamma`.
pub fn power_curve(xs: &[f64], gamma: f64) -> Vec<f64> {
    let k = 1.0 / gamma;
    xs.iter().map(|x| x.powf(k)).collect()
}

/// Everything the chart needs, computed once per run.
#[derive(Clone, Debug, PartialEq)]
pub struct GammaCurves {
    pub lut: [f64; 11],
    pub domain: Vec<f64>,    // linspace(0, 1, lut.len())
    pub reference: Vec<f64>, // domain[i]^(1/2.2)
}

impl GammaCurves {
    pub fn new() -> Self {
        let lut = GAMMA_LUT;
        let domain = linspace(0.0, 1.0, lut.len());
        let reference = power_curve(&domain, GAMMA);
        Self { lut, domain, reference }
    }
}

/// Evaluate an evenly spaced LUT at `x` in [0, 1] by linear interpolation
/// between neighbouring nodes. `x` is clamped; the last node is returned as is.
pub fn lut_at(lut: &[f64], x: f64) -> f64 {
    match lut {
        [] => 0.0,
        [only] => *only,
        _ => {
            let last = lut.len() - 1;
            let pos = x.clamp(0.0, 1.0) * last as f64;
            let id = pos.floor() as usize;
            if id >= last {
                return lut[last];
            }
            lut[id] + (pos - id as f64) * (lut[id + 1] - lut[id])
        }
    }
}

/// Largest |lut_at(x) - x^(1/gamma)| over `samples` evenly spaced x in [0, 1].
/// Returns `(x, deviation)`.
pub fn max_deviation(lut: &[f64], gamma: f64, samples: usize) -> (f64, f64) {
    let k = 1.0 / gamma;
    linspace(0.0, 1.0, samples)
        .into_iter()
        .map(|x| (x, (lut_at(lut, x) - x.powf(k)).abs()))
        .fold((0.0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best })
}

/// Least-squares exponent `k` so that `xs[i]^k` best matches `ys[i]`.
/// Gauss-Newton on the single parameter, starting from 0.5.
/// Points with x <= 0 carry no gradient and are skipped.
pub fn fit_exponent(xs: &[f64], ys: &[f64]) -> Result<f64, Error> {
    if xs.len() != ys.len() {
        return Err(Error::Fit(format!("{} inputs but {} outputs", xs.len(), ys.len())));
    }

    let samples: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, _)| **x > 0.0)
        .map(|(&x, &y)| (x, y))
        .collect();

    let mut k = 0.5;
    for iter in 0..100 {
        let (mut num, mut den) = (0.0, 0.0);
        for &(x, y) in &samples {
            let p = x.powf(k);
            let d = p * x.ln(); // d(x^k)/dk
            num += (p - y) * d;
            den += d * d;
        }
        if den == 0.0 {
            return Err(Error::Fit("no sample constrains the exponent".into()));
        }
        let step = num / den;
        k -= step;
        if step.abs() < 1e-12 {
            debug!("exponent fit converged after {} iterations", iter + 1);
            break;
        }
    }
    Ok(k)
}
