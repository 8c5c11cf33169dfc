//! Standard-normal helpers for reliability indices
//!
//! A failure probability `p` corresponds to the reliability index
//! `β = -Φ⁻¹(p)`, i.e. `p = Φ(-β)`. The kernel only needs these two
//! conversions, so they are implemented here directly: Hart's double
//! precision approximation for `Φ` and Acklam's rational approximation for
//! `Φ⁻¹`, followed by one Halley refinement step against `Φ`.

use std::f64::consts::PI;

const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Standard-normal cumulative distribution function `Φ(x)`
pub fn normal_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let tail = lower_tail(x.abs());
    if x > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// `Φ(-|x|)`, accurate to double precision over the whole range
fn lower_tail(x_abs: f64) -> f64 {
    if x_abs > 37.0 {
        return 0.0;
    }
    let exponential = (-x_abs * x_abs / 2.0).exp();
    if x_abs < 7.071_067_811_865_47 {
        let mut numerator = 3.526_249_659_989_11e-2 * x_abs + 0.700_383_064_443_688;
        numerator = numerator * x_abs + 6.373_962_203_531_65;
        numerator = numerator * x_abs + 33.912_866_078_383;
        numerator = numerator * x_abs + 112.079_291_497_871;
        numerator = numerator * x_abs + 221.213_596_169_931;
        numerator = numerator * x_abs + 220.206_867_912_376;

        let mut denominator = 8.838_834_764_831_84e-2 * x_abs + 1.755_667_163_182_64;
        denominator = denominator * x_abs + 16.064_177_579_207;
        denominator = denominator * x_abs + 86.780_732_202_946_1;
        denominator = denominator * x_abs + 296.564_248_779_674;
        denominator = denominator * x_abs + 637.333_633_378_831;
        denominator = denominator * x_abs + 793.826_512_519_948;
        denominator = denominator * x_abs + 440.413_735_824_752;

        exponential * numerator / denominator
    } else {
        let mut fraction = x_abs + 0.65;
        fraction = x_abs + 4.0 / fraction;
        fraction = x_abs + 3.0 / fraction;
        fraction = x_abs + 2.0 / fraction;
        fraction = x_abs + 1.0 / fraction;
        exponential / fraction / SQRT_2PI
    }
}

const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

const P_LOW: f64 = 0.024_25;

/// Inverse of the standard-normal CDF, `Φ⁻¹(p)`
///
/// Returns `-∞` for `p = 0`, `+∞` for `p = 1` and NaN outside [0, 1].
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let x = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        tail_rational(q)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -tail_rational(q)
    };

    refine(x, p)
}

fn tail_rational(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

/// One Halley step on `Φ(x) - p`
fn refine(x: f64, p: f64) -> f64 {
    let error = normal_cdf(x) - p;
    let u = error * (2.0 * PI).sqrt() * (x * x / 2.0).exp();
    let refined = x - u / (1.0 + x * u / 2.0);
    if refined.is_finite() {
        refined
    } else {
        x
    }
}

/// Reliability index `β` of a failure probability
pub fn probability_to_reliability(probability: f64) -> f64 {
    -inverse_normal_cdf(probability)
}

/// Failure probability of a reliability index `β`
pub fn reliability_to_probability(reliability: f64) -> f64 {
    normal_cdf(-reliability)
}
