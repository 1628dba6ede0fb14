//! dBsm 表記の RCS と位相から複素電界への変換

use std::f64::consts::PI;

use num_complex::Complex64;

/// 振幅 [dBsm] と位相 [deg] を複素電界に変換する。
///
/// `RCS = 10^(dB/10)`, `|E| = sqrt(RCS / 4π)`, `E = |E| · e^(i·phase·π/180)`
///
/// 定義域の制限はない。`-inf` dB はゼロ電界になり、NaN はそのまま伝播する。
pub fn to_complex_field(magnitude_db: f64, phase_deg: f64) -> Complex64 {
    let rcs = 10.0_f64.powf(magnitude_db / 10.0);
    let amplitude = (rcs / (4.0 * PI)).sqrt();
    Complex64::from_polar(amplitude, phase_deg * PI / 180.0)
}
