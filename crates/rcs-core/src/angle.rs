//! 角度キーと電界値
//!
//! 角度 = 周波数 + 入射角 + 散乱角、電界 = φφ / θθ の振幅 [dBsm] と位相 [deg]。

use std::cmp::Ordering;

use num_complex::Complex64;
use serde::Serialize;

use crate::field::to_complex_field;

/// 偏波チャネル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarization {
    PhiPhi,
    ThetaTheta,
}

impl Polarization {
    pub const ALL: [Polarization; 2] = [Polarization::PhiPhi, Polarization::ThetaTheta];

    /// レポート表示用のラベル
    pub const fn label(self) -> &'static str {
        match self {
            Polarization::PhiPhi => "Phi-Phi",
            Polarization::ThetaTheta => "Theta-Theta",
        }
    }
}

/// 周波数 + 入射角 (theta, phi) + 散乱角 (stheta, sphi)
///
/// 同一判定はビット単位の完全一致のみ（許容誤差なし）。
/// 順序は freq → phi → theta → sphi → stheta の辞書式で、
/// 順序付きマップと出力順の決定性のためだけに存在する。
#[derive(Debug, Clone, Copy)]
pub struct AngleKey {
    pub freq: f64,
    pub theta: f64,
    pub phi: f64,
    pub stheta: f64,
    pub sphi: f64,
}

impl AngleKey {
    /// モノスタティック（散乱角 = 入射角）
    pub const fn monostatic(freq: f64, theta: f64, phi: f64) -> Self {
        Self { freq, theta, phi, stheta: theta, sphi: phi }
    }

    pub const fn bistatic(freq: f64, theta: f64, phi: f64, stheta: f64, sphi: f64) -> Self {
        Self { freq, theta, phi, stheta, sphi }
    }
}

impl Ord for AngleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.freq
            .total_cmp(&other.freq)
            .then_with(|| self.phi.total_cmp(&other.phi))
            .then_with(|| self.theta.total_cmp(&other.theta))
            .then_with(|| self.sphi.total_cmp(&other.sphi))
            .then_with(|| self.stheta.total_cmp(&other.stheta))
    }
}

impl PartialOrd for AngleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// total_cmp の Equal はビット一致と同値
impl PartialEq for AngleKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AngleKey {}

/// φφ / θθ の振幅 [dBsm] と位相 [deg]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldValue {
    pub pp_dbsm: f64,
    pub pp_phase: f64,
    pub tt_dbsm: f64,
    pub tt_phase: f64,
}

impl FieldValue {
    pub const fn new(pp_dbsm: f64, pp_phase: f64, tt_dbsm: f64, tt_phase: f64) -> Self {
        Self { pp_dbsm, pp_phase, tt_dbsm, tt_phase }
    }

    pub fn pp_field(&self) -> Complex64 {
        to_complex_field(self.pp_dbsm, self.pp_phase)
    }

    pub fn tt_field(&self) -> Complex64 {
        to_complex_field(self.tt_dbsm, self.tt_phase)
    }

    pub fn field(&self, polarization: Polarization) -> Complex64 {
        match polarization {
            Polarization::PhiPhi => self.pp_field(),
            Polarization::ThetaTheta => self.tt_field(),
        }
    }
}

/// プロットファイル1行分のデータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub angle: AngleKey,
    pub field: FieldValue,
}
