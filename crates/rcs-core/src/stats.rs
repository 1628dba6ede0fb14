//! 周波数ごとの誤差集計
//!
//! 周波数は生の `f64` のまま完全一致でまとめる（丸め・ビン分けなし）。
//! 表現の異なる「同じ」周波数は別のバケットになる点に注意。

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::angle::{Polarization, Record};
use crate::index::ReferenceIndex;

/// `total_cmp` で順序付けした周波数キー
#[derive(Debug, Clone, Copy)]
struct FreqKey(f64);

impl Ord for FreqKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for FreqKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FreqKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FreqKey {}

/// 1周波数分の累積値
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerFrequencyStats {
    pub num_compared: u64,
    pub num_not_compared: u64,
    pub pp_error2_sum: f64,
    pub tt_error2_sum: f64,
    pub pp_ref2_sum: f64,
    pub tt_ref2_sum: f64,
}

impl PerFrequencyStats {
    fn error2_sum(&self, polarization: Polarization) -> f64 {
        match polarization {
            Polarization::PhiPhi => self.pp_error2_sum,
            Polarization::ThetaTheta => self.tt_error2_sum,
        }
    }

    fn ref2_sum(&self, polarization: Polarization) -> f64 {
        match polarization {
            Polarization::PhiPhi => self.pp_ref2_sum,
            Polarization::ThetaTheta => self.tt_ref2_sum,
        }
    }

    /// sqrt(Σ|ΔE|² / N)。比較できた角度がなければ `None`。
    pub fn rms_error(&self, polarization: Polarization) -> Option<f64> {
        (self.num_compared > 0)
            .then(|| (self.error2_sum(polarization) / self.num_compared as f64).sqrt())
    }

    /// sqrt(Σ|ΔE|² / Σ|E_ref|²)
    ///
    /// 角度ごとの相対誤差の平均ではなく、周波数全体で和を取ってから平方根を取る。
    pub fn rms_rel_error(&self, polarization: Polarization) -> Option<f64> {
        (self.num_compared > 0)
            .then(|| (self.error2_sum(polarization) / self.ref2_sum(polarization)).sqrt())
    }

    /// 入射/散乱角のカバー率 [%]
    pub fn coverage_percent(&self) -> f64 {
        let total = self.num_compared + self.num_not_compared;
        if total == 0 {
            return 0.0;
        }
        100.0 * self.num_compared as f64 / total as f64
    }
}

/// 1周波数分の集計結果（表示・JSON 出力用）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencySummary {
    pub frequency: f64,
    pub num_compared: u64,
    pub num_not_compared: u64,
    pub pp_rms_error: Option<f64>,
    pub tt_rms_error: Option<f64>,
    pub pp_rms_rel_error: Option<f64>,
    pub tt_rms_rel_error: Option<f64>,
    pub coverage_percent: f64,
}

impl FrequencySummary {
    pub fn from_stats(frequency: f64, stats: &PerFrequencyStats) -> Self {
        Self {
            frequency,
            num_compared: stats.num_compared,
            num_not_compared: stats.num_not_compared,
            pp_rms_error: stats.rms_error(Polarization::PhiPhi),
            tt_rms_error: stats.rms_error(Polarization::ThetaTheta),
            pp_rms_rel_error: stats.rms_rel_error(Polarization::PhiPhi),
            tt_rms_rel_error: stats.rms_rel_error(Polarization::ThetaTheta),
            coverage_percent: stats.coverage_percent(),
        }
    }

    pub fn rms_error(&self, polarization: Polarization) -> Option<f64> {
        match polarization {
            Polarization::PhiPhi => self.pp_rms_error,
            Polarization::ThetaTheta => self.tt_rms_error,
        }
    }

    pub fn rms_rel_error(&self, polarization: Polarization) -> Option<f64> {
        match polarization {
            Polarization::PhiPhi => self.pp_rms_rel_error,
            Polarization::ThetaTheta => self.tt_rms_rel_error,
        }
    }
}

/// 比較対象レコードを1件ずつ受け取り、周波数ごとに誤差を積算する
#[derive(Debug, Default, Clone)]
pub struct ErrorAggregator {
    buckets: BTreeMap<FreqKey, PerFrequencyStats>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&mut self, frequency: f64) -> &mut PerFrequencyStats {
        self.buckets.entry(FreqKey(frequency)).or_default()
    }

    /// 参照側に対応する角度があった場合の積算
    pub fn record_comparison(
        &mut self,
        frequency: f64,
        pp_error: f64,
        tt_error: f64,
        pp_ref: f64,
        tt_ref: f64,
    ) {
        let stats = self.bucket(frequency);
        stats.num_compared += 1;
        stats.pp_error2_sum += pp_error.powi(2);
        stats.tt_error2_sum += tt_error.powi(2);
        stats.pp_ref2_sum += pp_ref.powi(2);
        stats.tt_ref2_sum += tt_ref.powi(2);
    }

    /// 参照側に存在しない角度
    pub fn record_uncompared(&mut self, frequency: f64) {
        self.bucket(frequency).num_not_compared += 1;
    }

    /// 参照テーブルを引いて `record_comparison` / `record_uncompared` のどちらかを行う。
    /// 一致した場合は `true`。
    pub fn observe(&mut self, index: &ReferenceIndex, record: &Record) -> bool {
        let frequency = record.angle.freq;
        let Some(reference) = index.lookup(&record.angle) else {
            self.record_uncompared(frequency);
            return false;
        };

        let (pp_ref, tt_ref) = (reference.pp_field(), reference.tt_field());
        let (pp_new, tt_new) = (record.field.pp_field(), record.field.tt_field());
        self.record_comparison(
            frequency,
            (pp_new - pp_ref).norm(),
            (tt_new - tt_ref).norm(),
            pp_ref.norm(),
            tt_ref.norm(),
        );
        true
    }

    #[cfg(test)]
    fn get(&self, frequency: f64) -> Option<&PerFrequencyStats> {
        self.buckets.get(&FreqKey(frequency))
    }

    /// 周波数の種類数
    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    /// 周波数の昇順
    pub fn iter(&self) -> impl Iterator<Item = (f64, &PerFrequencyStats)> {
        self.buckets.iter().map(|(k, v)| (k.0, v))
    }

    pub fn summaries(&self) -> Vec<FrequencySummary> {
        self.iter().map(|(freq, stats)| FrequencySummary::from_stats(freq, stats)).collect()
    }
}
