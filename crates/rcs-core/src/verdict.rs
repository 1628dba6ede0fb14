//! 精度閾値による合否判定
//!
//! 判定は次の3帯に分かれる（比較順序は固定）:
//!
//! | 条件 | 判定 | 終了コード |
//! |---|---|---|
//! | `max_error < lego` | `Pass` | 0 |
//! | それ以外で `max_error > switch` | `FailSwitch` | 122 |
//! | それ以外 | `FailLego` | 123 |

use serde::Serialize;

use crate::angle::Polarization;
use crate::stats::FrequencySummary;

/// SWITCH の精度閾値
pub const SWITCH_ACCURACY_THRESHOLD: f64 = 10e-4;
/// SWITCH-LEGO の精度閾値
pub const LEGO_ACCURACY_THRESHOLD: f64 = 10e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    FailLego,
    FailSwitch,
}

impl Verdict {
    pub const fn exit_code(self) -> u8 {
        match self {
            Verdict::Pass => 0,
            Verdict::FailSwitch => 122,
            Verdict::FailLego => 123,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub lego: f64,
    pub switch: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { lego: LEGO_ACCURACY_THRESHOLD, switch: SWITCH_ACCURACY_THRESHOLD }
    }
}

impl Thresholds {
    /// 比較不能（比較数 0 or NaN）な周波数が寄与する値
    pub fn forced_failure(&self) -> f64 {
        2.0 * self.lego
    }

    /// 1周波数分の寄与: max(ppRel, ttRel)
    pub fn frequency_error(&self, summary: &FrequencySummary) -> f64 {
        let pp = summary.rms_rel_error(Polarization::PhiPhi);
        let tt = summary.rms_rel_error(Polarization::ThetaTheta);
        match (pp, tt) {
            (Some(pp), Some(tt)) if !pp.is_nan() && !tt.is_nan() => pp.max(tt),
            _ => self.forced_failure(),
        }
    }

    /// 全周波数での最大相対誤差。周波数がなければ 0。
    pub fn max_error<'a, I>(&self, summaries: I) -> f64
    where
        I: IntoIterator<Item = &'a FrequencySummary>,
    {
        summaries.into_iter().map(|s| self.frequency_error(s)).fold(0.0, f64::max)
    }

    pub fn classify(&self, max_error: f64) -> Verdict {
        if max_error < self.lego {
            return Verdict::Pass;
        }
        if max_error > self.switch {
            return Verdict::FailSwitch;
        }
        Verdict::FailLego
    }
}
