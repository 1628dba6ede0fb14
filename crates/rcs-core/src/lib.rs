//! RCS シミュレーション結果（プロットファイル）の比較エンジン
//!
//! 参照ファイルと比較対象ファイルを角度キーで完全一致させ、
//! 周波数ごとに電界の RMS 誤差・相対 RMS 誤差を集計して判定を返す。
//!
//! ```text
//! reference ──PlotReader──▶ ReferenceIndex
//!                                 │ lookup
//! candidate ──PlotReader──▶ ErrorAggregator ──▶ FrequencySummary ──▶ Verdict
//! ```

pub mod angle;
pub mod compare;
pub mod error;
pub mod field;
pub mod index;
pub mod parser;
pub mod report;
pub mod stats;
pub mod verdict;

pub use angle::{AngleKey, FieldValue, Polarization, Record};
pub use compare::{Comparison, PlotStats, compare, compare_with};
pub use error::{CompareError, FILE_ERROR_EXIT_CODE, PlotRole};
pub use field::to_complex_field;
pub use index::ReferenceIndex;
pub use parser::{ParseOutcome, PlotReader, parse_line};
pub use stats::{ErrorAggregator, FrequencySummary, PerFrequencyStats};
pub use verdict::{LEGO_ACCURACY_THRESHOLD, SWITCH_ACCURACY_THRESHOLD, Thresholds, Verdict};
