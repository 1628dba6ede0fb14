//! 参照ファイルと比較対象ファイルの比較
//!
//! 1. 参照ファイルを最後まで読み、`ReferenceIndex` を作る（レコード 0 件ならエラー）
//! 2. 比較対象ファイルを1行ずつ読み、`ErrorAggregator` に流す
//! 3. 周波数ごとの集計から最大相対誤差を求めて判定する

use std::io::{self, BufRead, Write};

use log::info;
use serde::Serialize;

use crate::error::{CompareError, PlotRole};
use crate::index::ReferenceIndex;
use crate::parser::PlotReader;
use crate::report;
use crate::stats::{ErrorAggregator, FrequencySummary};
use crate::verdict::{Thresholds, Verdict};

/// 1ファイル分の読み取り統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlotStats {
    /// 読み取れたレコード数
    pub records: usize,
    /// 列数不正で読み飛ばした行数
    pub skipped_lines: usize,
}

/// 比較結果
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub reference: PlotStats,
    pub candidate: PlotStats,
    /// 参照ファイル内で重複していた角度の数（後勝ち）
    pub duplicate_reference_angles: usize,
    /// 周波数の昇順
    pub frequencies: Vec<FrequencySummary>,
    pub thresholds: Thresholds,
    pub max_error: f64,
    pub verdict: Verdict,
}

impl Comparison {
    pub fn exit_code(&self) -> u8 {
        self.verdict.exit_code()
    }

    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        report::write_report(out, &self.frequencies)
    }
}

/// 既定の閾値で比較する
pub fn compare<R, C>(reference: R, candidate: C) -> Result<Comparison, CompareError>
where
    R: BufRead,
    C: BufRead,
{
    compare_with(reference, candidate, Thresholds::default())
}

pub fn compare_with<R, C>(
    reference: R,
    candidate: C,
    thresholds: Thresholds,
) -> Result<Comparison, CompareError>
where
    R: BufRead,
    C: BufRead,
{
    let (index, reference_stats) = load_reference(reference)?;
    let (aggregator, candidate_stats) = aggregate_candidate(&index, candidate)?;

    let frequencies = aggregator.summaries();
    let max_error = thresholds.max_error(&frequencies);
    let verdict = thresholds.classify(max_error);
    info!("max relative error {max_error:e} -> {verdict:?}");

    Ok(Comparison {
        reference: reference_stats,
        candidate: candidate_stats,
        duplicate_reference_angles: index.overwritten(),
        frequencies,
        thresholds,
        max_error,
        verdict,
    })
}

/// 参照ファイルを全件読み込む
pub fn load_reference<R: BufRead>(reader: R) -> Result<(ReferenceIndex, PlotStats), CompareError> {
    let mut plot = PlotReader::new(reader, PlotRole::Reference);
    let mut index = ReferenceIndex::new();
    for record in plot.by_ref() {
        index.insert(record?);
    }
    let stats = finish(&plot)?;
    info!(
        "reference: {} records, {} unique angles, {} skipped lines",
        stats.records,
        index.len(),
        stats.skipped_lines
    );
    Ok((index, stats))
}

/// 比較対象ファイルを1件ずつ参照テーブルと突き合わせる
pub fn aggregate_candidate<R: BufRead>(
    index: &ReferenceIndex,
    reader: R,
) -> Result<(ErrorAggregator, PlotStats), CompareError> {
    let mut plot = PlotReader::new(reader, PlotRole::Candidate);
    let mut aggregator = ErrorAggregator::new();
    let mut matched = 0usize;
    for record in plot.by_ref() {
        if aggregator.observe(index, &record?) {
            matched += 1;
        }
    }
    let stats = finish(&plot)?;
    info!(
        "candidate: {} records, {} matched, {} frequencies, {} skipped lines",
        stats.records,
        matched,
        aggregator.len(),
        stats.skipped_lines
    );
    Ok((aggregator, stats))
}

fn finish<R: BufRead>(plot: &PlotReader<R>) -> Result<PlotStats, CompareError> {
    if plot.records() == 0 {
        return Err(CompareError::NoData { role: plot.role() });
    }
    Ok(PlotStats { records: plot.records(), skipped_lines: plot.warnings() })
}
