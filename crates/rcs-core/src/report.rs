//! 周波数ごとの RMS 誤差表の出力
//!
//! ```text
//!                                                          +------------------------------
//!     Phi-Phi Error (Rel. Error) =          0 (         0) | RMS Error at 1 GHz
//! Theta-Theta Error (Rel. Error) =          0 (         0) | 100% inc/scatter coverage
//!                                                          +------------------------------
//! ```

use std::io::{self, Write};

use crate::angle::Polarization;
use crate::stats::FrequencySummary;

/// 数値表示の有効桁数
pub const SIGNIFICANT_DIGITS: usize = 5;

const SEPARATOR_INDENT: usize = 57;
const SEPARATOR: &str = "+------------------------------";
const VALUE_WIDTH: usize = 10;
const NOT_AVAILABLE: &str = "N/A";

/// `%g` 相当の表記（有効桁 `precision`、末尾の 0 は落とす）
///
/// 指数が -4 未満か `precision` 以上なら指数表記 (`1.2346e-05`)、それ以外は固定小数点。
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    let precision = precision.max(1);
    // 丸め後の指数を得るため一旦指数表記にする
    let sci = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction_zeros(mantissa), exp.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_fraction_zeros(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| format_general(v, SIGNIFICANT_DIGITS))
}

fn write_separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{:SEPARATOR_INDENT$}{SEPARATOR}", "")
}

fn write_channel_line<W: Write>(
    out: &mut W,
    summary: &FrequencySummary,
    polarization: Polarization,
    trailer: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "{:>11} Error (Rel. Error) = {:>VALUE_WIDTH$} ({:>VALUE_WIDTH$}) | {trailer}",
        polarization.label(),
        format_value(summary.rms_error(polarization)),
        format_value(summary.rms_rel_error(polarization)),
    )
}

/// 1周波数分のブロック（区切り線 + 2行）
pub fn write_frequency_block<W: Write>(out: &mut W, summary: &FrequencySummary) -> io::Result<()> {
    write_separator(out)?;
    let freq = format_general(summary.frequency, SIGNIFICANT_DIGITS);
    write_channel_line(
        out,
        summary,
        Polarization::PhiPhi,
        &format!("RMS Error at {freq} GHz"),
    )?;
    let coverage = format_general(summary.coverage_percent, SIGNIFICANT_DIGITS);
    write_channel_line(
        out,
        summary,
        Polarization::ThetaTheta,
        &format!("{coverage}% inc/scatter coverage"),
    )
}

/// 全周波数の表。1件以上あれば最後に閉じの区切り線を付ける。
pub fn write_report<W: Write>(out: &mut W, summaries: &[FrequencySummary]) -> io::Result<()> {
    for summary in summaries {
        write_frequency_block(out, summary)?;
    }
    if !summaries.is_empty() {
        write_separator(out)?;
    }
    Ok(())
}
