//! RCS プロットファイルの RMS 誤差比較ツール
//!
//! 参照プロットファイルと比較対象プロットファイルを角度ごとに突き合わせ、
//! 周波数ごとの RMS 誤差（相対誤差）とカバー率を表示して、終了コードで合否を返す。
//!
//! 使い方:
//!   calc_rms_error reference.dat plot.dat
//!
//!   # gzip 入力・標準入力、JSON サマリ出力
//!   zcat plot.dat.gz | calc_rms_error reference.dat.gz - --json summary.json
//!
//! 終了コード:
//!   0   PASS
//!   1   引数エラー
//!   122 FAIL (SWITCH)
//!   123 FAIL (SWITCH-LEGO)
//!   125 ファイルの読み込み失敗・データなし・書式エラー
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use log::{info, warn};

use rcs_core::{Comparison, FILE_ERROR_EXIT_CODE, compare};
use rcs_tools::common::io::{is_stdio, open_reader};
use rcs_tools::common::summary::write_summary_json;

const USAGE_EXIT_CODE: u8 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "calc_rms_error",
    author,
    version,
    about = "Compare an RCS plot file against a reference and report per-frequency RMS error"
)]
struct Cli {
    /// 参照プロットファイル（`-` で標準入力、`.gz` は gzip）
    reference: PathBuf,

    /// 比較対象プロットファイル（`-` で標準入力、`.gz` は gzip）
    plot: PathBuf,

    /// 比較結果を JSON でも出力する（`-` で標準出力）
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// 誤差表を表示しない（終了コードは変わらない）
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                // 標準出力に書いて 0 で終了する
                err.exit();
            }
            if let Err(e) = err.print() {
                warn!("failed to print usage error: {e}");
            }
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    if is_stdio(&cli.reference) && is_stdio(&cli.plot) {
        eprintln!("error: only one of the plot files can be read from stdin");
        return ExitCode::from(USAGE_EXIT_CODE);
    }

    match run(&cli) {
        Ok(comparison) => ExitCode::from(comparison.exit_code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(FILE_ERROR_EXIT_CODE)
        }
    }
}

fn run(cli: &Cli) -> Result<Comparison> {
    // 両方開けることを確認してから読み始める
    let reference = open_reader(&cli.reference)
        .with_context(|| format!("error opening reference plot file `{}`", cli.reference.display()))?;
    let plot = open_reader(&cli.plot)
        .with_context(|| format!("error opening plot file `{}`", cli.plot.display()))?;

    let comparison = compare(reference, plot)?;
    info!(
        "{} vs {}: {} frequencies, max relative error {:e}, {:?}",
        cli.reference.display(),
        cli.plot.display(),
        comparison.frequencies.len(),
        comparison.max_error,
        comparison.verdict
    );

    if !cli.quiet {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        comparison.write_report(&mut out).context("failed to write report")?;
        out.flush()?;
    }

    if let Some(path) = &cli.json {
        write_summary_json(path, &comparison)?;
    }

    Ok(comparison)
}
