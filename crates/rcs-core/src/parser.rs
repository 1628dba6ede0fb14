//! プロットファイルの行パーサ
//!
//! 1行 = 空白区切りの実数 7 個（モノスタティック）または 9 個（バイスタティック）。
//!
//! ```text
//! # freq theta phi              pp_dbsm pp_phase tt_dbsm tt_phase
//! 1.0    0     0                10      0        10      0
//! # freq theta phi stheta sphi  pp_dbsm pp_phase tt_dbsm tt_phase
//! 1.0    0     0   30     0     10      0        10      0
//! ```
//!
//! 先頭文字が `#` の行はコメント（先頭の空白は読み飛ばさない）。

use std::io::BufRead;

use log::warn;
use smallvec::SmallVec;

use crate::angle::{AngleKey, FieldValue, Record};
use crate::error::{CompareError, PlotRole};

/// モノスタティック行の列数
pub const MONOSTATIC_FIELDS: usize = 7;
/// バイスタティック行の列数
pub const BISTATIC_FIELDS: usize = 9;

/// 1行のパース結果
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// `#` で始まる行
    Comment,
    /// 空行・空白のみの行
    Blank,
    Record(Record),
    /// 列数が 7 でも 9 でもない（警告して読み飛ばす）
    MalformedWarning { tokens: usize },
    /// 数値として解釈できないトークン（比較全体を中断する）
    FatalParseError { token: String },
}

/// 1行をパースする。末尾の改行は含んでいても良い。
pub fn parse_line(line: &str) -> ParseOutcome {
    if line.starts_with('#') {
        return ParseOutcome::Comment;
    }

    let mut values: SmallVec<[f64; BISTATIC_FIELDS]> = SmallVec::new();
    for token in line.split_whitespace() {
        match parse_number(token) {
            Some(v) => values.push(v),
            None => return ParseOutcome::FatalParseError { token: token.to_owned() },
        }
    }

    match values.as_slice() {
        [] => ParseOutcome::Blank,
        &[freq, theta, phi, pp_dbsm, pp_phase, tt_dbsm, tt_phase] => ParseOutcome::Record(Record {
            angle: AngleKey::monostatic(freq, theta, phi),
            field: FieldValue::new(pp_dbsm, pp_phase, tt_dbsm, tt_phase),
        }),
        &[freq, theta, phi, stheta, sphi, pp_dbsm, pp_phase, tt_dbsm, tt_phase] => {
            ParseOutcome::Record(Record {
                angle: AngleKey::bistatic(freq, theta, phi, stheta, sphi),
                field: FieldValue::new(pp_dbsm, pp_phase, tt_dbsm, tt_phase),
            })
        }
        other => ParseOutcome::MalformedWarning { tokens: other.len() },
    }
}

/// 10進の実数表記だけを受け付ける。
///
/// `f64::from_str` は `nan` / `inf` / `infinity` も受理するが、
/// プロットファイルではこれらを数値として扱わない。
fn parse_number(token: &str) -> Option<f64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse().ok()
}

/// `BufRead` からレコードを順に取り出すイテレータ
///
/// コメント・空行は黙って読み飛ばし、列数不正は `warn!` を出して読み飛ばす。
/// I/O エラーか数値書式エラーを返した後は `None` を返し続ける。
pub struct PlotReader<R> {
    reader: R,
    role: PlotRole,
    buf: String,
    line_no: usize,
    records: usize,
    warnings: usize,
    finished: bool,
}

impl<R: BufRead> PlotReader<R> {
    pub fn new(reader: R, role: PlotRole) -> Self {
        Self {
            reader,
            role,
            buf: String::new(),
            line_no: 0,
            records: 0,
            warnings: 0,
            finished: false,
        }
    }

    pub fn role(&self) -> PlotRole {
        self.role
    }

    /// これまでに返したレコード数
    pub fn records(&self) -> usize {
        self.records
    }

    /// 列数不正で読み飛ばした行数
    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl<R: BufRead> Iterator for PlotReader<R> {
    type Item = Result<Record, CompareError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => self.line_no += 1,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(CompareError::Io { role: self.role, source }));
                }
            }

            match parse_line(self.buf.trim_end_matches(['\n', '\r'])) {
                ParseOutcome::Comment | ParseOutcome::Blank => continue,
                ParseOutcome::Record(record) => {
                    self.records += 1;
                    return Some(Ok(record));
                }
                ParseOutcome::MalformedWarning { tokens } => {
                    self.warnings += 1;
                    warn!(
                        "{} plot file line {}: expected {MONOSTATIC_FIELDS} or {BISTATIC_FIELDS} values, found {tokens}; line skipped",
                        self.role, self.line_no
                    );
                }
                ParseOutcome::FatalParseError { token } => {
                    self.finished = true;
                    return Some(Err(CompareError::Format {
                        role: self.role,
                        line: self.line_no,
                        token,
                    }));
                }
            }
        }
    }
}
