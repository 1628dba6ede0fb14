use std::fmt;
use std::io;

use serde::Serialize;

/// ファイル I/O・書式エラー時のプロセス終了コード
pub const FILE_ERROR_EXIT_CODE: u8 = 125;

/// どちらのプロットファイルか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotRole {
    Reference,
    Candidate,
}

impl fmt::Display for PlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotRole::Reference => write!(f, "reference"),
            PlotRole::Candidate => write!(f, "candidate"),
        }
    }
}

/// 比較を中断する致命的エラー
///
/// 行の列数不正は警告扱いなのでここには含まれない。
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("failed to read {role} plot file: {source}")]
    Io {
        role: PlotRole,
        #[source]
        source: io::Error,
    },

    #[error("malformed {role} plot file: line {line}: `{token}` is not a number")]
    Format { role: PlotRole, line: usize, token: String },

    #[error("no data found in {role} plot file")]
    NoData { role: PlotRole },
}

impl CompareError {
    pub fn role(&self) -> PlotRole {
        match self {
            CompareError::Io { role, .. }
            | CompareError::Format { role, .. }
            | CompareError::NoData { role } => *role,
        }
    }

    /// いずれも同じ終了コードに落とす
    pub const fn exit_code(&self) -> u8 {
        FILE_ERROR_EXIT_CODE
    }
}
