//! プロットファイル入出力ユーティリティ（gzip / 標準入出力対応）
//!
//! パスが `-` なら標準入出力、拡張子が `.gz` なら gzip として扱う。

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

const READER_BUF_CAP: usize = 128 * 1024; // 128 KiB

/// 標準入出力を表すパス
pub const STDIO_PATH: &str = "-";

pub fn is_stdio<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().as_os_str() == STDIO_PATH
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// 読み込み用に開く。ファイルを開けなければここでエラーになる。
pub fn open_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let p = path.as_ref();
    if is_stdio(p) {
        return Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, io::stdin())));
    }
    let f = File::open(p)?;
    if is_gzip(p) {
        let dec = MultiGzDecoder::new(f);
        return Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, dec)));
    }
    Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, f)))
}

/// 出力先。gzip の後始末とバッファのフラッシュは `finish` で行う。
#[must_use = "call .finish() to surface gzip trailer and flush errors"]
pub enum OutputWriter {
    File(BufWriter<File>),
    Stdout(io::Stdout),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputWriter {
    fn inner(&mut self) -> &mut dyn Write {
        match self {
            OutputWriter::File(w) => w,
            OutputWriter::Stdout(w) => w,
            OutputWriter::Gzip(w) => w,
        }
    }

    /// gzip トレーラを書き、下層まで全てフラッシュする。
    pub fn finish(self) -> io::Result<()> {
        let buffered = match self {
            OutputWriter::Stdout(mut out) => return out.flush(),
            OutputWriter::File(w) => w,
            OutputWriter::Gzip(enc) => enc.finish()?,
        };
        buffered.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner().flush()
    }
}

/// 書き込み用に開く。親ディレクトリは作らない。
pub fn open_writer<P: AsRef<Path>>(path: P) -> io::Result<OutputWriter> {
    let p = path.as_ref();
    if is_stdio(p) {
        return Ok(OutputWriter::Stdout(io::stdout()));
    }
    let file = BufWriter::new(File::create(p)?);
    Ok(if is_gzip(p) {
        OutputWriter::Gzip(GzEncoder::new(file, Compression::default()))
    } else {
        OutputWriter::File(file)
    })
}
