//! RCS プロットファイル比較ツール群
//!
//! 比較エンジン本体は `rcs-core` にあり、ここには CLI 側の入出力だけを置く。

pub mod common;
