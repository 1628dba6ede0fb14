//! CLI 共通モジュール

pub mod io;
pub mod summary;
