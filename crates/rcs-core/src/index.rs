use std::collections::BTreeMap;

use log::debug;

use crate::angle::{AngleKey, FieldValue, Record};

/// 参照ファイルの角度 → 電界の完全一致テーブル
#[derive(Debug, Default, Clone)]
pub struct ReferenceIndex {
    entries: BTreeMap<AngleKey, FieldValue>,
    overwritten: usize,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同じ角度が既にあれば後勝ちで上書きし、古い値を返す。
    pub fn insert(&mut self, record: Record) -> Option<FieldValue> {
        let previous = self.entries.insert(record.angle, record.field);
        if previous.is_some() {
            self.overwritten += 1;
            debug!("duplicate reference angle {:?}; keeping the later value", record.angle);
        }
        previous
    }

    pub fn lookup(&self, angle: &AngleKey) -> Option<FieldValue> {
        self.entries.get(angle).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 重複により上書きされた回数
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}

impl FromIterator<Record> for ReferenceIndex {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}
