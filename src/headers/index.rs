//! ヘッダー列から派生する大文字小文字無視のマルチマップ

use std::collections::HashMap;
use std::ops::Range;
use bytes::Bytes;
use crate::store::NameValue;
use super::comma::{split_ranges, CommaFields};

/// インデックス内の値の参照（ヘッダー列の位置と値内のバイト範囲）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValueRef {
    pub entry: usize,
    pub range: Range<usize>,
}

impl ValueRef {
    pub fn resolve<'a>(&self, entries: &'a [NameValue]) -> &'a [u8] {
        &entries[self.entry].value[self.range.clone()]
    }
}

/// 名前ごとの値。`name` は最初に追加された時の綴り
#[derive(Debug, Clone)]
struct Slot {
    name: Bytes,
    refs: Vec<ValueRef>,
}

pub(crate) fn fold_name(name: &[u8]) -> Vec<u8> {
    name.to_ascii_lowercase()
}

#[derive(Debug, Clone, Default)]
pub(crate) struct NameIndex {
    by_name: HashMap<Vec<u8>, Slot>,
    // 全ての値を挿入順に保持（正規化した名前付き）
    order: Vec<(Vec<u8>, ValueRef)>,
}

impl NameIndex {
    pub fn build(entries: &[NameValue], comma_fields: &CommaFields) -> Self {
        let mut index = Self::default();
        for (i, entry) in entries.iter().enumerate() {
            index.insert(i, entry, comma_fields);
        }
        index
    }

    pub fn insert(&mut self, position: usize, entry: &NameValue, comma_fields: &CommaFields) {
        let refs: Vec<ValueRef> = if comma_fields.contains(&entry.name) {
            split_ranges(&entry.value)
                .into_iter()
                .map(|range| ValueRef { entry: position, range })
                .collect()
        } else {
            vec![ValueRef { entry: position, range: 0..entry.value.len() }]
        };
        // カンマ区切りヘッダーの値が全て空なら名前も登録しない
        if refs.is_empty() {
            return;
        }
        let key = fold_name(&entry.name);
        self.order
            .extend(refs.iter().map(|r| (key.clone(), r.clone())));
        self.by_name
            .entry(key)
            .or_insert_with(|| Slot {
                name: entry.name.clone(),
                refs: Vec::new(),
            })
            .refs
            .extend(refs);
    }

    pub fn get(&self, name: &[u8]) -> Option<&[ValueRef]> {
        self.by_name
            .get(fold_name(name).as_slice())
            .map(|slot| slot.refs.as_slice())
    }

    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }

    /// 名前に一致する値を全て取り除く。存在しなければfalse
    pub fn remove_all(&mut self, name: &[u8]) -> bool {
        let key = fold_name(name);
        match self.by_name.remove(key.as_slice()) {
            Some(removed) => {
                let mut doomed: Vec<usize> = removed.refs.iter().map(|r| r.entry).collect();
                doomed.dedup();
                self.order
                    .retain(|(_, r)| doomed.binary_search(&r.entry).is_err());
                true
            }
            None => false,
        }
    }

    /// 残っている値を挿入順に、その名前の最初の綴りと組にして返す
    pub fn values(&self) -> impl Iterator<Item = (&Bytes, &ValueRef)> {
        self.order
            .iter()
            .filter_map(|(key, r)| self.by_name.get(key).map(|slot| (&slot.name, r)))
    }
}
