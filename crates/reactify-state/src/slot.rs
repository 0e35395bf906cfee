//! Slot - 位置と型の対応を呼び出し側で覚える
//!
//! `StateList` 自体は「何番目にどの型があるか」を知らない。
//! その対応は呼び出し側の責任なので、`Slot<T>` として位置ごとに型を固定する。
//!
//! ## Phantom Type パターン
//! `T` は実行時には使わない（PhantomData）。`Slot<i32>` と `Slot<String>` は
//! 別の型になり、`read` の戻り値の型が位置ごとに決まる。

use std::fmt;
use std::marker::PhantomData;

use crate::errors::StateError;
use crate::list::StateList;
use crate::state::{StateValue, of_state};

/// `StateList` の index 番目に `T` があることを表す handle
///
/// # 例
/// ```
/// use reactify_state::{Slot, StateList, to_state};
///
/// const LABEL: Slot<(&str, &str)> = Slot::at(0);
/// const COUNT: Slot<i32> = Slot::at(1);
///
/// let list = StateList::new().cons(to_state(1_i32)).cons(to_state(("a", "b")));
/// assert_eq!(LABEL.read(&list), Ok(("a", "b")));
/// assert_eq!(COUNT.read(&list), Ok(1));
/// ```
pub struct Slot<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    /// index 番目を指す Slot を作る
    pub const fn at(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// リスト上の位置
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T: StateValue + Clone> Slot<T> {
    /// index 番目の state を `T` として取り出す
    ///
    /// - リストが短ければ `StateError::SlotOutOfRange`
    /// - 型が違えば `StateError::TypeMismatch`
    pub fn read(&self, list: &StateList) -> Result<T, StateError> {
        let state = list.nth(self.index).ok_or(StateError::SlotOutOfRange {
            index: self.index,
            len: list.len(),
        })?;
        of_state(state)
    }
}

// derive だと `T: Clone` などを要求してしまうので手で書く
impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot<{}>({})", std::any::type_name::<T>(), self.index)
    }
}
