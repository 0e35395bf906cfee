//! StateList - 先頭追加のみの永続リスト
//!
//! `cons` は新しいリストを返し、元のリストはそのまま残る（末尾は `Arc` で共有）。
//! index 0 が最後に追加された state。

use std::fmt;
use std::sync::Arc;

use crate::state::State;

struct Node {
    state: State,
    next: Option<Arc<Node>>,
}

/// 異なる型の state を並べる列
///
/// # 使用例
/// ```
/// use reactify_state::{StateList, of_state, to_state};
///
/// let list = StateList::new().cons(to_state(1_i32)).cons(to_state(("a", "b")));
/// assert_eq!(of_state::<(&str, &str)>(list.nth(0).unwrap()), Ok(("a", "b")));
/// assert_eq!(of_state::<i32>(list.nth(1).unwrap()), Ok(1));
/// ```
#[derive(Clone, Default)]
pub struct StateList {
    head: Option<Arc<Node>>,
    len: usize,
}

impl StateList {
    /// 空のリストを作る
    pub fn new() -> Self {
        Self::default()
    }

    /// `state` を先頭に置いた新しいリストを返す
    pub fn cons(&self, state: State) -> Self {
        Self {
            head: Some(Arc::new(Node {
                state,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// 要素数
    pub fn len(&self) -> usize {
        self.len
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 先頭から index 番目の state（0 が最新）
    pub fn nth(&self, index: usize) -> Option<&State> {
        self.iter().nth(index)
    }

    /// 先頭（最新）から順に辿る
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

// 長いリストで再帰的な drop がスタックを使い切らないようにする
impl Drop for StateList {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            // 他スレッドと同時に drop しても、最後の参照を持つ側が必ず続きを辿る
            match Arc::into_inner(node) {
                Some(mut node) => next = node.next.take(),
                None => break,
            }
        }
    }
}

impl PartialEq for StateList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl fmt::Debug for StateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// 先頭から順に並んだリストを作る
impl FromIterator<State> for StateList {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let states: Vec<State> = iter.into_iter().collect();
        states
            .into_iter()
            .rev()
            .fold(StateList::new(), |list, state| list.cons(state))
    }
}

impl<'a> IntoIterator for &'a StateList {
    type Item = &'a State;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `StateList` の iterator
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a State;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.state
        })
    }
}
