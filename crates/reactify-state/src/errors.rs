//! Errors - State の復元エラー
//!
//! 復元時の型不一致は、静かに壊れた値を返すよりも呼び出し側へ返す。
//! hook の順序と state の対応がずれた場合、ランタイムは
//! `is_type_mismatch()` を見て state 全体をリセットするか判断できる。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// 要求された型と encode 時の型が一致しない
    #[error("state type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Slot の位置に state が存在しない
    #[error("state slot {index} out of range (len={len})")]
    SlotOutOfRange { index: usize, len: usize },
}

impl StateError {
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, StateError::TypeMismatch { .. })
    }
}
