//! StateValue - payload になれる型の条件
//!
//! # Trait Bounds
//! - `Any`: 復元時の型検査のため（`'static` を含む）
//! - `PartialEq`: token 同士を payload で比較するため
//! - `Debug`: token の Debug 表示のため
//! - `Send + Sync`: 複数スレッドから同じ token を読むため
//!
//! この条件を満たさない値（借用を含む値など）はコンパイル時に拒否される。

use std::any::{Any, type_name};
use std::fmt;

pub trait StateValue: Any + fmt::Debug + PartialEq + Send + Sync {}

impl<T> StateValue for T where T: Any + fmt::Debug + PartialEq + Send + Sync {}

pub(crate) type Payload = dyn Any + Send + Sync;

/// encode 時の型ごとの操作表
///
/// `T` の情報は関数ポインタに単相化されて残るので、
/// `Arc<dyn Any>` に消去した後でも比較と表示ができる。
#[derive(Clone, Copy)]
pub(crate) struct PayloadType {
    pub(crate) name: &'static str,
    pub(crate) eq: fn(&Payload, &Payload) -> bool,
    pub(crate) debug: fn(&Payload, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl PayloadType {
    pub(crate) fn of<T: StateValue>() -> Self {
        Self {
            name: type_name::<T>(),
            eq: payload_eq::<T>,
            debug: payload_debug::<T>,
        }
    }
}

fn payload_eq<T: StateValue>(left: &Payload, right: &Payload) -> bool {
    match (left.downcast_ref::<T>(), right.downcast_ref::<T>()) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

fn payload_debug<T: StateValue>(payload: &Payload, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match payload.downcast_ref::<T>() {
        Some(value) => fmt::Debug::fmt(value, f),
        None => f.write_str("<unknown>"),
    }
}
