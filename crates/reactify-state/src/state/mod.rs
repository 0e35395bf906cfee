//! State - 型消去された state token
//!
//! 任意の型の値を一つの型 `State` に詰め、後から元の型で取り出す。
//! 異なる型の state を一つの列に並べるための土台。
//!
//! # 二層構造
//! - **表層（Typed）**: `to_state::<T>` / `of_state::<T>` - 型安全
//! - **内部（Dyn）**: `Arc<dyn Any>` + `PayloadType` - type erasure
//!
//! 復元時の型は `TypeId` で検査する。不一致は `StateError::TypeMismatch`。

pub mod cell;
pub mod value;

pub use self::cell::{State, of_state, to_state};
pub use self::value::StateValue;
