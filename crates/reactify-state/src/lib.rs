//! reactify-state
//!
//! Type-erased state tokens for hook-style state storage.
//!
//! # モジュール構成
//! - **state**: `State` token と `to_state` / `of_state`
//! - **list**: `StateList`（異なる型の state を並べる永続リスト）
//! - **slot**: `Slot<T>`（位置と型の対応を呼び出し側で固定する handle）
//! - **errors**: `StateError`
//!
//! ```
//! use reactify_state::{StateList, of_state, to_state};
//!
//! let list = StateList::new().cons(to_state(1)).cons(to_state(("a", "b")));
//! assert_eq!(of_state::<(&str, &str)>(list.nth(0).unwrap()), Ok(("a", "b")));
//! assert_eq!(of_state::<i32>(list.nth(1).unwrap()), Ok(1));
//! assert!(of_state::<String>(list.nth(1).unwrap()).unwrap_err().is_type_mismatch());
//! ```

pub mod errors;
pub mod list;
pub mod slot;
pub mod state;

// 主要な型を再エクスポート
pub use self::errors::StateError;
pub use self::list::StateList;
pub use self::slot::Slot;
pub use self::state::{State, StateValue, of_state, to_state};
