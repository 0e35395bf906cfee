//! State token and the `to_state` / `of_state` pair.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use super::value::{Payload, PayloadType, StateValue};
use crate::errors::StateError;

/// 型消去された state
///
/// どの型の値を包んでも `State` という一つの型になるので、
/// `Vec<State>` や `StateList` に異なる型の state を並べられる。
///
/// # 使用例
/// ```
/// use reactify_state::{of_state, to_state};
///
/// let states = vec![to_state(1_i32), to_state(("a", "b"))];
/// assert_eq!(of_state::<i32>(&states[0]), Ok(1));
/// assert_eq!(of_state::<(&str, &str)>(&states[1]), Ok(("a", "b")));
/// assert!(of_state::<String>(&states[0]).is_err());
/// ```
///
/// 生成後は不変。`Clone` は payload を共有するだけでコピーしない。
#[derive(Clone)]
pub struct State {
    payload: Arc<Payload>,
    ty: PayloadType,
}

impl State {
    /// 値を包んで token を作る
    pub fn new<T: StateValue>(value: T) -> Self {
        tracing::trace!(payload_type = type_name::<T>(), "state encoded");
        Self {
            payload: Arc::new(value),
            ty: PayloadType::of::<T>(),
        }
    }

    /// encode 時に記録した型名
    pub fn type_name(&self) -> &'static str {
        self.ty.name
    }

    /// payload が `T` かどうか
    pub fn is<T: StateValue>(&self) -> bool {
        self.payload.is::<T>()
    }

    /// payload を `T` として借用する
    pub fn downcast_ref<T: StateValue>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// 借用したまま復元する。型が違えば `StateError::TypeMismatch`。
    pub fn try_get<T: StateValue>(&self) -> Result<&T, StateError> {
        self.downcast_ref::<T>()
            .ok_or_else(|| self.mismatch(type_name::<T>()))
    }

    /// token を消費して復元する
    ///
    /// 最後の handle なら payload をそのまま取り出し、共有されていれば clone する。
    /// 型が違えば token をそのまま `Err` で返す。
    pub fn into_inner<T: StateValue + Clone>(self) -> Result<T, State> {
        let ty = self.ty;
        match self.payload.downcast::<T>() {
            Ok(shared) => Ok(Arc::try_unwrap(shared).unwrap_or_else(|shared| T::clone(&shared))),
            Err(payload) => {
                let state = State { payload, ty };
                state.log_rejected(type_name::<T>());
                Err(state)
            }
        }
    }

    fn log_rejected(&self, expected: &'static str) {
        tracing::debug!(expected, found = self.ty.name, "state decode rejected");
    }

    fn mismatch(&self, expected: &'static str) -> StateError {
        self.log_rejected(expected);
        StateError::TypeMismatch {
            expected,
            found: self.ty.name,
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        (self.ty.eq)(&*self.payload, &*other.payload)
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State<{}>(", self.ty.name)?;
        (self.ty.debug)(&*self.payload, f)?;
        f.write_str(")")
    }
}

/// 値を `State` に包む。失敗しない。
pub fn to_state<T: StateValue>(value: T) -> State {
    State::new(value)
}

/// `State` を encode 時の型で取り出す
///
/// `T` が encode 時の型と異なる場合は `StateError::TypeMismatch` を返す。
/// token は消費しない。
pub fn of_state<T: StateValue + Clone>(state: &State) -> Result<T, StateError> {
    state.try_get::<T>().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        label: String,
        count: u32,
    }

    #[test]
    fn int_round_trips() {
        let i = 1;
        let state = to_state(i);
        assert_eq!(of_state::<i32>(&state), Ok(i));
    }

    #[test]
    fn tuple_round_trips() {
        let p = (1, "a");
        let state = to_state(p);
        assert_eq!(of_state::<(i32, &str)>(&state), Ok(p));
    }

    #[test]
    fn struct_round_trips() {
        let counter = Counter {
            label: "clicks".to_string(),
            count: 3,
        };
        let state = to_state(counter.clone());
        assert_eq!(of_state::<Counter>(&state), Ok(counter));
    }

    #[test]
    fn mismatched_decode_reports_both_types() {
        init_tracing();
        let state = to_state(1_i32);

        let err = of_state::<String>(&state).unwrap_err();
        assert_eq!(
            err,
            StateError::TypeMismatch {
                expected: type_name::<String>(),
                found: "i32",
            }
        );
        assert!(err.is_type_mismatch());
    }

    type Decode = fn(&State) -> Result<(), StateError>;

    #[rstest]
    #[case::wider_int(to_state(1_i32), type_name::<i64>(), |s: &State| of_state::<i64>(s).map(drop))]
    #[case::unsigned(to_state(1_i32), type_name::<u32>(), |s: &State| of_state::<u32>(s).map(drop))]
    #[case::string_vs_str(to_state("a".to_string()), type_name::<&str>(), |s: &State| of_state::<&str>(s).map(drop))]
    #[case::swapped_tuple(to_state((1_i32, "a")), type_name::<(&str, i32)>(), |s: &State| of_state::<(&str, i32)>(s).map(drop))]
    fn near_miss_types_are_rejected(
        #[case] state: State,
        #[case] requested: &'static str,
        #[case] decode: Decode,
    ) {
        let err = decode(&state).unwrap_err();

        assert_eq!(
            err,
            StateError::TypeMismatch {
                expected: requested,
                found: state.type_name(),
            }
        );
    }

    #[test]
    fn decoding_does_not_consume_the_token() {
        let state = to_state(vec![1, 2, 3]);
        assert_eq!(of_state::<Vec<i32>>(&state), Ok(vec![1, 2, 3]));
        assert_eq!(of_state::<Vec<i32>>(&state), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn inspection_without_decoding() {
        let state = to_state(("a", "b"));
        assert!(state.is::<(&str, &str)>());
        assert!(!state.is::<(String, String)>());
        assert_eq!(state.downcast_ref::<(&str, &str)>(), Some(&("a", "b")));
        assert_eq!(state.downcast_ref::<i32>(), None);
        assert_eq!(state.try_get::<(&str, &str)>(), Ok(&("a", "b")));
        assert_eq!(state.type_name(), type_name::<(&str, &str)>());
    }

    #[test]
    fn into_inner_moves_out_of_a_unique_token() {
        let state = to_state(String::from("only"));
        assert_eq!(state.into_inner::<String>(), Ok(String::from("only")));
    }

    #[test]
    fn into_inner_clones_when_shared() {
        let state = to_state(String::from("shared"));
        let other = state.clone();

        assert_eq!(state.into_inner::<String>(), Ok(String::from("shared")));
        assert_eq!(of_state::<String>(&other), Ok(String::from("shared")));
    }

    #[test]
    fn into_inner_returns_the_token_on_mismatch() {
        init_tracing();
        let state = to_state(7_u8);

        let back = state.into_inner::<u16>().unwrap_err();
        assert_eq!(back.type_name(), "u8");
        assert_eq!(of_state::<u8>(&back), Ok(7));
    }

    #[test]
    fn tokens_compare_by_payload() {
        assert_eq!(to_state(1_i32), to_state(1_i32));
        assert_ne!(to_state(1_i32), to_state(2_i32));
        assert_eq!(to_state((1, "a")), to_state((1, "a")));
        assert_ne!(to_state((1, "a")), to_state((1, "b")));
    }

    #[test]
    fn tokens_of_different_types_are_never_equal() {
        // Debug 表示が同じでも型が違えば別物
        assert_ne!(to_state(1_i32), to_state(1_i64));
        assert_ne!(to_state(1_i64), to_state(1_i32));
    }

    #[test]
    fn clone_shares_the_payload() {
        let state = to_state(Counter {
            label: "x".to_string(),
            count: 0,
        });
        let copy = state.clone();
        assert_eq!(state, copy);
        assert!(std::ptr::eq(
            state.downcast_ref::<Counter>().unwrap(),
            copy.downcast_ref::<Counter>().unwrap()
        ));
    }

    #[test]
    fn debug_shows_type_and_payload() {
        assert_eq!(format!("{:?}", to_state(1_i32)), "State<i32>(1)");
        assert_eq!(
            format!("{:?}", to_state("a")),
            format!("State<{}>(\"a\")", type_name::<&str>())
        );
    }

    #[test]
    fn tokens_decode_from_many_threads() {
        let state = to_state((42_u64, String::from("shared")));

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| of_state::<(u64, String)>(&state)))
                .collect();
            for handle in handles {
                assert_eq!(
                    handle.join().unwrap(),
                    Ok((42, String::from("shared")))
                );
            }
        });
    }

    proptest! {
        #[test]
        fn prop_int_round_trip(v in any::<i64>()) {
            prop_assert_eq!(of_state::<i64>(&to_state(v)), Ok(v));
        }

        #[test]
        fn prop_tuple_round_trip(v in (any::<i32>(), ".*")) {
            prop_assert_eq!(of_state::<(i32, String)>(&to_state(v.clone())), Ok(v));
        }

        #[test]
        fn prop_vec_round_trip(v in prop::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(of_state::<Vec<u8>>(&to_state(v.clone())), Ok(v));
        }

        #[test]
        fn prop_int_never_decodes_as_string(v in any::<i32>()) {
            prop_assert!(of_state::<String>(&to_state(v)).is_err());
        }
    }
}
