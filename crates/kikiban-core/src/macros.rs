//! 前提条件チェック用マクロ

/// 前提条件の検査
///
/// debug ビルド、または `strict-asserts` feature 有効時のみ検査する。
/// それ以外ではコンパイル時に消える。
macro_rules! assert_lv {
    ($cond:expr $(,)?) => {
        if cfg!(any(debug_assertions, feature = "strict-asserts")) {
            assert!($cond);
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(any(debug_assertions, feature = "strict-asserts")) {
            assert!($cond, $($arg)+);
        }
    };
}
