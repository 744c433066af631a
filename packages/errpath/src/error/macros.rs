//! Macros for error creation and handling

/// Build [`Values`](crate::Values) from plain items and `key => value` pairs.
///
/// ```
/// let vals = errpath::values!["loaded", "id" => 42, "name" => "ducks"];
/// assert_eq!(vals.len(), 3);
/// assert_eq!(vals[1].key(), Some("id"));
/// ```
#[macro_export]
macro_rules! values {
    (@acc [$($out:expr),*]) => {
        ::std::vec![$($out),*]
    };
    (@acc [$($out:expr),*] $key:expr => $val:expr $(, $($rest:tt)*)?) => {
        $crate::values!(@acc [$($out,)* $crate::Value::pair($key, $val)] $($($rest)*)?)
    };
    (@acc [$($out:expr),*] $item:expr $(, $($rest:tt)*)?) => {
        $crate::values!(@acc [$($out,)* $crate::Value::item($item)] $($($rest)*)?)
    };
    ($($body:tt)*) => {
        $crate::values!(@acc [] $($body)*)
    };
}

/// Return early with a new error of the given class.
///
/// `bail!(NotFound, "no user {}", id)` is
/// `return Err(errpath::new(ErrorClass::NotFound, format!(..)))`.
#[macro_export]
macro_rules! bail {
    ($class:ident, $msg:expr) => {
        return ::std::result::Result::Err($crate::new($crate::ErrorClass::$class, $msg))
    };
    ($class:ident, $fmt:expr, $($arg:tt)*) => {
        return ::std::result::Result::Err($crate::new(
            $crate::ErrorClass::$class,
            ::std::format!($fmt, $($arg)*),
        ))
    };
}

/// Bail with the given class unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
