//! Argument reordering for subject-last application.
//!
//! Rust has no variadic arguments, so "extra" arguments travel as a single
//! bundled value (a tuple, usually) passed to the user function by reference
//! after the subject. [`subject_last`] flips that convention so the bundle
//! comes first, and [`bind`] then fixes the bundle once, leaving a
//! single-argument closure over the subject. This is the machinery behind
//! [`LazyFile::map_function_with`](crate::LazyFile::map_function_with).

/// Turn a subject-first function into a subject-last one.
///
/// Given `func(subject, rest)`, returns a function `g(rest, subject)` that
/// behaves identically: `g(&args, s) == func(s, &args)`. The wrapper holds no
/// state of its own and never inspects either argument.
///
/// # Examples
///
/// ```
/// use lazylines::subject_last;
///
/// fn repeat(subject: String, count: &usize) -> String {
///     subject.repeat(*count)
/// }
///
/// let flipped = subject_last(repeat);
/// assert_eq!(flipped(&3, "ab".to_string()), "ababab");
/// ```
pub fn subject_last<S, A, R>(func: impl Fn(S, &A) -> R) -> impl Fn(&A, S) -> R {
    move |rest, subject| func(subject, rest)
}

/// Pre-bind the leading argument bundle of a subject-last function.
///
/// The bundle is moved into the returned closure and lent to `func` by
/// reference on every call, so only the trailing subject slot remains.
/// With the unit bundle `()`, the result is equivalent to calling `func`
/// with the subject alone.
///
/// # Examples
///
/// ```
/// use lazylines::{bind, subject_last};
///
/// fn replace(subject: String, args: &(&str, &str)) -> String {
///     subject.replace(args.0, args.1)
/// }
///
/// let mut censor = bind(subject_last(replace), ("secret", "[redacted]"));
/// assert_eq!(censor("my secret plan".to_string()), "my [redacted] plan");
/// ```
pub fn bind<S, A, R>(func: impl Fn(&A, S) -> R, args: A) -> impl FnMut(S) -> R {
    move |subject| func(&args, subject)
}
