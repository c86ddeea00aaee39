/// Compile a regular expression once and hand out a `&'static Regex`.
///
/// Patterns are literals checked by the test suite, so a compile failure is a
/// programming error.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("static regex must compile"));
        &*RE
    }};
}
