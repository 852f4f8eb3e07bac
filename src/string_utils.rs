//! String utility functions for building the output document.

/// Append `name` to `buf`, backslash-escaping `"` and `\`.
///
/// Nothing else is escaped: control characters in names pass through
/// unchanged, so such names yield a document strict JSON parsers reject.
///
/// # Example
///
/// ```
/// use boxdu::string_utils::push_escaped;
///
/// let mut buf = String::new();
/// push_escaped(&mut buf, r#"say "hi" from C:\temp"#);
/// assert_eq!(buf, r#"say \"hi\" from C:\\temp"#);
/// ```
pub fn push_escaped(buf: &mut String, name: &str) {
    for c in name.chars() {
        if c == '"' || c == '\\' {
            buf.push('\\');
        }
        buf.push(c);
    }
}
