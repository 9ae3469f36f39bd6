use std::fmt::{Display, Write};

/// Substitutes the positional tokens of `template` with `args`.
///
/// A token is `{n}` where `n` is one or more ASCII digits. Tokens whose index is in bounds are
/// replaced by the argument's `Display` output; all other tokens, as well as any brace that
/// does not form a token, are copied verbatim. Arguments that no token refers to are ignored
/// and substituted text is never scanned again.
///
/// ```
/// use logbridge_core::format_message;
///
/// assert_eq!(format_message("hello {0} - {1}", &[&"vert.x"]), "hello vert.x - {1}");
/// ```
pub fn format_message(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || after.as_bytes().get(digits) != Some(&b'}') {
            // lone brace, scan again right after it
            out.push('{');
            rest = after;
            continue;
        }
        let token = &rest[open..open + digits + 2];
        match after[..digits].parse::<usize>().ok().and_then(|i| args.get(i)) {
            Some(arg) => {
                let _ = write!(out, "{arg}");
            }
            None => out.push_str(token),
        }
        rest = &after[digits + 1..];
    }
    out.push_str(rest);
    out
}
