//! Console backend for the demo binary and for embedders that just want text.

use crate::interfaces::{LogArg, LogBackend};
use crate::sprintf::render_value;

/// Join a call's arguments into one line, prefix first.
///
/// An empty prefix is skipped so `["", "msg"]` prints as `msg`.
#[must_use]
pub fn render_line(args: &[LogArg]) -> String {
    args.iter()
        .enumerate()
        .filter(|(i, arg)| !(*i == 0 && arg.as_str() == Some("")))
        .map(|(_, arg)| render_value(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes trace through info to stdout, warn and error to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleBackend;

impl LogBackend for ConsoleBackend {
    fn trace(&self, args: &[LogArg]) {
        println!("{}", render_line(args));
    }

    fn debug(&self, args: &[LogArg]) {
        println!("{}", render_line(args));
    }

    fn log(&self, args: &[LogArg]) {
        println!("{}", render_line(args));
    }

    fn info(&self, args: &[LogArg]) {
        println!("{}", render_line(args));
    }

    fn warn(&self, args: &[LogArg]) {
        eprintln!("{}", render_line(args));
    }

    fn error(&self, args: &[LogArg]) {
        eprintln!("{}", render_line(args));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_prefix_and_mixed_arguments() {
        assert_eq!(
            render_line(&[json!("ctx: "), json!("Hello"), json!({ "a": 1 }), json!([1, 2])]),
            r#"ctx:  Hello {"a":1} [1,2]"#
        );
        assert_eq!(render_line(&[json!(""), json!("only message")]), "only message");
        assert_eq!(render_line(&[]), "");
    }
}
