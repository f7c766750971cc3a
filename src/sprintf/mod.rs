//! Printf-style substitution engine.
//!
//! Supports `%s`, `%N$s` and `%(key)s` argument references, the conversions
//! `s d i f j x X o b`, the `+ - 0` flags, width and `.precision`, and `%%`.

pub mod placeholder;

use serde_json::Value;

use crate::errors::SubstitutionError;
use crate::interfaces::{LogArg, Substitute};
use placeholder::{ArgRef, Placeholder, Token, tokenize};

/// Default implementation of Substitute backed by [`sprintf`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SprintfFormatter;

impl Substitute for SprintfFormatter {
    fn substitute(&self, format: &str, args: &[LogArg]) -> Result<String, SubstitutionError> {
        sprintf(format, args)
    }
}

/// Substitute `args` into `format`.
///
/// # Errors
///
/// Fails when a placeholder references a missing argument or key, when named
/// and positional placeholders are mixed, when a numeric conversion receives a
/// non-numeric value, or when a `%` starts no known placeholder.
pub fn sprintf(format: &str, args: &[LogArg]) -> Result<String, SubstitutionError> {
    let tokens = tokenize(format);

    let has_named = tokens
        .iter()
        .any(|t| matches!(t, Token::Placeholder(p) if matches!(p.arg, ArgRef::Key(_))));
    let has_unnamed = tokens
        .iter()
        .any(|t| matches!(t, Token::Placeholder(p) if !matches!(p.arg, ArgRef::Key(_))));
    if has_named && has_unnamed {
        return Err(SubstitutionError::MixedNamedAndPositional);
    }

    let mut out = String::with_capacity(format.len());
    let mut cursor = 0;
    for token in &tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Percent => out.push('%'),
            Token::Stray(offset) => return Err(SubstitutionError::BadPlaceholder(*offset)),
            Token::Placeholder(p) => {
                let value = match &p.arg {
                    ArgRef::Next => {
                        cursor += 1;
                        args.get(cursor - 1)
                            .ok_or(SubstitutionError::MissingArgument(cursor))?
                    }
                    ArgRef::Index(i) => args
                        .get(i - 1)
                        .ok_or(SubstitutionError::MissingArgument(*i))?,
                    ArgRef::Key(key) => lookup_key(args.first(), key)?,
                };
                out.push_str(&convert(p, value)?);
            }
        }
    }
    Ok(out)
}

fn lookup_key<'a>(source: Option<&'a Value>, key: &str) -> Result<&'a Value, SubstitutionError> {
    let mut current = source
        .filter(|v| v.is_object())
        .ok_or_else(|| SubstitutionError::MissingNamedSource(key.to_string()))?;
    for segment in key.split('.') {
        current = current
            .get(segment)
            .ok_or_else(|| SubstitutionError::UnknownKey(key.to_string()))?;
    }
    Ok(current)
}

/// Text a value takes in a `%s` slot.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() => js_number(f),
            _ => n.to_string(),
        },
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Whole floats print without a fractional part (`2.0` -> `2`).
fn js_number(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn as_number(p: &Placeholder, value: &Value) -> Result<f64, SubstitutionError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| SubstitutionError::NotANumber {
        conversion: p.conversion,
        found: value.to_string(),
    })
}

fn convert(p: &Placeholder, value: &Value) -> Result<String, SubstitutionError> {
    let mut negative = false;
    let body = match p.conversion {
        'd' | 'i' => {
            let n = as_number(p, value)?.trunc();
            negative = n < 0.0;
            js_number(n.abs())
        }
        'f' => {
            let n = as_number(p, value)?;
            negative = n < 0.0;
            match p.precision {
                Some(precision) => format!("{:.*}", precision, n.abs()),
                None => js_number(n.abs()),
            }
        }
        'x' | 'X' | 'o' | 'b' => {
            // unsigned 32-bit view, like a `>>> 0` shift
            let n = as_number(p, value)?.trunc() as i64 as u32;
            match p.conversion {
                'x' => format!("{n:x}"),
                'X' => format!("{n:X}"),
                'o' => format!("{n:o}"),
                _ => format!("{n:b}"),
            }
        }
        'j' => {
            let json = match p.precision {
                Some(_) => serde_json::to_string_pretty(value),
                None => serde_json::to_string(value),
            };
            json.unwrap_or_else(|_| value.to_string())
        }
        _ => {
            let text = render_value(value);
            match p.precision {
                Some(precision) => text.chars().take(precision).collect(),
                None => text,
            }
        }
    };

    let numeric = matches!(p.conversion, 'd' | 'i' | 'f');
    let sign = if numeric && negative {
        "-"
    } else if numeric && p.plus_sign {
        "+"
    } else {
        ""
    };

    Ok(pad(p, sign, &body, numeric))
}

fn pad(p: &Placeholder, sign: &str, body: &str, numeric: bool) -> String {
    let len = sign.chars().count() + body.chars().count();
    let Some(width) = p.width.filter(|w| *w > len) else {
        return format!("{sign}{body}");
    };
    let fill = width - len;
    if p.left_align {
        format!("{sign}{body}{}", " ".repeat(fill))
    } else if p.zero_pad && numeric {
        format!("{sign}{}{body}", "0".repeat(fill))
    } else if p.zero_pad {
        format!("{}{sign}{body}", "0".repeat(fill))
    } else {
        format!("{}{sign}{body}", " ".repeat(fill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positional_and_escaped_percent() {
        assert_eq!(sprintf("Hello %s!", &[json!("World")]).unwrap(), "Hello World!");
        assert_eq!(
            sprintf("%s%% %s!", &[json!("Hello"), json!("World")]).unwrap(),
            "Hello% World!"
        );
        assert_eq!(sprintf("%%", &[]).unwrap(), "%");
    }

    #[test]
    fn explicit_indexes_reorder() {
        assert_eq!(
            sprintf("%2$s %1$s!", &[json!("Hello"), json!("World")]).unwrap(),
            "World Hello!"
        );
        assert_eq!(
            sprintf("%2$s(%1$s): ", &[json!("T"), json!("dummy")]).unwrap(),
            "dummy(T): "
        );
    }

    #[test]
    fn named_keys_read_from_mapping() {
        let map = json!({ "first": "World", "second": "Hello", "nested": { "x": 7 } });
        assert_eq!(
            sprintf("%(second)s %(first)s!", &[map.clone()]).unwrap(),
            "Hello World!"
        );
        assert_eq!(sprintf("x=%(nested.x)d", &[map]).unwrap(), "x=7");
    }

    #[test]
    fn named_errors() {
        assert_eq!(
            sprintf("%(first)s", &[json!("not a map")]).unwrap_err(),
            SubstitutionError::MissingNamedSource("first".to_string())
        );
        assert_eq!(
            sprintf("%(first)s", &[]).unwrap_err(),
            SubstitutionError::MissingNamedSource("first".to_string())
        );
        assert_eq!(
            sprintf("%(third)s", &[json!({ "first": 1 })]).unwrap_err(),
            SubstitutionError::UnknownKey("third".to_string())
        );
        assert_eq!(
            sprintf("%(first)s %s", &[json!({ "first": 1 }), json!(2)]).unwrap_err(),
            SubstitutionError::MixedNamedAndPositional
        );
    }

    #[test]
    fn missing_positional_argument() {
        assert_eq!(
            sprintf("%s %s", &[json!("one")]).unwrap_err(),
            SubstitutionError::MissingArgument(2)
        );
        assert_eq!(
            sprintf("%3$s", &[json!("one")]).unwrap_err(),
            SubstitutionError::MissingArgument(3)
        );
    }

    #[test]
    fn renders_non_string_values() {
        let args = [json!(3), json!(2.5), json!(true), json!(null), json!([1, 2])];
        assert_eq!(sprintf("%s|%s|%s|%s|%s", &args).unwrap(), "3|2.5|true|null|[1,2]");
        assert_eq!(sprintf("%s", &[json!({ "a": 1 })]).unwrap(), r#"{"a":1}"#);
        assert_eq!(sprintf("%j", &[json!({ "a": [1] })]).unwrap(), r#"{"a":[1]}"#);
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(sprintf("%d", &[json!(42.9)]).unwrap(), "42");
        assert_eq!(sprintf("%i", &[json!("-7")]).unwrap(), "-7");
        assert_eq!(sprintf("%+d", &[json!(5)]).unwrap(), "+5");
        assert_eq!(sprintf("%.2f", &[json!(3.14159)]).unwrap(), "3.14");
        assert_eq!(sprintf("%f", &[json!(2.0)]).unwrap(), "2");
        assert_eq!(sprintf("%05d", &[json!(-42)]).unwrap(), "-0042");
        assert_eq!(
            sprintf("%x %X %o %b", &[json!(255), json!(255), json!(8), json!(5)]).unwrap(),
            "ff FF 10 101"
        );
        assert_eq!(
            sprintf("%d", &[json!("abc")]).unwrap_err(),
            SubstitutionError::NotANumber {
                conversion: 'd',
                found: "\"abc\"".to_string()
            }
        );
    }

    #[test]
    fn width_precision_and_alignment() {
        assert_eq!(sprintf("[%5s]", &[json!("ab")]).unwrap(), "[   ab]");
        assert_eq!(sprintf("[%-5s]", &[json!("ab")]).unwrap(), "[ab   ]");
        assert_eq!(sprintf("[%.3s]", &[json!("abcdef")]).unwrap(), "[abc]");
        assert_eq!(sprintf("[%05s]", &[json!("ab")]).unwrap(), "[000ab]");
    }

    #[test]
    fn stray_percent_is_an_error_once_substituting() {
        assert_eq!(
            sprintf("50% of %s", &[json!("x")]).unwrap_err(),
            SubstitutionError::BadPlaceholder(2)
        );
    }
}
