//! `formatString` handling: composite patterns with `{0:spec}` holes,
//! numeric specifiers and date patterns.
//!
//! Date patterns use the `yyyy-MM-dd HH:mm:ss` token set template authors
//! already write, not strftime.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Largest precision or padding width a format specifier may request.
pub const MAX_PRECISION: usize = 99;

/// Normalize a `formatString` attribute into a composite pattern.
///
/// A bare specifier such as `D3` or `yyyy-MM-dd` becomes `{0:D3}`; a pattern
/// that already references the value (`Page {0}`) is kept as written.
pub fn normalize_format_string(format: &str) -> String {
    let format = format.trim();
    if format.is_empty() || format.contains("{0") {
        format.to_string()
    } else {
        format!("{{0:{format}}}")
    }
}

/// Expand every hole of `format` with `render(spec)`.
///
/// `{{` and `}}` are literal braces. An unterminated hole is copied through.
pub fn apply_composite<F>(format: &str, render: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut hole = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    hole.push(c);
                }
                if !closed {
                    out.push('{');
                    out.push_str(&hole);
                    break;
                }
                let spec = hole.split_once(':').map(|(_, spec)| spec).unwrap_or_default();
                out.push_str(&render(spec));
            }
            other => out.push(other),
        }
    }
    out
}

/// Format `value` with a normalized composite pattern; empty means plain.
pub fn format_number(value: i64, format: &str) -> String {
    if format.is_empty() {
        return value.to_string();
    }
    apply_composite(format, |spec| number_spec(value, spec))
}

/// Format `value` with a normalized composite pattern, falling back to
/// `default_pattern` when `format` is empty.
pub fn format_date(value: NaiveDateTime, format: &str, default_pattern: &str) -> String {
    if format.is_empty() {
        return date_pattern(value, default_pattern);
    }
    apply_composite(format, |spec| {
        if spec.is_empty() {
            date_pattern(value, default_pattern)
        } else {
            date_pattern(value, spec)
        }
    })
}

/// Format text through a composite pattern. Specifiers do not apply to text.
pub fn format_text(value: &str, format: &str) -> String {
    if format.is_empty() {
        return value.to_string();
    }
    apply_composite(format, |_| value.to_string())
}

fn number_spec(value: i64, spec: &str) -> String {
    let spec = spec.trim();
    let Some(letter) = spec.chars().next() else {
        return value.to_string();
    };
    let suffix = &spec[letter.len_utf8()..];
    match letter {
        'D' | 'd' => match precision(suffix, 0) {
            Some(width) => signed(value, format!("{:0width$}", value.unsigned_abs())),
            None => value.to_string(),
        },
        'F' | 'f' => match precision(suffix, 2) {
            Some(decimals) => fixed(value, decimals, false),
            None => value.to_string(),
        },
        'N' | 'n' => match precision(suffix, 2) {
            Some(decimals) => fixed(value, decimals, true),
            None => value.to_string(),
        },
        'X' => match precision(suffix, 0) {
            Some(width) => format!("{value:0width$X}"),
            None => value.to_string(),
        },
        'x' => match precision(suffix, 0) {
            Some(width) => format!("{value:0width$x}"),
            None => value.to_string(),
        },
        _ if spec.chars().all(|c| matches!(c, '0' | '#' | ',')) => {
            let width = spec.chars().filter(|c| *c == '0').count();
            if width > MAX_PRECISION {
                return value.to_string();
            }
            let digits = format!("{:0width$}", value.unsigned_abs());
            let digits = if spec.contains(',') {
                group_thousands(&digits)
            } else {
                digits
            };
            signed(value, digits)
        }
        _ => value.to_string(),
    }
}

/// Parse the precision after a standard specifier letter.
///
/// Empty means `default`. Anything unparseable or above [`MAX_PRECISION`]
/// is `None` and the specifier is treated as unrecognized.
fn precision(suffix: &str, default: usize) -> Option<usize> {
    if suffix.is_empty() {
        return Some(default);
    }
    suffix.parse::<usize>().ok().filter(|p| *p <= MAX_PRECISION)
}

fn signed(value: i64, digits: String) -> String {
    if value < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}

fn fixed(value: i64, decimals: usize, grouped: bool) -> String {
    let integer = value.unsigned_abs().to_string();
    let integer = if grouped {
        group_thousands(&integer)
    } else {
        integer
    };
    let sign = if value < 0 { "-" } else { "" };
    if decimals == 0 {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{}", "0".repeat(decimals))
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len.div_euclid(3));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i).rem_euclid(3) == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Expand standard single-letter date formats to their patterns.
fn standard_date_pattern(spec: &str) -> &str {
    match spec {
        "d" => "MM/dd/yyyy",
        "D" => "dddd, dd MMMM yyyy",
        "f" => "dddd, dd MMMM yyyy HH:mm",
        "F" => "dddd, dd MMMM yyyy HH:mm:ss",
        "g" => "MM/dd/yyyy HH:mm",
        "G" => "MM/dd/yyyy HH:mm:ss",
        "M" | "m" => "MMMM dd",
        "s" => "yyyy-MM-dd'T'HH:mm:ss",
        "t" => "HH:mm",
        "T" => "HH:mm:ss",
        "u" => "yyyy-MM-dd HH:mm:ss'Z'",
        "Y" | "y" => "yyyy MMMM",
        other => other,
    }
}

/// Render `value` with a date pattern such as `yyyy年MM月dd日 HH:mm`.
pub fn date_pattern(value: NaiveDateTime, pattern: &str) -> String {
    let pattern = standard_date_pattern(pattern);
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        let width = run.min(MAX_PRECISION);
        match c {
            'y' => {
                if run <= 2 {
                    let year = value.year().rem_euclid(100);
                    out.push_str(&format!("{year:0width$}"));
                } else {
                    out.push_str(&format!("{:0width$}", value.year()));
                }
            }
            'M' => match run {
                1 | 2 => out.push_str(&format!("{:0width$}", value.month())),
                3 => out.push_str(&value.format("%b").to_string()),
                _ => out.push_str(&value.format("%B").to_string()),
            },
            'd' => match run {
                1 | 2 => out.push_str(&format!("{:0width$}", value.day())),
                3 => out.push_str(&value.format("%a").to_string()),
                _ => out.push_str(&value.format("%A").to_string()),
            },
            'H' => out.push_str(&format!("{:0width$}", value.hour(), width = run.min(2))),
            'h' => {
                let (_, hour) = value.hour12();
                out.push_str(&format!("{:0width$}", hour, width = run.min(2)));
            }
            'm' => out.push_str(&format!("{:0width$}", value.minute(), width = run.min(2))),
            's' => out.push_str(&format!("{:0width$}", value.second(), width = run.min(2))),
            'f' => {
                let nanos = format!("{:09}", value.nanosecond().min(999_999_999));
                out.push_str(&nanos[..run.min(9)]);
            }
            't' => {
                let (pm, _) = value.hour12();
                let marker = if pm { "PM" } else { "AM" };
                out.push_str(if run == 1 { &marker[..1] } else { marker });
            }
            '\'' | '"' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j] != c {
                    out.push(chars[j]);
                    j += 1;
                }
                i = j + 1;
                continue;
            }
            '\\' => {
                if let Some(next) = chars.get(i + 1) {
                    out.push(*next);
                }
                i += 2;
                continue;
            }
            other => {
                for _ in 0..run {
                    out.push(other);
                }
            }
        }
        i += run;
    }
    out
}
