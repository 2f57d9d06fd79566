//! Static feed corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of newline-delimited JSON as a
//! collector would send it.

/// Well-formed readings that the TSS stage accepts.
pub const CORPUS_VALID: &[&str] = &[
    r#"{"values":[12.5]}"#,
    r#"{"values":[0.0,1.0,2.0],"timestamp":"2024-01-15T09:59:00Z"}"#,
    r#"{"payload":[431],"sourceTags":{"port":"/dev/ttyUSB0"}}"#,
    r#"{"values":[-3.75],"source_tags":{"location":"raceway_2"},"timestamp":"2024-01-15T09:58:30.250Z"}"#,
];

/// Lines that decode but that the stage rejects.
pub const CORPUS_REJECTED: &[&str] = &[
    r#"{"values":[]}"#,
    r#"{"payload":["12.5"]}"#,
    r#"{"values":[null,4.0]}"#,
];

/// Lines that are not raw readings at all.
pub const CORPUS_MALFORMED: &[&str] = &[
    "12.5",
    r#"{"values":[12.5]"#,
    r#"{"timestamp":"2024-01-15T10:00:00Z"}"#,
    r#"{"values":[1.0],"timestamp":"yesterday"}"#,
];

/// Join a corpus into one newline-delimited blob.
pub fn ndjson(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
