use crate::domain::model::Row;
use crate::utils::error::{ImportError, Result};
use serde_json::Value;

/// How an uploaded file is read.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// First line supplies the column names.
    pub has_header: bool,
    /// When set, a row whose column count differs from the header fails
    /// the whole file. The default is the historical permissive mode:
    /// short rows leave columns absent, long rows drop the extras.
    pub strict_columns: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            strict_columns: false,
        }
    }
}

/// Parse raw delimited text into rows, in file order. Blank lines are
/// skipped outright; they are neither rows nor errors. A line of bare
/// delimiters is not blank: it parses as a row of empty fields and is
/// left for the validator to reject under its own row number. Any
/// error from the underlying reader aborts the whole file before a
/// single row is handed to the importer.
pub fn parse_rows(content: &str, options: &ParseOptions) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .flexible(!options.strict_columns)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = if options.has_header {
        reader
            .headers()
            .map_err(|e| ImportError::ParseError {
                message: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::ParseError {
            message: e.to_string(),
        })?;

        let mut row = Row::new();
        if options.has_header {
            for (i, name) in headers.iter().enumerate() {
                if let Some(raw) = record.get(i) {
                    row.fields.insert(name.clone(), coerce_value(raw));
                }
            }
        } else {
            for (i, raw) in record.iter().enumerate() {
                row.fields.insert(format!("column_{}", i + 1), coerce_value(raw));
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Best-effort dynamic typing: integer and float tokens become numbers,
/// "true"/"false" become booleans, everything else stays a string.
fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();

    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    Value::String(raw.to_string())
}
