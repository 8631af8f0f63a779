//! Delimited text format for calculation records.
//!
//! One header line naming the columns, then one line per record. Fields
//! containing a delimiter, quote or line break are double-quoted with
//! embedded quotes doubled.

use super::error::PersistenceError;
use crate::core::Calculation;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::mem;

/// Column names, in the order they are written.
pub const HEADER: [&str; 5] = [
    "operand_a",
    "operand_b",
    "operation_name",
    "result",
    "timestamp",
];

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Render records as delimited text. An empty slice renders the header only.
pub fn encode_records(records: &[Calculation]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for record in records {
        let fields = [
            record.operand_a().to_string(),
            record.operand_b().to_string(),
            quote(record.operation_name()),
            record.result().to_string(),
            record.timestamp().to_rfc3339(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Parse delimited text back into records.
///
/// Columns are located by header name, so their order is free and unknown
/// columns are ignored. A missing `timestamp` column or empty timestamp
/// cell is filled with the current time.
pub fn decode_records(text: &str) -> Result<Vec<Calculation>, PersistenceError> {
    let mut rows = parse_rows(text)?.into_iter();
    let header = rows.next().ok_or(PersistenceError::MissingHeader)?;
    let columns = Columns::locate(&header.fields)?;

    rows.map(|row| columns.record(&row)).collect()
}

struct Row {
    line: usize,
    fields: Vec<String>,
}

struct Columns {
    operand_a: usize,
    operand_b: usize,
    operation_name: usize,
    result: usize,
    timestamp: Option<usize>,
}

impl Columns {
    fn locate(header: &[String]) -> Result<Self, PersistenceError> {
        let position = |column: &str| header.iter().position(|name| name.trim() == column);
        let required = |column: &'static str| {
            position(column).ok_or(PersistenceError::MissingColumn { column })
        };
        Ok(Self {
            operand_a: required("operand_a")?,
            operand_b: required("operand_b")?,
            operation_name: required("operation_name")?,
            result: required("result")?,
            timestamp: position("timestamp"),
        })
    }

    fn record(&self, row: &Row) -> Result<Calculation, PersistenceError> {
        let field = |index: usize| {
            row.fields
                .get(index)
                .map(|value| value.trim())
                .ok_or_else(|| malformed(row, format!("expected at least {} fields", index + 1)))
        };
        let number = |index: usize, column: &str| {
            let raw = field(index)?;
            raw.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| malformed(row, format!("{column} '{raw}' is not a finite number")))
        };

        let operation_name = field(self.operation_name)?;
        if operation_name.is_empty() {
            return Err(malformed(row, "operation_name is empty".to_string()));
        }
        let timestamp = match self.timestamp {
            Some(index) => match field(index)? {
                "" => Utc::now(),
                raw => parse_timestamp(raw)
                    .ok_or_else(|| malformed(row, format!("timestamp '{raw}' is not ISO-8601")))?,
            },
            None => Utc::now(),
        };

        Ok(Calculation::with_timestamp(
            number(self.operand_a, "operand_a")?,
            number(self.operand_b, "operand_b")?,
            operation_name,
            number(self.result, "result")?,
            timestamp,
        ))
    }
}

fn malformed(row: &Row, message: String) -> PersistenceError {
    PersistenceError::Malformed {
        line: row.line,
        message,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn parse_rows(text: &str) -> Result<Vec<Row>, PersistenceError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => {
                    if ch == '\n' {
                        line += 1;
                    }
                    field.push(ch);
                }
            }
            continue;
        }
        match ch {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(mem::take(&mut field));
                push_row(&mut rows, row_line, mem::take(&mut fields));
                line += 1;
                row_line = line;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(PersistenceError::Malformed {
            line: row_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_row(&mut rows, row_line, fields);
    }
    Ok(rows)
}

fn push_row(rows: &mut Vec<Row>, line: usize, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        rows.push(Row { line, fields });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HEADER_LINE: &str = "operand_a,operand_b,operation_name,result,timestamp";

    #[test]
    fn empty_history_encodes_header_only() {
        assert_eq!(encode_records(&[]), format!("{HEADER_LINE}\n"));
    }

    #[test]
    fn encodes_one_line_per_record() {
        let stamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let records = vec![Calculation::with_timestamp(10.0, 5.0, "add", 15.0, stamp)];

        let text = encode_records(&records);

        assert_eq!(
            text,
            format!("{HEADER_LINE}\n10,5,add,15,2024-01-02T03:04:05+00:00\n")
        );
    }

    #[test]
    fn decode_restores_encoded_records() {
        let records = vec![
            Calculation::new(0.1, 0.2, "add", 0.3),
            Calculation::new(-7.0, 3.0, "mod,ulus \"odd\"", 2.0),
        ];

        let decoded = decode_records(&encode_records(&records)).unwrap();

        assert_eq!(decoded, records);
    }

    #[test]
    fn columns_are_matched_by_name() {
        let text = "result,timestamp,extra,operation_name,operand_b,operand_a\n\
                    6,2024-05-01T10:00:00,ignored,multiply,3,2\n";

        let decoded = decode_records(text).unwrap();

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].operand_a(), 2.0);
        assert_eq!(decoded[0].operand_b(), 3.0);
        assert_eq!(decoded[0].operation_name(), "multiply");
        assert_eq!(
            decoded[0].timestamp(),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_timestamp_defaults_to_now() {
        let before = Utc::now();
        let decoded = decode_records("operand_a,operand_b,operation_name,result\n1,2,add,3\n").unwrap();

        assert!(decoded[0].timestamp() >= before);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let text = format!("{HEADER_LINE}\r\n\r\n1,1,add,2,\r\n");
        let decoded = decode_records(&text).unwrap();
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn empty_text_has_no_header() {
        assert!(matches!(
            decode_records(""),
            Err(PersistenceError::MissingHeader)
        ));
    }

    #[test]
    fn missing_required_column_is_reported() {
        assert!(matches!(
            decode_records("operand_a,operand_b,result\n"),
            Err(PersistenceError::MissingColumn {
                column: "operation_name"
            })
        ));
    }

    #[test]
    fn malformed_rows_report_their_line() {
        let text = format!("{HEADER_LINE}\n1,1,add,2,\nx,1,add,2,\n");

        match decode_records(&text) {
            Err(PersistenceError::Malformed { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("operand_a"));
            }
            other => panic!("Expected malformed row, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_are_malformed() {
        let text = format!("{HEADER_LINE}\n1,1\n");
        assert!(matches!(
            decode_records(&text),
            Err(PersistenceError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let text = format!("{HEADER_LINE}\n1,1,\"add,2,\n");
        assert!(matches!(
            decode_records(&text),
            Err(PersistenceError::Malformed { line: 2, .. })
        ));
    }
}
