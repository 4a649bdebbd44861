use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::time::Instant;
use tracing::info;

pub const PATH_FIELD: usize = 0;
pub const TIMESTAMP_FIELD: usize = 1;
pub const USER_AGENT_FIELD: usize = 2;

/// One CSV record of the access log: resource path, timestamp, user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    fields: Vec<String>,
}

impl LogRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn field(&self, index: usize, name: &str) -> Result<&str> {
        self.fields.get(index).map(String::as_str).with_context(|| {
            format!(
                "Missing {} (field {}); row has only {} field(s)",
                name,
                index,
                self.fields.len()
            )
        })
    }

    pub fn path(&self) -> Result<&str> {
        self.field(PATH_FIELD, "resource path")
    }

    pub fn timestamp(&self) -> Result<&str> {
        self.field(TIMESTAMP_FIELD, "timestamp")
    }

    pub fn user_agent(&self) -> Result<&str> {
        self.field(USER_AGENT_FIELD, "user agent")
    }
}

pub type LogDataset = Vec<LogRow>;

/// Reads `lines` as headerless CSV. Records may have any number of fields.
///
/// A quoted field may span lines; the pieces are joined with nothing between
/// them. A blank line outside a quoted field becomes a row with no fields.
pub fn process_log(lines: &[String]) -> Result<LogDataset> {
    let start_time = Instant::now();
    info!(action = "start", component = "csv_parse", line_count = lines.len(), "Parsing log lines");

    // Every line is terminated so the reader's line counter advances once per
    // consumed line, blank ones included.
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::with_capacity(lines.len());
    let mut record = StringRecord::new();
    let mut accounted = 0u64;
    let mut index = 0usize;

    loop {
        let more = reader
            .read_record(&mut record)
            .with_context(|| format!("Failed to read CSV record {}", index + 1))?;
        let consumed = reader.position().line() - 1;

        if !more {
            push_blank_rows(&mut rows, consumed.saturating_sub(accounted));
            break;
        }
        index += 1;

        // Any `\n` left in a field is one of the joins above. An unclosed quote
        // also swallows the final terminator, hence the saturating span.
        let joins: u64 = record.iter().map(|f| f.matches('\n').count() as u64).sum();
        let span = consumed.saturating_sub(accounted);
        push_blank_rows(&mut rows, span.saturating_sub(joins + 1));
        rows.push(LogRow::new(
            record.iter().map(|f| f.replace('\n', "")).collect(),
        ));
        accounted = consumed;
    }

    info!(
        action = "complete",
        component = "csv_parse",
        row_count = rows.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Parsed log rows"
    );
    Ok(rows)
}

fn push_blank_rows(rows: &mut LogDataset, count: u64) {
    rows.extend((0..count).map(|_| LogRow::new(Vec::new())));
}
