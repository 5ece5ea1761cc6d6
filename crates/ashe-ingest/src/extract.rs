//! Raw extract reading and section splitting.
//!
//! An extract holds nine stacked sections, one per employee category. Each
//! section is closed by a marker row whose first cell contains `key1=`; the
//! section boundary sits [`MARKER_OFFSET`] rows after the marker, and the
//! last section runs to the end of the file.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use ashe_model::{
    Category, Cell, NormalizedRecord, PerCategory, StatColumn, StatRow, prefixed_code,
};
use csv::{ReaderBuilder, StringRecord};

use crate::error::{IngestError, Result};

/// Lines before the header row.
pub const PREAMBLE_LINES: usize = 5;
/// Text that identifies a section marker row.
pub const SECTION_MARKER: &str = "key1=";
/// Rows between a marker and the start of the next section.
pub const MARKER_OFFSET: usize = 6;

const DESCRIPTION_COLUMN: usize = 0;
const CODE_COLUMN: usize = 1;
const SAFE_HEADER: &str = "Safe";

/// An extract as read from disk: header plus every following line.
///
/// Blank lines are kept as empty rows so marker offsets stay positional.
#[derive(Debug, Clone)]
pub struct RawExtract {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The nine category sections of one extract.
pub type SectionedExtract = PerCategory<Vec<NormalizedRecord>>;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn strip_thousands(raw: &str) -> String {
    raw.replace(',', "")
}

/// Decodes extract bytes as UTF-8, falling back to Windows-1252.
fn decode<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            tracing::debug!(
                path = %path.display(),
                had_errors,
                "extract is not UTF-8, decoded as Windows-1252"
            );
            text
        }
    }
}

fn parse_line(line: &str) -> std::result::Result<Vec<String>, csv::Error> {
    if line.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record.iter().map(normalize_cell).collect())
}

/// Parses extract text. `path` is only used for error context.
pub fn parse_extract(path: &Path, text: &str) -> Result<RawExtract> {
    let mut lines = text.lines().enumerate().skip(PREAMBLE_LINES);

    let Some((header_index, header_line)) = lines.next() else {
        return Err(IngestError::MalformedExtract {
            path: path.to_path_buf(),
            reason: format!("fewer than {} lines, no header row", PREAMBLE_LINES + 1),
        });
    };
    let headers: Vec<String> = parse_line(header_line)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            line: header_index + 1,
            source,
        })?
        .iter()
        .map(String::as_str)
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for (index, line) in lines {
        let row = parse_line(line).map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        rows.push(row);
    }

    Ok(RawExtract {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Reads and decodes an extract file.
pub fn read_extract(path: &Path) -> Result<RawExtract> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = decode(&bytes, path);
    parse_extract(path, &text)
}

/// Where each needed field sits in a row.
#[derive(Debug, Clone)]
struct ColumnLayout {
    stats: [Option<usize>; StatColumn::COUNT],
    safe: usize,
}

impl ColumnLayout {
    fn resolve(headers: &[String], path: &Path) -> Result<Self> {
        let missing = |column: &str| IngestError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        };
        if headers.len() <= CODE_COLUMN {
            return Err(missing("Code"));
        }
        let find = |name: &str| {
            headers
                .iter()
                .enumerate()
                .skip(CODE_COLUMN + 1)
                .find(|(_, header)| header.as_str() == name)
                .map(|(index, _)| index)
        };
        let change_positions: Vec<usize> = headers
            .iter()
            .enumerate()
            .skip(CODE_COLUMN + 1)
            .filter(|(_, header)| header.as_str() == StatColumn::MedianChange.header())
            .map(|(index, _)| index)
            .collect();

        let mut stats = [None; StatColumn::COUNT];
        for column in StatColumn::ALL {
            stats[column.index()] = match column {
                StatColumn::MedianChange => change_positions.first().copied(),
                StatColumn::MeanChange => change_positions.get(1).copied(),
                other => Some(find(other.header()).ok_or_else(|| missing(other.header()))?),
            };
        }
        let safe = find(SAFE_HEADER).ok_or_else(|| missing(SAFE_HEADER))?;
        Ok(Self { stats, safe })
    }

    fn required(&self) -> impl Iterator<Item = usize> + '_ {
        [DESCRIPTION_COLUMN, CODE_COLUMN, self.safe]
            .into_iter()
            .chain(self.stats.iter().flatten().copied())
    }
}

fn field(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

/// Turns one section's rows into records, dropping rows with a missing
/// required field.
fn clean_section(
    rows: &[Vec<String>],
    layout: &ColumnLayout,
    shorthand: &str,
) -> Vec<NormalizedRecord> {
    rows.iter()
        .filter(|row| layout.required().all(|index| !field(row, index).is_empty()))
        .map(|row| {
            let mut values = StatRow::default();
            for column in StatColumn::ALL {
                if let Some(index) = layout.stats[column.index()] {
                    values[column] = Cell::Text(strip_thousands(field(row, index)));
                }
            }
            NormalizedRecord {
                code: prefixed_code(shorthand, &strip_thousands(field(row, CODE_COLUMN))),
                description: field(row, DESCRIPTION_COLUMN).to_string(),
                values,
                safe: Cell::Text(strip_thousands(field(row, layout.safe))),
            }
        })
        .collect()
}

impl RawExtract {
    /// Row indices of the section markers.
    pub fn marker_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.first().is_some_and(|cell| cell.contains(SECTION_MARKER)))
            .map(|(index, _)| index)
            .collect()
    }

    /// Splits the extract into its nine category sections and normalizes
    /// every code with the source `shorthand` prefix.
    pub fn into_sections(self, shorthand: &str) -> Result<SectionedExtract> {
        let malformed = |reason: String| IngestError::MalformedExtract {
            path: self.path.clone(),
            reason,
        };
        let layout = ColumnLayout::resolve(&self.headers, &self.path)?;

        let needed = Category::ALL.len() - 1;
        let markers = self.marker_rows();
        if markers.len() < needed {
            return Err(malformed(format!(
                "found {} section markers, expected {needed}",
                markers.len()
            )));
        }
        if markers.len() > needed {
            tracing::warn!(
                path = %self.path.display(),
                markers = markers.len(),
                ignored = markers.len() - needed,
                "extract has extra section markers"
            );
        }

        let end = self.rows.len();
        let mut bounds = Vec::with_capacity(Category::ALL.len() + 1);
        bounds.push(0);
        bounds.extend(
            markers
                .iter()
                .take(needed)
                .map(|marker| (marker + MARKER_OFFSET).min(end)),
        );
        bounds.push(end);

        let sections = PerCategory::try_from_fn(|category| {
            let start = bounds[category.index()];
            let stop = bounds[category.index() + 1];
            let records = clean_section(&self.rows[start..stop], &layout, shorthand);
            if records.is_empty() {
                return Err(malformed(format!(
                    "section '{}' is empty after cleaning",
                    category.source_label()
                )));
            }
            Ok(records)
        })?;

        tracing::debug!(
            path = %self.path.display(),
            shorthand,
            rows = self.rows.len(),
            "split extract into sections"
        );
        Ok(sections)
    }
}

/// Reads an extract and splits it into category sections.
pub fn load_sections(path: &Path, shorthand: &str) -> Result<SectionedExtract> {
    read_extract(path)?.into_sections(shorthand)
}
