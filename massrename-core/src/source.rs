//! Ordered sources of candidate names.
//!
//! A source yields one raw string per row, in row order. Values are not
//! trimmed or deduplicated here; validation is the planner's job.

use crate::error::{RenameError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use serde_json::{Number, Value};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub trait NameSource {
    /// Read every row, in order. Fails with `SourceEmpty` if there are none.
    fn read_names(&mut self) -> Result<Vec<String>>;

    /// Human-readable name of the source for messages.
    fn describe(&self) -> String;
}

/// Names already held in memory.
#[derive(Debug, Clone, Default)]
pub struct ListSource {
    names: Vec<String>,
}

impl ListSource {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl NameSource for ListSource {
    fn read_names(&mut self) -> Result<Vec<String>> {
        if self.names.is_empty() {
            return Err(RenameError::SourceEmpty {
                source_name: self.describe(),
            });
        }
        Ok(self.names.clone())
    }

    fn describe(&self) -> String {
        "name list".to_string()
    }
}

/// One name per line of text.
pub struct LineSource<R> {
    reader: Option<R>,
    label: String,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader: Some(reader),
            label: label.into(),
        }
    }
}

impl LineSource<BufReader<File>> {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| RenameError::unreadable_source(path.display().to_string(), e))?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl LineSource<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), "<stdin>")
    }
}

impl<R: BufRead> NameSource for LineSource<R> {
    fn read_names(&mut self) -> Result<Vec<String>> {
        let Some(reader) = self.reader.take() else {
            return Err(RenameError::unreadable_source(
                self.describe(),
                "source was already consumed",
            ));
        };

        let mut names = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| RenameError::unreadable_source(self.describe(), e))?;
            names.push(line);
        }

        // Spreadsheet exports often start with a byte order mark
        if let Some(first) = names.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        if names.is_empty() {
            return Err(RenameError::SourceEmpty {
                source_name: self.describe(),
            });
        }

        Ok(names)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// A JSON array with one element per row.
///
/// Scalars are single-column rows; nested arrays are rows whose first element
/// is the first column. Numbers and booleans become their text form and
/// `null` becomes an empty name.
#[derive(Debug, Clone)]
pub struct JsonSource {
    content: String,
    label: String,
}

impl JsonSource {
    pub fn new(content: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            label: label.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| RenameError::unreadable_source(path.display().to_string(), e))?;
        Ok(Self::new(content, path.display().to_string()))
    }
}

impl NameSource for JsonSource {
    fn read_names(&mut self) -> Result<Vec<String>> {
        let value: Value = serde_json::from_str(&self.content)
            .map_err(|e| RenameError::unreadable_source(self.describe(), e))?;

        let Value::Array(rows) = value else {
            return Err(RenameError::unreadable_source(
                self.describe(),
                "expected a JSON array of rows",
            ));
        };

        let has_first_column = rows
            .iter()
            .any(|row| !matches!(row, Value::Array(cells) if cells.is_empty()));
        if rows.is_empty() || !has_first_column {
            return Err(RenameError::SourceEmpty {
                source_name: self.describe(),
            });
        }

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let cell = match row {
                    Value::Array(cells) => cells.first().unwrap_or(&Value::Null),
                    other => other,
                };
                cell_to_name(cell).ok_or_else(|| {
                    RenameError::unreadable_source(
                        self.describe(),
                        format!("row {} is not a text, number or boolean value", i + 1),
                    )
                })
            })
            .collect()
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

fn cell_to_name(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// The first column of the first worksheet of a workbook.
///
/// There is no header row. Cells are converted with the same rules as
/// [`JsonSource`], whole-valued numbers losing their fractional part.
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    path: PathBuf,
}

impl SpreadsheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn first_sheet(&self) -> Result<Range<Data>> {
        let bytes =
            fs::read(&self.path).map_err(|e| RenameError::unreadable_source(self.describe(), e))?;
        // Detect the format from the content; extensions may come in any case
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| RenameError::unreadable_source(self.describe(), e))?;

        match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(|e| RenameError::unreadable_source(self.describe(), e)),
            None => Err(RenameError::unreadable_source(
                self.describe(),
                "workbook has no worksheets",
            )),
        }
    }
}

impl NameSource for SpreadsheetSource {
    fn read_names(&mut self) -> Result<Vec<String>> {
        let range = self.first_sheet()?;

        // The used area starts at the first non-empty cell
        let (first_row, first_col) = match range.start() {
            Some((row, col)) if !range.is_empty() => (row, col),
            _ => (0, 1),
        };
        if first_col != 0 {
            return Err(RenameError::SourceEmpty {
                source_name: self.describe(),
            });
        }

        let mut names = vec![String::new(); first_row as usize];
        for (i, row) in range.rows().enumerate() {
            let cell = row.first().unwrap_or(&Data::Empty);
            let name = workbook_cell_to_value(cell)
                .as_ref()
                .and_then(cell_to_name)
                .ok_or_else(|| {
                    RenameError::unreadable_source(
                        self.describe(),
                        format!(
                            "row {} holds the error value {}",
                            first_row as usize + i + 1,
                            cell
                        ),
                    )
                })?;
            names.push(name);
        }

        tracing::debug!(source = %self.describe(), rows = names.len(), "read workbook column");
        Ok(names)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Map a workbook cell onto the JSON value model shared with [`JsonSource`].
#[allow(clippy::cast_possible_truncation)]
fn workbook_cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => Some(Value::Null),
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::Int(i) => Some(Value::Number((*i).into())),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(Value::Number((*f as i64).into()))
            } else {
                Number::from_f64(*f).map(Value::Number)
            }
        },
        Data::Error(_) => None,
        other => Some(Value::String(other.to_string())),
    }
}

/// Open the source for `path`, choosing the format from its extension.
///
/// `-` reads lines from stdin, `.json` files are parsed as JSON and workbook
/// files are read from their first column. Every other file is read one name
/// per line.
pub fn open_source(path: &Path) -> Result<Box<dyn NameSource>> {
    if path == Path::new("-") {
        return Ok(Box::new(LineSource::stdin()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(Box::new(SpreadsheetSource::new(path)));
    }

    if extension == "json" {
        Ok(Box::new(JsonSource::from_path(path)?))
    } else {
        Ok(Box::new(LineSource::from_path(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn lines(text: &str) -> Result<Vec<String>> {
        LineSource::new(Cursor::new(text.to_string()), "test").read_names()
    }

    fn json(text: &str) -> Result<Vec<String>> {
        JsonSource::new(text, "test.json").read_names()
    }

    #[test]
    fn test_lines_preserve_order_and_whitespace() {
        let names = lines("Alpha\n  Beta \n\nGamma\n").unwrap();
        assert_eq!(names, vec!["Alpha", "  Beta ", "", "Gamma"]);
    }

    #[test]
    fn test_lines_handle_crlf_and_missing_final_newline() {
        assert_eq!(lines("a\r\nb\r\nc").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_lines_strip_byte_order_mark() {
        assert_eq!(lines("\u{feff}first\nsecond\n").unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_lines_keep_duplicates() {
        assert_eq!(lines("x\nx\n").unwrap(), vec!["x", "x"]);
    }

    #[test]
    fn test_empty_text_is_source_empty() {
        assert!(matches!(lines(""), Err(RenameError::SourceEmpty { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let mut source = LineSource::new(Cursor::new(vec![b'a', 0xff, b'\n']), "bytes");
        assert!(matches!(
            source.read_names(),
            Err(RenameError::SourceUnreadable { .. })
        ));
    }

    #[test]
    fn test_line_source_is_consumed_once() {
        let mut source = LineSource::new(Cursor::new("a\n".to_string()), "once");
        assert!(source.read_names().is_ok());
        assert!(matches!(
            source.read_names(),
            Err(RenameError::SourceUnreadable { .. })
        ));
    }

    #[test]
    fn test_json_scalars_and_rows() {
        let names = json(r#"["Alpha", 42, 1.5, true, null, ["Beta", "ignored"], []]"#).unwrap();
        assert_eq!(names, vec!["Alpha", "42", "1.5", "true", "", "Beta", ""]);
    }

    #[test]
    fn test_json_without_first_column_is_empty() {
        assert!(matches!(json("[]"), Err(RenameError::SourceEmpty { .. })));
        assert!(matches!(json("[[], []]"), Err(RenameError::SourceEmpty { .. })));
    }

    #[test]
    fn test_json_rejects_objects_and_non_arrays() {
        assert!(matches!(
            json(r#"[{"name": "a"}]"#),
            Err(RenameError::SourceUnreadable { .. })
        ));
        assert!(matches!(
            json(r#"{"names": []}"#),
            Err(RenameError::SourceUnreadable { .. })
        ));
        assert!(matches!(json("not json"), Err(RenameError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_list_source() {
        assert_eq!(ListSource::new(["a", "b"]).read_names().unwrap(), vec!["a", "b"]);
        assert!(matches!(
            ListSource::new(Vec::<String>::new()).read_names(),
            Err(RenameError::SourceEmpty { .. })
        ));
    }

    #[test]
    fn test_open_source_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let text = temp_dir.path().join("names.txt");
        let data = temp_dir.path().join("names.JSON");
        fs::write(&text, "one\ntwo\n").unwrap();
        fs::write(&data, r#"["three"]"#).unwrap();

        assert_eq!(open_source(&text).unwrap().read_names().unwrap(), vec!["one", "two"]);
        assert_eq!(open_source(&data).unwrap().read_names().unwrap(), vec!["three"]);
    }

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn test_spreadsheet_first_column() {
        let names = open_source(&fixture("names.xlsx")).unwrap().read_names().unwrap();
        assert_eq!(names, vec!["Alpha", "42", "", "1.5", "true", "  Beta "]);
    }

    #[test]
    fn test_spreadsheet_without_first_column_is_empty() {
        let mut source = SpreadsheetSource::new(fixture("second_column_only.xlsx"));
        assert!(matches!(source.read_names(), Err(RenameError::SourceEmpty { .. })));

        let mut source = SpreadsheetSource::new(fixture("empty.xlsx"));
        assert!(matches!(source.read_names(), Err(RenameError::SourceEmpty { .. })));
    }

    #[test]
    fn test_broken_spreadsheet_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let sheet = temp_dir.path().join("names.XLSX");
        fs::write(&sheet, b"PK not really a workbook").unwrap();

        let err = open_source(&sheet).unwrap().read_names().unwrap_err();
        assert!(matches!(err, RenameError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_workbook_cells_become_text() {
        let name = |cell: Data| workbook_cell_to_value(&cell).as_ref().and_then(cell_to_name);
        assert_eq!(name(Data::Float(3.0)).as_deref(), Some("3"));
        assert_eq!(name(Data::Float(-0.25)).as_deref(), Some("-0.25"));
        assert_eq!(name(Data::Int(7)).as_deref(), Some("7"));
        assert_eq!(name(Data::Bool(false)).as_deref(), Some("false"));
        assert_eq!(name(Data::Empty).as_deref(), Some(""));
        assert_eq!(name(Data::String("x y".to_string())).as_deref(), Some("x y"));
        assert_eq!(name(Data::Error(calamine::CellErrorType::NA)), None);
    }

    #[test]
    fn test_open_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = open_source(&temp_dir.path().join("missing.txt")).err().unwrap();
        assert!(matches!(err, RenameError::SourceUnreadable { .. }));
    }
}
