//! Spreadsheet reading for the sync job.
//!
//! The first worksheet is read; its first row is the header. Columns are
//! located by header name, so column order in the spreadsheet does not
//! matter. Cells are normalized to trimmed strings before any parsing, and
//! rows whose cells are all blank are dropped.

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::path::Path;

use crate::api::Site;

/// Action requested by a spreadsheet row's `state` cell.
///
/// English tokens are canonical; the Chinese tokens the operator sheets
/// historically used are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    New,
    Delete,
    Update,
    Normal,
    Unknown(String),
}

impl RowState {
    pub fn parse(raw: &str) -> Self {
        let token = raw.trim();
        if token.eq_ignore_ascii_case("new") || token == "新增" {
            RowState::New
        } else if token.eq_ignore_ascii_case("delete") || token == "删除" {
            RowState::Delete
        } else if token.eq_ignore_ascii_case("update") || token == "更新" {
            RowState::Update
        } else if token.eq_ignore_ascii_case("normal") || token == "正常" {
            RowState::Normal
        } else {
            RowState::Unknown(token.to_string())
        }
    }
}

/// One normalized spreadsheet row.
#[derive(Debug, Clone)]
pub struct SheetRow {
    /// 1-based row number in the worksheet, for operator-facing messages.
    pub line: u32,
    pub state: RowState,
    pub site: Site,
}

/// Column positions resolved from the header row by name.
#[derive(Debug, Clone, Copy)]
struct Columns {
    state: Option<usize>,
    title: Option<usize>,
    description: Option<usize>,
    url: Option<usize>,
    tags: Option<usize>,
    image_url: Option<usize>,
    is_favorite: Option<usize>,
}

impl Columns {
    /// Missing columns are tolerated; their cells read as empty.
    fn locate(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            state: find("state"),
            title: find("title"),
            description: find("description"),
            url: find("url"),
            tags: find("tags"),
            image_url: find("image_url"),
            is_favorite: find("is_favorite"),
        }
    }
}

/// Split a raw tags cell into individual tags.
///
/// Tolerates full-width commas and whitespace as separators; empty tokens
/// are discarded.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.replace('，', ",")
        .replace(' ', ",")
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Case-insensitive "true" check; everything else is false.
pub fn parse_is_favorite(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// Render any cell to a trimmed string. Blank and error cells become "".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Excel stores integers as floats; render 3.0 as "3"
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    }
}

/// Read and normalize all data rows from the first worksheet.
pub fn read_sheet_rows<P: AsRef<Path>>(path: P) -> Result<Vec<SheetRow>> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("failed to open spreadsheet: {}", path.display()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.context("failed to read first worksheet")?,
        None => bail!("spreadsheet has no worksheets: {}", path.display()),
    };

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row
            .iter()
            .map(|c| cell_to_string(c).to_lowercase())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let columns = Columns::locate(&headers);

    let mut rows = Vec::new();
    for (index, row) in rows_iter.enumerate() {
        let cells: Vec<String> = row.iter().map(cell_to_string).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }

        let field = |col: Option<usize>| -> String {
            col.and_then(|i| cells.get(i)).cloned().unwrap_or_default()
        };

        rows.push(SheetRow {
            line: index as u32 + 2,
            state: RowState::parse(&field(columns.state)),
            site: Site {
                title: field(columns.title),
                description: field(columns.description),
                url: field(columns.url),
                tags: parse_tags(&field(columns.tags)),
                image_url: field(columns.image_url),
                is_favorite: parse_is_favorite(&field(columns.is_favorite)),
            },
        });
    }

    Ok(rows)
}
