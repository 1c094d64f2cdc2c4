use super::{Document, Heuristic, Suggestion};

/// Table rows tolerated before a hint is raised.
pub const LARGE_TABLE_ROWS: usize = 10;
/// Estimated tokens per table row.
pub const TOKENS_PER_TABLE_ROW: usize = 12;

fn is_table_row(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('|') && line.ends_with('|')
}

/// Flags pipe tables with more than [`LARGE_TABLE_ROWS`] rows.
///
/// A table is only reported once a non-table line closes it, so a table
/// running to the end of the file is never flagged.
pub struct TableCheck;

impl Heuristic for TableCheck {
    fn name(&self) -> &'static str {
        "table"
    }

    fn inspect(&self, doc: &Document) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        let mut table: Option<(usize, usize)> = None;

        for (i, line) in doc.lines.iter().enumerate() {
            if is_table_row(line) {
                table.get_or_insert((i + 1, 0)).1 += 1;
                continue;
            }
            if let Some((start, rows)) = table.take()
                && rows > LARGE_TABLE_ROWS
            {
                let excess = rows - LARGE_TABLE_ROWS;
                suggestions.push(Suggestion {
                    line: start,
                    issue: format!("Table with {rows} rows ({excess} over {LARGE_TABLE_ROWS})"),
                    suggestion: "Consider summarizing or moving to reference file".into(),
                    estimated_savings: excess * TOKENS_PER_TABLE_ROW,
                });
            }
        }
        suggestions
    }
}
