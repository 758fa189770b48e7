//! Bordered text rendering of result sets.

use super::border::Border;
use crate::models::ResultSet;

/// Minimum width of the row-counter column.
const COUNTER_WIDTH: usize = 4;

/// One rendered column: its padded title and display width.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    title: String,
    width: usize,
}

impl Header {
    fn row_counter() -> Self {
        Self {
            title: "  ".to_string(),
            width: COUNTER_WIDTH,
        }
    }

    fn new(name: &str) -> Self {
        Self {
            title: format!(" {}", name.to_uppercase()),
            width: name.chars().count() + 2,
        }
    }

    fn fit(&mut self, cell: &str) {
        self.width = self.width.max(cell.chars().count() + 1);
    }
}

/// Renders `result` as table lines, with a `#N` row counter as first column
/// and upper-cased column titles.
pub fn render(result: &ResultSet, border: &Border) -> Vec<String> {
    let mut headers = Vec::with_capacity(result.columns.len() + 1);
    headers.push(Header::row_counter());
    headers.extend(result.columns.iter().map(|name| Header::new(name)));

    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = Vec::with_capacity(headers.len());
            cells.push(format!(" #{}", i + 1));
            cells.extend(
                (0..result.columns.len())
                    .map(|j| format!(" {}", row.get(j).map_or("", String::as_str))),
            );
            cells
        })
        .collect();

    for row in &rows {
        for (header, cell) in headers.iter_mut().zip(row) {
            header.fit(cell);
        }
    }

    let last_column = headers.len() - 1;
    let mut header_up = String::from(border.corner_up_left);
    let mut header_mid = String::from(border.vertical);
    let mut header_bottom = String::from(border.vertical_left);

    for (j, header) in headers.iter().enumerate() {
        header_up.push_str(&border.horizontal.repeat(header.width));
        header_bottom.push_str(&border.horizontal.repeat(header.width));
        header_mid.push_str(&pad(&header.title, header.width));
        header_mid.push_str(border.vertical);

        if j < last_column {
            header_up.push_str(border.division_up);
            header_bottom.push_str(border.intersection);
        } else {
            header_up.push_str(border.corner_up_right);
            header_bottom.push_str(border.vertical_right);
        }
    }

    let mut lines = vec![header_up, header_mid, header_bottom];
    let last_row = rows.len().saturating_sub(1);

    for (i, row) in rows.iter().enumerate() {
        let more_rows = i < last_row;
        let mut values = String::from(border.vertical);
        let mut separator = String::from(if more_rows {
            border.vertical_left
        } else {
            border.corner_bottom_left
        });

        for (j, (cell, header)) in row.iter().zip(&headers).enumerate() {
            values.push_str(&pad(cell, header.width));
            values.push_str(border.vertical);

            separator.push_str(&border.horizontal.repeat(header.width));
            separator.push_str(match (more_rows, j < last_column) {
                (true, true) => border.intersection,
                (true, false) => border.vertical_right,
                (false, true) => border.division_bottom,
                (false, false) => border.corner_bottom_right,
            });
        }

        lines.push(values);
        lines.push(separator);
    }

    lines
}

/// Editor highlight commands for the column titles, one per data column.
///
/// Column numbering starts at 2; the row counter is column 1.
pub fn header_highlights(columns: &[String], style_link: &str) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let key = i + 2;
            format!(
                "syn match header{key} '\\<{}\\>' | hi link header{key} {style_link} |",
                name.to_uppercase()
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pad(value: &str, width: usize) -> String {
    let mut padded = String::from(value);
    let length = value.chars().count();
    if width > length {
        padded.push_str(&" ".repeat(width - length));
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::border::BorderStyle;

    fn sample() -> ResultSet {
        ResultSet {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                vec!["1".to_string(), "alice".to_string()],
                vec!["2".to_string(), "bob".to_string()],
            ],
        }
    }

    #[test]
    fn test_render_simple_table() {
        let lines = render(&sample(), &BorderStyle::Simple.border());

        assert_eq!(
            lines,
            vec![
                "┌────┬────┬───────┐",
                "│    │ ID │ NAME  │",
                "├────┼────┼───────┤",
                "│ #1 │ 1  │ alice │",
                "├────┼────┼───────┤",
                "│ #2 │ 2  │ bob   │",
                "└────┴────┴───────┘",
            ]
        );
    }

    #[test]
    fn test_render_widens_columns_for_long_cells() {
        let result = ResultSet {
            columns: vec!["a".to_string()],
            rows: vec![vec!["wide value".to_string()]],
        };
        let lines = render(&result, &BorderStyle::Default.border());

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "┃    ┃ A          ┃");
        assert_eq!(lines[3], "┃ #1 ┃ wide value ┃");
        assert!(lines[4].starts_with('┗'));
        assert!(lines[4].ends_with('┛'));
    }

    #[test]
    fn test_all_lines_have_equal_width() {
        let lines = render(&sample(), &BorderStyle::Double.border());
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|line| line.chars().count() == width));
    }

    #[test]
    fn test_header_highlights() {
        let columns = vec!["id".to_string(), "Name".to_string()];
        assert_eq!(
            header_highlights(&columns, "Type"),
            "syn match header2 '\\<ID\\>' | hi link header2 Type | \
             syn match header3 '\\<NAME\\>' | hi link header3 Type |"
        );
    }
}
