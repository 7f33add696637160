use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The sortable/searchable value behind a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }

    /// Numbers compare numerically, text case-insensitively, and empty cells
    /// come first. Mixed number/text falls back to comparing display strings.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Less,
            (_, CellValue::Empty) => Ordering::Greater,
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

type Accessor<T> = fn(&T) -> CellValue;
type Renderer<T> = Box<dyn Fn(&T) -> String>;

/// One column: a key, a header label, and how to read and show the cell.
///
/// The accessor drives sorting and search. A renderer, when set, only changes
/// what the cell shows.
pub struct Column<T> {
    pub key: &'static str,
    pub header: String,
    accessor: Accessor<T>,
    renderer: Option<Renderer<T>>,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, header: impl Into<String>, accessor: Accessor<T>) -> Self {
        Self {
            key,
            header: header.into(),
            accessor,
            renderer: None,
        }
    }

    pub fn with_renderer(mut self, renderer: impl Fn(&T) -> String + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    pub fn render(&self, row: &T) -> String {
        match &self.renderer {
            Some(render) => render(row),
            None => self.value(row).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: &'static str,
    pub direction: SortDirection,
}

pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    search_column: Option<&'static str>,
    search_placeholder: String,
    page_size: usize,
    sort: Option<SortState>,
    search: String,
    page: usize,
}

impl<T> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            search_column: None,
            search_placeholder: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            search: String::new(),
            page: 0,
        }
    }

    /// Enable free-text search against one column. Without this, search is
    /// disabled entirely and [`set_search`](Self::set_search) is ignored.
    pub fn with_search(mut self, column: &'static str, placeholder: impl Into<String>) -> Self {
        self.search_column = Some(column);
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    pub fn search_enabled(&self) -> bool {
        self.search_column.is_some()
    }

    pub fn search_placeholder(&self) -> &str {
        &self.search_placeholder
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Cycle the sort on `key`: unsorted, ascending, descending, unsorted.
    /// Picking a different column starts over at ascending. Unknown columns
    /// leave the sort unchanged.
    pub fn toggle_sort(&mut self, key: &str) {
        let Some(column) = self.columns.iter().find(|c| c.key == key) else {
            return;
        };
        self.sort = match self.sort {
            Some(s) if s.column == column.key => match s.direction {
                SortDirection::Ascending => Some(SortState {
                    column: column.key,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortState {
                column: column.key,
                direction: SortDirection::Ascending,
            }),
        };
        self.page = 0;
    }

    pub fn set_sort(&mut self, key: &str, direction: SortDirection) {
        if let Some(column) = self.columns.iter().find(|c| c.key == key) {
            self.sort = Some(SortState {
                column: column.key,
                direction,
            });
            self.page = 0;
        }
    }

    /// Returns false (and changes nothing) when search is disabled.
    pub fn set_search(&mut self, text: &str) -> bool {
        if self.search_column.is_none() {
            return false;
        }
        self.search = text.to_string();
        self.page = 0;
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self, data: &[T]) {
        let pages = self.view(data).page_count;
        if self.page + 1 < pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// All rows matching the current search, in the current sort order,
    /// ignoring pagination.
    pub fn all_rows<'a>(&self, data: &'a [T]) -> Vec<&'a T> {
        let needle = self.search.trim().to_lowercase();
        let search_column = self
            .search_column
            .and_then(|key| self.columns.iter().find(|c| c.key == key));

        let mut rows: Vec<&'a T> = data
            .iter()
            .filter(|row| match search_column {
                Some(col) if !needle.is_empty() => {
                    col.value(row).to_string().to_lowercase().contains(&needle)
                }
                _ => true,
            })
            .collect();

        if let Some(sort) = self.sort {
            if let Some(col) = self.columns.iter().find(|c| c.key == sort.column) {
                // sort_by is stable: equal keys keep insertion order
                rows.sort_by(|a, b| {
                    let ord = col.value(a).compare(&col.value(b));
                    match sort.direction {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    }
                });
            }
        }
        rows
    }

    /// Recompute the visible page from `data` and the current table state.
    /// A page index past the end is clamped to the last page.
    pub fn view<'a>(&self, data: &'a [T]) -> TableView<'a, T> {
        let rows = self.all_rows(data);
        let total = rows.len();
        let page_count = total.div_ceil(self.page_size).max(1);
        let page = self.page.min(page_count - 1);
        let start = page * self.page_size;
        let end = (start + self.page_size).min(total);

        TableView {
            rows: rows[start..end].to_vec(),
            total_rows: total,
            total_records: data.len(),
            page,
            page_count,
        }
    }

    /// Render every cell of `view` through the column renderers.
    pub fn cells(&self, view: &TableView<'_, T>) -> Vec<Vec<String>> {
        view.rows
            .iter()
            .map(|row| self.columns.iter().map(|c| c.render(row)).collect())
            .collect()
    }
}

/// One computed page of a [`DataTable`].
pub struct TableView<'a, T> {
    pub rows: Vec<&'a T>,
    /// Rows that matched the search, across all pages.
    pub total_rows: usize,
    /// Records in the underlying data before filtering.
    pub total_records: usize,
    pub page: usize,
    pub page_count: usize,
}

impl<T> TableView<'_, T> {
    /// True when there is nothing to show; callers render an explicit empty
    /// state instead of an empty grid.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
