//! Client-side filtering, sorting and pagination shared by every list view.

use std::cmp::Ordering;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Records that can be matched against a free-text search term.
pub trait Searchable {
    /// The display fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Records that can be ordered by a named column.
pub trait Sortable {
    type Column: Copy + PartialEq + std::fmt::Debug + 'static;

    fn compare_by(&self, other: &Self, column: Self::Column) -> Ordering;
}

/// Whether any field contains `term`, ignoring case. A blank term matches.
pub fn matches_term<I, S>(fields: I, term: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if term.trim().is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .into_iter()
        .any(|f| f.as_ref().to_lowercase().contains(&needle))
}

/// Keep the items whose selected fields contain `term`.
pub fn filter_by<'a, T, F, I, S>(items: &'a [T], term: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&'a T) -> I,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .iter()
        .filter(|item| matches_term(fields(*item), term))
        .collect()
}

/// [`filter_by`] over a record's own search fields.
pub fn filter<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    filter_by(items, term, |item| item.search_fields())
}

/// Case-insensitive text ordering used by the `Sortable` impls.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "\u{25B2}",
            SortDirection::Descending => "\u{25BC}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortSpec<C> {
    pub column: C,
    pub direction: SortDirection,
}

impl<C: Copy + PartialEq> SortSpec<C> {
    pub fn ascending(column: C) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Clicking the sorted column flips the direction; another column
    /// starts ascending.
    pub fn toggled(current: Option<Self>, column: C) -> Self {
        match current {
            Some(spec) if spec.column == column => Self {
                column,
                direction: spec.direction.flipped(),
            },
            _ => Self::ascending(column),
        }
    }
}

/// Stable sort of borrowed rows.
pub fn sort_rows<T: Sortable>(rows: &mut [&T], spec: SortSpec<T::Column>) {
    rows.sort_by(|a, b| {
        let ord = a.compare_by(b, spec.column);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Clamp a 1-based page number into the valid range. An empty listing
/// still has page 1.
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(total, page_size).max(1))
}

/// The rows of 1-based page `page`. Out-of-range pages are clamped.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return rows;
    }
    let page = clamp_page(page, rows.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(rows.len());
    rows.get(start..end).unwrap_or(&[])
}

/// A filtered, sorted and paginated view over a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<'a, T> {
    pub rows: Vec<&'a T>,
    /// 1-based, already clamped.
    pub page: usize,
    pub page_count: usize,
    /// Rows matching the filter, across all pages.
    pub filtered: usize,
    pub total: usize,
}

impl<T> ListPage<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Search term, sort and page of a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<C> {
    pub term: String,
    pub sort: Option<SortSpec<C>>,
    pub page: usize,
    pub page_size: usize,
}

impl<C> Default for ListQuery<C> {
    fn default() -> Self {
        Self {
            term: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<C: Copy + PartialEq> ListQuery<C> {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// New search terms start from the first page.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.page = 1;
    }

    pub fn toggle_sort(&mut self, column: C) {
        self.sort = Some(SortSpec::toggled(self.sort, column));
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Filter by term and `keep`, sort, then cut out the current page.
    /// Every item passing the search term and `keep`, in input order and
    /// unpaged.
    pub fn matching_with<'a, T, P>(&self, items: &'a [T], keep: P) -> Vec<&'a T>
    where
        T: Searchable,
        P: Fn(&T) -> bool,
    {
        filter(items, &self.term)
            .into_iter()
            .filter(|item| keep(item))
            .collect()
    }

    pub fn apply_with<'a, T, P>(&self, items: &'a [T], keep: P) -> ListPage<'a, T>
    where
        T: Searchable + Sortable<Column = C>,
        P: Fn(&T) -> bool,
    {
        let mut rows = self.matching_with(items, keep);
        if let Some(spec) = self.sort {
            sort_rows(&mut rows, spec);
        }
        let filtered = rows.len();
        let page = clamp_page(self.page, filtered, self.page_size);
        let rows = paginate(&rows, page, self.page_size).to_vec();
        ListPage {
            rows,
            page,
            page_count: page_count(filtered, self.page_size),
            filtered,
            total: items.len(),
        }
    }

    pub fn apply<'a, T>(&self, items: &'a [T]) -> ListPage<'a, T>
    where
        T: Searchable + Sortable<Column = C>,
    {
        self.apply_with(items, |_| true)
    }
}
