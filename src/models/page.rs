//! Paging and sorting parameters for cash card listings.
//!
//! Raw query parameters (`?page=0&size=1&sort=amount,desc`) are deserialized
//! into `PageParams` and then validated into a `PageRequest`, which is the only
//! form the store accepts.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Page size used when the client does not send `size`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Raw pagination query parameters.
///
/// # Query String Example
///
/// ```text
/// /cashcards/paged?page=0&size=1&sort=amount,desc
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

/// Column a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Amount,
    Owner,
}

impl SortField {
    /// Column name in the `cash_cards` table.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Amount => "amount",
            SortField::Owner => "owner",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "amount" => Ok(SortField::Amount),
            "owner" => Ok(SortField::Owner),
            other => Err(format!("Unknown sort field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction '{other}'")),
        }
    }
}

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: SortField::Id,
            direction: SortDirection::Asc,
        }
    }
}

impl FromStr for Sort {
    type Err = String;

    /// Parse `field` or `field,direction` (direction defaults to ascending).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field, direction.parse()?),
            None => (s, SortDirection::Asc),
        };

        Ok(Self {
            field: field.parse()?,
            direction,
        })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.column(), self.direction.keyword())
    }
}

/// A validated page request.
///
/// `page` is zero-based. A `size` of `None` means "no limit", which is only
/// produced by `PageRequest::unpaged()`; clients always get a bounded size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: Option<u32>,
    pub sort: Sort,
}

impl PageRequest {
    /// Every record, ordered by id.
    pub fn unpaged() -> Self {
        Self {
            page: 0,
            size: None,
            sort: Sort::default(),
        }
    }

    pub fn of(page: u32, size: u32, sort: Sort) -> Self {
        Self {
            page,
            size: Some(size),
            sort,
        }
    }

    /// Validate raw query parameters.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message if:
    /// - `size` is zero or larger than `MAX_PAGE_SIZE`
    /// - `sort` names an unknown field or direction
    pub fn from_params(params: PageParams) -> Result<Self, String> {
        let size = params.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(format!("Page size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        let sort = match params.sort.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => Sort::default(),
        };

        Ok(Self::of(params.page.unwrap_or(0), size, sort))
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        self.size
            .map(|size| u64::from(self.page) * u64::from(size))
            .unwrap_or(0)
    }
}
