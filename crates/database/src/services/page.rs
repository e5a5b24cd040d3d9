use crate::error::{ServiceError, ServiceResult};

/// Page size used when the client does not ask for one
pub const DEFAULT_PER_PAGE: u64 = 30;

pub const MAX_PER_PAGE: u64 = 100;

const INVALID_PAGE: &str = "Invalid page.";

/// One page of results along with what is needed to build pagination links
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Validates 1-based page parameters. Page 0 does not exist.
pub fn check_page_params(page: u64, per_page: u64) -> ServiceResult<()> {
    if page == 0 {
        return Err(ServiceError::not_found(INVALID_PAGE));
    }
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(ServiceError::validation(format!(
            "per_page must be between 1 and {MAX_PER_PAGE}"
        )));
    }

    Ok(())
}

/// Pages past the last one are missing. The first page always exists, even
/// when there is nothing to show on it.
pub fn check_page_in_range(page: u64, per_page: u64, total_items: u64) -> ServiceResult<()> {
    if page > 1 && page > total_items.div_ceil(per_page) {
        return Err(ServiceError::not_found(INVALID_PAGE));
    }

    Ok(())
}
