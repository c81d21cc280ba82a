use serde::Serialize;

/// A contiguous run of schedule months selected for display. The opening
/// row (month 0) is never part of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: u32,
    pub total_pages: u32,
    pub first_month: u32,
    pub last_month: u32,
    pub total_months: u32,
}

impl PageWindow {
    /// Every month on a single page.
    pub fn everything(total_months: u32) -> Self {
        Self {
            page: 1,
            total_pages: 1,
            first_month: 1.min(total_months),
            last_month: total_months,
            total_months,
        }
    }

    pub fn contains(&self, month: u32) -> bool {
        month >= 1 && month >= self.first_month && month <= self.last_month
    }
}

/// Select page `page` of `page_size` months. Out-of-range pages are clamped
/// to the first or last page; a zero page size is treated as one month.
pub fn paginate(total_months: u32, page: u32, page_size: u32) -> PageWindow {
    let page_size = page_size.max(1);
    let total_pages = total_months.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    if total_months == 0 {
        return PageWindow::everything(0);
    }

    let first_month = (page - 1) * page_size + 1;
    let last_month = (first_month + page_size - 1).min(total_months);

    PageWindow {
        page,
        total_pages,
        first_month,
        last_month,
        total_months,
    }
}
