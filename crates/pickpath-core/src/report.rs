use crate::types::CategoryReport;
use std::collections::HashSet;

/// Longest title a spreadsheet sheet may carry
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Turns a category label into a safe sheet/file title.
///
/// Keeps letters, digits, underscores and spaces, then truncates.
pub fn sheet_name(category: &str) -> String {
    let name: String = category
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == ' ')
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    if name.trim().is_empty() {
        "Sheet".to_string()
    } else {
        name
    }
}

/// Like [`sheet_name`], but numbers repeated titles so no two tables collide.
///
/// Titles are compared case-insensitively: `taken` holds lowercased names, since
/// spreadsheet titles and file names on most desktop filesystems ignore case.
pub fn unique_sheet_name(category: &str, taken: &mut HashSet<String>) -> String {
    let base = sheet_name(category);
    if taken.insert(base.to_lowercase()) {
        return base;
    }

    let mut n = 1;
    loop {
        let suffix = n.to_string();
        let stem: String = base
            .chars()
            .take(MAX_SHEET_NAME_LEN - suffix.len())
            .collect();
        let candidate = format!("{}{}", stem, suffix);
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

impl CategoryReport {
    /// Console summary block for this category.
    pub fn summary_line(&self) -> String {
        format!(
            "Global Statistics for {}:\n\
             Total Trips Analyzed: {}\n\
             Average Distance per Trip: {:.2}\n\
             Median Distance per Trip: {:.2}\n\
             90th Percentile Distance: {:.2}",
            self.category, self.stats.trips, self.stats.mean, self.stats.median, self.stats.p90
        )
    }
}
