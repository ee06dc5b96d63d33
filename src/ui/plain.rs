//! Plain-text rendering for `--print` mode

use std::fmt::Write;

use chrono::NaiveDate;

use crate::data::NewsSnapshot;
use crate::ui::news_page::format_page_date;

/// Renders the page as plain text
///
/// Absent news renders the same sections with no content.
pub fn render_plain(snapshot: Option<&NewsSnapshot>, today: NaiveDate) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Latest News");
    let _ = writeln!(out, "{}", format_page_date(today));
    let _ = writeln!(out);

    let _ = writeln!(out, "Latest Audio Summary");
    if let Some(url) = snapshot.map(|s| s.audio_url.as_str()).filter(|u| !u.is_empty()) {
        let _ = writeln!(out, "  {}", url);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Latest Headlines");
    for headline in snapshot.map(|s| s.news_links.as_slice()).unwrap_or(&[]) {
        let _ = writeln!(out, "- {}", headline.title);
        let _ = writeln!(out, "  {}", headline.link);
    }

    out
}
