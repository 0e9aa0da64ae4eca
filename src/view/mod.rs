//! Request-to-view resolution.
//!
//! Maps a request's query parameters onto one of three view states and
//! selects the record subset plus the month histogram to hand to the
//! renderer. Resolution never fails: malformed or unknown parameters fall
//! through to the default view (the most recent month). Precedence, in
//! order: a non-empty `search` parameter wins over everything; then a `date`
//! parameter naming a month present in the index; then the default.

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{ArchiveSnapshot, Toot};
use crate::month_index::MonthIndex;
use crate::search;

pub const DATE_PARAM: &str = "date";
pub const SEARCH_PARAM: &str = "search";

/// The three resolvable view states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// A month explicitly requested via `date`.
    DateView(NaiveDate),
    /// A full-text search via `search`.
    SearchView(String),
    /// No usable parameters: the most recent month.
    DefaultView(NaiveDate),
}

/// Everything the rendering collaborator needs for one request: the state,
/// the records to display (already ordered most-recent-first), and the
/// histogram to render as navigation. Structured values only; no dates are
/// formatted and no markup is produced here.
#[derive(Debug, Clone)]
pub struct ResolvedView<'a> {
    pub state: ViewState,
    pub records: Vec<Toot>,
    /// Borrowed full-archive index for date views; a fresh index derived
    /// from the result subset for searches. `None` only when a search
    /// matched nothing (an empty subset has no histogram).
    pub months: Option<Cow<'a, MonthIndex>>,
    /// Month to mark as selected in the navigation widget.
    pub selected_month: Option<NaiveDate>,
}

/// Resolve request parameters against the archive.
///
/// `index` must be the full-archive month index; search views derive their
/// own index over the result subset (used purely for the secondary
/// histogram, not for selecting the displayed records). Parameters other
/// than `search` and `date` are ignored.
pub fn resolve<'a>(
    params: &HashMap<String, String>,
    snapshot: &ArchiveSnapshot,
    index: &'a MonthIndex,
) -> ResolvedView<'a> {
    let query = params.get(SEARCH_PARAM).map(String::as_str).map(str::trim).unwrap_or_default();
    if !query.is_empty() {
        let mut records = search::search(snapshot.records.values(), query);
        sort_for_display(&mut records);
        let months = MonthIndex::build(records.iter()).ok().map(Cow::Owned);
        return ResolvedView {
            state: ViewState::SearchView(query.to_string()),
            records,
            months,
            selected_month: None,
        };
    }

    let requested = params
        .get(DATE_PARAM)
        .and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .filter(|month| index.contains_month(*month));

    let (state, month) = match requested {
        Some(month) => (ViewState::DateView(month), month),
        None => {
            let latest = index.latest_month();
            (ViewState::DefaultView(latest), latest)
        }
    };

    let mut records = index.bucket(month).map(<[Toot]>::to_vec).unwrap_or_default();
    sort_for_display(&mut records);
    ResolvedView {
        state,
        records,
        months: Some(Cow::Borrowed(index)),
        selected_month: Some(month),
    }
}

/// Display order is always `published` descending, regardless of how the
/// subset was produced.
fn sort_for_display(records: &mut [Toot]) {
    records.sort_by(|a, b| b.published.cmp(&a.published));
}
