//! Month-bucket index for date navigation.
//!
//! Buckets a record collection by the first-of-month of `published` (in each
//! record's own offset) and derives a dense year/month histogram covering
//! every calendar year between the earliest and latest bucket, so a timeline
//! can be rendered without gaps. The index is derived and never persisted:
//! one is built over the full archive at startup and a fresh one is built
//! per search request over the result subset.

use chrono::{Datelike, NaiveDate};

use crate::error::ArchiveError;
use crate::models::Toot;

/// One month cell in the histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSlot {
    /// Canonical `YYYY-MM-01` key.
    pub key: NaiveDate,
    pub count: usize,
    /// `1 - count / max_count`: the fraction of the bar left unfilled, 0.0
    /// for the busiest month.
    pub intensity: f64,
}

/// One calendar year of the histogram, always 12 slots.
#[derive(Debug, Clone, PartialEq)]
pub struct YearRow {
    pub year: i32,
    pub months: Vec<MonthSlot>,
}

/// Ordered month-bucket index over a record collection.
///
/// Grouping is the only promise the buckets make; display order is
/// re-established by the caller via `published`.
#[derive(Debug, Clone)]
pub struct MonthIndex {
    buckets: std::collections::BTreeMap<NaiveDate, Vec<Toot>>,
    earliest: NaiveDate,
    latest: NaiveDate,
    max_count: usize,
}

impl MonthIndex {
    /// Build the index over any record collection (full archive or a search
    /// result subset).
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::EmptyCollection`] when `records` yields
    /// nothing; an empty collection has no span to index and callers must
    /// decide what that means for them.
    pub fn build<'a, I>(records: I) -> Result<Self, ArchiveError>
    where
        I: IntoIterator<Item = &'a Toot>,
    {
        let mut buckets: std::collections::BTreeMap<NaiveDate, Vec<Toot>> = Default::default();
        for toot in records {
            buckets.entry(toot.month_key()).or_default().push(toot.clone());
        }

        let (earliest, latest) = match (buckets.keys().next(), buckets.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(ArchiveError::EmptyCollection),
        };
        let max_count = buckets.values().map(Vec::len).max().unwrap_or(1);

        Ok(Self { buckets, earliest, latest, max_count })
    }

    /// Records published in the given month, or `None` for a month with no
    /// bucket.
    pub fn bucket(&self, month: NaiveDate) -> Option<&[Toot]> {
        self.buckets.get(&month).map(Vec::as_slice)
    }

    pub fn contains_month(&self, month: NaiveDate) -> bool {
        self.buckets.contains_key(&month)
    }

    pub fn earliest_month(&self) -> NaiveDate {
        self.earliest
    }

    /// The most recent month with at least one record; the default view.
    pub fn latest_month(&self) -> NaiveDate {
        self.latest
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Total records across all buckets.
    pub fn record_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Dense histogram rows, years descending, 12 months per year.
    ///
    /// Whole calendar years are emitted for the span between the earliest
    /// and latest bucket, with zero-count slots for empty months.
    pub fn years(&self) -> Vec<YearRow> {
        (self.earliest.year()..=self.latest.year())
            .rev()
            .map(|year| YearRow {
                year,
                months: (1..=12)
                    .map(|month| {
                        let key = NaiveDate::from_ymd_opt(year, month, 1)
                            .expect("months 1-12 always have a first day");
                        let count = self.buckets.get(&key).map_or(0, Vec::len);
                        MonthSlot {
                            key,
                            count,
                            intensity: 1.0 - count as f64 / self.max_count as f64,
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toot(id: &str, published: &str) -> Toot {
        Toot {
            id: id.to_string(),
            url: None,
            published: published.parse().unwrap(),
            sensitive: false,
            summary: None,
            content: String::new(),
            attachments: Vec::new(),
            poll: None,
            in_reply_to: None,
            direct_message: false,
        }
    }

    fn month(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    #[test]
    fn test_each_record_lands_in_exactly_one_bucket() {
        let toots = vec![
            toot("1", "2021-03-01T10:00:00Z"),
            toot("2", "2021-03-15T10:00:00Z"),
            toot("3", "2021-04-01T10:00:00Z"),
        ];
        let index = MonthIndex::build(&toots).unwrap();

        assert_eq!(index.bucket(month(2021, 3)).unwrap().len(), 2);
        assert_eq!(index.bucket(month(2021, 4)).unwrap().len(), 1);
        assert_eq!(index.record_count(), 3);
        assert!(index.bucket(month(2021, 5)).is_none());
    }

    #[test]
    fn test_empty_collection_fails() {
        let err = MonthIndex::build(std::iter::empty::<&Toot>()).unwrap_err();
        assert!(matches!(err, ArchiveError::EmptyCollection));
    }

    #[test]
    fn test_dense_span_includes_empty_months() {
        // Records only in 2020-11 and 2021-02; every month between must
        // still appear, with zero counts.
        let toots = vec![toot("1", "2020-11-05T00:00:00Z"), toot("2", "2021-02-05T00:00:00Z")];
        let index = MonthIndex::build(&toots).unwrap();
        let years = index.years();

        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2021);
        assert_eq!(years[1].year, 2020);
        assert!(years.iter().all(|y| y.months.len() == 12));

        let dec_2020 = &years[1].months[11];
        assert_eq!(dec_2020.key, month(2020, 12));
        assert_eq!(dec_2020.count, 0);
        assert_eq!(dec_2020.intensity, 1.0);

        let jan_2021 = &years[0].months[0];
        assert_eq!(jan_2021.count, 0);
    }

    #[test]
    fn test_intensity_is_normalized_against_busiest_month() {
        let toots = vec![
            toot("1", "2021-03-01T10:00:00Z"),
            toot("2", "2021-03-02T10:00:00Z"),
            toot("3", "2021-03-03T10:00:00Z"),
            toot("4", "2021-03-04T10:00:00Z"),
            toot("5", "2021-04-01T10:00:00Z"),
        ];
        let index = MonthIndex::build(&toots).unwrap();
        let year = &index.years()[0];

        let march = &year.months[2];
        let april = &year.months[3];
        assert_eq!(march.intensity, 0.0);
        assert_eq!(april.intensity, 0.75);
    }

    #[test]
    fn test_latest_and_earliest_months() {
        let toots = vec![
            toot("1", "2019-06-01T00:00:00Z"),
            toot("2", "2021-04-01T00:00:00Z"),
            toot("3", "2020-01-15T00:00:00Z"),
        ];
        let index = MonthIndex::build(&toots).unwrap();
        assert_eq!(index.earliest_month(), month(2019, 6));
        assert_eq!(index.latest_month(), month(2021, 4));
    }

    #[test]
    fn test_bucketing_respects_record_offset() {
        // 23:30-03:00 on March 31st is April 1st in UTC, but the record's
        // own offset keeps it in March.
        let toots = vec![toot("1", "2021-03-31T23:30:00-03:00")];
        let index = MonthIndex::build(&toots).unwrap();
        assert!(index.contains_month(month(2021, 3)));
        assert!(!index.contains_month(month(2021, 4)));
    }
}
