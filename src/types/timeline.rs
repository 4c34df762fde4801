//! Time stamps and the time step → source map

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use super::{DataSourceKind, DataSourceRef};

/// An absolute point in time, totally ordered.
pub type TimeStamp = NaiveDateTime;

/// Parse `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`
/// or a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(text: &str) -> Option<TimeStamp> {
    let text = text.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Serde helpers accepting the formats of [`parse_timestamp`].
pub mod serde_timestamp {
    use super::*;
    use serde::de::Error;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TimeStamp, D::Error> {
        let text = String::deserialize(d)?;
        parse_timestamp(&text).ok_or_else(|| D::Error::custom(format!("invalid time stamp '{text}'")))
    }

    /// An unparsable date is kept as `None` (an invalid file date), not an error.
    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<TimeStamp>, D::Error> {
        let text = Option::<String>::deserialize(d)?;
        Ok(text.as_deref().and_then(parse_timestamp))
    }

    pub fn deserialize_vec<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<TimeStamp>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|text| {
                parse_timestamp(text)
                    .ok_or_else(|| D::Error::custom(format!("invalid time stamp '{text}'")))
            })
            .collect()
    }
}

// ============================================================================
// TimeStepSourceMap
// ============================================================================

/// Time steps in ascending order, each with the sources offering data there.
///
/// Entries are only created by inserting a source, so every time step
/// present has a non-empty source set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeStepSourceMap {
    entries: BTreeMap<TimeStamp, BTreeSet<DataSourceRef>>,
}

impl TimeStepSourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `source` at `time`, merging with sources already there.
    pub fn insert(&mut self, time: TimeStamp, source: DataSourceRef) {
        self.entries.entry(time).or_default().insert(source);
    }

    /// Union `sources` into the set at `time`. Empty input creates no entry.
    pub fn extend_at<I>(&mut self, time: TimeStamp, sources: I)
    where
        I: IntoIterator<Item = DataSourceRef>,
    {
        let mut sources = sources.into_iter().peekable();
        if sources.peek().is_some() {
            self.entries.entry(time).or_default().extend(sources);
        }
    }

    /// Union every entry of `other` into this map.
    pub fn merge(&mut self, other: &Self) {
        for (time, sources) in other.iter() {
            self.extend_at(*time, sources.iter().cloned());
        }
    }

    pub fn get(&self, time: &TimeStamp) -> Option<&BTreeSet<DataSourceRef>> {
        self.entries.get(time)
    }

    pub fn contains(&self, time: &TimeStamp) -> bool {
        self.entries.contains_key(time)
    }

    /// All time steps as an ordered set.
    pub fn time_steps(&self) -> BTreeSet<TimeStamp> {
        self.entries.keys().copied().collect()
    }

    pub fn first_time_step(&self) -> Option<TimeStamp> {
        self.entries.keys().next().copied()
    }

    /// Source kinds present at `time`.
    pub fn kinds_at(&self, time: &TimeStamp) -> BTreeSet<DataSourceKind> {
        self.entries
            .get(time)
            .map(|sources| sources.iter().map(DataSourceRef::kind).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, TimeStamp, BTreeSet<DataSourceRef>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a TimeStepSourceMap {
    type Item = (&'a TimeStamp, &'a BTreeSet<DataSourceRef>);
    type IntoIter = btree_map::Iter<'a, TimeStamp, BTreeSet<DataSourceRef>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
