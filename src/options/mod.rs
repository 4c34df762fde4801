//! Time step option labels for selection lists
//!
//! Each entry of a [`TimeStepSourceMap`] becomes one option: the formatted
//! date followed by tags for the source kinds present, e.g.
//! `"12.03.2020  [ O R ]"`. Tags are O (observed), R (RFT or summary RFT),
//! G (grid) and E (ensemble).

use chrono::{format::StrftimeItems, format::Item, Timelike};
use serde::Serialize;
use std::fmt::Write;
use tracing::warn;

use crate::config::{self, LabelConfig};
use crate::types::{DataSourceKind, TimeStamp, TimeStepSourceMap};

/// One selectable time step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStepOption {
    pub label: String,
    pub value: TimeStamp,
}

/// Whether a strftime string parses without errors.
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Pick one format that tells all `dates` apart at the coarsest resolution.
///
/// Dates only when every time is midnight, minutes when every time is on a
/// whole minute, seconds otherwise.
pub fn time_format_for_dates<'a, I>(dates: I, labels: &LabelConfig) -> String
where
    I: IntoIterator<Item = &'a TimeStamp>,
{
    let mut has_time = false;
    let mut has_seconds = false;
    for date in dates {
        let time = date.time();
        has_time |= time.hour() != 0 || time.minute() != 0 || time.second() != 0 || time.nanosecond() != 0;
        has_seconds |= time.second() != 0 || time.nanosecond() != 0;
    }

    if has_seconds {
        format!("{} {}", labels.date_format, labels.second_format)
    } else if has_time {
        format!("{} {}", labels.date_format, labels.minute_format)
    } else {
        labels.date_format.clone()
    }
}

/// Format `time`, falling back to ISO 8601 when `format` is unusable.
fn format_time(time: &TimeStamp, format: &str) -> String {
    let mut text = String::new();
    if write!(text, "{}", time.format(format)).is_err() {
        warn!(format, "Invalid time format, using ISO 8601");
        return time.format("%Y-%m-%dT%H:%M:%S").to_string();
    }
    text
}

/// `"[ O R G E ]"` for the kinds present, in fixed order, each tag once.
fn kind_tags(kinds: &std::collections::BTreeSet<DataSourceKind>) -> String {
    let tags: Vec<&str> = DataSourceKind::TAG_ORDER
        .into_iter()
        .filter(|tag| kinds.iter().any(|kind| kind.tag() == *tag))
        .collect();
    format!("[ {} ]", tags.join(" "))
}

/// Labeled options for every time step in `map`, ascending.
pub fn format_time_step_options(map: &TimeStepSourceMap, labels: &LabelConfig) -> Vec<TimeStepOption> {
    let format = time_format_for_dates(map.iter().map(|(time, _)| time), labels);

    map.iter()
        .map(|(time, _)| TimeStepOption {
            label: format!("{}  {}", format_time(time, &format), kind_tags(&map.kinds_at(time))),
            value: *time,
        })
        .collect()
}

/// [`format_time_step_options`] with the global label config, or defaults.
pub fn time_step_options(map: &TimeStepSourceMap) -> Vec<TimeStepOption> {
    format_time_step_options(map, config::labels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{MemoryEnsemble, MemoryGridCase, MemoryRftReader, MemoryWellLogFile};
    use crate::types::{parse_timestamp, DataSourceRef};
    use std::sync::Arc;

    fn ts(text: &str) -> TimeStamp {
        parse_timestamp(text).unwrap()
    }

    fn sources() -> (DataSourceRef, DataSourceRef, DataSourceRef) {
        (
            DataSourceRef::ObservedLog(Arc::new(MemoryWellLogFile::new("LAS1", "W1"))),
            DataSourceRef::Rft(Arc::new(MemoryRftReader::new("RFT"))),
            DataSourceRef::Grid(Arc::new(MemoryGridCase::new("BASE"))),
        )
    }

    #[test]
    fn test_label_tags_in_fixed_order() {
        let (observed, rft, grid) = sources();
        let mut map = TimeStepSourceMap::new();
        map.insert(ts("2020-03-12"), grid.clone());
        map.insert(ts("2020-03-12"), rft);
        map.insert(ts("2020-03-12"), observed);
        map.insert(ts("2020-06-01"), grid);

        let options = format_time_step_options(&map, &LabelConfig::default());

        assert_eq!(
            options,
            vec![
                TimeStepOption {
                    label: "12.03.2020  [ O R G ]".to_string(),
                    value: ts("2020-03-12"),
                },
                TimeStepOption {
                    label: "01.06.2020  [ G ]".to_string(),
                    value: ts("2020-06-01"),
                },
            ]
        );
    }

    #[test]
    fn test_summary_rft_and_ensemble_tags() {
        let (_, rft, grid) = sources();
        let summary = DataSourceRef::SummaryRft(Arc::new(MemoryRftReader::new("SUM")));
        let ensemble = DataSourceRef::Ensemble(Arc::new(MemoryEnsemble::new("ENS")));

        let mut map = TimeStepSourceMap::new();
        map.insert(ts("2020-03-12"), summary.clone());
        map.insert(ts("2020-03-12"), rft);
        map.insert(ts("2020-03-12"), ensemble);
        map.insert(ts("2020-03-12"), grid);
        map.insert(ts("2020-06-01"), summary);

        let labels: Vec<_> = format_time_step_options(&map, &LabelConfig::default())
            .into_iter()
            .map(|option| option.label)
            .collect();
        assert_eq!(labels, vec!["12.03.2020  [ R G E ]", "01.06.2020  [ R ]"]);
    }

    #[test]
    fn test_format_granularity() {
        let labels = LabelConfig::default();
        let midnight = [ts("2020-01-01"), ts("2020-02-01")];
        assert_eq!(time_format_for_dates(&midnight, &labels), "%d.%m.%Y");

        let minutes = [ts("2020-01-01"), ts("2020-02-01 12:30")];
        assert_eq!(time_format_for_dates(&minutes, &labels), "%d.%m.%Y %H:%M");

        let seconds = [ts("2020-01-01"), ts("2020-02-01T12:30:15")];
        assert_eq!(time_format_for_dates(&seconds, &labels), "%d.%m.%Y %H:%M:%S");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        assert!(!is_valid_format("%Q"));
        assert!(is_valid_format("%d.%m.%Y"));
        assert_eq!(format_time(&ts("2020-01-02"), "%Q"), "2020-01-02T00:00:00");
    }

    #[test]
    fn test_empty_map_gives_no_options() {
        assert!(format_time_step_options(&TimeStepSourceMap::new(), &LabelConfig::default()).is_empty());
    }
}
