//! In-memory filtering of knowledge entries.
//!
//! Filters are independent and combine with AND: term (case-insensitive
//! substring of title, details or answer), topic, author, and a date bucket
//! whose boundary is computed in the server's local time zone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use kb_types::{Query, QueryListParams};

/// Named relative time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    Week,
    Month,
    Year,
}

impl DateBucket {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "today" => Some(DateBucket::Today),
            "week" => Some(DateBucket::Week),
            "month" => Some(DateBucket::Month),
            "year" => Some(DateBucket::Year),
            _ => None,
        }
    }

    /// First instant of the bucket containing `now`, in `now`'s time zone.
    /// Weeks start on Sunday.
    pub fn start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Utc> {
        let today = now.date_naive();
        let first_day = match self {
            DateBucket::Today => today,
            DateBucket::Week => {
                today - Duration::days(today.weekday().num_days_from_sunday() as i64)
            }
            DateBucket::Month => today.with_day(1).unwrap_or(today),
            DateBucket::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };

        first_valid_instant(&now.timezone(), first_day.and_time(NaiveTime::MIN))
    }
}

/// `local` in `tz`, or the first wall-clock time after it that exists when a
/// DST jump skips it. Transition gaps are whole quarter hours.
fn first_valid_instant<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    (0..=4 * 24)
        .map(|step| local + Duration::minutes(15 * step))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}

/// Optional predicates for `search_queries`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub term: Option<String>,
    pub topic: Option<String>,
    pub employee_id: Option<String>,
    pub date: Option<DateBucket>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl SearchFilter {
    /// Build a filter from the `GET /api/queries` query string.
    /// Empty values mean "no filter"; an unknown date bucket is ignored.
    pub fn from_params(params: &QueryListParams) -> Self {
        let date = non_empty(&params.date).and_then(|raw| {
            let bucket = DateBucket::from_str(&raw);
            if bucket.is_none() {
                log::debug!("[SEARCH] Ignoring unknown date filter {:?}", raw);
            }
            bucket
        });

        Self {
            term: non_empty(&params.search),
            topic: non_empty(&params.topic),
            employee_id: non_empty(&params.employee),
            date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.topic.is_none() && self.employee_id.is_none() && self.date.is_none()
    }
}

fn matches_term(query: &Query, needle: &str) -> bool {
    query.title.to_lowercase().contains(needle)
        || query.details.to_lowercase().contains(needle)
        || query.answer.to_lowercase().contains(needle)
}

/// Newest first; stable, so equal dates keep their stored order
pub fn sort_newest_first(queries: &mut [Query]) {
    queries.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Apply `filter` to `queries` relative to `now` and return the matches newest first
pub fn apply<Tz: TimeZone>(queries: &[Query], filter: &SearchFilter, now: &DateTime<Tz>) -> Vec<Query> {
    let needle = filter.term.as_ref().map(|t| t.to_lowercase());
    let since = filter.date.map(|bucket| bucket.start(now));

    let mut results: Vec<Query> = queries
        .iter()
        .filter(|q| needle.as_deref().is_none_or(|n| matches_term(q, n)))
        .filter(|q| filter.topic.as_deref().is_none_or(|t| q.topic.as_str() == t))
        .filter(|q| filter.employee_id.as_deref().is_none_or(|e| q.employee_id == e))
        .filter(|q| since.is_none_or(|start| q.date >= start))
        .cloned()
        .collect();

    sort_newest_first(&mut results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_types::Topic;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn entry(id: i64, title: &str, answer: &str, topic: Topic, author: &str, date: &str) -> Query {
        Query {
            id,
            title: title.to_string(),
            details: format!("details for {}", id),
            answer: answer.to_string(),
            topic,
            employee_id: author.to_string(),
            date: at(date),
        }
    }

    fn sample() -> Vec<Query> {
        vec![
            entry(1, "Deployment settings", "Open Project Settings", Topic::Technical, "EMP10254", "2024-04-10T09:00:00Z"),
            entry(2, "Requesting time off", "Use the HR portal", Topic::Hr, "EMP10842", "2024-05-15T00:30:00Z"),
            entry(3, "Laptop refresh", "Ask IT for a VPN token", Topic::Tools, "EMP10468", "2024-05-13T12:00:00Z"),
            entry(4, "Expense policy", "Submit within 30 days", Topic::Process, "EMP10254", "2023-12-31T23:59:59Z"),
        ]
    }

    fn ids(results: &[Query]) -> Vec<i64> {
        results.iter().map(|q| q.id).collect()
    }

    // Wednesday
    fn now() -> DateTime<Utc> {
        at("2024-05-15T01:00:00Z")
    }

    #[test]
    fn test_no_filter_returns_everything_newest_first() {
        let results = apply(&sample(), &SearchFilter::default(), &now());
        assert_eq!(ids(&results), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_term_is_case_insensitive_across_fields() {
        let filter = SearchFilter {
            term: Some("vpn".to_string()),
            ..Default::default()
        };
        // "VPN" only appears in the answer of entry 3
        assert_eq!(ids(&apply(&sample(), &filter, &now())), vec![3]);

        let filter = SearchFilter {
            term: Some("DETAILS FOR 4".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&sample(), &filter, &now())), vec![4]);
    }

    #[test]
    fn test_topic_and_author_are_exact() {
        let filter = SearchFilter {
            topic: Some("hr".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&sample(), &filter, &now())), vec![2]);

        let filter = SearchFilter {
            topic: Some("HR".to_string()),
            ..Default::default()
        };
        assert!(apply(&sample(), &filter, &now()).is_empty());

        let filter = SearchFilter {
            employee_id: Some("EMP10254".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&sample(), &filter, &now())), vec![1, 4]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let filter = SearchFilter {
            term: Some("settings".to_string()),
            employee_id: Some("EMP10842".to_string()),
            ..Default::default()
        };
        assert!(apply(&sample(), &filter, &now()).is_empty());

        let filter = SearchFilter {
            term: Some("settings".to_string()),
            employee_id: Some("EMP10254".to_string()),
            topic: Some("technical".to_string()),
            date: Some(DateBucket::Year),
        };
        assert_eq!(ids(&apply(&sample(), &filter, &now())), vec![1]);
    }

    #[test]
    fn test_today_is_day_start_not_sliding_window() {
        let recent = vec![entry(9, "t", "a", Topic::Hr, "EMP10842", "2024-05-14T23:00:00Z")];
        let filter = SearchFilter {
            date: Some(DateBucket::Today),
            ..Default::default()
        };
        // Two hours old, but before midnight
        assert!(apply(&recent, &filter, &now()).is_empty());
        assert_eq!(ids(&apply(&sample(), &filter, &now())), vec![2]);
    }

    #[test]
    fn test_bucket_boundaries() {
        let now = now();
        assert_eq!(DateBucket::Today.start(&now), at("2024-05-15T00:00:00Z"));
        assert_eq!(DateBucket::Week.start(&now), at("2024-05-12T00:00:00Z"));
        assert_eq!(DateBucket::Month.start(&now), at("2024-05-01T00:00:00Z"));
        assert_eq!(DateBucket::Year.start(&now), at("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_bucket_uses_the_clock_time_zone() {
        let tz = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let now = at("2024-05-14T23:30:00Z").with_timezone(&tz);
        // Already May 15th at +02:00
        assert_eq!(DateBucket::Today.start(&now), at("2024-05-14T22:00:00Z"));
    }

    /// +02:00 until 2024-03-31 local midnight, then +03:00; local 00:00..01:00 never happens
    #[derive(Clone, Copy)]
    struct MidnightJump;

    impl MidnightJump {
        fn gap_start() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap().and_time(NaiveTime::MIN)
        }
        fn winter() -> chrono::FixedOffset {
            chrono::FixedOffset::east_opt(2 * 3600).unwrap()
        }
        fn summer() -> chrono::FixedOffset {
            chrono::FixedOffset::east_opt(3 * 3600).unwrap()
        }
    }

    impl TimeZone for MidnightJump {
        type Offset = chrono::FixedOffset;

        fn from_offset(_: &chrono::FixedOffset) -> Self {
            MidnightJump
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> chrono::LocalResult<chrono::FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> chrono::LocalResult<chrono::FixedOffset> {
            if *local < Self::gap_start() {
                chrono::LocalResult::Single(Self::winter())
            } else if *local < Self::gap_start() + Duration::hours(1) {
                chrono::LocalResult::None
            } else {
                chrono::LocalResult::Single(Self::summer())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> chrono::FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> chrono::FixedOffset {
            if *utc < Self::gap_start() - Duration::hours(2) {
                Self::winter()
            } else {
                Self::summer()
            }
        }
    }

    #[test]
    fn test_skipped_midnight_starts_at_end_of_gap() {
        let now = at("2024-03-31T09:00:00Z").with_timezone(&MidnightJump);
        // Local 01:00 at +03:00 is the first instant of the day
        assert_eq!(DateBucket::Today.start(&now), at("2024-03-30T22:00:00Z"));
        assert_eq!(DateBucket::Month.start(&now), at("2024-02-29T22:00:00Z"));
    }

    #[test]
    fn test_week_starting_on_sunday_is_its_own_start() {
        let sunday = at("2024-05-12T15:00:00Z");
        assert_eq!(DateBucket::Week.start(&sunday), at("2024-05-12T00:00:00Z"));
    }

    #[test]
    fn test_from_params_treats_empty_as_absent() {
        let params = QueryListParams {
            search: Some(String::new()),
            topic: Some("tools".to_string()),
            employee: None,
            date: Some("fortnight".to_string()),
        };
        let filter = SearchFilter::from_params(&params);
        assert_eq!(filter.term, None);
        assert_eq!(filter.topic.as_deref(), Some("tools"));
        assert_eq!(filter.date, None);
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let mut same = vec![
            entry(1, "a", "a", Topic::Hr, "EMP10842", "2024-05-01T00:00:00Z"),
            entry(2, "b", "b", Topic::Hr, "EMP10842", "2024-05-01T00:00:00Z"),
        ];
        sort_newest_first(&mut same);
        assert_eq!(ids(&same), vec![1, 2]);
    }
}
