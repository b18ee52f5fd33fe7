use serde::{Deserialize, Serialize};

use crate::enums::TicketStatus;

/// Aggregate report over all tickets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub todo_count: u64,
    pub in_progress_count: u64,
    pub done_count: u64,
    pub total_count: u64,
    /// Mean of `closed_at - created_at` in hours; None when no ticket is closed
    pub avg_time_to_close_hours: Option<f64>,
}

impl MetricsResponse {
    /// Build the report from per-status row counts and the close durations
    /// of every ticket that has `closed_at` set.
    ///
    /// Rows whose status is `None` (unknown stored value) count towards the
    /// total only.
    pub fn compute<C, D>(status_counts: C, close_durations: D) -> Self
    where
        C: IntoIterator<Item = (Option<TicketStatus>, u64)>,
        D: IntoIterator<Item = chrono::Duration>,
    {
        let mut report = Self {
            todo_count: 0,
            in_progress_count: 0,
            done_count: 0,
            total_count: 0,
            avg_time_to_close_hours: None,
        };

        for (status, count) in status_counts {
            match status {
                Some(TicketStatus::Todo) => report.todo_count += count,
                Some(TicketStatus::InProgress) => report.in_progress_count += count,
                Some(TicketStatus::Done) => report.done_count += count,
                None => {}
            }
            report.total_count += count;
        }

        let mut total_hours = 0.0;
        let mut closed = 0u64;
        for duration in close_durations {
            total_hours += duration.num_milliseconds() as f64 / 3_600_000.0;
            closed += 1;
        }
        if closed > 0 {
            report.avg_time_to_close_hours = Some(total_hours / closed as f64);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_empty() {
        let report = MetricsResponse::compute(
            Vec::<(Option<TicketStatus>, u64)>::new(),
            Vec::<Duration>::new(),
        );
        assert_eq!(report.total_count, 0);
        assert_eq!(report.todo_count, 0);
        assert_eq!(report.avg_time_to_close_hours, None);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["avg_time_to_close_hours"].is_null());
    }

    #[test]
    fn test_counts() {
        let report = MetricsResponse::compute(
            vec![
                (Some(TicketStatus::Todo), 2),
                (Some(TicketStatus::InProgress), 1),
                (Some(TicketStatus::Done), 1),
            ],
            Vec::<Duration>::new(),
        );
        assert_eq!(report.todo_count, 2);
        assert_eq!(report.in_progress_count, 1);
        assert_eq!(report.done_count, 1);
        assert_eq!(report.total_count, 4);
    }

    #[test]
    fn test_unknown_status_only_in_total() {
        let report = MetricsResponse::compute(
            vec![(None, 3), (Some(TicketStatus::Todo), 1)],
            Vec::<Duration>::new(),
        );
        assert_eq!(report.todo_count, 1);
        assert_eq!(report.total_count, 4);
    }

    #[test]
    fn test_average_hours() {
        let report = MetricsResponse::compute(
            vec![(Some(TicketStatus::Done), 2)],
            vec![Duration::hours(10), Duration::hours(20)],
        );
        let avg = report.avg_time_to_close_hours.unwrap();
        assert!((avg - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_keeps_fractional_hours() {
        let report = MetricsResponse::compute(
            Vec::<(Option<TicketStatus>, u64)>::new(),
            vec![Duration::minutes(90)],
        );
        assert_eq!(report.avg_time_to_close_hours, Some(1.5));
    }
}
