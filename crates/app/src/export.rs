//! CSV export of activity history and signal inventory.
//!
//! Headers and column order are the external contract. Unlike the format's
//! first incarnation, fields containing commas, quotes, or newlines are
//! quoted (RFC 4180), so embedded punctuation can no longer shear a row.

use gridwatch_panels::TrafficSignal;

use crate::activity::ActivityEntry;

pub const ACTIVITY_HEADER: &str = "Timestamp,Action,Type,Details,Duration";
pub const SIGNALS_HEADER: &str = "Intersection,Status,Latitude,Longitude";

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Activity history as `Timestamp,Action,Type,Details,Duration`.
pub fn activity_csv(entries: &[ActivityEntry]) -> String {
    let mut out = String::from(ACTIVITY_HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(&row(&[
            entry.timestamp.to_rfc3339(),
            entry.action.clone(),
            entry.kind.as_str().to_string(),
            entry.details.clone(),
            entry.duration.clone(),
        ]));
        out.push('\n');
    }
    out
}

/// Signal inventory as `Intersection,Status,Latitude,Longitude`.
pub fn signals_csv(signals: &[TrafficSignal]) -> String {
    let mut out = String::from(SIGNALS_HEADER);
    out.push('\n');
    for signal in signals {
        out.push_str(&row(&[
            signal.intersection.clone(),
            signal.status.to_string(),
            signal.location.lat.to_string(),
            signal.location.lng.to_string(),
        ]));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityKind, ActivityLog};
    use chrono::Utc;
    use gridwatch_core::{GeoPoint, RecordId};
    use gridwatch_panels::{PanelRecord, SignalInput, SignalTiming};

    #[test]
    fn activity_csv_has_contract_header_and_is_newline_terminated() {
        let mut log = ActivityLog::new();
        log.record(ActivityKind::Login, "Logged into system", "ana", Utc::now());
        let csv = activity_csv(log.entries());
        assert!(csv.starts_with("Timestamp,Action,Type,Details,Duration\n"));
        assert!(csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn embedded_commas_are_quoted_not_sheared() {
        let mut log = ActivityLog::new();
        log.record(
            ActivityKind::Update,
            "Updated signal",
            "Main St & 1st Ave, Sector 9",
            Utc::now(),
        );
        let csv = activity_csv(log.entries());
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.contains("\"Main St & 1st Ave, Sector 9\""));
    }

    #[test]
    fn quotes_inside_fields_are_doubled() {
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn signals_csv_lists_position_columns() {
        let signal = TrafficSignal::build(
            RecordId::new(),
            SignalInput {
                intersection: "Broadway & 42nd St".to_string(),
                timing: SignalTiming::new(45, 5, 50).unwrap(),
                location: GeoPoint::new(28.6129, 77.2295),
            },
            Utc::now(),
        )
        .unwrap();
        let csv = signals_csv(&[signal]);
        assert!(csv.starts_with("Intersection,Status,Latitude,Longitude\n"));
        assert!(csv.contains("Broadway & 42nd St,active,28.6129,77.2295"));
    }
}
