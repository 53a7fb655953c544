use std::io::Write;
use std::sync::{Arc, Mutex};

use rust_data_analysis::AnalysisError;
use rust_data_analysis::ingestion::{
    CompositeObserver, LoadContext, LoadObserver, LoadOptions, LoadSeverity, LoadStats,
    load_from_path,
};
use tempfile::NamedTempFile;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &AnalysisError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &AnalysisError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

#[test]
fn observer_receives_stats_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let ds = load_from_path("tests/fixtures/people.csv", &opts).unwrap();

    let successes = obs.successes.lock().unwrap();
    assert_eq!(successes.len(), 1);
    assert_eq!(successes[0].rows, ds.row_count());
    assert_eq!(successes[0].columns, 4);
    assert_eq!(successes[0].encoding, "UTF-8");
    assert_eq!(successes[0].delimiter, b',');
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    };

    // Missing file -> Io error -> Critical
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![LoadSeverity::Critical]);
    assert_eq!(alerts, vec![LoadSeverity::Critical]);
}

#[test]
fn observer_reports_detected_delimiter_in_stats() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "a|b\n1|2\n").unwrap();

    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };
    load_from_path(file.path(), &opts).unwrap();

    assert_eq!(obs.successes.lock().unwrap()[0].delimiter, b'|');
}

#[test]
fn composite_observer_fans_out_to_all_observers() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite =
        CompositeObserver::new(vec![first.clone() as Arc<dyn LoadObserver>, second.clone()]);

    let opts = LoadOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };
    load_from_path("tests/fixtures/people.csv", &opts).unwrap();

    assert_eq!(first.successes.lock().unwrap().len(), 1);
    assert_eq!(second.successes.lock().unwrap().len(), 1);
}
