use prometheus::Registry;
use review_restorer::metrics::{render, Metrics};

#[test]
fn counter_increments() {
    let registry = Registry::new();
    let metrics = Metrics::new(&registry).unwrap();
    metrics.records_restored.inc();
    assert_eq!(metrics.records_restored.get(), 1);
}

#[test]
fn render_lists_counters() {
    let registry = Registry::new();
    let metrics = Metrics::new(&registry).unwrap();
    metrics.llm_fallbacks.inc_by(2);
    let text = render(&registry).unwrap();
    assert!(text.contains("llm_fallbacks_total 2"));
    assert!(text.contains("records_restored_total 0"));
}

#[test]
fn registering_twice_fails() {
    let registry = Registry::new();
    Metrics::new(&registry).unwrap();
    assert!(Metrics::new(&registry).is_err());
}
