use std::path::PathBuf;

use prometheus::Registry;
use review_restorer::config::ConfigError;
use review_restorer::dataset::DatasetError;
use review_restorer::errors::AppError;
use review_restorer::metrics::Metrics;

#[test]
fn app_error_from_missing_column() {
    let app: AppError = DatasetError::MissingColumn {
        path: PathBuf::from("train.csv"),
        column: "output".into(),
    }
    .into();
    assert!(matches!(app, AppError::Dataset(DatasetError::MissingColumn { .. })));
    assert_eq!(
        app.to_string(),
        "dataset error: train.csv has no `output` column"
    );
}

#[test]
fn app_error_from_duplicate_metrics_registration() {
    let registry = Registry::new();
    Metrics::new(&registry).unwrap();
    let err = Metrics::new(&registry).err().expect("duplicate registration");
    let app: AppError = err.into();
    assert!(matches!(app, AppError::Metrics(_)));
}

#[test]
fn missing_api_key_names_the_variable() {
    let app: AppError = ConfigError::MissingApiKey("GEMINI_API_KEY").into();
    assert!(app.to_string().contains("GEMINI_API_KEY"));
}
