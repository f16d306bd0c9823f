use std::path::PathBuf;
use std::sync::Arc;

use triage::{
    ArtifactState, CanonicalizeConfig, DecisionConfig, DecisionEngine, ModelContext, PredictRequest,
    Predictor, RecoveryTable, TriageConfig,
};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/artifacts")
}

fn fixture_predictor() -> Predictor {
    let config = TriageConfig {
        artifacts_dir: fixture_dir(),
        ..TriageConfig::default()
    };
    Predictor::from_config(&config).expect("fixture predictor")
}

#[test]
fn fixture_artifacts_load_ready() {
    let predictor = fixture_predictor();
    assert!(predictor.state().is_ready());

    let ctx = predictor.state().context().expect("context");
    assert_eq!(ctx.dimensions(), 12);
    assert_eq!(ctx.num_classes(), 4);
}

#[test]
fn skin_symptoms_predict_fungal_infection() {
    let response = fixture_predictor()
        .predict(&PredictRequest::new("itching skin rash redness"))
        .expect("prediction");

    assert_eq!(response.disease, "Fungal Infection");
    assert_eq!(response.confidence, "95.6%");
    assert_eq!(response.original_input, "itching skin rash redness");
    assert_eq!(response.recovery.title, "Anti-Fungal Support");
}

#[test]
fn each_class_is_reachable() {
    let predictor = fixture_predictor();
    let cases = [
        ("fever chills sweating", "Malaria", "96.9%"),
        ("cough sneezing", "Common Cold", "95.7%"),
        ("headache nausea", "Migraine", "91.9%"),
        ("fever", "Malaria", "61.0%"),
        ("fever cough headache", "Common Cold", "54.1%"),
    ];
    for (symptoms, disease, confidence) in cases {
        let response = predictor
            .predict(&PredictRequest::new(symptoms))
            .expect("prediction");
        assert_eq!(response.disease, disease, "{symptoms}");
        assert_eq!(response.confidence, confidence, "{symptoms}");
        assert_eq!(
            Some(&response.recovery),
            predictor.recovery().get(disease),
            "{symptoms}"
        );
    }
}

#[test]
fn tied_top_scores_are_rejected() {
    let predictor = fixture_predictor();
    // Malaria and Migraine score identically.
    let response = predictor
        .predict(&PredictRequest::new("fever headache"))
        .expect("prediction");

    assert_eq!(response.disease, "Unknown Condition");
    assert_eq!(response.confidence, "42.3%");
    assert_eq!(&response.recovery, predictor.recovery().default_plan());
}

#[test]
fn unmatched_symptoms_report_zero_percent() {
    let predictor = fixture_predictor();
    for symptoms in ["broken leg", "a b c", "!!!"] {
        let response = predictor
            .predict(&PredictRequest::new(symptoms))
            .expect("prediction");
        assert_eq!(response.disease, "Unknown Condition", "{symptoms}");
        assert_eq!(response.confidence, "0%", "{symptoms}");
        assert_eq!(response.original_input, symptoms);
    }
}

#[test]
fn raising_the_margin_threshold_rejects_weak_accepts() {
    let config = TriageConfig {
        artifacts_dir: fixture_dir(),
        decision: DecisionConfig::default().with_margin_threshold(1.5),
        ..TriageConfig::default()
    };
    let predictor = Predictor::from_config(&config).expect("predictor");

    // Margin 1.0 passes the default 0.5 but not 1.5.
    let response = predictor
        .predict(&PredictRequest::new("fever"))
        .expect("prediction");
    assert_eq!(response.disease, "Unknown Condition");
    assert_eq!(response.confidence, "61.0%");

    let strong = predictor
        .predict(&PredictRequest::new("cough sneezing"))
        .expect("prediction");
    assert_eq!(strong.disease, "Common Cold");
}

#[test]
fn raising_the_percent_threshold_rejects_low_confidence() {
    let config = TriageConfig {
        artifacts_dir: fixture_dir(),
        decision: DecisionConfig::default().with_percent_threshold(0.6),
        ..TriageConfig::default()
    };
    let predictor = Predictor::from_config(&config).expect("predictor");

    let response = predictor
        .predict(&PredictRequest::new("fever cough headache"))
        .expect("prediction");
    assert_eq!(response.disease, "Unknown Condition");
    assert_eq!(response.confidence, "54.1%");
}

#[test]
fn canonical_min_token_chars_reaches_the_vectorizer() {
    let config = TriageConfig {
        artifacts_dir: fixture_dir(),
        canonical: CanonicalizeConfig {
            min_token_chars: 6,
            ..CanonicalizeConfig::default()
        },
        ..TriageConfig::default()
    };
    let predictor = Predictor::from_config(&config).expect("predictor");

    // "fever" is shorter than 6 chars and never reaches the vocabulary.
    let short = predictor
        .predict(&PredictRequest::new("fever"))
        .expect("prediction");
    assert_eq!(short.disease, "Unknown Condition");
    assert_eq!(short.confidence, "0%");

    // Only "sneezing" survives the filter: scores [-0.5, -0.5, 2.5, -0.5].
    let rest = predictor
        .predict(&PredictRequest::new("fever cough sneezing"))
        .expect("prediction");
    assert_eq!(rest.disease, "Common Cold");
    assert_eq!(rest.confidence, "87.0%");
}

#[test]
fn yaml_recovery_table_overrides_builtin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plans = dir.path().join("plans.yaml");
    std::fs::write(
        &plans,
        "default:\n  title: Rest Up\nplans:\n  Migraine:\n    title: Quiet Dark Room\n    tags: [Calm]\n    details: [Limit screen time]\n",
    )
    .expect("write plans");

    let config = TriageConfig {
        artifacts_dir: fixture_dir(),
        recovery_plans: Some(plans),
        ..TriageConfig::default()
    };
    let predictor = Predictor::from_config(&config).expect("predictor");

    let migraine = predictor
        .predict(&PredictRequest::new("headache nausea"))
        .expect("prediction");
    assert_eq!(migraine.recovery.title, "Quiet Dark Room");
    assert_eq!(migraine.recovery.details, vec!["Limit screen time"]);

    let malaria = predictor
        .predict(&PredictRequest::new("fever chills sweating"))
        .expect("prediction");
    assert_eq!(malaria.disease, "Malaria");
    assert_eq!(malaria.recovery.title, "Rest Up");
}

#[test]
fn response_json_has_wire_shape() {
    let response = fixture_predictor()
        .predict(&PredictRequest::new("cough sneezing"))
        .expect("prediction");
    let json = serde_json::to_value(&response).expect("serialize");

    let object = json.as_object().expect("object");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["confidence", "disease", "original_input", "recovery"]);
    assert_eq!(json["disease"], "Common Cold");
    assert!(json["recovery"]["tags"].is_array());
    assert!(json["recovery"]["details"].is_array());
}

#[test]
fn explicit_context_matches_config_path() {
    let ctx = ModelContext::load_dir(fixture_dir()).expect("context");
    let predictor = Predictor::new(
        ArtifactState::ready(ctx),
        CanonicalizeConfig::default(),
        DecisionEngine::default(),
        Arc::new(RecoveryTable::builtin().expect("builtin")),
    );

    let request = PredictRequest::new("Itching, SKIN   rash!");
    let response = predictor.predict(&request).expect("prediction");
    assert_eq!(response, fixture_predictor().predict(&request).expect("same"));
    assert_eq!(response.disease, "Fungal Infection");
    assert_eq!(response.confidence, "92.9%");
}

#[test]
fn batch_predictions_run_in_parallel_and_keep_order() {
    let predictor = fixture_predictor();
    let inputs = [
        "itching skin rash redness",
        "",
        "fever headache",
        "broken leg",
        "cough sneezing",
    ];
    let requests: Vec<PredictRequest> = (0..200)
        .map(|i| PredictRequest::new(inputs[i % inputs.len()]))
        .collect();

    let results = predictor.predict_batch(&requests);
    assert_eq!(results.len(), requests.len());
    for (i, result) in results.iter().enumerate() {
        match inputs[i % inputs.len()] {
            "" => assert!(result.is_err()),
            symptoms => {
                let response = result.as_ref().expect("prediction");
                assert_eq!(response.original_input, symptoms);
            }
        }
    }
}
