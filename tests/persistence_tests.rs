#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use lanesim::simulation::error::ModelError;
use lanesim::simulation::network::Network;
use lanesim::simulation::persistence::ModelStore;
use std::fs;
use std::path::PathBuf;

fn temp_model(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("lanesim_{}_{}.json", name, std::process::id()));
    fs::remove_file(&path).ok();
    path
}

#[test]
fn test_save_and_load_round_trip() {
    let path = temp_model("round_trip");
    let store = ModelStore::new(&path);

    let original = Network::new(&[5, 6, 4]);
    store.save(&original).expect("Failed to save model");
    assert!(store.exists());

    let mut restored = Network::new(&[5, 6, 4]);
    let loaded = store.load_into(&mut restored).expect("Failed to load model");
    assert!(loaded);

    for (a, b) in original.layers.iter().zip(&restored.layers) {
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.biases, b.biases);
    }

    fs::remove_file(&path).ok();
}

#[test]
fn test_saved_model_is_valid_json() {
    let path = temp_model("valid_json");
    let store = ModelStore::new(&path);

    store.save(&Network::new(&[3, 2])).expect("Failed to save model");

    let content = fs::read_to_string(&path).expect("Failed to read model");
    let json: serde_json::Value = serde_json::from_str(&content).expect("Invalid JSON");

    assert!(json["saved_at"].is_string());
    let layers = json["network"]["layers"]
        .as_array()
        .expect("layers should be an array");
    assert_eq!(layers.len(), 1);
    for key in ["inputs", "outputs", "weights", "biases"] {
        assert!(layers[0].get(key).is_some(), "missing {}", key);
    }

    fs::remove_file(&path).ok();
}

#[test]
fn test_load_without_file_is_noop() {
    let path = temp_model("missing");
    let store = ModelStore::new(&path);

    let mut network = Network::new(&[5, 6, 4]);
    let before = network.clone();

    assert!(!store.exists());
    assert!(!store.load_into(&mut network).expect("missing file is not an error"));
    assert_eq!(before.layers[0].weights, network.layers[0].weights);
}

#[test]
fn test_load_mismatched_model_leaves_network_untouched() {
    let path = temp_model("mismatch");
    let store = ModelStore::new(&path);
    store.save(&Network::new(&[5, 8, 4])).expect("Failed to save model");

    let mut network = Network::new(&[5, 6, 4]);
    let before = network.clone();

    let result = store.load_into(&mut network);
    assert!(matches!(
        result,
        Err(ModelError::ShapeMismatch { layer: 0, .. })
    ));
    for (a, b) in before.layers.iter().zip(&network.layers) {
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.biases, b.biases);
    }

    fs::remove_file(&path).ok();
}

#[test]
fn test_load_invalid_json() {
    let path = temp_model("invalid");
    fs::write(&path, "{ not a model").expect("Failed to write file");

    let store = ModelStore::new(&path);
    let mut network = Network::new(&[2, 2]);
    assert!(matches!(
        store.load_into(&mut network),
        Err(ModelError::Json(_))
    ));

    fs::remove_file(&path).ok();
}

#[test]
fn test_discard() {
    let path = temp_model("discard");
    let store = ModelStore::new(&path);

    // Nothing to remove yet
    assert!(!store.discard().expect("absent file is not an error"));

    store.save(&Network::new(&[2, 2])).expect("Failed to save model");
    assert!(store.discard().expect("Failed to discard model"));
    assert!(!path.exists());

    assert!(!store.discard().expect("absent file is not an error"));
}
