use std::path::PathBuf;

use nobias_nn::persist::{HIDDEN_ARTIFACT, OUTPUT_ARTIFACT};
use nobias_nn::{load, save, Network};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nobias-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn save_then_load_reproduces_weights_exactly() {
    let dir = scratch_dir("roundtrip");
    let mut trained = Network::with_seed(6, 4, 3, 0.2, 1);
    for _ in 0..25 {
        trained.train(&[0.1, 0.9, 0.3, 0.001, 0.5, 1.0], &[0.001, 0.999, 0.001]);
    }

    assert!(save(&trained, &dir).is_complete());

    let mut fresh = Network::with_seed(6, 4, 3, 0.2, 2);
    assert_ne!(fresh.hidden_weights(), trained.hidden_weights());
    assert!(load(&mut fresh, &dir).is_complete());

    let bits = |net: &Network| -> Vec<u64> {
        net.hidden_weights()
            .as_slice()
            .iter()
            .chain(net.output_weights().as_slice())
            .map(|v| v.to_bits())
            .collect()
    };
    assert_eq!(bits(&fresh), bits(&trained));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn loaded_network_predicts_identically() {
    let dir = scratch_dir("predict");
    let original = Network::with_seed(4, 5, 2, 0.1, 10);
    save(&original, &dir);

    let mut other = Network::with_seed(4, 5, 2, 0.1, 11);
    let input = [0.25, 0.5, 0.75, 1.0];
    assert_ne!(other.predict(&input), original.predict(&input));

    load(&mut other, &dir);
    assert_eq!(other.predict(&input), original.predict(&input));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn artifacts_have_expected_size() {
    let dir = scratch_dir("size");
    let net = Network::with_seed(3, 2, 4, 0.1, 0);
    save(&net, &dir);

    let hidden = std::fs::metadata(dir.join(HIDDEN_ARTIFACT)).unwrap().len();
    let output = std::fs::metadata(dir.join(OUTPUT_ARTIFACT)).unwrap().len();
    assert_eq!(hidden, 16 + 2 * 3 * 8);
    assert_eq!(output, 16 + 4 * 2 * 8);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_artifacts_leave_random_weights() {
    let dir = scratch_dir("missing");
    let mut net = Network::with_seed(3, 3, 3, 0.1, 4);
    let before = net.clone();

    let report = load(&mut net, &dir);
    assert!(!report.any_loaded());
    assert_eq!(net.hidden_weights(), before.hidden_weights());
    assert_eq!(net.output_weights(), before.output_weights());
}
