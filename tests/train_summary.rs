use clap::Parser;
use nim_qlearn::{
    adapters::MsgPackRepository,
    cli::commands::{
        evaluate::{self, EvaluateArgs},
        train::{self, TrainArgs},
    },
    pipeline::TrainingResult,
    ports::SnapshotRepository,
};
use tempfile::tempdir;

#[test]
fn train_writes_snapshots_history_and_summary() {
    let tmp = tempdir().unwrap();
    let cache_dir = tmp.path().join("cache");
    let history = tmp.path().join("history.csv");
    let summary = tmp.path().join("summary.json");

    let args = TrainArgs::parse_from([
        "train",
        "cli-agent",
        "30",
        "--seed",
        "4",
        "--cache-dir",
        cache_dir.to_str().unwrap(),
        "--history",
        history.to_str().unwrap(),
        "--summary",
        summary.to_str().unwrap(),
    ]);
    train::execute(args).expect("training should succeed");

    let repo = MsgPackRepository::new(&cache_dir);
    for epochs in (3..=30).step_by(3) {
        assert!(repo.exists("cli-agent", epochs), "missing snapshot {epochs}");
    }
    assert!(cache_dir.join("agent-cli-agent-30-epochs.msgpack").exists());

    let csv = std::fs::read_to_string(&history).unwrap();
    assert_eq!(csv.lines().count(), 31);

    let contents = std::fs::read_to_string(&summary).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["epochs"], 30);
    assert_eq!(parsed["history"].as_array().unwrap().len(), 30);

    let reloaded = TrainingResult::load(&summary).unwrap();
    assert_eq!(reloaded.epochs, 30);
    assert_eq!(reloaded.snapshots, (3..=30).step_by(3).collect::<Vec<_>>());
    assert_eq!(
        reloaded.learner_wins + reloaded.learner_losses,
        reloaded.history.len()
    );
}

#[test]
fn train_rejects_out_of_range_learning_rate() {
    let tmp = tempdir().unwrap();
    let args = TrainArgs::parse_from([
        "train",
        "bad",
        "10",
        "--learning-rate",
        "3.5",
        "--cache-dir",
        tmp.path().to_str().unwrap(),
    ]);
    assert!(train::execute(args).is_err());
    assert!(std::fs::read_dir(tmp.path()).unwrap().next().is_none());
}

#[test]
fn evaluate_exports_results_for_trained_agent() {
    let tmp = tempdir().unwrap();
    let cache_dir = tmp.path().join("cache");
    let export = tmp.path().join("eval.json");

    train::execute(TrainArgs::parse_from([
        "train",
        "eval-agent",
        "20",
        "--seed",
        "2",
        "--cache-dir",
        cache_dir.to_str().unwrap(),
    ]))
    .unwrap();

    evaluate::execute(EvaluateArgs::parse_from([
        "evaluate",
        "eval-agent",
        "20",
        "--games",
        "50",
        "--seed",
        "6",
        "--cache-dir",
        cache_dir.to_str().unwrap(),
        "--export",
        export.to_str().unwrap(),
    ]))
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(parsed["games"], 50);
    assert_eq!(parsed["failed_attempts"], 0);
}

#[test]
fn evaluate_without_snapshot_exits_cleanly() {
    let tmp = tempdir().unwrap();
    let args = EvaluateArgs::parse_from([
        "evaluate",
        "never-trained",
        "100",
        "--cache-dir",
        tmp.path().to_str().unwrap(),
    ]);
    assert!(evaluate::execute(args).is_ok());
}
