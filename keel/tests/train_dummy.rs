use anyhow::Result;
use keel_core::{
    dummy::{DummyAlgorithm, DummyBuffer, DummyPolicy},
    record::Record,
    Algorithm, ReplayBufferBase, SessionConfig, TrainSession,
};
use keel_tracking::{RunStatus, TrackingStore};
use tempdir::TempDir;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Trains the dummy algorithm for five epochs against a tracking run and
/// checks the files the run leaves behind.
#[test]
fn test_train_dummy_with_tracking() -> Result<()> {
    init();

    let root = TempDir::new("train_dummy")?;
    let store = TrackingStore::new(root.path())?;
    let run = store.create_run("dummy")?;
    let model_dir = run.model_dir();

    let config = SessionConfig::default().flush_interval(2);
    let mut session = TrainSession::new(Box::new(run), &model_dir, config)?;
    let mut buffer = DummyBuffer::build(&4);
    let mut algo = DummyAlgorithm::new(5);
    let mut evaluator = |policy: &DummyPolicy| -> Result<Record> {
        let value = -(policy.weights[0] - 3.0).abs();
        Ok(Record::from_scalar("eval_return", value))
    };
    algo.train(&mut buffer, &mut session, Some(&mut evaluator))?;
    session.flush(5);
    assert_eq!(session.best_eval_return(), Some(0.0));
    drop(session);

    let runs = store.runs()?;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_name, "dummy");
    assert_eq!(runs[0].status, RunStatus::Finished);

    let policy =
        <DummyAlgorithm as Algorithm<DummyBuffer>>::load_model(&model_dir.join("best.bin"))?;
    assert_eq!(
        policy,
        DummyPolicy {
            weights: vec![3.0]
        }
    );

    let metrics = std::fs::read_to_string(store.run_dir(&runs[0].run_id).join("metrics.csv"))?;
    assert!(metrics.contains("loss"));
    assert!(metrics.contains("eval_return"));

    Ok(())
}
