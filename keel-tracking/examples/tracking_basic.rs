use anyhow::Result;
use keel_core::record::{Record, RecordValue, Recorder};
use keel_tracking::TrackingStore;
use serde::Serialize;

// Nested Configuration struct
#[derive(Debug, Serialize)]
struct Config {
    buffer_params: String,
    hyper_params: HyperParameters,
}

#[derive(Debug, Serialize)]
struct HyperParameters {
    param1: i64,
    param2: Param2,
    param3: Param3,
}

#[derive(Debug, Serialize)]
enum Param2 {
    Variant1,
    Variant2(f32),
}

#[derive(Debug, Serialize)]
struct Param3 {
    dataset_name: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let config1 = Config {
        buffer_params: "buffer1".to_string(),
        hyper_params: HyperParameters {
            param1: 0,
            param2: Param2::Variant1,
            param3: Param3 {
                dataset_name: "a".to_string(),
            },
        },
    };
    let config2 = Config {
        buffer_params: "buffer2".to_string(),
        hyper_params: HyperParameters {
            param1: 0,
            param2: Param2::Variant2(3.0),
            param3: Param3 {
                dataset_name: "a".to_string(),
            },
        },
    };

    // Open a store for runs
    let store = TrackingStore::new("./keel_store")?;

    // Create runs for logging
    let mut run1 = store.create_run("")?;
    let mut run2 = store.create_run("")?;
    run1.log_params(&config1)?;
    run2.log_params(&config2)?;

    // Logging while training
    for epoch in 0..100 {
        let epoch = epoch as f32;

        // Create a record
        let mut record = Record::empty();
        record.insert("epoch", RecordValue::Scalar(epoch));
        record.insert("loss", RecordValue::Scalar((-1f32 * epoch).exp()));

        // Log metrics in the record
        run1.write(record);
    }

    // Logging while training
    for epoch in 0..100 {
        let epoch = epoch as f32;

        // Create a record
        let mut record = Record::empty();
        record.insert("epoch", RecordValue::Scalar(epoch));
        record.insert("loss", RecordValue::Scalar((-0.5f32 * epoch).exp()));

        // Log metrics in the record
        run2.write(record);
    }

    Ok(())
}
