use anyhow::Result;
use keel_core::{
    param::{param_stats, soft_update, tensor_from_vec, ParamSet},
    record::{AggregateRecorder, Record},
    Algorithm, Evaluator, ExperienceBufferBase, ReplayBufferBase, SessionConfig, TrainSession,
};
use keel_tensorboard::TensorboardRecorder;
use keel_tracking::TrackingStore;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

const SLOPE: f32 = 2.0;
const INTERCEPT: f32 = -1.0;
const LEARNING_RATE: f32 = 0.1;
const TAU: f64 = 0.05;
const N_EPOCHS: usize = 200;
const N_POINTS: usize = 64;
const BATCH_SIZE: usize = 64;
const SAVE_INTERVAL: usize = 50;

mod buffer {
    use super::*;

    /// A replay buffer of points sampled from a line.
    pub struct PointBuffer {
        xs: Vec<f32>,
        ys: Vec<f32>,
    }

    impl ExperienceBufferBase for PointBuffer {
        type Item = (f32, f32);

        fn push(&mut self, tr: Self::Item) -> Result<()> {
            self.xs.push(tr.0);
            self.ys.push(tr.1);
            Ok(())
        }

        fn len(&self) -> usize {
            self.xs.len()
        }
    }

    impl ReplayBufferBase for PointBuffer {
        type Config = ();
        type Batch = (Vec<f32>, Vec<f32>);

        fn build(_config: &Self::Config) -> Self {
            Self {
                xs: vec![],
                ys: vec![],
            }
        }

        fn batch(&mut self, size: usize) -> Result<Self::Batch> {
            let size = size.min(self.xs.len());
            Ok((self.xs[..size].to_vec(), self.ys[..size].to_vec()))
        }
    }
}

mod model {
    use super::*;

    /// Hyperparameters of the least mean squares fit.
    #[derive(Debug, Serialize)]
    pub struct LmsConfig {
        pub learning_rate: f32,
        pub tau: f64,
        pub n_epochs: usize,
        pub batch_size: usize,
    }

    impl Default for LmsConfig {
        fn default() -> Self {
            Self {
                learning_rate: LEARNING_RATE,
                tau: TAU,
                n_epochs: N_EPOCHS,
                batch_size: BATCH_SIZE,
            }
        }
    }

    /// Fits a line with the least mean squares rule.
    ///
    /// The coefficients exposed as the policy are a slowly synchronized
    /// copy of the online parameter set.
    pub struct LmsLine {
        config: LmsConfig,
        online: ParamSet,
        target: ParamSet,
    }

    impl LmsLine {
        pub fn new(config: LmsConfig) -> Result<Self> {
            let mut online = ParamSet::new();
            online.push("weight", tensor_from_vec(vec![0.0], &[1])?)?;
            online.push("bias", tensor_from_vec(vec![0.0], &[1])?)?;
            let target = online.clone();
            Ok(Self {
                config,
                online,
                target,
            })
        }

        /// One full-batch gradient step on the online parameters.
        ///
        /// Returns the mean squared error of the batch.
        fn opt_step(&mut self, xs: &[f32], ys: &[f32]) -> f32 {
            let w = self.online.get("weight").unwrap()[[0]];
            let b = self.online.get("bias").unwrap()[[0]];
            let n = xs.len() as f32;
            let mut loss = 0.0;
            let mut grad_w = 0.0;
            let mut grad_b = 0.0;
            for (x, y) in xs.iter().zip(ys.iter()) {
                let err = w * x + b - y;
                loss += err * err / n;
                grad_w += 2.0 * err * x / n;
                grad_b += 2.0 * err / n;
            }
            self.online.get_mut("weight").unwrap()[[0]] = w - self.config.learning_rate * grad_w;
            self.online.get_mut("bias").unwrap()[[0]] = b - self.config.learning_rate * grad_b;
            loss
        }
    }

    impl Algorithm<PointBuffer> for LmsLine {
        type Policy = ParamSet;

        fn train(
            &mut self,
            buffer: &mut PointBuffer,
            session: &mut TrainSession,
            mut evaluator: Option<&mut dyn Evaluator<ParamSet>>,
        ) -> Result<()> {
            for epoch in 1..=self.config.n_epochs {
                let (xs, ys) = buffer.batch(self.config.batch_size)?;
                let loss = self.opt_step(&xs, &ys);
                soft_update(&mut self.target, &self.online, self.config.tau)?;

                let mut record = Record::from_scalar("loss", loss);
                record.merge_inplace(param_stats(&self.target));
                if let Some(evaluator) = evaluator.as_mut() {
                    record.merge_inplace(evaluator.evaluate(&self.target)?);
                }
                session.log_epoch(self, epoch, record)?;
            }

            Ok(())
        }

        fn policy(&self) -> &ParamSet {
            &self.target
        }
    }
}

use buffer::PointBuffer;
use model::{LmsConfig, LmsLine};

fn line_points() -> Result<PointBuffer> {
    let mut buffer = PointBuffer::build(&());
    for i in 0..N_POINTS {
        let x = i as f32 / 16.0;
        buffer.push((x, SLOPE * x + INTERCEPT))?;
    }
    Ok(buffer)
}

fn create_recorder(
    root: &str,
    tracking: bool,
    config: &LmsConfig,
) -> Result<(Box<dyn AggregateRecorder>, PathBuf)> {
    match tracking {
        true => {
            let store = TrackingStore::new(root)?;
            let run = store.create_run("lms_line")?;
            run.log_params(config)?;
            let model_dir = run.model_dir();
            Ok((Box::new(run), model_dir))
        }
        false => {
            let model_dir = PathBuf::from(root).join("lms_line");
            let recorder = TensorboardRecorder::new(model_dir.join("tb"));
            Ok((Box::new(recorder), model_dir))
        }
    }
}

fn train(root: &str, tracking: bool) -> Result<PathBuf> {
    let config = LmsConfig::default();
    let (recorder, model_dir) = create_recorder(root, tracking, &config)?;
    let session_config = SessionConfig::default().save_interval(SAVE_INTERVAL);
    let mut session = TrainSession::new(recorder, &model_dir, session_config)?;

    let mut buffer = line_points()?;
    let mut model = LmsLine::new(config)?;
    let mut evaluator = |policy: &ParamSet| -> Result<Record> {
        let w = policy.get("weight").unwrap()[[0]];
        let b = policy.get("bias").unwrap()[[0]];
        let mse = (0..N_POINTS)
            .map(|i| {
                let x = i as f32 / 16.0;
                let err = w * x + b - (SLOPE * x + INTERCEPT);
                err * err / N_POINTS as f32
            })
            .sum::<f32>();
        Ok(Record::from_scalar("eval_return", -mse))
    };
    model.train(&mut buffer, &mut session, Some(&mut evaluator))?;

    if let Some(best) = session.best_eval_return() {
        info!("Best negative evaluation error: {}", best);
    }

    Ok(model_dir)
}

fn eval(model_path: &Path) -> Result<()> {
    let policy = <LmsLine as Algorithm<PointBuffer>>::load_model(model_path)?;
    let w = policy.get("weight").unwrap()[[0]];
    let b = policy.get("bias").unwrap()[[0]];
    info!("Loaded the fitted line y = {} * x + {}", w, b);

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let model_dir = train("./keel/examples/store", true)?;
    eval(&model_dir.join("best.bin"))?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_lms_line() -> Result<()> {
        let root = TempDir::new("lms_line")?;
        let root = root.path().to_str().unwrap();
        let model_dir = train(root, true)?;

        let policy =
            <LmsLine as Algorithm<PointBuffer>>::load_model(&model_dir.join("best.bin"))?;
        let w = policy.get("weight").unwrap()[[0]];
        let b = policy.get("bias").unwrap()[[0]];
        assert!((w - SLOPE).abs() < 0.1);
        assert!((b - INTERCEPT).abs() < 0.1);

        eval(&model_dir.join("best.bin"))?;

        Ok(())
    }
}
