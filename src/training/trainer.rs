//! Generic trainer wrapping burn's optimizers
//!
//! Holds the training configuration, builds a [`FeedForward`] from a
//! layer-size list, splits paired data into training and validation
//! partitions at a fixed fractional cut, and delegates the optimization to
//! burn. The trained model handle is kept on the instance for inference.

use burn::module::AutodiffModule;
use burn::nn::loss::CrossEntropyLossConfig;
use burn::optim::momentum::MomentumConfig;
use burn::optim::{AdamConfig, GradientsParams, Optimizer, SgdConfig};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Int, Tensor};

use crate::data::dataset::split_index;
use crate::model::FeedForward;
use crate::training::metrics::TrainingHistory;
use crate::{AnnError, NetworkKind, OptimizerKind, Result, TrainConfig};

/// Fraction of records routed to training when the caller has no preference.
pub const DEFAULT_SPLIT: f64 = 0.75;

/// Hidden layer sizes used when the caller passes none.
pub const DEFAULT_HIDDEN: &[usize] = &[2];

/// Targets for one training run, shaped for the configured loss
enum TargetBatch<B: Backend> {
    /// Integer class codes, consumed by cross-entropy
    Classes(Tensor<B, 1, Int>),
    /// Scalar values `[batch, 1]`, consumed by mean-squared error
    Values(Tensor<B, 2>),
}

/// Trainer for feed-forward networks
///
/// Generic over the autodiff backend, so the same plumbing runs on any
/// burn backend. The stored model handle lives on the inner (inference)
/// backend once training finishes.
pub struct NetworkTrainer<B: AutodiffBackend> {
    config: TrainConfig,
    device: B::Device,
    model: Option<FeedForward<B::InnerBackend>>,
    history: TrainingHistory,
}

impl<B: AutodiffBackend> NetworkTrainer<B> {
    /// Create a trainer. The configuration is stored unvalidated.
    pub fn new(config: TrainConfig, device: B::Device) -> Self {
        NetworkTrainer {
            config,
            device,
            model: None,
            history: TrainingHistory::new(),
        }
    }

    /// Train a network on positionally paired data.
    ///
    /// Layer sizes are `[input_dim] ++ hidden_layers ++ [y_data.len()]` with
    /// `hidden_layers` defaulting to [`DEFAULT_HIDDEN`]. Records `[0, ind)`
    /// with `ind = floor(split * len)` form the training partition and the
    /// rest the validation partition; no shuffling happens here, so callers
    /// wanting a random split must call
    /// [`randomise_order`](crate::data::randomise_order) first.
    ///
    /// On success the trained model handle replaces any previous one.
    pub fn train(
        &mut self,
        x_data: &[Vec<f32>],
        y_data: &[i64],
        split: f64,
        hidden_layers: Option<&[usize]>,
    ) -> Result<()> {
        if x_data.len() != y_data.len() {
            return Err(AnnError::LengthMismatch {
                x_len: x_data.len(),
                y_len: y_data.len(),
            });
        }
        if x_data.is_empty() {
            return Err(AnnError::EmptyDataset);
        }

        let hidden = hidden_layers.unwrap_or(DEFAULT_HIDDEN);

        // TODO: the output width tracks the record count, not the number of
        // distinct classes; confirm whether narrowing it to the class count
        // is intended before changing this.
        let mut sizes = vec![x_data[0].len()];
        sizes.extend_from_slice(hidden);
        sizes.push(y_data.len());

        let ind = split_index(x_data.len(), split);

        let x_train = features_tensor::<B>(&x_data[..ind], &self.device);
        let y_train = self.targets_tensor(&y_data[..ind]);
        let val = if ind < x_data.len() {
            Some((
                features_tensor::<B>(&x_data[ind..], &self.device),
                self.targets_tensor(&y_data[ind..]),
            ))
        } else {
            None
        };

        let model = FeedForward::<B>::new(&self.device, &sizes);
        let trained = match self.config.optimizer {
            OptimizerKind::Sgd => {
                let momentum = MomentumConfig::new().with_momentum(self.config.momentum);
                let optim = SgdConfig::new().with_momentum(Some(momentum)).init();
                self.fit(model, optim, x_train, y_train, val)
            }
            OptimizerKind::Adam => {
                let optim = AdamConfig::new().init();
                self.fit(model, optim, x_train, y_train, val)
            }
        };

        self.model = Some(trained.valid());
        Ok(())
    }

    /// Predicted class codes for a batch of feature vectors.
    ///
    /// `n_classes` restricts the argmax to the first `n_classes` output
    /// units; `None` uses the full output width. Fails with
    /// [`AnnError::NotTrained`] before a successful [`train`](Self::train).
    pub fn classify(&self, x_test: &[Vec<f32>], n_classes: Option<usize>) -> Result<Vec<usize>> {
        let model = self.model.as_ref().ok_or(AnnError::NotTrained)?;

        let x = features_tensor::<B::InnerBackend>(x_test, &self.device);
        let logits = model.forward(x);
        let [n, width] = logits.dims();

        let logits = match n_classes {
            Some(k) if k < width => logits.slice([0..n, 0..k]),
            _ => logits,
        };

        let codes = logits.argmax(1).reshape([n]);
        let data = codes.into_data();
        Ok(data.iter::<i64>().map(|c| c as usize).collect())
    }

    /// Whether a trained model handle is stored.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Per-epoch losses from the most recent training run.
    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Full-batch epoch loop shared by the optimizer variants.
    fn fit<O: Optimizer<FeedForward<B>, B>>(
        &mut self,
        mut model: FeedForward<B>,
        mut optim: O,
        x_train: Tensor<B, 2>,
        y_train: TargetBatch<B>,
        val: Option<(Tensor<B, 2>, TargetBatch<B>)>,
    ) -> FeedForward<B> {
        self.history = TrainingHistory::new();
        log::info!("Starting training for {} epochs", self.config.epochs);

        for epoch in 0..self.config.epochs {
            let logits = model.forward(x_train.clone());
            let loss = self.loss(logits, &y_train);
            let train_loss: f32 = loss.clone().into_scalar().elem();

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(self.config.learning_rate, model, grads);

            let val_loss = val.as_ref().map(|(x_val, y_val)| {
                let logits = model.forward(x_val.clone());
                let loss: f32 = self.loss(logits, y_val).into_scalar().elem();
                loss as f64
            });

            self.history.record_epoch(epoch, train_loss as f64, val_loss);

            if epoch % 10 == 0 || epoch + 1 == self.config.epochs {
                match val_loss {
                    Some(v) => log::info!(
                        "Epoch {}/{}: train_loss={:.4}, val_loss={:.4}",
                        epoch + 1,
                        self.config.epochs,
                        train_loss,
                        v
                    ),
                    None => log::info!(
                        "Epoch {}/{}: train_loss={:.4}",
                        epoch + 1,
                        self.config.epochs,
                        train_loss
                    ),
                }
            }
        }

        model
    }

    fn loss(&self, logits: Tensor<B, 2>, targets: &TargetBatch<B>) -> Tensor<B, 1> {
        match targets {
            TargetBatch::Classes(codes) => CrossEntropyLossConfig::new()
                .init(&logits.device())
                .forward(logits, codes.clone()),
            TargetBatch::Values(values) => {
                let n = logits.dims()[0];
                (logits.slice([0..n, 0..1]) - values.clone())
                    .powf_scalar(2.0)
                    .mean()
            }
        }
    }

    fn targets_tensor(&self, y_data: &[i64]) -> TargetBatch<B> {
        match self.config.network {
            NetworkKind::Classification => {
                let codes: Vec<i32> = y_data.iter().map(|&c| c as i32).collect();
                TargetBatch::Classes(Tensor::<B, 1, Int>::from_ints(
                    codes.as_slice(),
                    &self.device,
                ))
            }
            NetworkKind::Regression => {
                let values: Vec<f32> = y_data.iter().map(|&c| c as f32).collect();
                let n = values.len();
                TargetBatch::Values(
                    Tensor::<B, 1>::from_floats(values.as_slice(), &self.device).reshape([n, 1]),
                )
            }
        }
    }
}

/// Flatten feature rows into a dense `[batch, dim]` f32 tensor.
fn features_tensor<B: Backend>(rows: &[Vec<f32>], device: &B::Device) -> Tensor<B, 2> {
    let dim = rows.first().map(|r| r.len()).unwrap_or(0);
    let flat: Vec<f32> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Tensor::<B, 1>::from_floats(flat.as_slice(), device).reshape([rows.len(), dim])
}
