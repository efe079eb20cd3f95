//! Label-indexing classifier
//!
//! Wraps a [`NetworkTrainer`] with a label-to-code bijection so callers can
//! train on arbitrary labels (strings, chars, anything hashable) and get
//! predictions back in the same label domain, alongside a per-class report
//! and confusion matrix.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use burn::tensor::backend::AutodiffBackend;

use crate::features::LabelEncoder;
use crate::training::metrics::{classification_report, ConfusionMatrix};
use crate::training::NetworkTrainer;
use crate::{AnnError, Result, TrainConfig};

/// Outcome of scoring a test set
#[derive(Debug, Clone)]
pub struct Classification<L> {
    /// Predicted labels, decoded back into the training label domain
    pub predictions: Vec<L>,
    /// Inverse map from class code to label
    pub label_map: HashMap<usize, L>,
    /// Human-readable per-class precision/recall/F1 report
    pub report: String,
    /// Confusion matrix over the encoded classes
    pub confusion: ConfusionMatrix,
}

/// Classifier over arbitrary label types
///
/// The encoder is rebuilt on every [`train`](Self::train) call, so the label
/// map always reflects the most recent training labels.
pub struct Classifier<B: AutodiffBackend, L> {
    trainer: NetworkTrainer<B>,
    encoder: Option<LabelEncoder<L>>,
}

impl<B, L> Classifier<B, L>
where
    B: AutodiffBackend,
    L: Clone + Eq + Hash + fmt::Display,
{
    pub fn new(config: TrainConfig, device: B::Device) -> Self {
        Classifier {
            trainer: NetworkTrainer::new(config, device),
            encoder: None,
        }
    }

    /// Encode the labels to dense integer codes and train the network.
    ///
    /// Overwrites the stored label map and model handle on success. `split`
    /// and `hidden_layers` are forwarded to
    /// [`NetworkTrainer::train`] unchanged.
    pub fn train(
        &mut self,
        x_data: &[Vec<f32>],
        y_data: &[L],
        split: f64,
        hidden_layers: Option<&[usize]>,
    ) -> Result<()> {
        if x_data.len() != y_data.len() {
            return Err(AnnError::LengthMismatch {
                x_len: x_data.len(),
                y_len: y_data.len(),
            });
        }

        let encoder = LabelEncoder::fit(y_data);
        let codes: Vec<i64> = encoder
            .encode_all(y_data)?
            .into_iter()
            .map(|c| c as i64)
            .collect();

        self.trainer.train(x_data, &codes, split, hidden_layers)?;
        self.encoder = Some(encoder);
        Ok(())
    }

    /// Classify test data and score it against known labels.
    ///
    /// Every label in `y_test` must have been seen at training time;
    /// genuinely novel classes fail with [`AnnError::UnknownLabel`]. Does
    /// not mutate classifier state.
    pub fn classify(&self, x_test: &[Vec<f32>], y_test: &[L]) -> Result<Classification<L>> {
        let encoder = self.encoder.as_ref().ok_or(AnnError::NotTrained)?;

        if x_test.len() != y_test.len() {
            return Err(AnnError::LengthMismatch {
                x_len: x_test.len(),
                y_len: y_test.len(),
            });
        }

        let y_true = encoder.encode_all(y_test)?;

        // Restrict the argmax to the encoded class range so every predicted
        // code is decodable even though the output layer is wider.
        let y_pred = self.trainer.classify(x_test, Some(encoder.len()))?;

        let predictions: Vec<L> = y_pred
            .iter()
            .map(|&code| {
                encoder
                    .decode(code)
                    .cloned()
                    .ok_or(AnnError::UnknownCode(code))
            })
            .collect::<Result<_>>()?;

        let class_names: Vec<String> = encoder.classes().iter().map(|l| l.to_string()).collect();

        Ok(Classification {
            predictions,
            label_map: encoder.inverse_map(),
            report: classification_report(&y_true, &y_pred, &class_names),
            confusion: ConfusionMatrix::from_predictions(&y_true, &y_pred, encoder.len()),
        })
    }

    /// Distinct training labels in code order, once trained.
    pub fn classes(&self) -> Option<&[L]> {
        self.encoder.as_ref().map(|e| e.classes())
    }

    pub fn is_trained(&self) -> bool {
        self.trainer.is_trained() && self.encoder.is_some()
    }

    /// The underlying trainer, e.g. for its training history.
    pub fn trainer(&self) -> &NetworkTrainer<B> {
        &self.trainer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::DEFAULT_SPLIT;
    use burn::backend::{Autodiff, NdArray};

    type TestBackend = Autodiff<NdArray<f32>>;

    fn test_config() -> TrainConfig {
        TrainConfig {
            epochs: 20,
            learning_rate: 0.1,
            ..Default::default()
        }
    }

    fn labelled_clusters() -> (Vec<Vec<f32>>, Vec<&'static str>) {
        let x = vec![
            vec![0.0, 0.1],
            vec![0.9, 1.0],
            vec![0.1, 0.0],
            vec![1.0, 0.9],
            vec![0.2, 0.1],
            vec![0.8, 0.9],
            vec![0.1, 0.2],
            vec![1.0, 1.0],
        ];
        let y = vec!["low", "high", "low", "high", "low", "high", "low", "high"];
        (x, y)
    }

    #[test]
    fn test_classify_before_train_fails() {
        let classifier =
            Classifier::<TestBackend, &str>::new(test_config(), Default::default());
        let err = classifier
            .classify(&[vec![0.0, 0.0]], &["low"])
            .unwrap_err();

        assert!(matches!(err, AnnError::NotTrained));
    }

    #[test]
    fn test_train_length_mismatch() {
        let mut classifier =
            Classifier::<TestBackend, &str>::new(test_config(), Default::default());
        let err = classifier
            .train(&[vec![0.0]], &["a", "b"], DEFAULT_SPLIT, None)
            .unwrap_err();

        assert!(matches!(err, AnnError::LengthMismatch { .. }));
    }

    #[test]
    fn test_predictions_stay_in_training_label_set() {
        let (x, y) = labelled_clusters();
        let mut classifier =
            Classifier::<TestBackend, &str>::new(test_config(), Default::default());

        classifier.train(&x, &y, DEFAULT_SPLIT, Some(&[4])).unwrap();
        let result = classifier.classify(&x, &y).unwrap();

        assert_eq!(result.predictions.len(), x.len());
        for label in &result.predictions {
            assert!(*label == "low" || *label == "high");
        }
    }

    #[test]
    fn test_classification_bundle_shape() {
        let (x, y) = labelled_clusters();
        let mut classifier =
            Classifier::<TestBackend, &str>::new(test_config(), Default::default());

        classifier.train(&x, &y, DEFAULT_SPLIT, None).unwrap();
        let result = classifier.classify(&x, &y).unwrap();

        // First-occurrence order: "low" before "high"
        assert_eq!(result.label_map[&0], "low");
        assert_eq!(result.label_map[&1], "high");
        assert_eq!(result.confusion.n_classes(), 2);
        assert_eq!(result.confusion.total(), x.len());
        assert!(result.report.contains("low"));
        assert!(result.report.contains("high"));
    }

    #[test]
    fn test_unseen_test_label_fails() {
        let (x, y) = labelled_clusters();
        let mut classifier =
            Classifier::<TestBackend, &str>::new(test_config(), Default::default());

        classifier.train(&x, &y, DEFAULT_SPLIT, None).unwrap();
        let err = classifier
            .classify(&[vec![0.5, 0.5]], &["medium"])
            .unwrap_err();

        assert!(matches!(err, AnnError::UnknownLabel(ref l) if l == "medium"));
    }

    #[test]
    fn test_retrain_overwrites_label_map() {
        let (x, y) = labelled_clusters();
        let mut classifier =
            Classifier::<TestBackend, &str>::new(test_config(), Default::default());

        classifier.train(&x, &y, DEFAULT_SPLIT, None).unwrap();
        assert_eq!(classifier.classes().unwrap(), &["low", "high"]);

        let y2 = vec!["a", "b", "a", "b", "a", "b", "a", "b"];
        classifier.train(&x, &y2, DEFAULT_SPLIT, None).unwrap();
        assert_eq!(classifier.classes().unwrap(), &["a", "b"]);

        // Old labels are now unknown
        let err = classifier.classify(&x, &y).unwrap_err();
        assert!(matches!(err, AnnError::UnknownLabel(_)));
    }
}
