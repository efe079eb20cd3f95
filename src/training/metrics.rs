//! Classification metrics and training history
//!
//! Per-class precision/recall/F1, confusion matrices, and a text report in
//! the familiar sklearn layout, computed from integer-coded labels.

use std::fmt;

/// Confusion matrix over a fixed number of classes
///
/// `get(i, j)` is the count of records with true code `i` predicted as `j`.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    counts: Vec<usize>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Empty matrix for `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        ConfusionMatrix {
            counts: vec![0; n_classes * n_classes],
            n_classes,
        }
    }

    /// Tally predictions against ground truth. Codes outside
    /// `0..n_classes` are ignored rather than counted.
    ///
    /// # Panics
    /// Panics if the two sequences have different lengths.
    pub fn from_predictions(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Self {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "y_true and y_pred must be the same length"
        );

        let mut cm = Self::new(n_classes);
        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            if t < n_classes && p < n_classes {
                cm.counts[t * n_classes + p] += 1;
            }
        }
        cm
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Count of records with true code `true_code` predicted as `pred_code`.
    pub fn get(&self, true_code: usize, pred_code: usize) -> usize {
        self.counts[true_code * self.n_classes + pred_code]
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.get(class, class)
    }

    /// Records predicted as `class` whose true code differs.
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&i| i != class)
            .map(|i| self.get(i, class))
            .sum()
    }

    /// Records of `class` predicted as something else.
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes)
            .filter(|&j| j != class)
            .map(|j| self.get(class, j))
            .sum()
    }

    /// Number of true instances of `class`.
    pub fn support(&self, class: usize) -> usize {
        (0..self.n_classes).map(|j| self.get(class, j)).sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes).map(|i| self.get(i, i)).sum();
        correct as f64 / total as f64
    }

    /// Row-major copy of the counts, one row per true code.
    pub fn rows(&self) -> Vec<Vec<usize>> {
        (0..self.n_classes)
            .map(|i| (0..self.n_classes).map(|j| self.get(i, j)).collect())
            .collect()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "true\\pred")?;
        for j in 0..self.n_classes {
            write!(f, "{:>7}", j)?;
        }
        writeln!(f)?;

        for i in 0..self.n_classes {
            write!(f, "{:>8}", i)?;
            for j in 0..self.n_classes {
                write!(f, "{:>7}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-class precision, recall, F1, and support
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub f1: Vec<f64>,
    pub support: Vec<usize>,
}

impl ClassMetrics {
    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        let n = cm.n_classes();
        let mut precision = Vec::with_capacity(n);
        let mut recall = Vec::with_capacity(n);
        let mut f1 = Vec::with_capacity(n);
        let mut support = Vec::with_capacity(n);

        for class in 0..n {
            let tp = cm.true_positives(class) as f64;
            let fp = cm.false_positives(class) as f64;
            let fn_ = cm.false_negatives(class) as f64;

            let p = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
            let r = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
            let f = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };

            precision.push(p);
            recall.push(r);
            f1.push(f);
            support.push(cm.support(class));
        }

        ClassMetrics {
            precision,
            recall,
            f1,
            support,
        }
    }

    /// Unweighted mean over classes.
    pub fn macro_avg(values: &[f64]) -> f64 {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    /// Mean over classes weighted by support.
    pub fn weighted_avg(&self, values: &[f64]) -> f64 {
        let total: usize = self.support.iter().sum();
        if total == 0 {
            return 0.0;
        }
        values
            .iter()
            .zip(self.support.iter())
            .map(|(&v, &s)| v * s as f64)
            .sum::<f64>()
            / total as f64
    }
}

/// Human-readable per-class report over integer-coded labels.
///
/// `class_names[code]` supplies the row label for each code; the number of
/// classes is taken from its length.
pub fn classification_report(y_true: &[usize], y_pred: &[usize], class_names: &[String]) -> String {
    let cm = ConfusionMatrix::from_predictions(y_true, y_pred, class_names.len());
    let metrics = ClassMetrics::from_confusion(&cm);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>16} {:>9} {:>9} {:>9} {:>9}\n\n",
        "", "precision", "recall", "f1-score", "support"
    ));

    for (code, name) in class_names.iter().enumerate() {
        out.push_str(&format!(
            "{:>16} {:>9.3} {:>9.3} {:>9.3} {:>9}\n",
            name, metrics.precision[code], metrics.recall[code], metrics.f1[code], metrics.support[code]
        ));
    }

    let total: usize = metrics.support.iter().sum();
    out.push('\n');
    out.push_str(&format!(
        "{:>16} {:>39.3}\n",
        "accuracy",
        cm.accuracy()
    ));
    out.push_str(&format!(
        "{:>16} {:>9.3} {:>9.3} {:>9.3} {:>9}\n",
        "macro avg",
        ClassMetrics::macro_avg(&metrics.precision),
        ClassMetrics::macro_avg(&metrics.recall),
        ClassMetrics::macro_avg(&metrics.f1),
        total
    ));
    out.push_str(&format!(
        "{:>16} {:>9.3} {:>9.3} {:>9.3} {:>9}\n",
        "weighted avg",
        metrics.weighted_avg(&metrics.precision),
        metrics.weighted_avg(&metrics.recall),
        metrics.weighted_avg(&metrics.f1),
        total
    ));

    out
}

/// Per-epoch loss track for a training run
#[derive(Debug, Clone)]
pub struct TrainingHistory {
    pub train_losses: Vec<f64>,
    pub val_losses: Vec<f64>,
    pub best_val_loss: f64,
    pub best_epoch: usize,
}

impl Default for TrainingHistory {
    fn default() -> Self {
        TrainingHistory {
            train_losses: Vec::new(),
            val_losses: Vec::new(),
            best_val_loss: f64::INFINITY,
            best_epoch: 0,
        }
    }
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one epoch. A missing validation loss (empty validation
    /// partition) falls back to the training loss for bookkeeping.
    pub fn record_epoch(&mut self, epoch: usize, train_loss: f64, val_loss: Option<f64>) {
        let val = val_loss.unwrap_or(train_loss);
        self.train_losses.push(train_loss);
        self.val_losses.push(val);

        if val < self.best_val_loss {
            self.best_val_loss = val;
            self.best_epoch = epoch;
        }
    }

    pub fn epochs(&self) -> usize {
        self.train_losses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<usize>, Vec<usize>) {
        (vec![0, 1, 0, 2, 1, 0], vec![0, 1, 1, 2, 1, 0])
    }

    #[test]
    fn test_confusion_counts() {
        let (y_true, y_pred) = fixture();
        let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred, 3);

        assert_eq!(cm.get(0, 0), 2);
        assert_eq!(cm.get(0, 1), 1);
        assert_eq!(cm.get(1, 1), 2);
        assert_eq!(cm.get(2, 2), 1);
        assert_eq!(cm.total(), 6);
    }

    #[test]
    fn test_confusion_tally_helpers() {
        let (y_true, y_pred) = fixture();
        let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred, 3);

        assert_eq!(cm.true_positives(1), 2);
        assert_eq!(cm.false_positives(1), 1);
        assert_eq!(cm.false_negatives(0), 1);
        assert_eq!(cm.support(0), 3);
        assert!((cm.accuracy() - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_class_metrics_hand_computed() {
        let (y_true, y_pred) = fixture();
        let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred, 3);
        let m = ClassMetrics::from_confusion(&cm);

        // Class 1: tp=2, fp=1, fn=0
        assert!((m.precision[1] - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall[1] - 1.0).abs() < 1e-12);
        // Class 0: tp=2, fp=0, fn=1
        assert!((m.precision[0] - 1.0).abs() < 1e-12);
        assert!((m.recall[0] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.support, vec![3, 2, 1]);
    }

    #[test]
    fn test_report_contains_class_names() {
        let (y_true, y_pred) = fixture();
        let names = vec!["ant".to_string(), "bee".to_string(), "cat".to_string()];
        let report = classification_report(&y_true, &y_pred, &names);

        assert!(report.contains("ant"));
        assert!(report.contains("bee"));
        assert!(report.contains("cat"));
        assert!(report.contains("precision"));
        assert!(report.contains("weighted avg"));
    }

    #[test]
    fn test_empty_matrix_accuracy() {
        let cm = ConfusionMatrix::new(2);
        assert_eq!(cm.accuracy(), 0.0);
        assert_eq!(cm.total(), 0);
    }

    #[test]
    fn test_history_tracks_best_epoch() {
        let mut history = TrainingHistory::new();
        history.record_epoch(0, 1.0, Some(0.9));
        history.record_epoch(1, 0.8, Some(0.7));
        history.record_epoch(2, 0.6, Some(0.75));

        assert_eq!(history.best_epoch, 1);
        assert!((history.best_val_loss - 0.7).abs() < 1e-12);
        assert_eq!(history.epochs(), 3);
    }

    #[test]
    fn test_history_without_validation() {
        let mut history = TrainingHistory::new();
        history.record_epoch(0, 0.5, None);

        assert_eq!(history.val_losses, vec![0.5]);
    }
}
