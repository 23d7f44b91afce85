//! Job-title classifier.
//!
//! The model artifact is a JSON document describing a linear classifier over
//! token counts:
//!
//! ```json
//! {
//!   "classes":    ["Data Scientist", "Software Engineer"],
//!   "vocabulary": {"data": 0, "engineer": 1, "scientist": 2, "software": 3},
//!   "coef":       [[1.2, -0.4, 1.5, -0.3], [-0.8, 1.1, -1.0, 1.4]],
//!   "intercept":  [0.0, 0.1]
//! }
//! ```
//!
//! Input: a raw job title. It is cleaned (ASCII punctuation removed, lowercased),
//! split on whitespace and counted against `vocabulary`; unknown tokens are
//! ignored. Output: the class with the highest `intercept[c] + coef[c] · counts`,
//! the first class winning ties.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::files::{read_text_file, FileReadError};
use crate::models::jobs::RoleRow;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Read(#[from] FileReadError),

    #[error("Model artifact is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Model artifact is inconsistent: {0}")]
    Shape(String),
}

pub trait TitleClassifier: Send + Sync {
    /// Predicts a role title for a job title, or `None` when the model has no classes.
    fn predict(&self, job_title: &str) -> Option<&str>;
}

#[derive(Debug, Deserialize)]
pub struct LinearTitleModel {
    classes: Vec<String>,
    vocabulary: HashMap<String, usize>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearTitleModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let raw = read_text_file(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let model: LinearTitleModel = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let n_classes = self.classes.len();
        if self.coef.len() != n_classes || self.intercept.len() != n_classes {
            return Err(ModelError::Shape(format!(
                "{n_classes} classes but {} coefficient rows and {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let n_features = self.vocabulary.values().max().map_or(0, |m| m + 1);
        if let Some((idx, row)) = self
            .coef
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() < n_features)
        {
            return Err(ModelError::Shape(format!(
                "coefficient row {idx} has {} weights, vocabulary needs {n_features}",
                row.len()
            )));
        }
        Ok(())
    }

    fn token_counts(&self, job_title: &str) -> HashMap<usize, f64> {
        let mut counts = HashMap::new();
        for token in clean_text(job_title).split_whitespace() {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        counts
    }
}

impl TitleClassifier for LinearTitleModel {
    fn predict(&self, job_title: &str) -> Option<&str> {
        let counts = self.token_counts(job_title);

        let mut best: Option<(usize, f64)> = None;
        for (class_idx, (row, bias)) in self.coef.iter().zip(&self.intercept).enumerate() {
            let score = bias + counts.iter().map(|(&i, &n)| row[i] * n).sum::<f64>();
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((class_idx, score));
            }
        }
        best.map(|(idx, _)| self.classes[idx].as_str())
    }
}

/// Removes ASCII punctuation and lowercases.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase()
}

/// Maps the classifier's prediction for `job_title` onto a role id.
pub fn find_best_matching_role(
    classifier: &dyn TitleClassifier,
    job_title: &str,
    roles: &[RoleRow],
) -> Option<i64> {
    let predicted = classifier.predict(job_title)?;
    roles.iter().find(|r| r.title == predicted).map(|r| r.id)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const MODEL_JSON: &str = r#"{
        "classes": ["Data Scientist", "Software Engineer"],
        "vocabulary": {"data": 0, "engineer": 1, "scientist": 2, "software": 3},
        "coef": [[1.2, -0.4, 1.5, -0.3], [-0.8, 1.1, -1.0, 1.4]],
        "intercept": [0.0, 0.1]
    }"#;

    fn roles() -> Vec<RoleRow> {
        vec![
            RoleRow {
                id: 1,
                title: "Software Engineer".to_string(),
            },
            RoleRow {
                id: 2,
                title: "Data Scientist".to_string(),
            },
        ]
    }

    #[test]
    fn test_clean_text_strips_punctuation_and_case() {
        assert_eq!(clean_text("Sr. Software-Engineer (Rust)!"), "sr softwareengineer rust");
    }

    #[test]
    fn test_predict_picks_highest_scoring_class() {
        let model = LinearTitleModel::from_json(MODEL_JSON).unwrap();
        assert_eq!(model.predict("Senior Software Engineer"), Some("Software Engineer"));
        assert_eq!(model.predict("Data Scientist, Growth"), Some("Data Scientist"));
    }

    #[test]
    fn test_predict_unknown_tokens_falls_back_to_intercepts() {
        let model = LinearTitleModel::from_json(MODEL_JSON).unwrap();
        assert_eq!(model.predict("Barista"), Some("Software Engineer"));
    }

    #[test]
    fn test_find_best_matching_role_maps_to_id() {
        let model = LinearTitleModel::from_json(MODEL_JSON).unwrap();
        assert_eq!(find_best_matching_role(&model, "ML Data Scientist", &roles()), Some(2));
        assert_eq!(find_best_matching_role(&model, "Software Engineer", &[]), None);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let raw = r#"{"classes": ["A", "B"], "vocabulary": {"x": 0}, "coef": [[1.0]], "intercept": [0.0, 0.0]}"#;
        assert!(matches!(
            LinearTitleModel::from_json(raw),
            Err(ModelError::Shape(_))
        ));

        let raw = r#"{"classes": ["A"], "vocabulary": {"x": 0, "y": 3}, "coef": [[1.0, 2.0]], "intercept": [0.0]}"#;
        assert!(matches!(
            LinearTitleModel::from_json(raw),
            Err(ModelError::Shape(_))
        ));
    }

    #[test]
    fn test_empty_model_predicts_nothing() {
        let raw = r#"{"classes": [], "vocabulary": {}, "coef": [], "intercept": []}"#;
        let model = LinearTitleModel::from_json(raw).unwrap();
        assert_eq!(model.predict("Engineer"), None);
    }

    #[test]
    fn test_load_reads_artifact_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("title_model.json");
        std::fs::write(&path, MODEL_JSON).unwrap();

        let model = LinearTitleModel::load(&path).unwrap();
        assert_eq!(model.predict("software"), Some("Software Engineer"));

        assert!(matches!(
            LinearTitleModel::load(dir.path().join("missing.json")),
            Err(ModelError::Read(FileReadError::NotFound(_)))
        ));
    }
}
