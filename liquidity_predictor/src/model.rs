use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactLoadError, PipelineError};

/// Regression model over already-scaled rows.
pub trait Regressor {
    fn n_features(&self) -> usize;
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, PipelineError>;
}

const TREE_LEAF: i64 = -1;

/// One regression tree in flat node-array layout.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise a row goes
/// left when `x[feature[i]] <= threshold[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
}

impl Tree {
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<f64>,
    ) -> Self {
        Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
        }
    }

    pub fn leaf(value: f64) -> Self {
        Self::new(vec![TREE_LEAF], vec![TREE_LEAF], vec![-2], vec![-2.0], vec![value])
    }

    pub fn n_nodes(&self) -> usize {
        self.value.len()
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.n_nodes();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        let lengths = [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ];
        if lengths.iter().any(|len| *len != n) {
            return Err(format!("node arrays have lengths {lengths:?}, expected {n}"));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(format!("node {node} has only one child"));
                }
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {node} has a non-finite value"));
                }
                continue;
            }
            // Children always follow their parent, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} points to invalid child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_features as i64 {
                return Err(format!("node {node} splits on unknown feature {feature}"));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {node} has a non-finite threshold"));
            }
        }
        Ok(())
    }

    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = 0;
        loop {
            let left = self.children_left[node];
            if left == TREE_LEAF {
                return self.value[node];
            }
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// Additive tree ensemble: `init + learning_rate * sum(tree(x))`.
///
/// Every constructor, deserialisation included, validates the trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradientBoostingRegressor")]
pub struct GradientBoostingRegressor {
    init: f64,
    learning_rate: f64,
    n_features: usize,
    trees: Vec<Tree>,
}

/// Unchecked wire form of [`GradientBoostingRegressor`].
#[derive(Debug, Deserialize)]
pub(crate) struct RawGradientBoostingRegressor {
    init: f64,
    learning_rate: f64,
    n_features: usize,
    trees: Vec<Tree>,
}

impl TryFrom<RawGradientBoostingRegressor> for GradientBoostingRegressor {
    type Error = ArtifactLoadError;

    fn try_from(raw: RawGradientBoostingRegressor) -> Result<Self, Self::Error> {
        Self::new(raw.init, raw.learning_rate, raw.n_features, raw.trees)
    }
}

impl GradientBoostingRegressor {
    pub fn new(
        init: f64,
        learning_rate: f64,
        n_features: usize,
        trees: Vec<Tree>,
    ) -> Result<Self, ArtifactLoadError> {
        let model = Self {
            init,
            learning_rate,
            n_features,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn validate(&self) -> Result<(), ArtifactLoadError> {
        if !self.init.is_finite() || !self.learning_rate.is_finite() {
            return Err(ArtifactLoadError::InvalidModel(
                "init and learning_rate must be finite".to_string(),
            ));
        }
        if self.n_features == 0 {
            return Err(ArtifactLoadError::InvalidModel("model expects no features".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| ArtifactLoadError::InvalidModel(format!("tree {i}: {e}")))?;
        }
        Ok(())
    }
}

impl Regressor for GradientBoostingRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, PipelineError> {
        if x.ncols() != self.n_features {
            return Err(PipelineError::ShapeMismatch {
                expected: self.n_features,
                found: x.ncols(),
            });
        }

        let predictions = x
            .rows()
            .into_iter()
            .map(|row| {
                let boost: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
                self.init + self.learning_rate * boost
            })
            .collect();
        Ok(predictions)
    }
}
