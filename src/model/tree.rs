use serde::Deserialize;

/// Flattened CART node. Samples go left when `x[feature] <= threshold`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must point forward, so every walk from the root terminates.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("decision tree has no nodes".to_string());
        }
        let n_nodes = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature}, model has {n_features}"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= n_nodes {
                            return Err(format!(
                                "node {idx} has child {child} outside ({idx}, {n_nodes})"
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(format!(
                            "leaf {idx} has {} class values, expected {n_classes}",
                            value.len()
                        ));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(format!("leaf {idx} has a negative or non-finite value"));
                    }
                    if value.iter().sum::<f64>() <= 0.0 {
                        return Err(format!("leaf {idx} has an all-zero distribution"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Class distribution at the leaf reached by `x`, normalized to sum to 1.
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, String> {
        let mut idx = 0usize;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = x
                        .get(*feature)
                        .copied()
                        .ok_or_else(|| format!("feature {feature} missing from input"))?;
                    idx = if v <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value }) => {
                    let total: f64 = value.iter().sum();
                    return Ok(value.iter().map(|v| v / total).collect());
                }
                None => return Err(format!("tree walk reached missing node {idx}")),
            }
        }
        Err("tree walk did not reach a leaf".to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/tree.rs"]
mod tests;
