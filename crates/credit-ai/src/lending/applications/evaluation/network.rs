//! Fixed-weight 5→4→1 feed-forward scorer.
//!
//! The weights are calibration constants, not learned parameters: nothing in this module
//! trains or mutates them, so one instance can be shared by any number of evaluations.

use serde::{Deserialize, Serialize};

pub const INPUT_FEATURES: usize = 5;
pub const HIDDEN_UNITS: usize = 4;

const CIBIL_FLOOR: f64 = 300.0;
const CIBIL_SPAN: f64 = 600.0;
const DTI_SCALE: f64 = 100.0;
const EMPLOYMENT_SCALE: f64 = 10.0;
const LOAN_TO_INCOME_SCALE: f64 = 10.0;
const INCOME_SCALE: f64 = 200_000.0;

/// Immutable network parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkWeights {
    /// Row per input feature, column per hidden unit.
    pub input_to_hidden: [[f64; HIDDEN_UNITS]; INPUT_FEATURES],
    pub hidden_to_output: [f64; HIDDEN_UNITS],
    pub hidden_bias: [f64; HIDDEN_UNITS],
    pub output_bias: f64,
}

impl NetworkWeights {
    pub const CALIBRATED: NetworkWeights = NetworkWeights {
        input_to_hidden: [
            [0.8, -0.5, 0.3, 0.6],
            [-0.6, 0.7, -0.4, 0.5],
            [0.4, 0.3, 0.8, -0.2],
            [-0.5, 0.6, -0.3, 0.7],
            [0.3, -0.4, 0.5, 0.4],
        ],
        hidden_to_output: [0.7, 0.8, -0.6, 0.9],
        hidden_bias: [0.1, -0.2, 0.15, -0.1],
        output_bias: 0.2,
    };

    pub const fn parameter_count(&self) -> usize {
        INPUT_FEATURES * HIDDEN_UNITS + HIDDEN_UNITS + HIDDEN_UNITS + 1
    }
}

impl Default for NetworkWeights {
    fn default() -> Self {
        Self::CALIBRATED
    }
}

/// Ordered feature vector: CIBIL, DTI, employment, loan-to-income, income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeatures(pub [f64; INPUT_FEATURES]);

impl NormalizedFeatures {
    /// CIBIL is rescaled without clamping; the rest are capped at 1 but not floored.
    pub fn from_inputs(
        cibil_score: f64,
        dti_ratio: f64,
        employment_years: f64,
        loan_to_income_ratio: f64,
        income: f64,
    ) -> Self {
        Self([
            (cibil_score - CIBIL_FLOOR) / CIBIL_SPAN,
            (dti_ratio / DTI_SCALE).min(1.0),
            (employment_years / EMPLOYMENT_SCALE).min(1.0),
            (loan_to_income_ratio / LOAN_TO_INCOME_SCALE).min(1.0),
            (income / INCOME_SCALE).min(1.0),
        ])
    }

    pub fn values(&self) -> &[f64; INPUT_FEATURES] {
        &self.0
    }

    pub fn cibil(&self) -> f64 {
        self.0[0]
    }
}

/// Network output plus the intermediate values needed to audit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAssessment {
    /// `confidence * 100`.
    pub score: f64,
    pub confidence: f64,
    pub hidden_activations: [f64; HIDDEN_UNITS],
    pub features: NormalizedFeatures,
    pub parameter_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NetworkScorer {
    weights: NetworkWeights,
}

impl NetworkScorer {
    pub fn new(weights: NetworkWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &NetworkWeights {
        &self.weights
    }

    pub fn architecture(&self) -> String {
        format!(
            "{INPUT_FEATURES} inputs → {HIDDEN_UNITS} hidden neurons (ReLU) → 1 output (Sigmoid)"
        )
    }

    pub fn predict(&self, features: &NormalizedFeatures) -> NetworkAssessment {
        let weights = &self.weights;

        let mut hidden_activations = [0.0; HIDDEN_UNITS];
        for (unit, activation) in hidden_activations.iter_mut().enumerate() {
            let mut sum = weights.hidden_bias[unit];
            for (input, value) in features.values().iter().enumerate() {
                sum += value * weights.input_to_hidden[input][unit];
            }
            *activation = relu(sum);
        }

        let mut output = weights.output_bias;
        for (activation, weight) in hidden_activations.iter().zip(weights.hidden_to_output) {
            output += activation * weight;
        }

        let confidence = sigmoid(output);

        NetworkAssessment {
            score: confidence * 100.0,
            confidence,
            hidden_activations,
            features: *features,
            parameter_count: weights.parameter_count(),
        }
    }
}

fn relu(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

fn sigmoid(value: f64) -> f64 {
    1.0 / (1.0 + (-value).exp())
}
