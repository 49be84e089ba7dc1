//! Fuzzy classification of CIBIL score and debt-to-income ratio.
//!
//! Both inputs are mapped onto overlapping trapezoidal sets, the strongest set per dimension
//! is kept, and the pair indexes a fixed rule table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Linguistic categories for a CIBIL score, in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CibilLabel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CibilLabel {
    pub const ALL: [CibilLabel; 4] = [Self::Poor, Self::Fair, Self::Good, Self::Excellent];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for CibilLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Linguistic categories for a DTI ratio, in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DtiLabel {
    Low,
    Medium,
    High,
}

impl DtiLabel {
    pub const ALL: [DtiLabel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for DtiLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Piecewise-linear membership: 0 up to `rise_start`, ramps to 1 at `peak_start`, stays 1
/// through `peak_end`, ramps back to 0 at `fall_end`.
///
/// Open shoulders use infinite breakpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trapezoid {
    pub rise_start: f64,
    pub peak_start: f64,
    pub peak_end: f64,
    pub fall_end: f64,
}

impl Trapezoid {
    pub const fn new(rise_start: f64, peak_start: f64, peak_end: f64, fall_end: f64) -> Self {
        Self {
            rise_start,
            peak_start,
            peak_end,
            fall_end,
        }
    }

    /// Fully-on up to `peak_end`, ramping down to 0 at `fall_end`.
    pub const fn left_shoulder(peak_end: f64, fall_end: f64) -> Self {
        Self::new(f64::NEG_INFINITY, f64::NEG_INFINITY, peak_end, fall_end)
    }

    /// Ramping up from `rise_start` and fully-on from `peak_start` onwards.
    pub const fn right_shoulder(rise_start: f64, peak_start: f64) -> Self {
        Self::new(rise_start, peak_start, f64::INFINITY, f64::INFINITY)
    }

    pub fn degree(&self, value: f64) -> f64 {
        if value < self.peak_start {
            if value <= self.rise_start {
                0.0
            } else {
                (value - self.rise_start) / (self.peak_start - self.rise_start)
            }
        } else if value <= self.peak_end {
            1.0
        } else if value < self.fall_end {
            (self.fall_end - value) / (self.fall_end - self.peak_end)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzySet<L> {
    pub label: L,
    pub membership: Trapezoid,
}

/// Degree to which an input belongs to one labelled set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Membership<L> {
    pub label: L,
    pub degree: f64,
}

fn memberships<L: Copy>(sets: &[FuzzySet<L>], value: f64) -> Vec<Membership<L>> {
    sets.iter()
        .map(|set| Membership {
            label: set.label,
            degree: set.membership.degree(value),
        })
        .collect()
}

/// Strongest membership; on exact ties the earlier entry is kept.
pub fn dominant<L: Copy>(memberships: &[Membership<L>]) -> Option<Membership<L>> {
    let mut iter = memberships.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |best, candidate| {
        if candidate.degree > best.degree {
            candidate
        } else {
            best
        }
    }))
}

/// Score per (CIBIL, DTI) label pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: BTreeMap<(CibilLabel, DtiLabel), u8>,
}

impl RuleTable {
    pub fn new(rules: BTreeMap<(CibilLabel, DtiLabel), u8>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        use CibilLabel::*;
        use DtiLabel::*;

        let rules = [
            ((Excellent, Low), 95),
            ((Excellent, Medium), 80),
            ((Excellent, High), 60),
            ((Good, Low), 85),
            ((Good, Medium), 70),
            ((Good, High), 45),
            ((Fair, Low), 60),
            ((Fair, Medium), 40),
            ((Fair, High), 20),
            ((Poor, Low), 30),
            ((Poor, Medium), 15),
            ((Poor, High), 5),
        ];

        Self::new(rules.into_iter().collect())
    }

    /// Missing pairs score 0.
    pub fn score(&self, cibil: CibilLabel, dti: DtiLabel) -> u8 {
        self.rules.get(&(cibil, dti)).copied().unwrap_or(0)
    }

    pub fn get(&self, cibil: CibilLabel, dti: DtiLabel) -> Option<u8> {
        self.rules.get(&(cibil, dti)).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outcome of fuzzy inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyAssessment {
    pub score: u8,
    pub cibil_label: CibilLabel,
    pub dti_label: DtiLabel,
    pub cibil_memberships: Vec<Membership<CibilLabel>>,
    pub dti_memberships: Vec<Membership<DtiLabel>>,
    pub classification: String,
}

#[derive(Debug, Clone)]
pub struct FuzzyEvaluator {
    cibil_sets: Vec<FuzzySet<CibilLabel>>,
    dti_sets: Vec<FuzzySet<DtiLabel>>,
    rules: RuleTable,
}

impl FuzzyEvaluator {
    /// Set order is the tie-break order. An empty list classifies as the most conservative
    /// label with zero membership.
    pub fn new(
        cibil_sets: Vec<FuzzySet<CibilLabel>>,
        dti_sets: Vec<FuzzySet<DtiLabel>>,
        rules: RuleTable,
    ) -> Self {
        Self {
            cibil_sets,
            dti_sets,
            rules,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            standard_cibil_sets(),
            standard_dti_sets(),
            RuleTable::standard(),
        )
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn cibil_memberships(&self, cibil_score: f64) -> Vec<Membership<CibilLabel>> {
        memberships(&self.cibil_sets, cibil_score)
    }

    pub fn dti_memberships(&self, dti_ratio: f64) -> Vec<Membership<DtiLabel>> {
        memberships(&self.dti_sets, dti_ratio)
    }

    pub fn evaluate(&self, cibil_score: f64, dti_ratio: f64) -> FuzzyAssessment {
        let cibil_memberships = self.cibil_memberships(cibil_score);
        let dti_memberships = self.dti_memberships(dti_ratio);

        let cibil = dominant(&cibil_memberships).unwrap_or(Membership {
            label: CibilLabel::Poor,
            degree: 0.0,
        });
        let dti = dominant(&dti_memberships).unwrap_or(Membership {
            label: DtiLabel::High,
            degree: 0.0,
        });

        let score = self.rules.score(cibil.label, dti.label);
        let classification = format!(
            "CIBIL classified as \"{}\" ({:.1}% membership), DTI as \"{}\" ({:.1}% membership)",
            cibil.label,
            cibil.degree * 100.0,
            dti.label,
            dti.degree * 100.0
        );

        FuzzyAssessment {
            score,
            cibil_label: cibil.label,
            dti_label: dti.label,
            cibil_memberships,
            dti_memberships,
            classification,
        }
    }
}

impl Default for FuzzyEvaluator {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn standard_cibil_sets() -> Vec<FuzzySet<CibilLabel>> {
    vec![
        FuzzySet {
            label: CibilLabel::Poor,
            membership: Trapezoid::left_shoulder(550.0, 650.0),
        },
        FuzzySet {
            label: CibilLabel::Fair,
            membership: Trapezoid::new(550.0, 650.0, 700.0, 750.0),
        },
        FuzzySet {
            label: CibilLabel::Good,
            membership: Trapezoid::new(700.0, 750.0, 800.0, 850.0),
        },
        FuzzySet {
            label: CibilLabel::Excellent,
            membership: Trapezoid::right_shoulder(800.0, 900.0),
        },
    ]
}

pub fn standard_dti_sets() -> Vec<FuzzySet<DtiLabel>> {
    vec![
        FuzzySet {
            label: DtiLabel::Low,
            membership: Trapezoid::left_shoulder(30.0, 40.0),
        },
        FuzzySet {
            label: DtiLabel::Medium,
            membership: Trapezoid::new(30.0, 40.0, 50.0, 60.0),
        },
        FuzzySet {
            label: DtiLabel::High,
            membership: Trapezoid::right_shoulder(50.0, 60.0),
        },
    ]
}
