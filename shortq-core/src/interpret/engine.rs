//! The interpretation engine

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::types::{Interaction, Interpretation, InterpretationOutcome, MatchSource};
use crate::department::Department;
use crate::learning::UsageRecorder;
use crate::store::{PatternStore, Prediction, PredictionFeatures, PredictionService};
use crate::tables;
use crate::types::{Confidence, QueryType};

/// Turns abbreviated text into a structured query with a confidence score
///
/// Exact stored patterns win; otherwise keyword type inference and
/// abbreviation expansion produce a best-effort result. This engine never
/// returns an error: store outages degrade to a low-confidence general
/// search and are visible through [`MatchSource::Degraded`].
pub struct Interpreter {
    patterns: Arc<dyn PatternStore>,
    prediction: Option<Arc<dyn PredictionService>>,
    recorder: UsageRecorder,
}

impl Interpreter {
    pub fn new(patterns: Arc<dyn PatternStore>) -> Self {
        let recorder = UsageRecorder::new(Arc::clone(&patterns));
        Self {
            patterns,
            prediction: None,
            recorder,
        }
    }

    /// Attach the optional prediction service for interaction enrichment
    pub fn with_prediction(mut self, prediction: Arc<dyn PredictionService>) -> Self {
        self.prediction = Some(prediction);
        self
    }

    /// Interpret raw user text within a department
    ///
    /// Callers reject empty input before getting here; an unknown
    /// department degrades to a general search with no keyword inference.
    pub async fn interpret(
        &self,
        user_id: &str,
        raw_text: &str,
        department: &str,
    ) -> InterpretationOutcome {
        let normalized = raw_text.trim().to_lowercase();

        let interpretation = match Department::parse(department) {
            Some(dept) => self.interpret_in_department(dept, &normalized).await,
            None => {
                debug!("unknown department '{department}', general search only");
                Interpretation {
                    interpreted_query: tables::expand(&normalized),
                    query_type: QueryType::GeneralSearch,
                    confidence_score: Confidence::FALLBACK,
                    source: MatchSource::Fallback,
                }
            }
        };

        let prediction = self.enrich(department, &interpretation, &normalized).await;
        let interaction = build_interaction(
            user_id,
            department,
            raw_text,
            &interpretation,
            prediction,
        );

        InterpretationOutcome {
            interpretation,
            interaction,
        }
    }

    async fn interpret_in_department(
        &self,
        dept: Department,
        normalized: &str,
    ) -> Interpretation {
        match self.patterns.lookup_exact(dept, normalized).await {
            Ok(Some(pattern)) => {
                // Usage feedback must never delay the response
                self.recorder.record(dept, normalized);
                Interpretation {
                    interpreted_query: pattern.expanded_query,
                    query_type: pattern.query_type,
                    confidence_score: Confidence::exact_match(pattern.priority_score),
                    source: MatchSource::Exact,
                }
            }
            Ok(None) => self.heuristic(dept, normalized),
            Err(e) => {
                warn!("pattern store unavailable for {dept}: {e}");
                Interpretation {
                    interpreted_query: tables::expand(normalized),
                    query_type: QueryType::GeneralSearch,
                    confidence_score: Confidence::DEGRADED,
                    source: MatchSource::Degraded,
                }
            }
        }
    }

    /// Keyword type inference then single-pass abbreviation expansion
    fn heuristic(&self, dept: Department, normalized: &str) -> Interpretation {
        let (query_type, confidence_score, source) =
            match tables::infer_query_type(dept, normalized) {
                Some(qt) => (qt, Confidence::KEYWORD, MatchSource::Keyword),
                None => (
                    QueryType::GeneralSearch,
                    Confidence::FALLBACK,
                    MatchSource::Fallback,
                ),
            };

        Interpretation {
            interpreted_query: tables::expand(normalized),
            query_type,
            confidence_score,
            source,
        }
    }

    /// Ask the prediction service for enrichment, if configured
    ///
    /// Failure or absence only omits the optional fields; confidence is
    /// never touched.
    async fn enrich(
        &self,
        department: &str,
        interpretation: &Interpretation,
        normalized: &str,
    ) -> Option<Prediction> {
        let service = self.prediction.as_ref()?;
        let features = PredictionFeatures {
            department: department.to_string(),
            query_type: interpretation.query_type,
            confidence_score: interpretation.confidence_score.value(),
            input_length: normalized.len(),
        };
        match service.predict(features).await {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                debug!("prediction unavailable: {e}");
                None
            }
        }
    }
}

pub(crate) fn build_interaction(
    user_id: &str,
    department: &str,
    raw_text: &str,
    interpretation: &Interpretation,
    prediction: Option<Prediction>,
) -> Interaction {
    Interaction {
        interaction_id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        department: department.to_string(),
        input_text: raw_text.to_string(),
        interpreted_query: interpretation.interpreted_query.clone(),
        query_type: interpretation.query_type,
        confidence_score: interpretation.confidence_score,
        exact_match: interpretation.source == MatchSource::Exact,
        predicted_success: prediction.map(|p| p.predicted_success),
        probability: prediction.map(|p| p.probability),
        successful_completion: None,
        timestamp: Utc::now(),
    }
}
