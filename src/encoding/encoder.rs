use crate::core::float::CohortFloat;
use crate::error::{CohortError, Result};
use crate::survey::{AnswerValue, ChoiceOption, QuestionKind, Survey, SurveyResponse};
use fxhash::FxHashMap;
use log::debug;
use ndarray::Array2;
use std::collections::BTreeSet;
use std::marker::PhantomData;

/// Learned column layout for one question's slice of the feature matrix.
enum QuestionColumns {
    /// One indicator column per declared option; option id -> absolute column.
    SingleChoice { columns: FxHashMap<u32, usize> },
    /// Like `SingleChoice`, but several options may be set at once.
    MultiChoice { columns: FxHashMap<u32, usize> },
    /// One min-max-scaled column with the domain observed at fit time.
    Numeric { column: usize, min: f64, max: f64 },
    /// Contiguous bag-of-words slice; word -> column relative to `start`.
    Text {
        start: usize,
        vocabulary: FxHashMap<String, usize>,
    },
}

/// Turns survey responses into dense numeric feature vectors.
///
/// `fit` learns the column layout from a survey and a training response set:
/// choice questions become one-hot/multi-hot indicator slices, numeric
/// questions a single min-max-normalized column, and free-text questions a
/// term-frequency slice over the vocabulary observed in training answers.
/// `transform` then maps any response list onto that layout. Row order
/// follows the input; column order is fixed by question position, then
/// option id or sorted vocabulary word.
///
/// A new `fit` call resets the encoder entirely. One instance is not meant
/// to be shared while fitting; run independent instances for independent
/// surveys.
pub struct FeatureEncoder<F: CohortFloat> {
    /// Per-question layouts in question-position order: (question id, slice).
    layouts: Vec<(u32, QuestionColumns)>,
    feature_names: Vec<String>,
    total_dims: usize,
    fitted: bool,
    marker: PhantomData<F>,
}

impl<F: CohortFloat> FeatureEncoder<F> {
    pub fn new() -> Self {
        Self {
            layouts: Vec::new(),
            feature_names: Vec::new(),
            total_dims: 0,
            fitted: false,
            marker: PhantomData,
        }
    }

    /// Learns the column layout and normalization parameters.
    ///
    /// Questions are processed in position order so the produced columns are
    /// deterministic for a given survey and training set.
    pub fn fit(&mut self, survey: &Survey, training: &[SurveyResponse]) {
        self.reset();

        let mut questions: Vec<_> = survey.questions().iter().collect();
        questions.sort_by_key(|q| q.position());

        for question in questions {
            match question.kind() {
                QuestionKind::SingleChoice { options } => {
                    self.fit_choice(question.id(), options, true);
                }
                QuestionKind::MultiChoice { options } => {
                    self.fit_choice(question.id(), options, false);
                }
                QuestionKind::Numeric => self.fit_numeric(question.id(), training),
                QuestionKind::FreeText => self.fit_text(question.id(), training),
            }
        }
        self.fitted = true;
        debug!(
            "encoder fitted: {} questions, {} feature columns",
            self.layouts.len(),
            self.total_dims
        );
    }

    /// Encodes the responses as an `N x D` matrix using the layout learned at
    /// `fit` time. Missing answers, and answers whose payload type does not
    /// match the question, leave their slice all-zero.
    pub fn transform(&self, responses: &[SurveyResponse]) -> Result<Array2<F>> {
        if !self.fitted {
            return Err(CohortError::NotFitted);
        }

        let mut matrix = Array2::zeros((responses.len(), self.total_dims));
        for (row, response) in responses.iter().enumerate() {
            for (question_id, layout) in &self.layouts {
                let Some(answer) = response.answer_for(*question_id) else {
                    continue;
                };
                if answer.is_empty() {
                    continue;
                }
                match (layout, answer.value()) {
                    (
                        QuestionColumns::SingleChoice { columns },
                        AnswerValue::SingleChoice(option_id),
                    ) => {
                        if let Some(&column) = columns.get(option_id) {
                            matrix[[row, column]] = F::one();
                        }
                    }
                    (
                        QuestionColumns::MultiChoice { columns },
                        AnswerValue::MultiChoice(option_ids),
                    ) => {
                        for option_id in option_ids {
                            if let Some(&column) = columns.get(option_id) {
                                matrix[[row, column]] = F::one();
                            }
                        }
                    }
                    (QuestionColumns::Numeric { column, min, max }, AnswerValue::Integer(value)) => {
                        let scaled = ((*value as f64 - min) / (max - min)).clamp(0.0, 1.0);
                        matrix[[row, *column]] = F::from_f64(scaled).unwrap();
                    }
                    (QuestionColumns::Text { start, vocabulary }, AnswerValue::Text(text)) => {
                        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
                        for token in tokenize(text) {
                            if let Some(&relative) = vocabulary.get(token.as_str()) {
                                *counts.entry(start + relative).or_insert(0.0) += 1.0;
                            }
                        }
                        let total: f64 = counts.values().sum();
                        if total > 0.0 {
                            for (column, count) in counts {
                                matrix[[row, column]] = F::from_f64(count / total).unwrap();
                            }
                        }
                    }
                    _ => continue,
                }
            }
        }
        Ok(matrix)
    }

    /// `fit` followed by `transform` on the same responses.
    pub fn fit_transform(
        &mut self,
        survey: &Survey,
        responses: &[SurveyResponse],
    ) -> Result<Array2<F>> {
        self.fit(survey, responses);
        self.transform(responses)
    }

    /// Ordered names of the learned feature columns.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of feature columns (D) fixed by the last `fit`.
    pub fn num_features(&self) -> usize {
        self.total_dims
    }

    fn reset(&mut self) {
        self.layouts.clear();
        self.feature_names.clear();
        self.total_dims = 0;
        self.fitted = false;
    }

    fn fit_choice(&mut self, question_id: u32, options: &[ChoiceOption], single: bool) {
        let mut sorted: Vec<_> = options.iter().collect();
        sorted.sort_by_key(|option| option.id);

        let mut columns = FxHashMap::default();
        for option in sorted {
            columns.insert(option.id, self.total_dims);
            self.feature_names
                .push(format!("q{}_opt{}", question_id, option.id));
            self.total_dims += 1;
        }
        let layout = if single {
            QuestionColumns::SingleChoice { columns }
        } else {
            QuestionColumns::MultiChoice { columns }
        };
        self.layouts.push((question_id, layout));
    }

    fn fit_numeric(&mut self, question_id: u32, training: &[SurveyResponse]) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut found = false;
        for response in training {
            if let Some(answer) = response.answer_for(question_id) {
                if let AnswerValue::Integer(value) = answer.value() {
                    let value = *value as f64;
                    min = min.min(value);
                    max = max.max(value);
                    found = true;
                }
            }
        }
        // Degenerate observations fall back to a unit-width domain so the
        // scaling denominator never collapses.
        if !found {
            min = 0.0;
            max = 1.0;
        } else if min >= max {
            max = min + 1.0;
        }

        self.layouts.push((
            question_id,
            QuestionColumns::Numeric {
                column: self.total_dims,
                min,
                max,
            },
        ));
        self.feature_names.push(format!("q{}_num", question_id));
        self.total_dims += 1;
    }

    fn fit_text(&mut self, question_id: u32, training: &[SurveyResponse]) {
        let mut words = BTreeSet::new();
        for response in training {
            if let Some(answer) = response.answer_for(question_id) {
                if let AnswerValue::Text(text) = answer.value() {
                    words.extend(tokenize(text));
                }
            }
        }

        let start = self.total_dims;
        let mut vocabulary = FxHashMap::default();
        // BTreeSet iteration gives the sorted vocabulary order.
        for (relative, word) in words.into_iter().enumerate() {
            self.feature_names
                .push(format!("q{}_word_{}", question_id, word));
            vocabulary.insert(word, relative);
            self.total_dims += 1;
        }
        self.layouts
            .push((question_id, QuestionColumns::Text { start, vocabulary }));
    }
}

impl<F: CohortFloat> Default for FeatureEncoder<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercases, replaces anything that is not a letter or digit with a space,
/// and drops tokens of length <= 2 (a cheap stop-word filter).
fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .map(str::to_owned)
        .collect()
}
