use serde::{Deserialize, Serialize};

/// Payload of a single answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnswerValue {
    Text(String),
    Integer(i64),
    SingleChoice(u32),
    MultiChoice(Vec<u32>),
}

/// One answer within a response, keyed by the id of the question it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    question_id: u32,
    value: AnswerValue,
}

impl Answer {
    pub fn text(question_id: u32, value: impl Into<String>) -> Self {
        Self {
            question_id,
            value: AnswerValue::Text(value.into()),
        }
    }

    pub fn integer(question_id: u32, value: i64) -> Self {
        Self {
            question_id,
            value: AnswerValue::Integer(value),
        }
    }

    pub fn single_choice(question_id: u32, option_id: u32) -> Self {
        Self {
            question_id,
            value: AnswerValue::SingleChoice(option_id),
        }
    }

    pub fn multi_choice(question_id: u32, option_ids: Vec<u32>) -> Self {
        Self {
            question_id,
            value: AnswerValue::MultiChoice(option_ids),
        }
    }

    pub fn question_id(&self) -> u32 {
        self.question_id
    }

    pub fn value(&self) -> &AnswerValue {
        &self.value
    }

    /// Blank text and empty selections count as unanswered.
    pub fn is_empty(&self) -> bool {
        match &self.value {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::MultiChoice(option_ids) => option_ids.is_empty(),
            _ => false,
        }
    }
}

/// All answers one respondent submitted for a survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    id: String,
    answers: Vec<Answer>,
}

impl SurveyResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            answers: Vec::new(),
        }
    }

    pub fn with_answers(id: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            id: id.into(),
            answers,
        }
    }

    pub fn add_answer(&mut self, answer: Answer) {
        self.answers.push(answer);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// First answer for the given question id, if any.
    pub fn answer_for(&self, question_id: u32) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id() == question_id)
    }
}
