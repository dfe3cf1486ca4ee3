use serde::{Deserialize, Serialize};

/// A selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: u32,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// The closed set of question types the feature encoder knows how to vectorize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuestionKind {
    SingleChoice { options: Vec<ChoiceOption> },
    MultiChoice { options: Vec<ChoiceOption> },
    Numeric,
    FreeText,
}

/// One question of a survey, identified by a stable integer id and ordered by
/// its position within the survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    id: u32,
    text: String,
    position: u32,
    kind: QuestionKind,
}

impl Question {
    pub fn new(id: u32, text: impl Into<String>, position: u32, kind: QuestionKind) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            kind,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }
}

/// A survey: an ordered list of questions under one id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    id: String,
    title: String,
    questions: Vec<Question>,
}

impl Survey {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions: Vec::new(),
        }
    }

    pub fn with_questions(
        id: impl Into<String>,
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions,
        }
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_lookup_by_id() {
        let mut survey = Survey::new("s1", "Customer feedback");
        survey.add_question(Question::new(7, "How often?", 1, QuestionKind::Numeric));
        survey.add_question(Question::new(3, "Comments", 2, QuestionKind::FreeText));

        assert_eq!(survey.question(7).unwrap().text(), "How often?");
        assert_eq!(survey.question(3).unwrap().position(), 2);
        assert!(survey.question(99).is_none());
    }

    #[test]
    fn test_choice_options_preserved() {
        let options = vec![ChoiceOption::new(1, "Yes"), ChoiceOption::new(2, "No")];
        let question = Question::new(
            1,
            "Would you recommend us?",
            1,
            QuestionKind::SingleChoice { options },
        );

        match question.kind() {
            QuestionKind::SingleChoice { options } => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].label, "Yes");
            }
            _ => panic!("expected a single-choice question"),
        }
    }
}
