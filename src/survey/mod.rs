pub mod question;
pub mod response;

pub use question::{ChoiceOption, Question, QuestionKind, Survey};
pub use response::{Answer, AnswerValue, SurveyResponse};
