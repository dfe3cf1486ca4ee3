//! Clusters a small hand-written survey cohort and prints the report.
//!
//! Run with `cargo run --example analyze_survey`. Drop a `demos/config.yaml`
//! next to this file to override the default configuration.

use cohort::analytics::{summary, AnalyticsConfig, SurveyAnalyzer};
use cohort::survey::{Answer, ChoiceOption, Question, QuestionKind, Survey, SurveyResponse};
use log::info;

fn build_survey() -> Survey {
    let mut survey = Survey::new("coffee-habits", "Coffee habits");
    survey.add_question(Question::new(
        1,
        "Where do you usually drink coffee?",
        1,
        QuestionKind::SingleChoice {
            options: vec![
                ChoiceOption::new(1, "At home"),
                ChoiceOption::new(2, "At the office"),
                ChoiceOption::new(3, "Coffee shop"),
            ],
        },
    ));
    survey.add_question(Question::new(
        2,
        "Which brews do you enjoy?",
        2,
        QuestionKind::MultiChoice {
            options: vec![
                ChoiceOption::new(1, "Espresso"),
                ChoiceOption::new(2, "Filter"),
                ChoiceOption::new(3, "Cold brew"),
            ],
        },
    ));
    survey.add_question(Question::new(3, "Cups per day", 3, QuestionKind::Numeric));
    survey.add_question(Question::new(4, "Anything else?", 4, QuestionKind::FreeText));
    survey
}

fn build_responses() -> Vec<SurveyResponse> {
    vec![
        SurveyResponse::with_answers(
            "r1",
            vec![
                Answer::single_choice(1, 1),
                Answer::multi_choice(2, vec![2]),
                Answer::integer(3, 1),
                Answer::text(4, "one slow filter cup every morning"),
            ],
        ),
        SurveyResponse::with_answers(
            "r2",
            vec![
                Answer::single_choice(1, 1),
                Answer::multi_choice(2, vec![2, 3]),
                Answer::integer(3, 2),
                Answer::text(4, "weekend cold brew when the weather is warm"),
            ],
        ),
        SurveyResponse::with_answers(
            "r3",
            vec![
                Answer::single_choice(1, 2),
                Answer::multi_choice(2, vec![1]),
                Answer::integer(3, 5),
                Answer::text(4, "espresso keeps the afternoon meetings bearable"),
            ],
        ),
        SurveyResponse::with_answers(
            "r4",
            vec![
                Answer::single_choice(1, 2),
                Answer::multi_choice(2, vec![1]),
                Answer::integer(3, 6),
                Answer::text(4, "double espresso before every standup"),
            ],
        ),
        SurveyResponse::with_answers(
            "r5",
            vec![
                Answer::single_choice(1, 3),
                Answer::multi_choice(2, vec![1, 3]),
                Answer::integer(3, 3),
                Answer::text(4, "mostly meet friends over cold brew"),
            ],
        ),
        SurveyResponse::with_answers(
            "r6",
            vec![
                Answer::single_choice(1, 3),
                Answer::multi_choice(2, vec![3]),
                Answer::integer(3, 2),
                Answer::text(4, "cold brew with friends after work"),
            ],
        ),
    ]
}

fn main() {
    let config = AnalyticsConfig::from_file("demos/config.yaml")
        .unwrap_or_else(|_| AnalyticsConfig::default());
    config.setup_logging();
    info!("{}", config);

    let survey = build_survey();
    let responses = build_responses();

    let analyzer = SurveyAnalyzer::new(config);
    let report = analyzer
        .analyze::<f64>(&survey, &responses)
        .expect("analysis failed");

    summary::print_report(&report);
    for (response, label) in responses.iter().zip(&report.labels) {
        println!("{} -> cluster {}", response.id(), label);
    }
}
