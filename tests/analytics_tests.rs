#[cfg(test)]
mod tests {
    use cohort::analytics::{AnalyticsConfig, SurveyAnalyzer};
    use cohort::error::CohortError;
    use cohort::survey::{Answer, ChoiceOption, Question, QuestionKind, Survey, SurveyResponse};

    fn two_option_survey() -> Survey {
        let mut survey = Survey::new("s1", "Snapshot");
        survey.add_question(Question::new(
            1,
            "Would you recommend us?",
            1,
            QuestionKind::SingleChoice {
                options: vec![ChoiceOption::new(1, "Yes"), ChoiceOption::new(2, "No")],
            },
        ));
        survey.add_question(Question::new(2, "Visits per month", 2, QuestionKind::Numeric));
        survey
    }

    fn euclidean_config(k: Option<usize>) -> AnalyticsConfig {
        let mut config = AnalyticsConfig::default();
        config.clustering.distance_metric = "euclidean".to_string();
        config.clustering.k = k;
        config
    }

    #[test]
    fn test_end_to_end_two_responses_two_clusters() {
        let survey = two_option_survey();
        let responses = vec![
            SurveyResponse::with_answers(
                "r1",
                vec![Answer::single_choice(1, 1), Answer::integer(2, 2)],
            ),
            SurveyResponse::with_answers(
                "r2",
                vec![Answer::single_choice(1, 2), Answer::integer(2, 10)],
            ),
        ];

        let analyzer = SurveyAnalyzer::new(euclidean_config(Some(2)));
        let report = analyzer.analyze::<f64>(&survey, &responses).unwrap();

        assert_eq!(report.k, 2);
        assert!(report.inertia >= 0.0);
        let mut labels = report.labels.clone();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1]);
        assert_eq!(report.cluster_counts.len(), 2);
        assert_eq!(report.silhouette_per_point.len(), 2);
        assert_eq!(report.feature_names, vec!["q1_opt1", "q1_opt2", "q2_num"]);
    }

    #[test]
    fn test_requested_k_is_clamped_to_sample_count() {
        let survey = two_option_survey();
        let responses = vec![
            SurveyResponse::with_answers(
                "r1",
                vec![Answer::single_choice(1, 1), Answer::integer(2, 2)],
            ),
            SurveyResponse::with_answers(
                "r2",
                vec![Answer::single_choice(1, 2), Answer::integer(2, 10)],
            ),
        ];

        let analyzer = SurveyAnalyzer::new(euclidean_config(Some(50)));
        let report = analyzer.analyze::<f64>(&survey, &responses).unwrap();
        assert_eq!(report.k, 2);
    }

    #[test]
    fn test_elbow_picks_k_when_none_is_configured() {
        let survey = two_option_survey();
        // Three answer profiles, repeated: recommenders who visit rarely,
        // recommenders who visit often, detractors in between.
        let mut responses = Vec::new();
        for (i, (option, visits)) in [(1, 1), (1, 2), (1, 20), (1, 21), (2, 10), (2, 11)]
            .iter()
            .enumerate()
        {
            responses.push(SurveyResponse::with_answers(
                format!("r{}", i),
                vec![Answer::single_choice(1, *option), Answer::integer(2, *visits)],
            ));
        }

        let analyzer = SurveyAnalyzer::new(euclidean_config(None));
        let report = analyzer.analyze::<f64>(&survey, &responses).unwrap();
        assert!(report.k >= 2);
        assert!(report.k <= responses.len());
        assert_eq!(report.labels.len(), responses.len());
    }

    #[test]
    fn test_fewer_than_two_responses_is_rejected() {
        let survey = two_option_survey();
        let responses = vec![SurveyResponse::with_answers(
            "r1",
            vec![Answer::single_choice(1, 1)],
        )];

        let analyzer = SurveyAnalyzer::new(euclidean_config(Some(1)));
        let result = analyzer.analyze::<f64>(&survey, &responses);
        assert!(matches!(result, Err(CohortError::InvalidArgument(_))));
    }

    #[test]
    fn test_survey_without_questions_is_rejected() {
        let survey = Survey::new("s1", "empty");
        let responses = vec![SurveyResponse::new("r1"), SurveyResponse::new("r2")];

        let analyzer = SurveyAnalyzer::new(euclidean_config(Some(2)));
        let result = analyzer.analyze::<f64>(&survey, &responses);
        assert!(matches!(result, Err(CohortError::EmptyInput(_))));
    }

    #[test]
    fn test_identical_responses_still_produce_a_report() {
        let survey = two_option_survey();
        let answers = vec![Answer::single_choice(1, 1), Answer::integer(2, 5)];
        let responses = vec![
            SurveyResponse::with_answers("r1", answers.clone()),
            SurveyResponse::with_answers("r2", answers.clone()),
            SurveyResponse::with_answers("r3", answers),
        ];

        let analyzer = SurveyAnalyzer::new(euclidean_config(Some(2)));
        let report = analyzer.analyze::<f64>(&survey, &responses).unwrap();
        assert_eq!(report.labels.len(), 3);
        assert!(report.inertia.abs() < 1e-12);
    }
}
