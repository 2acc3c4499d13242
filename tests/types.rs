// ABOUTME: Integration tests for identifiers and task definition parsing.
// ABOUTME: Tests revision extraction and ID behaviour through the public API.

use rollout_stream::types::*;

mod task_definition_tests {
    use super::*;

    #[test]
    fn revision_from_documented_example() {
        assert_eq!(
            parse_revision("arn:aws:ecs:us-west-2:1111:task-definition/webapp-test-frontend:3"),
            "3"
        );
    }

    #[test]
    fn parse_exposes_family() {
        let arn =
            TaskDefinitionArn::parse("arn:aws:ecs:us-east-1:222233334444:task-definition/api:42")
                .unwrap();
        assert_eq!(arn.family(), "api");
        assert_eq!(arn.revision(), "42");
    }

    #[test]
    fn empty_identifier_is_rejected() {
        assert_eq!(
            TaskDefinitionArn::parse(""),
            Err(TaskDefinitionArnError::MissingFamily(String::new()))
        );
    }
}

mod id_tests {
    use super::*;

    #[test]
    fn round_trips_through_serde() {
        let id = ServiceId::new("frontend");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"frontend\"");
        let back: ServiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn into_inner_returns_value() {
        assert_eq!(EventId::new("e1").into_inner(), "e1");
    }
}
