#[cfg(test)]
mod tests {
    use crate::models::{Team, UnknownTeam, VoteRequest, VoteSnapshot};

    #[test]
    fn test_team_parsing() {
        assert_eq!("pradhan".parse::<Team>(), Ok(Team::Pradhan));
        assert_eq!("banrakas".parse::<Team>(), Ok(Team::Banrakas));
        assert_eq!(
            "unknown".parse::<Team>(),
            Err(UnknownTeam("unknown".to_string()))
        );
        assert_eq!(
            "Pradhan".parse::<Team>(),
            Err(UnknownTeam("Pradhan".to_string()))
        );
    }

    #[test]
    fn test_team_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Team::Pradhan).unwrap(), "\"pradhan\"");
        assert_eq!(
            serde_json::from_str::<Team>("\"banrakas\"").unwrap(),
            Team::Banrakas
        );
        assert!(serde_json::from_str::<Team>("\"sachiv\"").is_err());
    }

    #[test]
    fn test_query_only_requests() {
        // Absent field and empty string both mean "just read the counters".
        let absent: VoteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.team().unwrap(), None);

        let empty: VoteRequest = serde_json::from_str(r#"{"team": ""}"#).unwrap();
        assert_eq!(empty.team().unwrap(), None);

        assert_eq!(VoteRequest::query_only().team().unwrap(), None);
    }

    #[test]
    fn test_vote_request_team_validation() {
        let valid: VoteRequest = serde_json::from_str(r#"{"team": "pradhan"}"#).unwrap();
        assert_eq!(valid.team().unwrap(), Some(Team::Pradhan));

        let invalid: VoteRequest = serde_json::from_str(r#"{"team": "sachiv"}"#).unwrap();
        assert!(invalid.team().is_err());
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = VoteSnapshot {
            pradhan: 3,
            banrakas: 7,
        };
        assert_eq!(
            serde_json::to_string(&snapshot).unwrap(),
            r#"{"pradhan":3,"banrakas":7}"#
        );

        let parsed: VoteSnapshot =
            serde_json::from_str(r#"{"pradhan":1,"banrakas":0}"#).unwrap();
        assert_eq!(parsed.count(Team::Pradhan), 1);
        assert_eq!(parsed.count(Team::Banrakas), 0);
        assert_eq!(parsed.total(), 1);
    }

    #[test]
    fn test_default_snapshot_is_zeroed() {
        let snapshot = VoteSnapshot::default();
        assert_eq!(snapshot.pradhan, 0);
        assert_eq!(snapshot.banrakas, 0);
        assert_eq!(snapshot.total(), 0);
    }
}
