use tm::error::{exit_codes, Error, JsonError};

#[test]
fn exit_codes_follow_the_taxonomy() {
    assert_eq!(
        Error::TaskNotFound("tsk-1".to_string()).exit_code(),
        exit_codes::USER_ERROR
    );
    assert_eq!(
        Error::InvalidArgument("bad".to_string()).exit_code(),
        exit_codes::USER_ERROR
    );
    assert_eq!(
        Error::TaskLimitReached {
            project_id: "prj-1".to_string()
        }
        .exit_code(),
        exit_codes::RULE_BLOCKED
    );
    assert_eq!(
        Error::PriorityImmutable {
            task_id: "tsk-1".to_string()
        }
        .exit_code(),
        exit_codes::RULE_BLOCKED
    );
    assert_eq!(
        Error::OperationFailed("boom".to_string()).exit_code(),
        exit_codes::OPERATION_FAILED
    );
}

#[test]
fn storage_failures_keep_their_source_message() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store");
    let err = Error::from(io);
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    assert!(err.to_string().contains("read-only store"));
}

#[test]
fn limit_error_carries_structured_details() {
    let err = Error::TaskLimitReached {
        project_id: "prj-1".to_string(),
    };
    let details = err.details().expect("details");
    assert_eq!(details["project_id"], "prj-1");
    assert_eq!(details["limit"], 20);

    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::RULE_BLOCKED);
    assert!(json.error.contains("task limit"));
}
