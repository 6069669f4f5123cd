use github_release::boundary::BoundaryWarning;
use github_release::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        latest_tag: "1.0.0".to_string(),
        current_commit_hash: "abc1234def5678".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("1.0.0"),
        "Message should contain tag '1.0.0', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("abc1234") && !display_msg.contains("abc1234d"),
        "Message should contain shortened commit hash 'abc1234', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_multiple_version_tags_display() {
    let warning = BoundaryWarning::MultipleVersionTags {
        tags: vec!["1.0.0".to_string(), "1.1.0".to_string()],
        chosen: "1.1.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("1.0.0, 1.1.0"), "got: {}", display_msg);
    assert!(display_msg.contains("using '1.1.0'"), "got: {}", display_msg);
}

#[test]
fn test_boundary_warning_malformed_commit_display() {
    let warning = BoundaryWarning::MalformedCommit {
        hash: "abc12".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("abc12"), "got: {}", display_msg);
    assert!(display_msg.contains("too short"), "got: {}", display_msg);
}

#[test]
fn test_boundary_warning_short_hash_kept_whole() {
    let warning = BoundaryWarning::NoNewCommits {
        latest_tag: "1.0.0".to_string(),
        current_commit_hash: "abc".to_string(),
    };
    assert!(warning.to_string().contains("(current: abc)"));
}

#[test]
fn test_boundary_warning_equality() {
    let a = BoundaryWarning::MalformedCommit {
        hash: "abc".to_string(),
    };
    assert_eq!(a.clone(), a);
    assert_ne!(
        a,
        BoundaryWarning::MalformedCommit {
            hash: "def".to_string()
        }
    );
}

// ============================================================================
// UI Display Tests
// ============================================================================

#[test]
fn test_display_boundary_warning() {
    // Visual verification test - output is printed to stderr
    ui::display_boundary_warning(&BoundaryWarning::MalformedCommit {
        hash: "abc".to_string(),
    });
}
