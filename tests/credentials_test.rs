use std::collections::HashMap;
use std::env;

use github_release::config::{Config, MavenRepositoryConfig};
use github_release::credentials::{self, ProjectContext, SystemEnvironment};
use github_release::publishing::dependency_repositories;
use serial_test::serial;

fn entry() -> MavenRepositoryConfig {
    MavenRepositoryConfig {
        repository: "octocat/hello-world".to_string(),
        user: None,
        token: None,
    }
}

#[test]
#[serial]
fn test_process_environment_is_last_resort() {
    env::set_var("GITHUB_ACTOR", "ci-actor");
    env::set_var("GPR_KEY", "ci-key");

    let config = Config::default();
    let properties = HashMap::new();
    let ctx = ProjectContext::new(&properties, &SystemEnvironment);

    let user = credentials::package_registry_user(&config, &entry()).resolve(&ctx);
    let token = credentials::package_registry_token(&config, &entry()).resolve(&ctx);

    env::remove_var("GITHUB_ACTOR");
    env::remove_var("GPR_KEY");

    assert_eq!(user.unwrap(), "ci-actor");
    assert_eq!(token.unwrap(), "ci-key");
}

#[test]
#[serial]
fn test_properties_shadow_process_environment() {
    env::set_var("GITHUB_ACTOR", "ci-actor");

    let config = Config::default();
    let properties: HashMap<String, String> =
        [("GPR_USER".to_string(), "prop-user".to_string())].into();
    let ctx = ProjectContext::new(&properties, &SystemEnvironment);

    let user = credentials::package_registry_user(&config, &entry()).resolve(&ctx);

    env::remove_var("GITHUB_ACTOR");

    assert_eq!(user.unwrap(), "prop-user");
}

#[test]
#[serial]
fn test_missing_dependency_credentials_fail() {
    env::remove_var("GITHUB_ACTOR");
    env::remove_var("GPR_KEY");

    let mut config = Config::default();
    config.repositories.maven.push(entry());
    let ctx = ProjectContext::new(&config.properties, &SystemEnvironment);

    let err = dependency_repositories(&config, &ctx).unwrap_err();
    assert!(
        err.to_string().contains("GitHub Package Registry username"),
        "got: {}",
        err
    );
}
