use anyhow::Result;
use record_pipelines::app::{DirectoryJoinUseCase, RankingUseCase};
use record_pipelines::config::{Config, LoggingConfig};
use record_pipelines::pipeline::directory::CollisionPolicy;
use record_pipelines::PipelineError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file_drives_use_cases() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "[directory_join]\ncollision_policy = \"reject_conflicts\"\n\n[ranking]\nlimit = 4\n"
    )?;

    let config = Config::load(file.path())?;

    assert_eq!(
        DirectoryJoinUseCase::from_config(&config.directory_join).policy(),
        CollisionPolicy::RejectConflicts
    );
    assert_eq!(RankingUseCase::from_config(&config.ranking).limit(), 4);
    assert_eq!(config.logging, LoggingConfig::default());
    Ok(())
}

#[test]
fn test_explicit_missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = Config::load_or_default(Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, PipelineError::Config(ref message) if message.contains("absent.toml")));
}

#[test]
fn test_unknown_keys_are_rejected() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "[ranking]\nlimit = 5\ncount = 7\n")?;

    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, PipelineError::Toml(_)));
    Ok(())
}
