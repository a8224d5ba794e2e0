//! `expand` and `validate` command implementations

use anyhow::{bail, Context};
use standby_generator::{
    validate_active_layout, BuddyContainerGenerator, GenerationEvent, StandbyConfig,
    StandbyTaskGenerator,
};
use standby_model::ContainerLayout;
use std::path::Path;

/// Result of an `expand` run
#[derive(Debug)]
pub struct ExpandReport {
    /// Expanded layout
    pub layout: ContainerLayout,

    /// Events returned by the generator
    pub events: Vec<GenerationEvent>,

    /// Active container ids paired with their buddy container ids
    pub buddies: Vec<(String, Vec<String>)>,
}

/// Load a layout from a `.json`, `.yaml` or `.yml` file
pub fn load_layout(path: &Path) -> anyhow::Result<ContainerLayout> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;

    let layout: ContainerLayout = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("invalid JSON layout {}", path.display()))?,
        Some("yaml" | "yml") => serde_yaml::from_str(&contents)
            .with_context(|| format!("invalid YAML layout {}", path.display()))?,
        _ => bail!("unsupported layout format: {}", path.display()),
    };
    Ok(layout)
}

/// Pick the replication factor: explicit flag, else config file, else default
pub fn resolve_replication_factor(
    config_path: Option<&Path>,
    flag: Option<i32>,
) -> anyhow::Result<i32> {
    if let Some(factor) = flag {
        return Ok(factor);
    }
    let config = match config_path {
        Some(path) => StandbyConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => StandbyConfig::default(),
    };
    Ok(config.replication_factor)
}

/// Expand `layout` with buddy containers
pub fn expand(layout: &ContainerLayout, replication_factor: i32) -> anyhow::Result<ExpandReport> {
    let generator = BuddyContainerGenerator::new();
    let outcome = generator
        .generate_standby_tasks(layout, replication_factor)
        .with_context(|| format!("{} generation failed", generator.name()))?;

    let buddies = layout
        .ids()
        .map(|id| {
            let ids = outcome
                .buddies_of(id.as_str())
                .into_iter()
                .map(|(_, c)| c.id().to_string())
                .collect();
            (id.to_string(), ids)
        })
        .collect();

    Ok(ExpandReport {
        layout: outcome.layout,
        events: outcome.events,
        buddies,
    })
}

/// Check that `layout` is a purely active assignment
pub fn validate(layout: &ContainerLayout) -> anyhow::Result<()> {
    validate_active_layout(layout).context("layout is not a valid active assignment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use standby_test_utils::sample_layout;

    #[test]
    fn load_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let layout = sample_layout();

        let json_path = dir.path().join("layout.json");
        std::fs::write(&json_path, serde_json::to_string(&layout).unwrap()).unwrap();
        assert_eq!(load_layout(&json_path).unwrap(), layout);

        let yaml_path = dir.path().join("layout.yaml");
        std::fs::write(&yaml_path, serde_yaml::to_string(&layout).unwrap()).unwrap();
        assert_eq!(load_layout(&yaml_path).unwrap(), layout);

        let txt_path = dir.path().join("layout.txt");
        std::fs::write(&txt_path, "{}").unwrap();
        assert!(load_layout(&txt_path).is_err());
    }

    #[test]
    fn flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("standby.toml");
        std::fs::write(&config_path, "replication-factor = 2").unwrap();

        assert_eq!(resolve_replication_factor(Some(&config_path), None).unwrap(), 2);
        assert_eq!(resolve_replication_factor(Some(&config_path), Some(5)).unwrap(), 5);
        assert_eq!(resolve_replication_factor(None, None).unwrap(), 1);
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("standby.toml");
        std::fs::write(&config_path, "replication-factor = 0").unwrap();

        assert!(resolve_replication_factor(Some(&config_path), None).is_err());
    }

    #[test]
    fn expand_reports_buddies() {
        let report = expand(&sample_layout(), 3).unwrap();

        assert_eq!(report.layout.len(), 6);
        assert_eq!(
            report.buddies,
            vec![
                ("0".to_string(), vec!["0-0".to_string(), "0-1".to_string()]),
                ("1".to_string(), vec!["1-0".to_string(), "1-1".to_string()]),
            ]
        );
        assert!(!report.events.is_empty());
    }

    #[test]
    fn expand_rejects_zero_factor() {
        let err = expand(&sample_layout(), 0).unwrap_err();
        assert!(format!("{err:#}").contains("replication factor must be at least 1"));
    }

    #[test]
    fn validate_rejects_expanded_layout() {
        assert!(validate(&sample_layout()).is_ok());

        let report = expand(&sample_layout(), 2).unwrap();
        assert!(validate(&report.layout).is_err());
    }

    #[test]
    fn expand_report_keeps_empty_containers_on_their_side() {
        let layout = standby_test_utils::layout_from(&[("7", &[0]), ("7-5", &[])]);
        let report = expand(&layout, 2).unwrap();

        assert_eq!(
            report.buddies,
            vec![
                ("7".to_string(), vec!["7-0".to_string()]),
                ("7-5".to_string(), vec!["7-5-0".to_string()]),
            ]
        );
    }
}
