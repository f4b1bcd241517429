//! CLI argument merging with settings

use super::Settings;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub folder_path: Option<PathBuf>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
}

pub fn merge_cli_with_settings(mut base: Settings, cli: CliOverrides) -> Settings {
    if let Some(folder_path) = cli.folder_path {
        base.folder_path = Some(folder_path);
    }
    if let Some(model) = cli.model {
        base.model = model;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        base.timeout_secs = timeout_secs;
    }
    if let Some(base_url) = cli.base_url {
        base.base_url = base_url;
    }

    base
}

#[cfg(test)]
mod tests {
    use super::{merge_cli_with_settings, CliOverrides};
    use crate::config::Settings;
    use std::path::PathBuf;

    #[test]
    fn cli_overrides_replace_base_values() {
        let base = Settings {
            gemini_api_key: Some("key".to_string()),
            folder_path: Some(PathBuf::from("/tmp/repo")),
            timeout_secs: 10,
            ..Settings::default()
        };

        let cli = CliOverrides {
            folder_path: Some(PathBuf::from("/srv/other")),
            model: Some("gemini-1.5-pro".to_string()),
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_settings(base, cli);
        assert_eq!(merged.folder_path, Some(PathBuf::from("/srv/other")));
        assert_eq!(merged.model, "gemini-1.5-pro");
        assert_eq!(merged.timeout_secs, 10);
        assert_eq!(merged.gemini_api_key.as_deref(), Some("key"));
    }

    #[test]
    fn empty_overrides_keep_settings() {
        let base = Settings::default();
        assert_eq!(merge_cli_with_settings(base.clone(), CliOverrides::default()), base);
    }
}
