//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `JOBCHAT_*` (e.g. `JOBCHAT_PROVIDER__API_KEY`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./jobchat.toml` or `./.jobchat.toml`
    /// 4. Global: `~/.config/jobchat/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["jobchat.toml", ".jobchat.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("JOBCHAT_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("jobchat").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.chat.max_tool_rounds, 4);
        assert_eq!(config.provider.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if the file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("jobchat"));
    }

    #[test]
    fn test_explicit_path_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[provider]\nmodel = \"gpt-4.1\"\n\n[chat]\nmax_tool_rounds = 8"
        )
        .unwrap();

        let path = file.path().to_path_buf();
        let config = ConfigLoader::load(Some(&path)).unwrap();

        assert_eq!(config.provider.model, "gpt-4.1");
        assert_eq!(config.chat.max_tool_rounds, 8);
        // Untouched sections keep their defaults
        assert_eq!(config.chat.max_model_retries, 2);
    }
}
