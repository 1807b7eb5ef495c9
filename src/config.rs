use crate::error::{Error, Result};
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_EXTENSION: &str = "csv";
const DEFAULT_TOP_N: usize = 10;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub influencers: InfluencersConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }

    pub fn with_input<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.input.directory = directory.as_ref().to_path_buf();
        self
    }

    pub fn with_output<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.output.directory = directory.as_ref().to_path_buf();
        self
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InputConfig {
    pub directory: PathBuf,
    /// Files with any other extension are ignored.
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            directory: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InfluencersConfig {
    /// Accounts listed per dataset in the basic-stats report.
    pub top_n: usize,
}

impl Default for InfluencersConfig {
    fn default() -> Self {
        InfluencersConfig {
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let input = "[input]\ndirectory=\"tweets\"\nextension=\"tsv\"\n[output]\ndirectory=\"out\"\n[influencers]\ntopN=5";

        let config = toml::from_str::<Config>(input).unwrap();
        let expected = Config {
            input: InputConfig {
                directory: PathBuf::from("tweets"),
                extension: "tsv".to_string(),
            },
            output: OutputConfig {
                directory: PathBuf::from("out"),
            },
            influencers: InfluencersConfig { top_n: 5 },
        };

        assert_eq!(config, expected);
    }

    #[test]
    fn parse_partial_config() {
        let config = toml::from_str::<Config>("[input]\ndirectory=\"tweets\"").unwrap();

        assert_eq!(config.input.directory, PathBuf::from("tweets"));
        assert_eq!(config.input.extension, "csv");
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.influencers.top_n, 10);
    }

    #[test]
    fn overrides() {
        let config = Config::default().with_input("a").with_output("b");

        assert_eq!(config.input.directory, PathBuf::from("a"));
        assert_eq!(config.output.directory, PathBuf::from("b"));
    }

    #[test]
    fn missing_file() {
        assert!(Config::from_file("/nonexistent/twcross.toml").is_err());
    }
}
