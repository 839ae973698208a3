//! Settings module.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::rules::NamingRules;
use crate::errors::TableError;

/// Paths of the empirical rate tables.
///
/// Defaults point to the working directory of the host process.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TableSources {
    #[serde(default = "default_birth_rates")]
    pub birth_rates: String,
    #[serde(default = "default_vaccination_rates")]
    pub vaccination_rates: String,
    #[serde(default = "default_death_rates")]
    pub death_rates: String,
    #[serde(default = "default_contact_rates")]
    pub contact_rates: String,
    #[serde(default = "default_probabilities")]
    pub probabilities: String,
}

fn default_birth_rates() -> String {
    "./b_rates".to_string()
}

fn default_vaccination_rates() -> String {
    "./v_rates".to_string()
}

fn default_death_rates() -> String {
    "./d_rates".to_string()
}

fn default_contact_rates() -> String {
    "./c_rates".to_string()
}

fn default_probabilities() -> String {
    "./probabilities".to_string()
}

impl Default for TableSources {
    fn default() -> Self {
        Self {
            birth_rates: default_birth_rates(),
            vaccination_rates: default_vaccination_rates(),
            death_rates: default_death_rates(),
            contact_rates: default_contact_rates(),
            probabilities: default_probabilities(),
        }
    }
}

impl TableSources {
    /// Prepend a directory to all relative table paths.
    pub fn prepend_path(&mut self, dir: &Path) {
        for path in [
            &mut self.birth_rates,
            &mut self.vaccination_rates,
            &mut self.death_rates,
            &mut self.contact_rates,
            &mut self.probabilities,
        ] {
            if Path::new(path.as_str()).is_relative() {
                *path = dir.join(path.as_str()).to_string_lossy().into_owned();
            }
        }
    }
}

/// What the force of infection does when the age class it is normalized by is empty.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroPopulationPolicy {
    /// Return the result of the division as is (infinite or NaN).
    #[default]
    Propagate,
    /// Fail with `RateError::EmptyAgeClass`.
    Fail,
    /// Return a zero rate.
    Zero,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub sources: TableSources,
    #[serde(default)]
    pub rules: NamingRules,
    #[serde(default)]
    pub zero_population: ZeroPopulationPolicy,
}

impl std::fmt::Display for Settings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        write!(
            formatter,
            "{}",
            String::from_utf8(output).map_err(|_| std::fmt::Error)?
        )
    }
}

impl Settings {
    /// Settings reading all tables from `dir`.
    pub fn with_base_dir(dir: &Path) -> Self {
        let mut settings = Self::default();
        settings.sources.prepend_path(dir);
        settings
    }

    pub fn write(&self, writer: &mut dyn std::io::Write) -> Result<(), TableError> {
        serde_yaml::to_writer(writer, self).map_err(TableError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> Result<Settings, TableError> {
        serde_yaml::from_reader(reader).map_err(TableError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> Result<(), TableError> {
        let file =
            fs::File::create(filename).map_err(|e| TableError::IoError(filename.to_string(), e))?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    /// Read settings from a YAML file. Relative table paths are resolved against the directory
    /// of the settings file.
    pub fn read_from_file(filename: &str) -> Result<Settings, TableError> {
        let file =
            fs::File::open(filename).map_err(|e| TableError::IoError(filename.to_string(), e))?;
        let mut reader = std::io::BufReader::new(file);
        let mut settings = Self::read(&mut reader)?;
        if let Some(dir) = Path::new(filename).parent() {
            settings.sources.prepend_path(dir);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Category, CategoryRule};

    #[test]
    fn read_write() {
        let mut settings = Settings::default();
        settings.zero_population = ZeroPopulationPolicy::Fail;
        settings.rules.categories = vec![CategoryRule::new(Category::Boost, "boost_")];
        let mut output = vec![];
        settings.write(&mut output).unwrap();
        let settings2 = Settings::read(&mut &output[..]).unwrap();
        assert_eq!(settings, settings2);
    }

    #[test]
    fn read_partial() {
        let yaml = "zero_population: Zero\nsources:\n  birth_rates: births.txt\n";
        let settings = Settings::read(&mut yaml.as_bytes()).unwrap();
        assert_eq!(settings.zero_population, ZeroPopulationPolicy::Zero);
        assert_eq!(settings.sources.birth_rates, "births.txt");
        assert_eq!(settings.sources.death_rates, "./d_rates");
        assert_eq!(settings.rules, NamingRules::default());
    }

    #[test]
    fn read_write_file() {
        let dir = std::env::temp_dir().join("epirates_settings_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.yaml");
        let path = path.to_str().unwrap();

        let settings = Settings::default();
        settings.write_to_file(path).unwrap();
        let read_settings = Settings::read_from_file(path).unwrap();

        assert_eq!(read_settings.rules, settings.rules);
        assert_eq!(
            Path::new(&read_settings.sources.birth_rates),
            dir.join("./b_rates")
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn absolute_paths_are_kept() {
        let mut sources = TableSources {
            birth_rates: "/data/b_rates".to_string(),
            ..Default::default()
        };
        sources.prepend_path(Path::new("/runs/1"));
        assert_eq!(sources.birth_rates, "/data/b_rates");
        assert_eq!(
            Path::new(&sources.probabilities),
            Path::new("/runs/1/./probabilities")
        );
    }
}
