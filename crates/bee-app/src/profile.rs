use std::fs;
use std::path::{Path, PathBuf};

use bee_config::Config;
use serde::{Deserialize, Serialize};

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Folder holding `profiles/<name>.json`
pub struct ProfileDir {
    root: PathBuf,
}

impl ProfileDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<config dir>/bee`, or the working directory when the platform has none
    pub fn default_location() -> Self {
        let root = dirs::config_dir()
            .map(|dir| dir.join("bee"))
            .unwrap_or_else(|| PathBuf::from(".bee"));
        Self::new(root)
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    /// Initialize user config folders and main profile if missing
    pub fn init_user_config(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.profiles_dir())?;

        let main_profile = self.profile_path("main");
        if !main_profile.exists() {
            let mut config = Config::new();
            // keys stay in the environment, not on disk
            config.assistant.api_key.clear();

            write_profile(&main_profile, "main", config)?;
            tracing::info!("Created main profile at {:?}", main_profile);
        }

        Ok(())
    }

    /// Load a user profile by name, defaulting to main if name not found.
    ///
    /// Environment variables win over the saved values.
    pub fn load_user_profile(&self, name: &str) -> anyhow::Result<Config> {
        let mut config = self.load_saved(name)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_saved(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.profile_path(name);
        if profile_file.exists() {
            return read_profile(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = self.profile_path("main");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            Ok(Config::new())
        }
    }

    /// Add a new profile cloned from main (or defaults if main missing)
    pub fn add_profile_from_default(&self, new_name: &str) -> anyhow::Result<PathBuf> {
        let mut config = self.load_saved("main")?;
        config.assistant.api_key.clear();

        fs::create_dir_all(self.profiles_dir())?;
        let file = self.profile_path(new_name);
        write_profile(&file, new_name, config)?;

        tracing::info!("Created new profile: {new_name}");
        Ok(file)
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

fn write_profile(path: &Path, name: &str, value: Config) -> anyhow::Result<()> {
    let profile = Profile {
        name: name.into(),
        value,
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)?;
    Ok(())
}
