mod toml_settings;

pub use toml_settings::TomlSettings;
