// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Hero,
    Signature,
    Starfield,
    Dashboard,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "driftfield")]
#[command(about = "Ambient marketing-page scenes on wgpu", long_about = None)]
pub struct Cli {
    /// Built-in scene preset to run
    #[arg(long = "scene", value_enum, default_value = "hero")]
    pub scene: Preset,

    /// Load a scene config from a JSON file instead of a preset
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Print the selected preset as JSON and exit
    #[arg(long = "dump-config", default_value = "false")]
    pub dump_config: bool,

    /// Exit after presenting this many frames
    #[arg(long = "frames")]
    pub frames: Option<u64>,

    /// Disable the stats overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["driftfield"]);
        assert_eq!(cli.scene, Preset::Hero);
        assert!(!cli.no_ui);
        assert!(cli.config.is_none());
        assert!(cli.frames.is_none());
    }

    #[test]
    fn test_scene_flag_parses_presets() {
        let cli = Cli::parse_from(["driftfield", "--scene", "starfield"]);
        assert_eq!(cli.scene, Preset::Starfield);

        let cli = Cli::parse_from(["driftfield", "--scene", "dashboard", "--frames", "3"]);
        assert_eq!(cli.scene, Preset::Dashboard);
        assert_eq!(cli.frames, Some(3));
    }
}
