//! Command-line argument parsing.

use clap::{Parser, ValueEnum};
use log::info;

use crate::params::{CameraPreset, FixedCamera, OrbitCamera, TableauParams};

/// Camera preset names accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CameraChoice {
    /// Stationary view over the water
    Fixed,
    /// Slow orbit around the scene centre
    Orbit,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "stormcove")]
#[command(about = "Rainy night ocean with splashes, ripples and a bobbing boat", long_about = None)]
pub struct Args {
    /// Number of rain drops
    #[arg(long, value_name = "COUNT")]
    pub drops: Option<usize>,

    /// Seed for the rain generator (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Camera preset
    #[arg(long, value_enum, default_value_t = CameraChoice::Fixed)]
    pub camera: CameraChoice,

    /// Run without a window, logging frame summaries
    #[arg(long)]
    pub headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, value_name = "COUNT", default_value_t = 600)]
    pub frames: u64,

    /// Simulated frame rate in headless mode
    #[arg(long, value_name = "HZ", default_value_t = 60.0)]
    pub fps: f32,

    /// Maximum splashes alive at once
    #[arg(long, value_name = "COUNT")]
    pub max_splashes: Option<usize>,

    /// Maximum ripples alive at once
    #[arg(long, value_name = "COUNT")]
    pub max_ripples: Option<usize>,
}

impl Args {
    /// Override the defaults in `params` with the given flags
    pub fn apply(&self, params: &mut TableauParams) {
        if let Some(drops) = self.drops {
            params.rain.drop_count = drops;
        }
        if self.seed.is_some() {
            params.rain.seed = self.seed;
        }
        if let Some(max) = self.max_splashes {
            params.effects.max_live_splashes = max;
        }
        if let Some(max) = self.max_ripples {
            params.effects.max_live_ripples = max;
        }
    }

    /// Parse camera preset from command-line arguments
    pub fn camera_preset(&self) -> CameraPreset {
        match self.camera {
            CameraChoice::Fixed => {
                info!("Camera: Fixed");
                CameraPreset::Fixed(FixedCamera::default())
            }
            CameraChoice::Orbit => {
                info!("Camera: Orbit");
                CameraPreset::Orbit(OrbitCamera::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_params_untouched() {
        let args = Args::parse_from(["stormcove"]);
        let mut params = TableauParams::default();
        args.apply(&mut params);

        assert_eq!(params.rain.drop_count, 1500);
        assert_eq!(params.rain.seed, None);
        assert_eq!(args.camera, CameraChoice::Fixed);
        assert!(!args.headless);
    }

    #[test]
    fn test_flags_override_params() {
        let args = Args::parse_from([
            "stormcove",
            "--drops",
            "200",
            "--seed",
            "7",
            "--max-splashes",
            "64",
            "--max-ripples",
            "8",
            "--camera",
            "orbit",
        ]);
        let mut params = TableauParams::default();
        args.apply(&mut params);

        assert_eq!(params.rain.drop_count, 200);
        assert_eq!(params.rain.seed, Some(7));
        assert_eq!(params.effects.max_live_splashes, 64);
        assert_eq!(params.effects.max_live_ripples, 8);
        assert!(matches!(args.camera_preset(), CameraPreset::Orbit(_)));
    }

    #[test]
    fn test_zero_drops_fail_validation() {
        let args = Args::parse_from(["stormcove", "--drops", "0"]);
        let mut params = TableauParams::default();
        args.apply(&mut params);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_headless_flags() {
        let args = Args::parse_from(["stormcove", "--headless", "--frames", "120", "--fps", "30"]);
        assert!(args.headless);
        assert_eq!(args.frames, 120);
        assert_eq!(args.fps, 30.0);
    }
}
