//! Command-line interface definitions for i3flash.

use std::time::Duration;

use clap::Parser;
use flash_engine::Opacity;

/// Command-line interface for the `i3flash` binary.
#[derive(Parser, Debug)]
#[command(name = "i3flash", about = "Flash i3 windows on focus", version)]
pub struct Cli {
    /// Opacity of the window during a flash, between 0 and 1
    #[arg(
        short = 'o',
        long,
        default_value = "0.9",
        value_name = "DECIMAL",
        allow_negative_numbers = true,
        value_parser = parse_opacity
    )]
    pub opacity: Opacity,

    /// Flash time interval (in ms)
    #[arg(short = 't', long, default_value_t = 150, value_name = "MS")]
    pub time: u64,

    /// Just flash the current window and quit
    #[arg(short = 'f', long = "flash_current")]
    pub flash_current: bool,
}

impl Cli {
    /// Flash duration.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.time)
    }
}

/// Parse and range-check a decimal opacity.
fn parse_opacity(s: &str) -> Result<Opacity, String> {
    s.parse::<Opacity>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["i3flash"]).unwrap();
        assert_eq!(cli.opacity, Opacity::from_decimal(0.9).unwrap());
        assert_eq!(cli.duration(), Duration::from_millis(150));
        assert!(!cli.flash_current);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["i3flash", "-o", "1.0", "-t", "40", "-f"]).unwrap();
        assert_eq!(cli.opacity.native(), 4_294_967_295);
        assert_eq!(cli.time, 40);
        assert!(cli.flash_current);
    }

    #[test]
    fn long_flags() {
        let cli =
            Cli::try_parse_from(["i3flash", "--opacity", "0.5", "--time", "0", "--flash_current"])
                .unwrap();
        assert_eq!(cli.opacity.native(), 2_147_483_648);
        assert_eq!(cli.duration(), Duration::ZERO);
        assert!(cli.flash_current);
    }

    #[test]
    fn out_of_range_opacity_is_rejected() {
        for bad in ["1.5", "-0.1", "NaN", "opaque"] {
            let err = Cli::try_parse_from(["i3flash", "--opacity", bad]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "input {bad}");
            assert_ne!(err.exit_code(), 0);
            assert!(err.to_string().contains("Invalid opacity argument"));
        }
    }

    #[test]
    fn negative_opacity_gets_range_error() {
        let err = Cli::try_parse_from(["i3flash", "-o", "-0.1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Invalid opacity argument"));
    }

    #[test]
    fn negative_time_is_rejected() {
        assert!(Cli::try_parse_from(["i3flash", "-t", "-5"]).is_err());
    }
}
