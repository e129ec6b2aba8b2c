use anyhow::{bail, Context, Result};

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickMode {
    /// Every tick advances by the nominal interval
    #[default]
    Fixed,
    /// Every tick advances by the measured time since the previous tick
    WallClock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    pub interval: Duration,
    pub mode: TickMode,
}

impl Default for TickConfig {
    fn default() -> TickConfig {
        TickConfig {
            interval: Duration::from_millis(TickConfig::DEFAULT_INTERVAL_MS),
            mode: TickMode::Fixed,
        }
    }
}

impl TickConfig {
    const DEFAULT_INTERVAL_MS: u64 = 10;

    /// Parse command line arguments, not including the program name
    pub fn from_args<I>(args: I) -> Result<TickConfig>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = TickConfig::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--wall-clock" => {
                    config.mode = TickMode::WallClock;
                }
                "--interval-ms" => {
                    let value = args
                        .next()
                        .context("--interval-ms requires a value")?;
                    let interval_ms: u64 = value
                        .parse()
                        .with_context(|| format!("Invalid tick interval: {}", value))?;
                    if interval_ms == 0 {
                        bail!("Tick interval must be at least 1ms");
                    }
                    config.interval = Duration::from_millis(interval_ms);
                }
                _ => bail!("Unknown argument: {}", arg),
            }
        }

        Ok(config)
    }
}
