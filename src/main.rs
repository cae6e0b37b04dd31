//! Standalone CLI for the star field generator and oscillator
//!
//! Run with: cargo run --bin star-cli --features cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use star_sphere::core::{SizeOscillator, SphereConfig, StarField};
    use star_sphere::time::FrameClock;
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,star_sphere=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let mut config = match std::env::var("STAR_SPHERE_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading config");
            SphereConfig::load(&path)?
        }
        Err(_) => SphereConfig::default(),
    };
    if let Some(seed) = env_parse::<u64>("STAR_SPHERE_SEED")? {
        config.generator.seed = Some(seed);
    }
    let duration = run_duration(env_parse::<f64>("STAR_SPHERE_DURATION")?.unwrap_or(5.0))?;
    let fps = env_parse::<f64>("STAR_SPHERE_FPS")?.unwrap_or(60.0);
    let period = frame_period(fps)?;

    let mut field = StarField::generate(&config.generator, &config.appearance);
    info!(
        stars = field.len(),
        users = field.user_count(),
        categories = field.category_count(),
        seed = field.seed(),
        "Star field generated"
    );

    if let Ok(path) = std::env::var("STAR_SPHERE_EXPORT") {
        let json = serde_json::to_string(&field.export())?;
        std::fs::write(&path, json)?;
        info!(path = %path, bytes = std::fs::metadata(&path)?.len(), "Exported star field");
    }

    let oscillator = SizeOscillator::from(config.oscillation);
    let mut clock = FrameClock::new();
    let mut frame_interval = tokio::time::interval(period);
    let mut stats_interval = tokio::time::interval(Duration::from_secs(1));
    let mut frames = 0u64;
    let mut frames_last_interval = 0u64;

    info!(duration, fps, "Running oscillator");

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let frame = clock.tick();
                if frame.elapsed >= duration {
                    break;
                }
                field.tick(&oscillator, frame.elapsed);
                frames += 1;
                frames_last_interval += 1;
            }
            _ = stats_interval.tick() => {
                let (min, max) = field.sizes().range().unwrap_or((0.0, 0.0));
                info!(
                    t = format!("{:.2}", clock.elapsed()),
                    frames,
                    "/sec" = frames_last_interval,
                    min_size = min,
                    max_size = max,
                    "stats"
                );
                frames_last_interval = 0;
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted");
                break;
            }
        }
    }

    info!(frames, elapsed = clock.elapsed(), "Done");
    Ok(())
}

/// Parse an optional environment variable; a present but malformed value
/// is an error.
#[cfg(not(target_arch = "wasm32"))]
fn env_parse<T>(name: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("{}={:?}: {}", name, value, e).into()),
        Err(_) => Ok(None),
    }
}

/// Interval between frames. Rejects rates whose period would round to zero,
/// which tokio's interval does not accept.
#[cfg(not(target_arch = "wasm32"))]
fn frame_period(fps: f64) -> Result<std::time::Duration, String> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(format!("STAR_SPHERE_FPS must be positive, got {}", fps));
    }
    let period = std::time::Duration::from_secs_f64(1.0 / fps);
    if period.is_zero() {
        return Err(format!("STAR_SPHERE_FPS {} is too high", fps));
    }
    Ok(period)
}

#[cfg(not(target_arch = "wasm32"))]
fn run_duration(seconds: f64) -> Result<f64, String> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("STAR_SPHERE_DURATION must be a non-negative number, got {}", seconds))
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn frame_period_for_normal_rate() {
        let period = frame_period(60.0).unwrap();
        assert!((period.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(frame_period(1.0).unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn frame_period_rejects_zero_period() {
        assert!(frame_period(1e10).is_err());
        assert!(frame_period(f64::MAX).is_err());
    }

    #[test]
    fn frame_period_rejects_non_positive_and_nan() {
        assert!(frame_period(0.0).is_err());
        assert!(frame_period(-30.0).is_err());
        assert!(frame_period(f64::NAN).is_err());
        assert!(frame_period(f64::INFINITY).is_err());
    }

    #[test]
    fn run_duration_must_be_finite_and_non_negative() {
        assert_eq!(run_duration(5.0), Ok(5.0));
        assert_eq!(run_duration(0.0), Ok(0.0));
        assert!(run_duration(-1.0).is_err());
        assert!(run_duration(f64::NAN).is_err());
        assert!(run_duration(f64::INFINITY).is_err());
    }
}
