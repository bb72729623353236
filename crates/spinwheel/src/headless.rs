use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::debug;

use spinwheel_core::resolve::Resolution;
use spinwheel_core::resolver::{SpinResolver, SpinTicket};
use spinwheel_core::scheduler::TokioScheduler;
use spinwheel_core::session::SpinSession;
use spinwheel_core::wheel::WheelConfig;

pub struct Options {
    pub spins: u32,
    pub json: bool,
    pub seed: Option<u64>,
}

/// One line of JSON output.
#[derive(Debug, Serialize)]
struct SpinRecord<'a> {
    spin: u32,
    rotation: f64,
    index: usize,
    winner: &'a str,
    special: bool,
}

/// Spin `options.spins` times back to back, waiting out the real resolution
/// delay each time, and write one line per result.
pub async fn run<W: Write>(config: WheelConfig, options: Options, out: &mut W) -> Result<()> {
    let resolver = match options.seed {
        Some(seed) => SpinResolver::seeded(config, seed)?,
        None => SpinResolver::new(config)?,
    };
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<SpinTicket>();
    let scheduler = TokioScheduler::new(tx, std::convert::identity);
    let mut session = SpinSession::new(resolver, scheduler);

    for spin in 1..=options.spins {
        if !session.spin() {
            bail!("spin {} was rejected while the wheel was still spinning", spin);
        }
        let ticket = rx
            .recv()
            .await
            .context("resolution timer stopped before delivering")?;
        let Some(resolution) = session.on_ticket(&ticket) else {
            debug!("Stale ticket {} ignored", ticket.generation());
            continue;
        };
        write_result(out, spin, &resolution, options.json)?;
    }

    Ok(())
}

fn write_result<W: Write>(
    out: &mut W,
    spin: u32,
    resolution: &Resolution,
    json: bool,
) -> Result<()> {
    if json {
        let record = SpinRecord {
            spin,
            rotation: resolution.rotation_degrees,
            index: resolution.index,
            winner: resolution.winner.text(),
            special: resolution.winner.is_special(),
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "Spin {}: You won: {} (segment {}, {:.1}°)",
            spin, resolution.winner, resolution.index, resolution.rotation_degrees
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(spins: u32, json: bool) -> Options {
        Options {
            spins,
            json,
            seed: Some(42),
        }
    }

    async fn output(options: Options) -> String {
        let mut buf = Vec::new();
        run(WheelConfig::default(), options, &mut buf).await.unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_plain_output_one_line_per_spin() {
        let text = output(options(3, false)).await;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Spin 1: You won: "));
        assert!(lines[2].starts_with("Spin 3: You won: "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_json_records() {
        let text = output(options(4, true)).await;
        let mut previous = 0.0;
        for (i, line) in text.lines().enumerate() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["spin"], (i + 1) as u64);
            let rotation = value["rotation"].as_f64().unwrap();
            // each spin adds between 720 and 1080 degrees
            assert!(rotation - previous >= 720.0 && rotation - previous <= 1080.0);
            previous = rotation;
            assert!(value["index"].as_u64().unwrap() < 8);
            if value["special"].as_bool().unwrap() {
                assert_eq!(value["winner"], "Gift");
            }
        }
        assert_eq!(text.lines().count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_same_results() {
        let first = output(options(5, true)).await;
        let second = output(options(5, true)).await;
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_resolution_delay() {
        let start = tokio::time::Instant::now();
        output(options(2, false)).await;
        assert!(start.elapsed() >= std::time::Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_spins_prints_nothing() {
        assert!(output(options(0, false)).await.is_empty());
    }
}
