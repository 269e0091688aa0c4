//! `shringar` -- back-office tool for booking assignment and payouts.
//!
//! Reads a JSON snapshot exported from the booking database and prints
//! ranked artist candidates, payout breakdowns or artist earnings.
//!
//! # Environment variables
//!
//! | Variable                     | Required | Default         | Description                          |
//! |------------------------------|----------|-----------------|--------------------------------------|
//! | `SHRINGAR_SNAPSHOT`          | no       | `snapshot.json` | Snapshot file to read                |
//! | `PLATFORM_FEE_PERCENT`       | no       | settings / `10` | Platform commission in percent       |
//! | `SERVICE_UTC_OFFSET_MINUTES` | no       | `330`           | Offset used to derive service days   |

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shringar_core::artist::find_artist;
use shringar_core::availability::resolve_candidates;
use shringar_core::booking::find_booking;
use shringar_core::payout::{payout_for_booking, summarize_artist_earnings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shringar_cli::config::CliConfig;
use shringar_cli::report::{self, CandidatesReport, EarningsReport, PayoutReport};
use shringar_cli::snapshot::Snapshot;

#[derive(Parser)]
#[command(name = "shringar")]
#[command(about = "Artist assignment and payout reports for the booking platform")]
struct Args {
    /// Snapshot file (overrides SHRINGAR_SNAPSHOT)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Platform fee in percent (overrides PLATFORM_FEE_PERCENT and settings)
    #[arg(long, global = true)]
    fee_percent: Option<Decimal>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank artists for assignment to a booking
    Candidates { booking_id: String },
    /// Per-artist payout breakdown for a booking
    Payout { booking_id: String },
    /// Earnings over an artist's completed bookings
    Earnings { artist_id: String },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shringar_cli=info,shringar=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = CliConfig::from_env()
        .context("Failed to load configuration")?
        .with_overrides(args.snapshot, args.fee_percent);

    let snapshot = Snapshot::load(&config.snapshot_path, config.utc_offset)
        .with_context(|| format!("Failed to load snapshot {}", config.snapshot_path.display()))?;

    let output = match args.command {
        Command::Candidates { booking_id } => {
            let target = find_booking(&snapshot.bookings, &booking_id)?;
            let candidates = resolve_candidates(target, &snapshot.bookings, &snapshot.artists);
            tracing::debug!(
                booking_id = %booking_id,
                roster = candidates.len(),
                available = candidates.iter().filter(|c| c.available).count(),
                "Candidates resolved",
            );
            let report = CandidatesReport {
                booking_id: &booking_id,
                candidates: &candidates,
            };
            if args.json {
                serde_json::to_string_pretty(&report)?
            } else {
                report::render_candidates(&report)
            }
        }
        Command::Payout { booking_id } => {
            let fraction = config.resolve_fee_fraction(snapshot.settings.platform_fee_percent)?;
            let booking = find_booking(&snapshot.bookings, &booking_id)?;
            let report = PayoutReport {
                booking_id: &booking_id,
                assigned_artists: booking.assigned_artist_ids.len(),
                platform_fee_fraction: fraction,
                breakdown: payout_for_booking(booking, fraction),
            };
            if args.json {
                serde_json::to_string_pretty(&report)?
            } else {
                report::render_payout(&report)
            }
        }
        Command::Earnings { artist_id } => {
            let fraction = config.resolve_fee_fraction(snapshot.settings.platform_fee_percent)?;
            let artist = find_artist(&snapshot.artists, &artist_id)?;
            let report = EarningsReport {
                artist_id: &artist.id,
                artist_name: &artist.name,
                platform_fee_fraction: fraction,
                summary: summarize_artist_earnings(&artist.id, &snapshot.bookings, fraction),
            };
            if args.json {
                serde_json::to_string_pretty(&report)?
            } else {
                report::render_earnings(&report)
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
