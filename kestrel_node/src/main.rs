// kestrel_node/src/main.rs

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kestrel_node::config::load_config;
use kestrel_node::node::{FusionNode, NodeChannels};

/// Kestrel: planar pose fusion node.
///
/// Fuses relative odometry with intermittent absolute fixes and publishes
/// the fused pose at a fixed rate.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the node configuration TOML file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        rate_hz = config.publish_rate_hz,
        gating = config.use_absolute_fix_gating,
        outlier_multiplier = config.outlier_multiplier,
        "starting kestrel fusion node"
    );

    let (node, NodeChannels { input_tx, pose_rx }) = FusionNode::spawn(config);

    // A transport adapter plugs into `input_tx` / `pose_rx`. Until one is
    // wired in, drain the publisher here so the loop never stalls. Holding
    // `input_tx` keeps the fusion loop alive, so this drain runs for the
    // life of the process; it only ends if the fusion thread dies and its
    // pose sender is dropped.
    for pose in pose_rx.iter() {
        debug!(
            x = pose.position.x,
            y = pose.position.y,
            qw = pose.orientation.w,
            qz = pose.orientation.k,
            "fused pose"
        );
    }

    // Reached only on abnormal fusion-thread exit.
    drop(input_tx);
    error!("fusion thread stopped unexpectedly");
    if node.join().is_err() {
        error!("fusion thread panicked");
    }
    ExitCode::FAILURE
}
