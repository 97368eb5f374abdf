#![allow(clippy::single_match)]

mod app_delegation;
mod app_initialized;
mod app_ui;
mod app_uninit;
mod egui_renderer;
mod graphics;
mod headless;
mod script;

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::util::SubscriberInitExt;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app_delegation::DelegatedApp::Uninitialized;
use crate::app_uninit::App;
use crate::script::Script;

#[derive(Parser, Debug)]
#[command(name = "mdv")]
#[command(version, about = "Runs the plane-cursor demo on a software tile-plane console", long_about = None)]
struct Args {
    /// Window zoom, in whole multiples of 320x224
    #[arg(short, long, default_value_t = 3)]
    scale: u8,

    /// trace, debug, info, warn or error
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,

    /// Run without a window and print where the cursor ended up
    #[arg(long)]
    headless: bool,

    /// Run at least this many frames (headless only)
    #[arg(long, default_value_t = 0)]
    frames: u32,

    /// Pad 1 taps to play, e.g. "R D*14" (headless only)
    #[arg(short, long, default_value = "")]
    input: Script,

    /// Save the last frame as a PNG (headless only)
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

fn setup_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    setup_logging(args.log_level);
    info!("stdout logger started");

    if args.headless {
        let report = headless::run(&args.input, args.frames, args.screenshot.as_deref())?;
        println!("{report}");
        return Ok(());
    }

    if !args.input.taps().is_empty() || args.screenshot.is_some() || args.frames > 0 {
        warn!("--input, --frames and --screenshot only apply with --headless");
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    use thread_priority::*;
    // if it didn't work, oh well
    let _ = set_current_thread_priority(ThreadPriority::Max);

    let mut app = Uninitialized(App::new(args.scale)?);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn headless_flags_parse() {
        let args = Args::try_parse_from(["mdv", "--headless", "--frames", "60", "-i", "R D*14", "--log-level", "debug"]).unwrap();
        assert!(args.headless);
        assert_eq!(args.frames, 60);
        assert_eq!(args.input.taps().len(), 15);
        assert_eq!(args.log_level, Level::DEBUG);
        assert_eq!(args.scale, 3);
    }

    #[test]
    fn bad_scripts_are_rejected_at_parse_time() {
        assert!(Args::try_parse_from(["mdv", "--headless", "-i", "sideways"]).is_err());
    }
}
