//! Headless demo: drives the character and chase camera with scripted input.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p stride-app --bin stride-demo -- --frames 600`.

use std::process::ExitCode;

use clap::Parser;
use stride_app::{CameraRig, FrameTime, InputScript, PlayerRig, StrideApp};
use stride_config::{CliArgs, Config};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "stride-demo", about = "Headless third-person locomotion demo")]
struct DemoArgs {
    #[command(flatten)]
    common: CliArgs,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated render rate in Hz.
    #[arg(long, default_value_t = 60.0)]
    frame_hz: f64,

    /// Log character and camera state every N frames.
    #[arg(long, default_value_t = 30)]
    report_every: u64,
}

fn main() -> ExitCode {
    let args = DemoArgs::parse();

    let config_dir = args.common.config.clone().or_else(Config::default_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args.common);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    stride_log::init_logging(log_dir.as_deref(), config.debug.json_log_file, Some(&config));

    if config_dir.is_none() {
        warn!("No config directory available, running with defaults");
    }
    if args.frame_hz <= 0.0 {
        error!("--frame-hz must be positive, got {}", args.frame_hz);
        return ExitCode::FAILURE;
    }

    let mut app = match StrideApp::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    app.world_mut()
        .insert_resource(InputScript::demo(args.frame_hz));

    let frame_dt = 1.0 / args.frame_hz;
    info!(
        "Running {} frames at {:.0} Hz ({:.1}s simulated)",
        args.frames,
        args.frame_hz,
        args.frames as f64 * frame_dt
    );

    for _ in 0..args.frames {
        app.update(frame_dt);
        let frame = app.world().resource::<FrameTime>().frame;
        if args.report_every > 0 && frame % args.report_every == 0 {
            report(&app);
        }
    }

    let time = app.world().resource::<FrameTime>();
    info!("Done: {} frames, {} fixed steps", time.frame, time.fixed_steps);
    ExitCode::SUCCESS
}

fn report(app: &StrideApp) {
    let world = app.world();
    let frame = world.resource::<FrameTime>().frame;
    let state = world.resource::<PlayerRig>().controller.state();
    let camera = world.resource::<CameraRig>().0.state();
    info!(
        "frame {frame}: pos ({:.2}, {:.2}, {:.2}) vel ({:.2}, {:.2}, {:.2}) grounded={} sprinting={} | cam ({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1}",
        state.position.x,
        state.position.y,
        state.position.z,
        state.velocity.x,
        state.velocity.y,
        state.velocity.z,
        state.grounded,
        state.sprinting,
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.yaw,
        camera.pitch,
    );
}
