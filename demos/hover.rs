use std::time::Duration;

use anyhow::Result;
use multicopter_sim::{command_slot, FrameKind, Pose, SimConfig, VehicleSession};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Hovers a frame for a couple of seconds while a fake render loop reads it at 60 fps.
// Usage: cargo run --example hover -- [phantom|bigquad]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let kind: FrameKind = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "phantom".to_string())
        .parse()?;
    let frame = kind.create();
    let config = SimConfig::default();
    let hover = frame.hover_command(config.dynamics.gravity);
    info!(frame = %kind, hover, "starting");

    let commands = command_slot(frame.motor_count());
    let mut session = VehicleSession::new(frame, config, commands.clone());
    session.begin_play(Some(Pose::at(0.0, 0.0, 10.0)))?;

    for frame_no in 0..120 {
        // A little extra throttle for the first second, then hover.
        let throttle = if frame_no < 60 { hover * 1.02 } else { hover };
        commands.submit(&vec![throttle; commands.motor_count()])?;
        commands.set_gimbal(0.0, frame_no as f64 * 0.25);

        if let Some(snapshot) = session.tick()? {
            println!(
                "tick {:6}  alt {:7.3} m  motors {:.3}  gimbal pitch {:5.1}",
                snapshot.tick,
                snapshot.position.z,
                snapshot.motor_mean(),
                snapshot.gimbal_pitch
            );
        }
        std::thread::sleep(Duration::from_millis(16));
    }

    session.end_play();
    Ok(())
}
