//! Headless demo: runs one pendulum model and logs its trajectory.
//!
//! Usage: `pendulum-demo [two-link|chain] [config.json]`
//! Set `RUST_LOG=info` (or `debug`) to see output.

#[cfg(not(target_arch = "wasm32"))]
use chain_pendulum::{ChainConfig, Simulator, TwoLinkConfig};

#[cfg(not(target_arch = "wasm32"))]
const DT: f64 = 1.0 / 240.0;
#[cfg(not(target_arch = "wasm32"))]
const FRAMES: usize = 600;
#[cfg(not(target_arch = "wasm32"))]
const SUBSTEPS: usize = 4;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "two-link".to_string());
    let json = args.next().map(std::fs::read_to_string).transpose()?;

    let mut sim = Simulator::new();
    match mode.as_str() {
        "chain" => {
            let config = match json {
                Some(s) => ChainConfig::from_json(&s)?,
                None => ChainConfig::new(4).with_angles(vec![0.0, 0.3, 0.6, 0.9]),
            };
            sim.init_chain(&config);
            run_chain(&mut sim);
        }
        "two-link" => {
            let config = match json {
                Some(s) => TwoLinkConfig::from_json(&s)?,
                None => TwoLinkConfig::new([1.0, 1.0], [1.0, 1.0]).with_angles(2.0, 2.5),
            };
            sim.init_two_link(&config)?;
            run_two_link(&mut sim)?;
        }
        other => {
            log::error!("unknown mode `{other}`, expected `two-link` or `chain`");
            std::process::exit(2);
        }
    }

    if let Some(active) = sim.active() {
        log::info!("t={:.3}s energy={:.6}", active.elapsed(), active.energy());
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn run_two_link(sim: &mut Simulator) -> chain_pendulum::SimResult<()> {
    for frame in 0..FRAMES {
        sim.step_two_link(DT, SUBSTEPS)?;
        if frame % 60 == 0 {
            if let (Some(state), Some(tips)) = (sim.two_link_state(), sim.two_link_positions()) {
                log::info!(
                    "frame {frame:4}: theta=({:+.4}, {:+.4}) omega=({:+.4}, {:+.4}) tip=({:+.4}, {:+.4})",
                    state.theta1,
                    state.theta2,
                    state.omega1,
                    state.omega2,
                    tips.x2,
                    tips.y2
                );
            }
        }
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn run_chain(sim: &mut Simulator) {
    for frame in 0..FRAMES {
        let Some(q) = sim.step_chain(DT, SUBSTEPS) else {
            return;
        };
        if frame % 60 == 0 {
            let tip = sim
                .chain_positions()
                .and_then(|p| p.last().copied())
                .unwrap_or_default();
            log::info!("frame {frame:4}: q={q:+.4?} tip=({:+.4}, {:+.4})", tip.x, tip.y);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
