//! Energy behaviour of both integrators.
//!
//! Runs a three-link chain (semi-implicit Euler) and the compound double
//! pendulum (RK4) side by side and reports the relative energy drift.

use chain_pendulum::{ChainConfig, ChainSimulation, TwoLinkConfig, TwoLinkSimulation};

const DT: f64 = 1.0 / 240.0;
const SECONDS: usize = 10;

fn main() -> Result<(), chain_pendulum::SimError> {
    env_logger::init();

    let mut chain = ChainSimulation::from_config(
        &ChainConfig::new(3)
            .with_lengths(vec![1.0, 0.8, 0.6])
            .with_angles(vec![-0.5, -0.2, 0.3]),
    );
    let mut double = TwoLinkSimulation::from_config(
        &TwoLinkConfig::new([1.0, 1.0], [1.0, 1.0]).with_angles(1.5, 2.0),
    )?;

    let e_chain = chain.energy();
    let e_double = double.energy();

    println!("Energy drift");
    println!("============");
    println!("time(s)    chain (euler)    double (rk4)");
    println!("------------------------------------------");

    let steps_per_second = (1.0 / DT).round() as usize;
    for second in 1..=SECONDS {
        chain.step(DT, steps_per_second);
        double.step(DT, steps_per_second);

        let drift_chain = ((chain.energy() - e_chain) / e_chain).abs();
        let drift_double = ((double.energy() - e_double) / e_double).abs();
        println!("{second:7}    {drift_chain:13.3e}    {drift_double:12.3e}");
    }

    let tip = chain.positions().last().copied().unwrap_or_default();
    println!("\nChain tip after {:.1}s: ({:+.4}, {:+.4})", chain.elapsed(), tip.x, tip.y);
    let tips = double.positions();
    println!("Double tip after {:.1}s: ({:+.4}, {:+.4})", double.elapsed(), tips.x2, tips.y2);
    Ok(())
}
