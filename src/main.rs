//! Lucky Cage entry point
//!
//! Natively this is a headless runner: spin the cage, let it settle, and
//! print snapshots as JSON lines. In the browser the page drives
//! `platform::web::WebCage` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufWriter, Write};
    use std::path::PathBuf;

    use clap::Parser;
    use lucky_cage::error::Result;
    use lucky_cage::platform::CageLoop;
    use lucky_cage::{CageState, PhysicsSettings};

    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Number of balls requested (capped at the settings maximum)
        #[arg(short, long, default_value_t = 25)]
        balls: i64,

        /// RNG seed
        #[arg(short, long, default_value_t = 2026)]
        seed: u64,

        /// Ticks to run with the cage spinning
        #[arg(long, default_value_t = 120)]
        spin_ticks: u32,

        /// Ticks to run afterwards while the balls settle
        #[arg(long, default_value_t = 240)]
        settle_ticks: u32,

        /// Print a snapshot every N ticks (0 = only the final one)
        #[arg(long, default_value_t = 0)]
        every: u32,

        /// Physics settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Write the effective settings to this file and exit
        #[arg(long)]
        dump_settings: Option<PathBuf>,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let settings = match &args.settings {
            Some(path) => PhysicsSettings::load(path)?,
            None => PhysicsSettings::default(),
        };
        settings.validate()?;

        if let Some(path) = &args.dump_settings {
            return settings.save(path);
        }

        log::info!("Lucky Cage (native) starting with seed {}", args.seed);
        let mut cage = CageLoop::new(CageState::with_settings(settings, args.seed));
        cage.set_target_count(args.balls);

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());

        let phases = [(true, args.spin_ticks), (false, args.settle_ticks)];
        for (agitated, ticks) in phases {
            cage.set_agitated(agitated);
            for _ in 0..ticks {
                cage.step();
                let snapshot = cage.snapshot();
                if args.every > 0 && snapshot.tick % args.every as u64 == 0 {
                    writeln!(out, "{}", snapshot.to_json()?)?;
                }
            }
            log::info!(
                "{} phase done: {} ticks, kinetic energy {:.2}",
                if agitated { "Spin" } else { "Settle" },
                ticks,
                cage.state().kinetic_energy()
            );
        }

        if args.every == 0 {
            writeln!(out, "{}", cage.snapshot().to_json()?)?;
        }
        out.flush()?;

        cage.dispose();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
