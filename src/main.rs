use std::fs::File;
use std::process;

use chip8::config::Config;
use chip8::display::MonoTermDisplay;
use chip8::host::Host;
use chip8::input::StdinInput;
use chip8::interpreter::Chip8Interpreter;
use chip8::sound::{Mute, SimpleBeep, Sound};
use chip8::{Chip8Error, Result};
use clap::Parser;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match Config::try_parse() {
        Ok(config) => config,
        // --help lands here too, but isn't a failure
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return;
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        log::error!("{}", e);
        eprintln!("chip8: {}", e);
        process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    // load the program before touching the terminal
    let mut interpreter = match config.seed {
        Some(seed) => Chip8Interpreter::with_seed(seed),
        None => Chip8Interpreter::new(),
    };
    let mut f = File::open(&config.rom_path).map_err(|source| Chip8Error::Rom {
        path: config.rom_path.clone(),
        source,
    })?;
    interpreter.load_program(&mut f)?;

    let mut display = MonoTermDisplay::new()?;
    let mut input = StdinInput::new()?;
    let mut sound: Box<dyn Sound> = if config.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    let frames = Host::new(
        interpreter,
        &mut display,
        &mut input,
        sound.as_mut(),
        &config,
    )
    .run(None)?;
    log::info!("ran {} frames", frames);

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..2 {
        println!();
    }
    Ok(())
}
