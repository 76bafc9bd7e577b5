use std::{fs, io, process, thread, time::Duration};

mod console;
mod options;
mod stats;

use sparselife::{Board, CellContainer, Codec, Pattern, RunLengthEncoded, presets};
use stats::{Recorder, Sample};

/// How long a paused console waits between polls when no sleep is set.
const IDLE: Duration = Duration::from_millis(16);

fn invalid_data<E: std::error::Error + Send + Sync + 'static>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

fn args_to_seed(args: &options::Args) -> io::Result<Pattern> {
    if let Some(file_name) = args.input_file() {
        let encoded_str = fs::read_to_string(file_name)?;
        let cells = RunLengthEncoded::default()
            .decode(&encoded_str)
            .map_err(invalid_data)?;
        return Ok(Pattern::from(cells));
    }
    if let Some(preset) = args.preset().as_deref().and_then(presets::find) {
        return preset.pattern().map_err(invalid_data);
    }

    // setup the alive cells based on args
    let (grid_w, grid_h) = args.grid_size();
    Ok(args.fill_mode().create_pattern(grid_w, grid_h))
}

fn main() -> io::Result<()> {
    let args = match options::Args::from_env() {
        Ok(args) => args,
        Err(usage) => {
            eprintln!("{}", usage);
            process::exit(2);
        }
    };

    let seed = args_to_seed(&args)?;
    let mut board = Board::new(args.topology());
    board.add_pattern(&seed, args.offset());
    println!("alive: {}", board.population());

    // setup the engine and reporting metrics
    let mut console = if args.console() {
        Some(console::ConsoleRender::new(args.paused())?)
    } else {
        None
    };
    let sleep = args.sleep();
    let parallel = args.multithreading();
    let max_gens = args.generations();

    let mut stats = stats::SwitchRecorder::new(board.population(), args.stats_file().is_some());
    let mut gens = 0;
    'generations: while gens < max_gens {
        let mut step = false;
        // render the console if in console mode
        if let Some(ref mut console) = console {
            while let Some(cmd) = console.poll_events()? {
                match cmd {
                    console::ConsoleCommand::Exit => break 'generations,
                    console::ConsoleCommand::Step => step = true,
                    console::ConsoleCommand::Handled => {}
                }
            }
            console.render(&board)?;
        }

        // report metrics every 500ms
        if stats.has_report() {
            let report = stats.report();
            if let Some(ref mut console) = console {
                console.set_report(report);
            } else {
                println!("{}", report);
            }
        }

        let paused = console.as_ref().is_some_and(console::ConsoleRender::paused);
        if !paused || step {
            // compute the next generation
            if parallel {
                board.advance_parallel();
            } else {
                board.advance();
            }
            gens += 1;
            stats.record(Sample::of(&board));
        }

        match sleep {
            Some(time) => thread::sleep(time),
            None if paused => thread::sleep(IDLE),
            None => {}
        }
    }
    std::mem::drop(console);

    if let Some(file_name) = args.stats_file() {
        stats.save(file_name)?;
    }
    if let Some(file_name) = args.output_file() {
        let encoder = RunLengthEncoded::default().set_name("sparselife generated pattern");
        fs::write(file_name, encoder.encode(board.cells()))?;
    }

    Ok(())
}
