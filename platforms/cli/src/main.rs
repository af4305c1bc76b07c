use clap::Parser;
use std::error::Error;
use tracetm::{render, MachineCatalog, MachineLoader, Step, TraceConfig, Tracer, DEFAULT_MAX_DEPTH};

/// Traces every computation branch of a nondeterministic Turing machine.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tracetm-cli machines/ends_in_one.csv 0101
  tracetm-cli ends_in_one input.txt --max-depth 20")]
struct Cli {
    /// The machine description file, or the name of a built-in machine
    #[clap(required_unless_present = "list")]
    machine: Option<String>,

    /// The input string, or a path to a file containing it
    #[clap(required_unless_present = "list")]
    input: Option<String>,

    /// Number of tree levels explored before giving up
    #[clap(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the trace as JSON
    #[clap(short, long)]
    json: bool,

    /// Print each level to stderr as it is explored
    #[clap(short = 'd', long)]
    debug: bool,

    /// List the built-in machines
    #[clap(short, long)]
    list: bool,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.list {
        for index in 0..MachineCatalog::get_machine_count() {
            let info = MachineCatalog::get_machine_info(index)?;
            println!(
                "{}: {} states, {} transitions",
                info.name, info.state_count, info.transition_count
            );
        }
        return Ok(());
    }

    let (Some(machine), Some(input)) = (cli.machine, cli.input) else {
        return Err("missing machine or input argument".into());
    };

    let machine = MachineLoader::resolve_machine(&machine)?;
    let input = MachineLoader::load_input(&input)?;
    let mut tracer = Tracer::new(&machine, &input, TraceConfig::with_max_depth(cli.max_depth));

    loop {
        let step = tracer.step();

        if cli.debug {
            eprintln!(
                "Level {}: {} configurations, visited {}",
                tracer.depth(),
                tracer.frontier().len(),
                tracer.configurations()
            );
        }

        if let Step::Halt(verdict) = step {
            if cli.debug {
                eprintln!("Halted: {}", verdict);
            }
            break;
        }
    }

    let trace = tracer.into_trace();

    if cli.json {
        println!("{}", render::json(&machine, &input, &trace)?);
    } else {
        println!("{}", render::report(&machine, &input, &trace));
    }

    Ok(())
}
