use anyhow::Result;
use clap::Parser;
use keygram::{compile_pattern, MIN_WEIGHT};
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Parser)]
#[command(name = "keygram")]
#[command(about = "Compile a regex into a substring-index pre-filter key")]
struct Cli {
    /// Regex pattern to compile
    pattern: String,

    /// Emit the key as JSON instead of the text dump
    #[arg(long)]
    json: bool,

    /// Show aggregate statistics for the key
    #[arg(short, long)]
    verbose: bool,

    /// Minimum weight for a key to be judged usable
    #[arg(long, default_value_t = MIN_WEIGHT)]
    min_weight: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let key = compile_pattern(&cli.pattern)?;

    #[cfg(debug_assertions)]
    key.check_rep();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&key.to_dump())?);
        return Ok(());
    }

    println!("{}", key.dump().trim_end_matches('\n'));

    if cli.verbose {
        println!();
        println!("weight:  {}", key.weight());
        println!("nodes:   {}", key.nodes());
        println!("depth:   {}", key.depth());
        println!("tails:   {}", key.tail_paths());
        println!("anchors: {}", key.anchor());
    }

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    if key.weight() < cli.min_weight {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(
            stdout,
            "no usable index key (weight {} < {})",
            key.weight(),
            cli.min_weight
        )?;
    } else {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(stdout, "usable index key (weight {})", key.weight())?;
    }
    stdout.reset()?;

    Ok(())
}
