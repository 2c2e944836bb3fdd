//! # chatmin CLI
//!
//! Command-line interface for the chatmin library.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatmin::ChatminError;
use chatmin::cli::Args;
use chatmin::core::{output_file_name, process, write_transcript};
use chatmin::parser::TelegramParser;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatminError> {
    let total_start = Instant::now();

    // Validate options before touching the input
    let config = args.compact_config()?;
    if !args.list_participants {
        config.validate()?;
    }

    let parse_start = Instant::now();
    let export = TelegramParser::new().parse(&args.input)?;
    let parse_time = parse_start.elapsed();

    if args.list_participants {
        for author in export.authors() {
            println!("{author}");
        }
        return Ok(());
    }

    let transcript = process(&export, &config);

    if args.stdout {
        println!("{}", transcript.text);
        return Ok(());
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(output_file_name(&export.title)));

    // Print header
    println!("📦 chatmin v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💬 Chat:    {}", export.title);
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path.display());
    println!("🧭 Mode:    {}", config.mode);
    if config.is_proximity() {
        let names: Vec<&str> = config.participants.iter().map(String::as_str).collect();
        println!("👥 Around:  {} (±{} min)", names.join(", "), config.window_minutes);
    }
    if config.has_date_filter() {
        let bound = |b: Option<i64>| b.map_or_else(|| "-".to_string(), |s| s.to_string());
        println!(
            "📅 Range:   {} .. {}",
            bound(config.date_from),
            bound(config.date_to)
        );
    }
    println!();

    println!(
        "   Loaded {} messages ({:.2}s)",
        export.len(),
        parse_time.as_secs_f64()
    );
    if let Some((first, last)) = export.time_range() {
        println!("   Spanning {:.1} days", (last - first) as f64 / 86_400.0);
    }

    write_transcript(&transcript.text, &output_path)?;

    let stats = transcript.stats;
    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Original:  {} messages", stats.original_count);
    println!("   Filtered:  {} messages", stats.filtered_count);
    println!(
        "   Final:     {} lines ({:.1}% reduction)",
        stats.line_count,
        stats.compression_ratio()
    );
    println!("   Chars:     {}", stats.char_count);
    println!("   Tokens:    ~{}", stats.approx_tokens);

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());

    Ok(())
}
