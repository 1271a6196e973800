use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bigword_icons::{write_icon, Error, GenerationReport, IconRenderer, IconSize, ThemeSettings};
use clap::Parser;

/// Generate the Big Big Word extension icons.
///
/// With no arguments, writes icon16.png, icon32.png, icon48.png and
/// icon128.png next to the executable using the emerald theme.
#[derive(Debug, Parser)]
#[command(name = "bigword-icons", version)]
struct Cli {
    /// Directory to write the icons to (created if missing)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Theme settings JSON, e.g. {"primary":"#10B981","secondary":"#059669"}
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Icon size in pixels; repeat to render several
    #[arg(long = "size", value_name = "PX")]
    sizes: Vec<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(report) if report.all_succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            println!("❌ Error: {err}");
            println!();
            println!("💡 {}", remediation(&err));
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<GenerationReport, Error> {
    let settings = match &cli.theme {
        Some(path) => ThemeSettings::load(path)?,
        None => ThemeSettings::default(),
    };
    let theme = settings.to_theme()?;

    let sizes = if cli.sizes.is_empty() {
        IconSize::EXTENSION_SIZES.to_vec()
    } else {
        cli.sizes
            .iter()
            .map(|&px| IconSize::new(px))
            .collect::<Result<Vec<_>, _>>()?
    };

    let out_dir = cli.out_dir.unwrap_or_else(executable_dir);
    std::fs::create_dir_all(&out_dir).map_err(|source| Error::Io {
        path: out_dir.clone(),
        source,
    })?;

    let size_list = sizes
        .iter()
        .map(|s| s.get().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("🎨 Big Big Word - Icon Generator");
    println!("{}", "=".repeat(50));
    println!("📁 Output directory: {}", out_dir.display());
    println!("🎨 Theme: {}", settings.name);
    println!("🔢 Sizes: {size_list} pixels");
    println!("{}", "=".repeat(50));
    println!();

    let renderer = IconRenderer::with_system_fonts(theme);
    let mut report = GenerationReport::default();

    for size in sizes {
        print!("⏳ Generating {} ({size})... ", size.file_name());
        // Progress line is finished once the file is written
        std::io::stdout().flush().ok();
        let outcome = write_icon(&renderer, size, &out_dir);
        match &outcome.result {
            Ok(bytes) => println!("✅ Done ({bytes} bytes)"),
            Err(err) => println!("❌ Failed: {err}"),
        }
        for warning in &outcome.warnings {
            println!("   ⚠️  Warning: {warning}");
        }
        report.outcomes.push(outcome);
    }

    println!();
    println!("{}", "=".repeat(50));
    let failed = report.failures().count();
    if failed == 0 {
        println!("✨ All icons generated successfully!");
        println!();
        println!("📋 Next steps:");
        println!("1. Check the generated PNG files in {}", out_dir.display());
        println!("2. Reload your Chrome extension at chrome://extensions/");
        println!("3. Verify the icons appear correctly");
    } else {
        println!("⚠️  {failed} of {} icons failed", report.outcomes.len());
    }
    println!();

    Ok(report)
}

/// The directory holding the running executable, or the working directory
/// if that cannot be determined.
fn executable_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
        Err(err) => {
            log::warn!("cannot locate executable ({err}); writing to the working directory");
            PathBuf::from(".")
        }
    }
}

fn remediation(err: &Error) -> &'static str {
    match err {
        Error::InvalidSize { .. } => "Pass sizes between 1 and 4096 pixels, e.g. --size 16 --size 128",
        Error::InvalidColor { .. } | Error::Theme(_) => {
            "Check the theme file; it should look like {\"primary\":\"#10B981\",\"secondary\":\"#059669\"}"
        }
        Error::Io { .. } => "Make sure the output directory exists and is writable",
        Error::Encode(_) => "PNG encoding failed; try a smaller --size",
    }
}
