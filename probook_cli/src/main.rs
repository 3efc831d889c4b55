use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use probook_cli::Commands;
use probook_cli::OutputFormat;
use probook_cli::ProbookCli;
use probook_core::BuildContext;
use probook_core::DuplicatePolicy;
use probook_core::PathOverrides;
use probook_core::SnippetEntry;
use probook_core::build;
use probook_core::find_regions;
use probook_core::read_template;
use probook_core::render_document;
use probook_core::scanner::scan_tree_with_options;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = ProbookCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(args.verbose, use_color);

	let result = match &args.command {
		None => run_build(&args, None, false, false),
		Some(Commands::Build {
			output,
			dry_run,
			strict,
		}) => run_build(&args, output.clone(), *dry_run, *strict),
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Check) => run_check(&args),
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<probook_core::ProbookError>() {
			Ok(probook_err) => {
				let report: miette::Report = (*probook_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Send diagnostics to stderr so stdout stays reserved for command output.
/// `RUST_LOG` overrides the level chosen from `--verbose`.
fn init_logging(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "info" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &ProbookCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_context(
	args: &ProbookCli,
	output: Option<PathBuf>,
) -> Result<BuildContext, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let overrides = PathOverrides {
		work_dir: args.work_dir.clone(),
		blog_file: args.blog_file.clone(),
		output,
	};
	let ctx = BuildContext::load(&root, &overrides)?;
	tracing::debug!(
		"Resolved paths: work_dir={}, blog_file={}, output={}",
		ctx.paths.work_dir.display(),
		ctx.paths.blog_file.display(),
		ctx.paths.output.display()
	);

	Ok(ctx)
}

fn run_build(
	args: &ProbookCli,
	output: Option<PathBuf>,
	dry_run: bool,
	strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let mut ctx = load_context(args, output)?;
	if strict {
		ctx.scan.duplicates = DuplicatePolicy::Error;
	}

	if dry_run {
		let rendered = render_document(&ctx)?;
		print!("{}", rendered.outcome.content);
		return Ok(());
	}

	let result = build(&ctx)?;
	let root = resolve_root(args);

	println!(
		"{} {} region(s) into {}.",
		colored!("Merged", green),
		result.outcome.merged.len(),
		make_relative(&result.output, &root)
	);

	if !result.outcome.missing.is_empty() {
		println!(
			"{} placeholder(s) left unchanged without a snippet.",
			result.outcome.missing.len()
		);
	}

	if args.verbose {
		println!("Registered {} identifier(s).", result.identifier_count);
		for identifier in &result.outcome.merged {
			println!("  + {identifier}");
		}
		for identifier in &result.outcome.missing {
			println!("  - {identifier}");
		}
	}

	Ok(())
}

#[derive(Serialize)]
struct ListedSnippet<'a> {
	identifier: &'a str,
	file: String,
	identifiers: &'a [String],
	tags: &'a [String],
	date: Option<&'a str>,
	has_explanation: bool,
}

fn run_list(args: &ProbookCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_context(args, None)?;
	let root = resolve_root(args);
	let registry = scan_tree_with_options(&ctx.paths.work_dir, &ctx.scan)?;

	let listed: Vec<ListedSnippet<'_>> = registry
		.identifiers()
		.into_iter()
		.filter_map(|identifier| {
			registry
				.get(identifier)
				.map(|entry| listed_snippet(identifier, entry, &root))
		})
		.collect();

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&listed)?);
		}
		OutputFormat::Text => {
			if listed.is_empty() {
				println!("No snippets found.");
				return Ok(());
			}

			println!("{}", colored!("Snippets:", bold));
			for snippet in &listed {
				let tags = if snippet.tags.is_empty() {
					String::new()
				} else {
					format!(" [{}]", snippet.tags.join(", "))
				};
				let date = snippet
					.date
					.map(|date| format!(" ({date})"))
					.unwrap_or_default();
				println!("  {} {}{tags}{date}", snippet.identifier, snippet.file);
			}
			println!("\n{} identifier(s)", listed.len());
		}
	}

	Ok(())
}

fn listed_snippet<'a>(
	identifier: &'a str,
	entry: &'a SnippetEntry,
	root: &Path,
) -> ListedSnippet<'a> {
	ListedSnippet {
		identifier,
		file: make_relative(&entry.file, root),
		identifiers: &entry.identifiers,
		tags: &entry.tags,
		date: entry.date.as_deref(),
		has_explanation: entry.has_explanation,
	}
}

fn run_check(args: &ProbookCli) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_context(args, None)?;
	let registry = scan_tree_with_options(&ctx.paths.work_dir, &ctx.scan)?;
	let template = read_template(&ctx.paths.blog_file)?;
	let regions = find_regions(&template, &ctx.merge);

	let missing: Vec<&str> = regions
		.iter()
		.map(|region| region.identifier.as_str())
		.filter(|identifier| !registry.exists(identifier))
		.collect();

	if missing.is_empty() {
		println!(
			"{} all {} placeholder(s) have a snippet.",
			colored!("ok:", green),
			regions.len()
		);
		return Ok(());
	}

	for identifier in &missing {
		eprintln!(
			"{} placeholder `{identifier}` has no snippet",
			colored!("warning:", yellow)
		);
	}
	println!(
		"{} of {} placeholder(s) have no snippet.",
		missing.len(),
		regions.len()
	);
	process::exit(1);
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
