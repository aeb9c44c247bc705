use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use treecmp::areas::session::Session;
use treecmp::artifacts::core::{CompareOptions, Output};
use treecmp::artifacts::ignore::parse_ignore_lines;
use treecmp::commands::diff::DiffView;
use treecmp::commands::{OutputFormat, check_ignore};

#[derive(Parser)]
#[command(
    name = "treecmp",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Compare two directory trees",
    long_about = "This tool compares two directory trees by content, honoring gitignore-style \
    exclusion rules, and shows line-level differences between files.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, global = true, help = "Write directly to stdout instead of the pager")]
    no_pager: bool,
}

#[derive(Args)]
struct RuleArgs {
    #[arg(
        short = 'x',
        long = "exclude",
        value_name = "PATTERN",
        help = "Ignore paths matching a gitignore-style pattern (repeatable)"
    )]
    exclude: Vec<String>,
    #[arg(long, value_name = "FILE", help = "Read additional patterns from a file")]
    exclude_from: Option<PathBuf>,
    #[arg(long, help = "Do not read .gitignore files from the compared trees")]
    no_gitignore: bool,
}

#[derive(Args)]
struct CompareArgs {
    #[command(flatten)]
    rules: RuleArgs,
    #[arg(long, help = "Treat CRLF and LF line endings as different content")]
    keep_line_breaks: bool,
    #[arg(long, help = "Leave matching entries out of the listing")]
    hide_matches: bool,
}

impl RuleArgs {
    fn patterns(&self) -> Result<Vec<String>> {
        let mut patterns = self.exclude.clone();

        if let Some(file) = &self.exclude_from {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Unable to read patterns from {}", file.display()))?;
            patterns.extend(parse_ignore_lines(&content).map(str::to_string));
        }

        Ok(patterns)
    }
}

impl CompareArgs {
    fn options(&self) -> Result<CompareOptions> {
        Ok(CompareOptions::new(
            !self.keep_line_breaks,
            !self.rules.no_gitignore,
            self.rules.patterns()?,
            self.hide_matches,
        ))
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "compare",
        about = "List the differences between two directories",
        long_about = "This command snapshots both directories and prints a summary line \
        followed by one line per path: `<` only in A, `>` only in B, `!` different, `=` match."
    )]
    Compare {
        #[arg(index = 1, help = "The first directory (A)")]
        a: PathBuf,
        #[arg(index = 2, help = "The second directory (B)")]
        b: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
        format: OutputFormat,
        #[command(flatten)]
        options: CompareArgs,
    },
    #[command(
        name = "diff",
        about = "Show the line differences of one file",
        long_about = "This command shows an aligned line diff of a file present in both directories, \
        or the content of a file present in only one of them."
    )]
    Diff {
        #[arg(index = 1, help = "The first directory (A)")]
        a: PathBuf,
        #[arg(index = 2, help = "The second directory (B)")]
        b: PathBuf,
        #[arg(index = 3, help = "The file path, relative to both directories")]
        path: String,
        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Show only the change reached after N steps (negative: backward)"
        )]
        change: Option<isize>,
        #[arg(long, default_value_t = 3, help = "Lines of context around the selected change")]
        context: usize,
        #[command(flatten)]
        options: CompareArgs,
    },
    #[command(
        name = "check-ignore",
        about = "Show which paths the ignore rules exclude",
        long_about = "This command evaluates the caller patterns and the .gitignore files \
        of a directory against the given relative paths and prints the ignored ones."
    )]
    CheckIgnore {
        #[arg(index = 1, help = "The directory whose ignore files are read")]
        root: PathBuf,
        #[arg(index = 2, required = true, help = "Paths relative to the directory")]
        paths: Vec<String>,
        #[arg(short, long, help = "Also print the deciding rule")]
        verbose: bool,
        #[command(flatten)]
        rules: RuleArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let output = Output::detect(cli.no_pager);

    match &cli.command {
        Commands::Compare { a, b, format, options } => {
            let session = Session::new(a, b, options.options()?, output.writer())?;
            session.compare(*format).await?
        }
        Commands::Diff {
            a,
            b,
            path,
            change,
            context,
            options,
        } => {
            let view = match change {
                Some(steps) => DiffView::Change {
                    steps: *steps,
                    context: *context,
                },
                None => DiffView::Full,
            };
            let session = Session::new(a, b, options.options()?, output.writer())?;
            session.diff(path, view).await?
        }
        Commands::CheckIgnore {
            root,
            paths,
            verbose,
            rules,
        } => {
            let options = CompareOptions {
                use_gitignore: !rules.no_gitignore,
                ignore_patterns: rules.patterns()?,
                ..CompareOptions::default()
            };
            let mut writer = output.writer();
            check_ignore(root, &options, paths, *verbose, &mut *writer)?;
        }
    }

    output.finish()
}
