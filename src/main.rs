use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use stringkit::config::{get_config_path, AppConfig, ConfigOverrides};
use stringkit::logging::{init_logging, LogContext, PerformanceLogger};
use stringkit::token;
use stringkit::{
    like_with, slug_with, Multibyte, StringKitResult, StringUtils, TextMode, Truncator,
    WildcardPattern,
};

#[derive(Parser)]
#[command(name = "stringkit")]
#[command(about = "Multibyte-safe string utilities")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, help = "Enable verbose logging")]
    verbose: bool,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Measure lengths and offsets in bytes instead of code points")]
    bytes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the length of a text
    Len {
        text: String,
    },

    /// Print a substring
    Sub {
        text: String,

        #[arg(help = "Start offset")]
        start: usize,

        #[arg(short, long, help = "Number of units to keep")]
        length: Option<usize>,
    },

    /// Print the position of a needle, or "none"
    Find {
        haystack: String,

        needle: String,

        #[arg(short, long, help = "Fold case before searching")]
        ignore_case: bool,

        #[arg(long, help = "Report the last occurrence")]
        last: bool,
    },

    /// Shorten a text with an ellipsis
    Truncate {
        text: String,

        limit: usize,

        #[arg(short, long, value_enum, default_value_t = TruncateMode::Safe)]
        mode: TruncateMode,
    },

    /// Test a wildcard pattern against a subject
    Like {
        pattern: String,

        subject: String,

        #[arg(short, long, help = "Case-insensitive match")]
        ignore_case: bool,
    },

    /// Build a URL-safe slug
    Slug {
        text: String,

        #[arg(short, long, help = "Segment separator (may be empty)")]
        separator: Option<String>,

        #[arg(long, help = "Spell out a leading digit")]
        numeric: bool,
    },

    /// Generate a random string
    Random {
        #[arg(short, long)]
        length: Option<usize>,

        #[arg(long, help = "Letters and digits only")]
        alnum: bool,
    },

    /// Generate a unique identifier
    Unique {
        #[arg(short, long)]
        prefix: Option<String>,

        #[arg(long, help = "Digits only, no prefix")]
        bare: bool,
    },

    /// Generate a version-4 UUID
    Uuid,

    /// Split a camelCase identifier
    Camel {
        text: String,

        #[arg(short, long, default_value = "_")]
        glue: String,

        #[arg(long, help = "Keep the original case")]
        keep_case: bool,
    },

    /// Strip tags and accents
    Clean {
        text: String,

        #[arg(long)]
        lower: bool,

        #[arg(long, help = "Backslash-escape quotes")]
        slashes: bool,
    },

    /// Escape text for HTML or XML
    Esc {
        text: String,

        #[arg(long)]
        xml: bool,
    },

    /// Write the effective configuration to the --config path or the default location
    InitConfig,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum TruncateMode {
    /// Never split a word
    Safe,
    /// Cut at the exact character
    Chars,
    /// Keep whole words
    Words,
}

impl TruncateMode {
    fn name(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Chars => "chars",
            Self::Words => "words",
        }
    }
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Len { .. } => "len",
            Self::Sub { .. } => "sub",
            Self::Find { .. } => "find",
            Self::Truncate { .. } => "truncate",
            Self::Like { .. } => "like",
            Self::Slug { .. } => "slug",
            Self::Random { .. } => "random",
            Self::Unique { .. } => "unique",
            Self::Uuid => "uuid",
            Self::Camel { .. } => "camel",
            Self::Clean { .. } => "clean",
            Self::Esc { .. } => "esc",
            Self::InitConfig => "init-config",
        }
    }

    /// Logging context carrying the command's arguments as typed fields
    fn log_context(&self, mode: TextMode) -> LogContext {
        let context = LogContext::new("cli", self.name()).with_mode(mode.to_string());
        match self {
            Self::Sub { start, length, .. } => {
                let context = context.with_number_field("start", count_field(*start));
                match length {
                    Some(length) => context.with_number_field("length", count_field(*length)),
                    None => context,
                }
            }
            Self::Find { ignore_case, last, .. } => context
                .with_bool_field("ignore_case", *ignore_case)
                .with_bool_field("last", *last),
            Self::Truncate { limit, mode, .. } => context
                .with_number_field("limit", count_field(*limit))
                .with_string_field("truncate_mode", mode.name()),
            Self::Like { ignore_case, .. } => context.with_bool_field("ignore_case", *ignore_case),
            Self::Slug { separator, numeric, .. } => {
                let context = context.with_bool_field("numeric", *numeric);
                match separator {
                    Some(separator) => context.with_string_field("separator", separator.as_str()),
                    None => context,
                }
            }
            Self::Random { length, alnum } => {
                let context = context.with_bool_field("alnum", *alnum);
                match length {
                    Some(length) => context.with_number_field("length", count_field(*length)),
                    None => context,
                }
            }
            Self::Unique { bare, .. } => context.with_bool_field("bare", *bare),
            Self::Camel { glue, keep_case, .. } => context
                .with_string_field("glue", glue.as_str())
                .with_bool_field("keep_case", *keep_case),
            Self::Clean { lower, slashes, .. } => context
                .with_bool_field("lower", *lower)
                .with_bool_field("slashes", *slashes),
            Self::Esc { xml, .. } => context.with_bool_field("xml", *xml),
            Self::Len { .. } | Self::Uuid | Self::InitConfig => context,
        }
    }
}

fn count_field(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration; init-config may target a file that does not exist yet
    let mut config = match &cli.config {
        Some(path) if matches!(cli.command, Commands::InitConfig) && !Path::new(path).exists() => {
            AppConfig::default()
        }
        Some(path) => AppConfig::load_from_file(path).await?,
        None => AppConfig::load().await?,
    };

    ConfigOverrides::apply(&mut config);
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.bytes {
        config.text.mode = TextMode::Bytes;
    }
    config.validate()?;

    init_logging(&config.logging)?;

    let mb = Multibyte::init_global(config.text.mode)?;
    let context = cli.command.log_context(mb.mode());
    stringkit::log_debug!(context, "Running command");

    let perf = PerformanceLogger::new(context);
    match run(&cli.command, &config, mb, cli.config.as_deref()).await {
        Ok(output) => {
            println!("{}", output);
            perf.finish("Command completed");
            Ok(())
        }
        Err(err) => {
            perf.finish_with_error("Command failed", &err);
            Err(err.into())
        }
    }
}

async fn run(
    command: &Commands,
    config: &AppConfig,
    mb: &Multibyte,
    config_path: Option<&str>,
) -> StringKitResult<String> {
    let output = match command {
        Commands::Len { text } => mb.len(text).to_string(),

        Commands::Sub { text, start, length } => mb.sub(text, *start, *length),

        Commands::Find { haystack, needle, ignore_case, last } => {
            let position = match (*last, *ignore_case) {
                (true, _) => mb.last_index_of(haystack, needle),
                (false, true) => mb.index_of_ignore_case(haystack, needle),
                (false, false) => mb.index_of(haystack, needle),
            };
            position.map_or_else(|| "none".to_string(), |pos| pos.to_string())
        }

        Commands::Truncate { text, limit, mode } => {
            let truncator = Truncator::new(mb).with_ellipsis(config.text.ellipsis.as_str());
            match mode {
                TruncateMode::Safe => truncator.truncate_safe(text, *limit),
                TruncateMode::Chars => truncator.limit_chars(text, *limit),
                TruncateMode::Words => truncator.limit_words(text, *limit),
            }
        }

        Commands::Like { pattern, subject, ignore_case } => {
            // like_with reports compile failures as a plain mismatch
            WildcardPattern::with_case(pattern, !ignore_case)?;
            like_with(pattern, subject, !ignore_case).to_string()
        }

        Commands::Slug { text, separator, numeric } => {
            let mut options = config.slug.options();
            if let Some(separator) = separator {
                options.separator = separator.clone();
            }
            if *numeric {
                options.preserve_numeric_words = true;
            }
            slug_with(text, &options)
        }

        Commands::Random { length, alnum } => {
            let length = length.unwrap_or(config.token.random_length);
            token::random(length, *alnum || config.token.alphanumeric_only)
        }

        Commands::Unique { prefix, bare } => {
            if *bare {
                token::unique(None)
            } else {
                let prefix = prefix.as_deref().unwrap_or(&config.token.unique_prefix);
                token::unique(Some(prefix))
            }
        }

        Commands::Uuid => token::uuid(),

        Commands::Camel { text, glue, keep_case } => {
            StringUtils::split_camel_case(text, glue, !keep_case)
        }

        Commands::Clean { text, lower, slashes } => StringUtils::clean(text, *lower, *slashes),

        Commands::Esc { text, xml } => {
            if *xml {
                StringUtils::esc_xml(text)
            } else {
                StringUtils::esc(text)
            }
        }

        Commands::InitConfig => write_config(config, config_path).await?.display().to_string(),
    };

    debug!("Command {} produced {} bytes", command.name(), output.len());
    Ok(output)
}

/// Save `config` to `path`, or to the default location when no path is given
async fn write_config(config: &AppConfig, path: Option<&str>) -> StringKitResult<PathBuf> {
    match path {
        Some(path) => {
            config.save_to_file(path).await?;
            Ok(PathBuf::from(path))
        }
        None => {
            config.save().await?;
            Ok(get_config_path())
        }
    }
}
