// miscue-cli: shared utilities for the command-line tool.

use std::path::{Path, PathBuf};
use std::process;

use miscue_core::Category;
use miscue_fst::Homophones;
use miscue_lm::{LmConfig, PromptLm};

/// Options parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    /// Homophone file, one group per line.
    pub homophones: Option<PathBuf>,
    /// Line written before the automaton.
    pub id: Option<String>,
    /// TOML configuration file.
    pub config: Option<PathBuf>,
    /// Extensions enabled on top of the configuration file.
    pub extensions: Vec<Category>,
    /// Overrides `jump_span` from the configuration file.
    pub jump_span: Option<usize>,
    /// Fail unless the built automaton is deterministic.
    pub check: bool,
}

/// Parse command-line arguments (without the program name).
///
/// Both `--flag VALUE` and `--flag=VALUE` are accepted for long options.
pub fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        let (name, inline) = match arg.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (arg.as_str(), None),
        };
        let mut value = || -> Result<String, String> {
            if let Some(v) = inline.clone() {
                return Ok(v);
            }
            match args.get(i + 1) {
                Some(v) => {
                    skip_next = true;
                    Ok(v.clone())
                }
                None => Err(format!("{name} requires a value")),
            }
        };
        match name {
            "-H" | "--homophones" => options.homophones = Some(PathBuf::from(value()?)),
            "--id" => options.id = Some(value()?),
            "-c" | "--config" => options.config = Some(PathBuf::from(value()?)),
            "--enable" => {
                let v = value()?;
                let category = parse_category(&v)?;
                if !options.extensions.contains(&category) {
                    options.extensions.push(category);
                }
            }
            "--jump-span" => {
                let v = value()?;
                let span = v
                    .parse::<usize>()
                    .map_err(|_| format!("invalid jump span: {v}"))?;
                options.jump_span = Some(span);
            }
            "--check" => options.check = true,
            "-h" | "--help" => {}
            _ => return Err(format!("unknown argument: {arg}")),
        }
    }

    Ok(options)
}

fn parse_category(name: &str) -> Result<Category, String> {
    Category::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        format!("unknown miscue category: {name} (expected one of {})", known.join(", "))
    })
}

/// Load the configuration file, if any, and apply the command-line overrides.
pub fn load_config(options: &Options) -> Result<LmConfig, String> {
    let mut config = match &options.config {
        Some(path) => LmConfig::load_from(path).map_err(|e| e.to_string())?,
        None => LmConfig::default(),
    };
    for &category in &options.extensions {
        config = config.with_extension(category);
    }
    if let Some(span) = options.jump_span {
        config.jump_span = span;
    }
    Ok(config)
}

/// Load the homophone file, if any.
pub fn load_homophones(path: Option<&Path>) -> Result<Homophones, String> {
    let homophones = Homophones::load(path).map_err(|e| e.to_string())?;
    if let Some(path) = path {
        if homophones.is_empty() {
            log::warn!("{} contains no homophone groups", path.display());
        } else {
            log::debug!("{} words with homophones in {}", homophones.len(), path.display());
        }
    }
    Ok(homophones)
}

/// Build the model for `prompt`, a whitespace separated word sequence.
pub fn build_model(options: &Options, prompt: &str) -> Result<PromptLm, String> {
    let config = load_config(options)?;
    let homophones = load_homophones(options.homophones.as_deref())?;
    let lm = PromptLm::build(prompt.split_whitespace(), homophones, &config)
        .map_err(|e| e.to_string())?;
    if options.check && !lm.is_deterministic() {
        return Err("built automaton is not deterministic".to_string());
    }
    Ok(lm)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
