use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use grafik::SerializeOptions;
use grafik::Value;
use grafik::Variables;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct FmtCmd {
    #[arg(
        help="Fail (without printing) if any file is not already in canonical \
             form.",
        long,
    )]
    check: bool,

    #[arg(
        help="Print each document on a single line instead of one selection \
             per line.",
        long,
    )]
    compact: bool,

    #[arg(
        default_value_t=grafik::DEFAULT_INDENT,
        help="Number of spaces per nesting level in the pretty layout.",
        long,
    )]
    indent: usize,

    #[arg(
        help="Define a `$name` variable as a string value. May be repeated.",
        long="var",
        value_name="NAME=VALUE",
        value_parser=parse_variable,
    )]
    vars: Vec<(String, String)>,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more query files or directories containing \
             query files to format.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

impl FmtCmd {
    fn serialize_options(&self) -> SerializeOptions {
        if self.compact {
            SerializeOptions::compact()
        } else {
            SerializeOptions::pretty(self.indent)
        }
    }

    fn variables(&self) -> Variables {
        self.vars
            .iter()
            .map(|(name, value)| (name.to_string(), Value::from(value.as_str())))
            .collect()
    }

    /// Finds every query file at or under the input paths.
    ///
    /// A single explicitly named file is used even if its extension doesn't
    /// match `--graphql-file-exts`.
    fn find_file_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        let graphql_file_exts: HashSet<String> =
            self.graphql_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            for entry in WalkDir::new(path.as_path()).follow_links(true).sort_by_file_name() {
                let entry = entry.with_context(|| {
                    format!("Failed to scan {}", path.display())
                })?;
                let path = entry.path();
                if !entry.file_type().is_file() {
                    log::trace!("Skipping non-file: {path:#?}.");
                    continue;
                }
                if let Some(ext) = path.extension().map(|s| s.to_string_lossy())
                    && graphql_file_exts.contains(&*ext) {
                    log::trace!("Found query file at {path:#?}.");
                    file_paths.push(path.to_path_buf());
                }
            }
        }

        if file_paths.is_empty()
            && self.file_or_dir_paths.len() == 1
            && let Some(first_arg_path) = self.file_or_dir_paths.first()
            && first_arg_path.is_file() {
            log::warn!(
                "Proceeding to format {first_arg_path:#?} even though it \
                doesn't match any of the --graphql-file-exts ({}).",
                graphql_file_exts.iter()
                    .map(|ext| format!("`.{ext}`"))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            file_paths.push(first_arg_path.to_path_buf());
        }

        Ok(file_paths)
    }
}

#[inherent::inherent]
impl RunnableCommand for FmtCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let file_paths = match self.find_file_paths() {
            Ok(file_paths) => file_paths,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };
        if file_paths.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} No query files found.",
                output_utils::RED_X,
            ));
        }
        log::debug!("Found {} query files to format.", file_paths.len());

        let file_count = file_paths.len();
        let options = Arc::new(self.serialize_options());
        let variables = Arc::new(self.variables());
        let tasks = file_paths
            .into_iter()
            .map(|path| {
                let options = Arc::clone(&options);
                let variables = Arc::clone(&variables);
                tokio::task::spawn_blocking(move || format_file(path, &variables, &options))
            })
            .collect::<Vec<_>>();

        let mut errors = vec![];
        let mut formatted_docs = vec![];
        let mut non_canonical_paths = vec![];
        for task in tasks {
            match task.await {
                Ok(Ok(file)) => {
                    if self.check && !file.canonical {
                        log::debug!("{:#?} is not in canonical form.", file.path);
                        non_canonical_paths.push(file.path);
                    }
                    formatted_docs.push(file.text);
                },
                Ok(Err(detailed)) => errors.push(detailed),
                Err(e) => errors.push(format!("Formatting task failed: {e}")),
            }
        }

        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Failed to format {} of {} files:\n\n{}",
                output_utils::RED_X,
                errors.len(),
                file_count,
                errors.join("\n"),
            ));
        }

        if !self.check {
            return CommandResult::stdout(format_args!("{}", formatted_docs.join("\n\n")));
        }

        if non_canonical_paths.is_empty() {
            CommandResult::stdout(format_args!(
                "{} All {} files are in canonical form.",
                output_utils::GREEN_CHECK,
                file_count,
            ))
        } else {
            CommandResult::stderr(format_args!(
                "{} {} of {} files are not in canonical form:\n{}",
                output_utils::RED_X,
                non_canonical_paths.len(),
                file_count,
                non_canonical_paths.iter()
                    .map(|path| format!("  * {}", path.display()))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ))
        }
    }
}

/// One input file after formatting.
pub(super) struct FormattedFile {
    pub(super) canonical: bool,
    pub(super) path: PathBuf,
    pub(super) text: String,
}

/// Reads and formats one file. Runs on the blocking pool.
pub(super) fn format_file(
    path: PathBuf,
    variables: &Variables,
    options: &SerializeOptions,
) -> Result<FormattedFile, String> {
    let source = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let text = format_source(&path, &source, variables, options)?;
    Ok(FormattedFile {
        canonical: text == source.trim_end(),
        path,
        text,
    })
}

/// Parses `source` and re-serializes it. Parse failures are returned as a
/// rendered diagnostic pointing into the sanitized text.
pub(super) fn format_source(
    path: &Path,
    source: &str,
    variables: &Variables,
    options: &SerializeOptions,
) -> Result<String, String> {
    match grafik::parse(source, variables) {
        Ok(selections) => Ok(grafik::serialize_children(&selections, options)),
        Err(e) => {
            let file_name = path.display().to_string();
            let sanitized = grafik::sanitize(source);
            Err(e.format_detailed(Some(&file_name), Some(&sanitized)))
        },
    }
}

/// Parses a `NAME=VALUE` pair for `--var`.
pub(super) fn parse_variable(raw: &str) -> Result<(String, String), String> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(format!("expected `NAME=VALUE`, found `{raw}`"));
    };
    let name = name.trim().trim_start_matches('$');
    if name.is_empty() {
        return Err(format!("missing variable name in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
