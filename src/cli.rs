use clap::Parser;
use std::path::PathBuf;

/// Convert the newest Gatling simulation.log into a JUnit XML report
#[derive(Parser, Debug, Clone, Default)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Directory holding Gatling run directories
    #[clap(long, default_value = crate::defaults::RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// Name prefix of the run directories to consider
    #[clap(long, default_value = crate::defaults::SIMULATION_PREFIX)]
    pub simulation_prefix: String,

    /// Read this simulation.log directly instead of searching the results directory
    #[clap(long)]
    pub log_file: Option<PathBuf>,

    /// Directory for the JUnit report (default: <results-dir>/junit)
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// File name of the JUnit report
    #[clap(long, default_value = crate::defaults::OUTPUT_FILE)]
    pub output_file: String,

    /// Also write a JSON run summary to this path
    #[clap(long)]
    pub summary_json: Option<PathBuf>,

    /// Verbose output
    #[clap(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}

/// Where the log comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogSource {
    /// Search `results_dir` for the newest run directory named `prefix*`.
    Discover { results_dir: PathBuf, prefix: String },
    /// Use the given file as is.
    File(PathBuf),
}

/// Resolved configuration for one conversion run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    pub source: LogSource,
    pub output_path: PathBuf,
    pub summary_json: Option<PathBuf>,
}

impl From<&Args> for ReportConfig {
    fn from(args: &Args) -> Self {
        let source = match args.log_file {
            Some(ref path) => LogSource::File(path.clone()),
            None => LogSource::Discover {
                results_dir: args.results_dir.clone(),
                prefix: args.simulation_prefix.clone(),
            },
        };
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| args.results_dir.join(crate::defaults::JUNIT_DIR));

        Self {
            source,
            output_path: output_dir.join(&args.output_file),
            summary_json: args.summary_json.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_layout() {
        let args = Args::parse_from(["gatling-junit"]);
        let config = ReportConfig::from(&args);

        assert_eq!(
            config.source,
            LogSource::Discover {
                results_dir: PathBuf::from("target/gatling"),
                prefix: "javaapitestsimulation".to_string(),
            }
        );
        assert_eq!(
            config.output_path,
            PathBuf::from("target/gatling/junit/TEST-JavaApiTestSimulation.xml")
        );
        assert_eq!(config.summary_json, None);
        assert!(!args.verbose);
    }

    #[test]
    fn test_explicit_log_and_output() {
        let args = Args::parse_from([
            "gatling-junit",
            "--log-file",
            "/tmp/run/simulation.log",
            "--output-dir",
            "/tmp/reports",
            "--output-file",
            "TEST-Quick.xml",
            "--summary-json",
            "/tmp/reports/summary.json",
            "-v",
        ]);
        let config = ReportConfig::from(&args);

        assert_eq!(
            config.source,
            LogSource::File(PathBuf::from("/tmp/run/simulation.log"))
        );
        assert_eq!(config.output_path, PathBuf::from("/tmp/reports/TEST-Quick.xml"));
        assert_eq!(
            config.summary_json,
            Some(PathBuf::from("/tmp/reports/summary.json"))
        );
        assert!(args.verbose);
    }

    #[test]
    fn test_custom_results_dir_moves_default_output() {
        let args = Args::parse_from([
            "gatling-junit",
            "--results-dir",
            "build/reports/gatling",
            "--simulation-prefix",
            "quicktestsimulation",
        ]);
        let config = ReportConfig::from(&args);

        assert_eq!(
            config.output_path,
            PathBuf::from("build/reports/gatling/junit/TEST-JavaApiTestSimulation.xml")
        );
    }
}
