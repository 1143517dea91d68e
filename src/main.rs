use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use neko_poster::config::LogLevel;
use neko_poster::{Category, Config, NekoPoster, Result, Visibility};

#[derive(Debug, Parser)]
#[command(
    name = "neko-poster",
    version,
    about = "Fetch a neko image and post it to a Mastodon-compatible instance",
    long_about = None
)]
struct Args {
    /// Image category to post (see --list). Defaults to the configured category.
    category: Option<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the instance to post to.
    #[arg(long, env = "NEKO_INSTANCE", value_name = "URL")]
    instance: Option<String>,

    /// Access token for the instance.
    #[arg(long, env = "NEKO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Directory images are downloaded to.
    #[arg(long, env = "NEKO_IMAGE_DIR", value_name = "DIR")]
    image_dir: Option<PathBuf>,

    /// Status visibility.
    #[arg(long, value_enum)]
    visibility: Option<Visibility>,

    /// Text posted along with the image.
    #[arg(long, value_name = "TEXT")]
    status_message: Option<String>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Do not print progress to the console.
    #[arg(long)]
    no_log: bool,

    /// Number of images to post.
    #[arg(long, default_value_t = 1, value_name = "N")]
    times: u32,

    /// Seconds to wait between two posts.
    #[arg(long, default_value_t = 0, value_name = "SECS")]
    interval: u64,

    /// Print the known categories and exit.
    #[arg(long)]
    list: bool,
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;

    if let Some(instance) = &args.instance {
        config.instance = instance.clone();
    }
    if let Some(token) = &args.token {
        config.token = token.clone();
    }
    if let Some(image_dir) = &args.image_dir {
        config.image_dir = image_dir.clone();
    }
    if let Some(visibility) = args.visibility {
        config.visibility = visibility;
    }
    if let Some(message) = &args.status_message {
        config.status_message = message.clone();
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if args.no_log {
        config.log_task = false;
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(config: Config, category: &str, times: u32, interval: Duration) -> Result<()> {
    let category: Category = category.parse()?;
    let mut poster = NekoPoster::new(config)?;
    let visibility = poster.config().visibility;
    poster.create_img_dir();

    for round in 1..=times {
        poster.post_neko(category.as_str(), visibility).await?;
        poster.clean_cache();

        if round < times && !interval.is_zero() {
            info!(round, "Waiting {}s before the next post", interval.as_secs());
            tokio::time::sleep(interval).await;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.list {
        for category in Category::ALL {
            println!("{}", category);
        }
        return ExitCode::SUCCESS;
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.log_task {
        init_logging(config.log_level);
    }

    let category = args
        .category
        .clone()
        .unwrap_or_else(|| config.category.clone());

    match run(config, &category, args.times, Duration::from_secs(args.interval)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> String {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    const FILE_CONFIG: &str = r#"
instance = "https://file.social"
token = "file-token"
image_dir = "from-file"
visibility = "unlisted"
status_message = "from file"
"#;

    #[test]
    fn test_config_file_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, FILE_CONFIG);
        let args = Args::try_parse_from([
            "neko-poster",
            "--config",
            path.as_str(),
            "--image-dir",
            "from-cli",
        ])
        .unwrap();

        let config = build_config(&args).unwrap();

        assert_eq!(config.instance, "https://file.social");
        assert_eq!(config.token, "file-token");
        assert_eq!(config.visibility, Visibility::Unlisted);
        assert_eq!(config.status_message, "from file");
        assert!(config.log_task);
    }

    #[test]
    fn test_cli_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, FILE_CONFIG);
        let args = Args::try_parse_from([
            "neko-poster",
            "happy",
            "--config",
            path.as_str(),
            "--instance",
            "https://cli.social",
            "--token",
            "cli-token",
            "--image-dir",
            "from-cli",
            "--visibility",
            "direct",
            "--status-message",
            "nya",
            "--log-level",
            "debug",
            "--no-log",
        ])
        .unwrap();

        let config = build_config(&args).unwrap();

        assert_eq!(args.category.as_deref(), Some("happy"));
        assert_eq!(config.instance, "https://cli.social");
        assert_eq!(config.token, "cli-token");
        assert_eq!(config.image_dir, PathBuf::from("from-cli"));
        assert_eq!(config.visibility, Visibility::Direct);
        assert_eq!(config.status_message, "nya");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.log_task);
    }

    #[test]
    fn test_env_between_file_and_cli() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, FILE_CONFIG);

        // Only this test touches NEKO_IMAGE_DIR; the others pass --image-dir.
        unsafe { std::env::set_var("NEKO_IMAGE_DIR", "from-env") };
        let from_env = Args::try_parse_from(["neko-poster", "--config", path.as_str()]).unwrap();
        let from_cli =
            Args::try_parse_from(["neko-poster", "--config", path.as_str(), "--image-dir", "from-cli"])
                .unwrap();
        unsafe { std::env::remove_var("NEKO_IMAGE_DIR") };

        let from_file = Args::try_parse_from(["neko-poster", "--config", path.as_str()]).unwrap();

        assert_eq!(
            build_config(&from_env).unwrap().image_dir,
            PathBuf::from("from-env")
        );
        assert_eq!(
            build_config(&from_cli).unwrap().image_dir,
            PathBuf::from("from-cli")
        );
        assert_eq!(
            build_config(&from_file).unwrap().image_dir,
            PathBuf::from("from-file")
        );
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "instance = \"https://file.social\"\n");
        let args = Args::try_parse_from([
            "neko-poster",
            "--config",
            path.as_str(),
            "--image-dir",
            "images",
        ])
        .unwrap();

        let err = build_config(&args).unwrap_err();
        assert!(matches!(err, neko_poster::NekoError::Config(ref m) if m.contains("token")));
    }

    #[test]
    fn test_missing_instance_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "");
        let args = Args::try_parse_from([
            "neko-poster",
            "--config",
            path.as_str(),
            "--token",
            "t",
            "--image-dir",
            "images",
        ])
        .unwrap();

        let err = build_config(&args).unwrap_err();
        assert!(matches!(err, neko_poster::NekoError::Config(ref m) if m.contains("instance")));
    }
}
