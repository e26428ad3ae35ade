use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use pixel_core::{
    build_src_url, generate_candidates, probe_all, select_placeholder, with_deadline,
    CandidateSet, Category, DisplayState, Folder, ImageRequest, LoadAction, MountPolicy,
    PlaceholderAssets, ProgressiveLoader, Resolution, SrcParams, DEFAULT_ASSET_BASE,
    DEFAULT_BACKEND_URL,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

mod fetch;

#[derive(Parser)]
#[command(name = "pixel-cli", version, about = "Inspect and probe pixel image candidates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the backend URL for one format.
    Url {
        #[command(flatten)]
        request: RequestArgs,
        /// Format token; defaults to --mime-type.
        #[arg(long)]
        format: Option<String>,
    },
    /// Print the ordered candidate set.
    Candidates {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long)]
        json: bool,
    },
    /// Print the placeholder set shown after a failed load.
    Placeholder {
        #[arg(long = "type", default_value = "normal")]
        category: String,
        #[arg(long)]
        no_avif: bool,
        #[arg(long)]
        no_webp: bool,
        #[arg(long, env = "PIXEL_ASSET_BASE", default_value = DEFAULT_ASSET_BASE)]
        asset_base: String,
        #[arg(long)]
        json: bool,
    },
    /// Fetch every candidate from a live backend and report what would be shown.
    Probe {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long, env = "PIXEL_ORIGIN", default_value = "http://localhost:8080")]
        origin: String,
        #[arg(long, env = "PIXEL_ASSET_BASE", default_value = DEFAULT_ASSET_BASE)]
        asset_base: String,
        #[arg(long)]
        timeout_ms: Option<u64>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone, Debug)]
struct RequestArgs {
    #[arg(long)]
    src: String,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    quality: Option<u32>,
    #[arg(long)]
    user_id: Option<String>,
    #[arg(long, default_value = "public")]
    folder: String,
    #[arg(long = "type", default_value = "normal")]
    category: String,
    #[arg(long, default_value = "jpeg")]
    mime_type: String,
    #[arg(long)]
    no_avif: bool,
    #[arg(long)]
    no_webp: bool,
    #[arg(long)]
    direct: bool,
    #[arg(long, env = "PIXEL_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,
}

impl RequestArgs {
    fn to_request(&self) -> ImageRequest {
        ImageRequest::new(self.src.clone())
            .with_size(self.width, self.height)
            .with_quality(self.quality)
            .with_user_id(self.user_id.clone())
            .with_folder(Folder::from_token(&self.folder))
            .with_category(Category::from_token(&self.category))
            .with_base_format(self.mime_type.clone())
            .with_formats(!self.no_avif, !self.no_webp)
            .with_direct(self.direct)
            .with_backend_url(self.backend_url.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Url { request, format } => {
            let request = request.to_request();
            let format = format.unwrap_or_else(|| request.base_format.clone());
            println!("{}", build_src_url(&SrcParams::for_request(&request, &format)));
        }
        Commands::Candidates { request, json } => {
            let request = request.to_request();
            let candidates = generate_candidates(&request);
            if candidates.is_empty() {
                info!("direct mode, raw source is used as-is");
                if json {
                    println!("{}", serde_json::json!({ "direct": request.src }));
                } else {
                    println!("direct\t{}", request.src);
                }
            } else {
                print_set(&candidates, json)?;
            }
        }
        Commands::Placeholder {
            category,
            no_avif,
            no_webp,
            asset_base,
            json,
        } => {
            let assets = PlaceholderAssets::with_base(&asset_base);
            let set = select_placeholder(&assets, Category::from_token(&category), !no_avif, !no_webp);
            print_set(&set, json)?;
        }
        Commands::Probe {
            request,
            origin,
            asset_base,
            timeout_ms,
            json,
        } => {
            let request = request.to_request();
            let origin = Url::parse(&origin)?;
            let assets = PlaceholderAssets::with_base(&asset_base);
            let state = run_probe(&request, &origin, assets, timeout_ms).await;
            print_state(&state, &request, json)?;
        }
    }

    Ok(())
}

async fn run_probe(
    request: &ImageRequest,
    origin: &Url,
    assets: PlaceholderAssets,
    timeout_ms: Option<u64>,
) -> DisplayState {
    let client = reqwest::Client::new();
    let mut loader = ProgressiveLoader::with_policy(assets, MountPolicy::Probe);
    match loader.update(request) {
        LoadAction::Probe(batch) => {
            info!(
                generation = batch.generation.get(),
                candidates = batch.candidates.len(),
                %origin,
                "probing candidates"
            );
            let work = probe_all(&batch.candidates, |candidate| {
                fetch::probe_candidate(&client, origin, candidate)
            });
            let outcome = match timeout_ms {
                Some(ms) => with_deadline(work, tokio::time::sleep(Duration::from_millis(ms)), ms).await,
                None => work.await,
            };
            if let Err(err) = &outcome {
                warn!(%err, "probe batch failed");
            }
            match loader.resolve(batch.generation, outcome) {
                Resolution::Committed => info!("candidate set committed"),
                Resolution::Failed => info!(category = request.category.as_str(), "placeholder committed"),
                Resolution::Stale => warn!("probe batch went stale"),
            }
        }
        LoadAction::Committed => info!("nothing to probe"),
        LoadAction::Unchanged => {}
    }
    loader.state().clone()
}

fn print_state(
    state: &DisplayState,
    request: &ImageRequest,
    json: bool,
) -> Result<(), serde_json::Error> {
    let (label, set) = match state {
        DisplayState::Loading => ("loading", None),
        DisplayState::Committed(set) => ("committed", Some(set)),
        DisplayState::Failed(set) => ("placeholder", Some(set)),
    };
    let direct = set.map_or(true, CandidateSet::is_empty);
    if json {
        let value = match set {
            Some(set) if !direct => serde_json::json!({ "state": label, "candidates": set }),
            _ => serde_json::json!({ "state": label, "direct": request.src }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    println!("state: {label}");
    match set {
        Some(set) if !direct => print_set(set, false)?,
        _ => println!("direct\t{}", request.src),
    }
    Ok(())
}

fn print_set(set: &CandidateSet, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(set)?);
        return Ok(());
    }
    for candidate in set {
        let mime = if candidate.mime_type.is_empty() {
            "-"
        } else {
            candidate.mime_type.as_str()
        };
        println!("{mime}\t{}", candidate.url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_request(args: &[&str]) -> ImageRequest {
        let mut argv = vec!["pixel-cli", "candidates"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("valid args");
        match cli.command {
            Commands::Candidates { request, .. } => request.to_request(),
            _ => panic!("expected candidates command"),
        }
    }

    #[test]
    fn defaults_match_component_defaults() {
        let request = parse_request(&["--src", "cat.jpg"]);
        assert_eq!(request, ImageRequest::new("cat.jpg").with_backend_url(request.backend_url.clone()));
        assert!(request.avif && request.webp);
        assert_eq!(request.base_format, "jpeg");
    }

    #[test]
    fn flags_map_to_request() {
        let request = parse_request(&[
            "--src",
            "me.png",
            "--width",
            "64",
            "--type",
            "avatar",
            "--folder",
            "private",
            "--no-avif",
            "--mime-type",
            "png",
            "--user-id",
            "u1",
        ]);
        assert_eq!(request.width, Some(64));
        assert_eq!(request.category, Category::Avatar);
        assert_eq!(request.folder, Folder::Private);
        assert!(!request.avif);
        assert!(request.webp);
        assert_eq!(request.base_format, "png");
        assert_eq!(request.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn unknown_folder_and_type_normalize() {
        let request = parse_request(&["--src", "x", "--folder", "shared", "--type", "banner"]);
        assert_eq!(request.folder, Folder::Public);
        assert_eq!(request.category, Category::Normal);
    }

    #[tokio::test]
    async fn unreachable_backend_falls_back_to_placeholder() {
        let request = ImageRequest::new("cat.jpg").with_formats(false, true);
        let origin = Url::parse("http://127.0.0.1:9/").expect("origin");
        let state = run_probe(&request, &origin, PlaceholderAssets::default(), Some(5_000)).await;
        let DisplayState::Failed(set) = state else {
            panic!("expected placeholder state, got {state:?}");
        };
        let urls: Vec<&str> = set.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["/assets/pixel/noimage.webp", "/assets/pixel/noimage.jpg"]);
    }

    #[tokio::test]
    async fn direct_request_commits_without_network() {
        let request = ImageRequest::new("https://cdn.example/raw.gif").with_direct(true);
        let origin = Url::parse("http://127.0.0.1:9/").expect("origin");
        let state = run_probe(&request, &origin, PlaceholderAssets::default(), None).await;
        assert_eq!(state, DisplayState::Committed(CandidateSet::empty()));
    }
}
