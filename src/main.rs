use clap::Parser;
use std::env;

use finlite::api::ProjectArgs;
use finlite::prefs::DEFAULT_PREFS_PATH;

#[tokio::main]
async fn main() {
    env_logger::init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            let prefs_path = raw_args
                .get(3)
                .cloned()
                .unwrap_or_else(|| DEFAULT_PREFS_PATH.to_string());
            if let Err(e) = finlite::api::run_http_server(port, &prefs_path).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("project") => {
            let args = ProjectArgs::parse_from(&raw_args[1..]);
            println!("{}", finlite::api::one_shot_output(&args));
        }
        _ => {
            eprintln!("Usage: finlite serve [port] [prefs-path]");
            eprintln!("       finlite project [--monthly N] [--years N] [--rate PCT] [--inflation PCT] [--real] [--show-invested] [--svg]");
            std::process::exit(1);
        }
    }
}
