use clap::Parser;
use wasm_bindgen::prelude::*;

mod api;
mod notify;
mod puzzle;
mod suggest;
mod theme;
mod utils;
mod waiting;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Identify as this user towards the matchmaking API
    #[arg(short, long)]
    user: Option<String>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?} user: {:?}", args.seed, args.user);

    theme::Theme::init();

    let root = document()
        .get_element_by_id("app")
        .expect("Could not find id=\"app\" element");

    let props = waiting::WaitingProps {
        user_id: args.user.unwrap_or_else(|| "demo-user".to_string()),
        seed: args.seed.and_then(|s| s.parse().ok()),
    };

    log::debug!("App started");
    yew::Renderer::<waiting::WaitingView>::with_root_and_props(root, props).render();
}
