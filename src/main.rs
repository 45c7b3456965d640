use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // The UI runtime may install its own logger; the first one wins.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    chat_widget::config::load_dotenv();
    init_tracing();
    tracing::info!("starting chat widget");
    dioxus::launch(chat_widget::ui::App);
}
