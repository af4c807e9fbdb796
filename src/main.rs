use firebind::config::{load_config, print_schema};
use firebind::startup;
use firebind::utils::init_logging;
use tracing::{error, info};

fn main() {
    if std::env::args().skip(1).any(|arg| arg == "--schema") {
        print_schema();
        return;
    }

    let config = load_config();
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    match startup::init(&config) {
        Ok(ctx) => info!(
            project_id = ctx.app().options().project_id.as_str(),
            app = ctx.app().name(),
            "Bound auth and database clients"
        ),
        Err(e) => {
            error!("Failed to initialize clients: {}", e);
            std::process::exit(1);
        }
    }
}
