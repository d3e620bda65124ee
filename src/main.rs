use clap::Parser;
use wayfinder::cli::{
    handle_completions, handle_config_init, handle_directions, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => wayfinder::cli::serve::run_serve(args).await,
        Commands::Directions(args) => handle_directions(&args).await.map(|output| {
            println!("{}", output);
        }),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
