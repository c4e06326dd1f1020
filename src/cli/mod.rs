use crate::{
    config::Settings,
    core::{agent::DEFAULT_QUESTION, Agent, Ask, NameChain},
    tools::WikipediaTool,
    web,
};
use clap::{Arg, ArgMatches, Command};
use tracing::{error, info};

const DEFAULT_ANIMAL: &str = "cat";
const DEFAULT_COLOR: &str = "Brown";

fn command() -> Command {
    Command::new("pet-namer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Suggest pet names with a hosted language model")
        .after_help("Without a subcommand, runs `names` with its defaults.")
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("Provider API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("OpenAI-compatible base URL (or set OPENAI_BASE_URL env var)"),
        )
        .subcommand(
            Command::new("names")
                .about("Print five name suggestions for one pet")
                .arg(
                    Arg::new("animal")
                        .short('a')
                        .long("animal")
                        .value_name("TYPE")
                        .help("Animal type")
                        .default_value(DEFAULT_ANIMAL),
                )
                .arg(
                    Arg::new("color")
                        .short('c')
                        .long("color")
                        .value_name("COLOR")
                        .help("Pet color")
                        .default_value(DEFAULT_COLOR),
                ),
        )
        .subcommand(
            Command::new("agent")
                .about("Ask the Wikipedia-backed agent one question")
                .arg(
                    Arg::new("question")
                        .help("Question for the agent")
                        .index(1)
                        .default_value(DEFAULT_QUESTION),
                )
                .arg(
                    Arg::new("max-iterations")
                        .short('i')
                        .long("max-iterations")
                        .value_name("COUNT")
                        .value_parser(clap::value_parser!(usize))
                        .help("Maximum agent iterations"),
                )
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(clap::ArgAction::SetTrue)
                        .help("Print the full agent trace after the answer"),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the web form")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Bind address (or set HOST env var)"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(clap::value_parser!(u16))
                        .help("Port (or set PORT env var)"),
                ),
        )
}

/// CLI entry point for the pet-namer tool
///
/// Results go to stdout; logs go to stderr.
pub async fn run() -> anyhow::Result<()> {
    let matches = command().get_matches();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(&matches)?;

    match matches.subcommand() {
        Some(("names", sub)) => run_names(&settings, sub).await,
        Some(("agent", sub)) => run_agent(&settings, sub).await,
        Some(("serve", sub)) => run_serve(settings, sub).await,
        Some((other, _)) => anyhow::bail!("unknown subcommand: {}", other),
        None => generate_names(&settings, DEFAULT_ANIMAL, DEFAULT_COLOR).await,
    }
}

fn load_settings(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let api_key = global_value(matches, "api-key");
    let base_url = global_value(matches, "base-url");

    let settings = Settings::from_env(|key| match key {
        "OPENAI_API_KEY" => api_key.clone(),
        "OPENAI_BASE_URL" => base_url.clone(),
        _ => None,
    })?;

    Ok(settings)
}

fn global_value(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned().or_else(|| {
        matches
            .subcommand()
            .and_then(|(_, sub)| sub.get_one::<String>(id).cloned())
    })
}

async fn run_names(settings: &Settings, matches: &ArgMatches) -> anyhow::Result<()> {
    let animal = matches
        .get_one::<String>("animal")
        .map(String::as_str)
        .unwrap_or(DEFAULT_ANIMAL);
    let color = matches
        .get_one::<String>("color")
        .map(String::as_str)
        .unwrap_or(DEFAULT_COLOR);

    generate_names(settings, animal, color).await
}

async fn generate_names(settings: &Settings, animal: &str, color: &str) -> anyhow::Result<()> {
    info!("Generating names for a {} {}", color, animal);
    let chain = NameChain::from_config(settings.name_config())?;

    match chain.generate_pet_name(animal, color).await {
        Ok(names) => {
            println!("{}", names);
            Ok(())
        }
        Err(e) => {
            error!("Name generation failed: {}", e);
            Err(e.into())
        }
    }
}

async fn run_agent(settings: &Settings, matches: &ArgMatches) -> anyhow::Result<()> {
    let question = matches
        .get_one::<String>("question")
        .map(String::as_str)
        .unwrap_or(DEFAULT_QUESTION);
    let max_iterations = matches
        .get_one::<usize>("max-iterations")
        .copied()
        .unwrap_or(settings.max_iterations);

    let wikipedia = WikipediaTool::new().with_api_url(settings.wikipedia_api_url.clone());
    let agent = Agent::with_wikipedia(settings.agent_config(), wikipedia)?
        .with_max_iterations(max_iterations);

    info!("Running agent with question: {}", question);
    info!("Using model: {}", settings.chat_model);

    let outcome = if matches.get_flag("trace") {
        agent.run_with_steps(question).await.map(|result| {
            println!("{}", result.replay());
            result.output
        })
    } else {
        agent.ask(question).await
    };

    match outcome {
        Ok(answer) => {
            println!("{}", answer);
            info!("Agent execution completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Agent execution failed: {}", e);
            Err(e.into())
        }
    }
}

async fn run_serve(mut settings: Settings, matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(host) = matches.get_one::<String>("host") {
        settings.host = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        settings.port = *port;
    }

    let chain = NameChain::from_config(settings.name_config())?;
    web::serve(settings.socket_addr()?, chain).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_names_defaults() {
        let matches = command().get_matches_from(["pet-namer", "names"]);
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "names");
        assert_eq!(sub.get_one::<String>("animal").unwrap(), "cat");
        assert_eq!(sub.get_one::<String>("color").unwrap(), "Brown");
    }

    #[test]
    fn test_no_subcommand_is_accepted() {
        let matches = command().get_matches_from(["pet-namer", "-k", "sk-cli"]);
        assert!(matches.subcommand().is_none());
        assert_eq!(global_value(&matches, "api-key").as_deref(), Some("sk-cli"));
    }

    #[test]
    fn test_agent_default_question() {
        let matches = command().get_matches_from(["pet-namer", "agent"]);
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("question").unwrap(), DEFAULT_QUESTION);
    }

    #[test]
    fn test_global_api_key_after_subcommand() {
        let matches =
            command().get_matches_from(["pet-namer", "serve", "--port", "9000", "-k", "sk-cli"]);
        let settings = load_settings(&matches).unwrap();
        assert_eq!(settings.api_key, "sk-cli");
    }
}
