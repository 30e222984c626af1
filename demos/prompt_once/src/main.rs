use completion_proxy::{
    clients::openai::Client, completion::CompletionProxyBuilder, config::Config, Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    config.logging.init();

    // Direct calls leave the output length to the provider.
    let proxy = CompletionProxyBuilder::default()
        .client(Client::from_config(&config.openai))
        .model(config.model)
        .build()?;

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let prompt = if prompt.is_empty() {
        "Tell me a joke.".to_string()
    } else {
        prompt
    };

    println!("{}", proxy.complete_or_message(&prompt).await);

    Ok(())
}
