//! Interactive session: read a request, print a recommendation, repeat.
//!
//! Type `exit` or `quit` (or send EOF) to stop.

use neko_match::config::Settings;
use neko_match::services::{load_catalog, open_store, AnthropicClient};
use neko_match::{logging, Recommender};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

fn is_sentinel(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let settings = Settings::load()?;
    logging::init(&settings.logging);

    let store = open_store(&settings.catalog).await?;
    let catalog = load_catalog(store.as_ref()).await?;
    let recommender = Recommender::new(Arc::new(AnthropicClient::from_settings(&settings.llm)?));

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{} breeds loaded. Describe the cat you want (\"exit\" to quit).\n", catalog.len()).as_bytes())
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if is_sentinel(line) {
            break;
        }

        // A failed request is reported and the session keeps going
        let output = match recommender.recommend(line, catalog.breeds()).await {
            Ok(recommendation) => format!("\n{}\n\n", recommendation.explanation.trim_end()),
            Err(e) => {
                tracing::error!("Request failed: {}", e);
                format!("\nSorry, something went wrong: {}\n\n", e)
            }
        };
        stdout.write_all(output.as_bytes()).await?;
    }

    Ok(())
}
