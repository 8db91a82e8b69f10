use clap::Subcommand;
use purepath_core::coach::credentials;
use purepath_core::{Config, Conversation, GeminiClient};

use super::{read_line, CmdResult};

#[derive(Subcommand)]
pub enum CoachAction {
    /// Interactive chat (`/quit` or end of input ends it)
    Chat,
    /// Ask a single question and print the reply
    Ask {
        message: String,
    },
    /// Store the Gemini API key in the OS keyring
    SetKey {
        /// Read from stdin when omitted
        key: Option<String>,
    },
    /// Remove the stored API key
    ClearKey,
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

pub fn run(action: CoachAction) -> CmdResult {
    match action {
        CoachAction::Chat => {
            let client = GeminiClient::from_config(&Config::load_or_default().coach)?;
            let rt = runtime()?;
            let mut chat = Conversation::default();
            println!("Coach: {}", chat.messages()[0].text);

            while let Some(line) = read_line("\nYou: ")? {
                if line.trim() == "/quit" {
                    break;
                }
                match rt.block_on(chat.send(&client, &line)) {
                    Ok(reply) => println!("\nCoach: {}", reply.text),
                    Err(e) => eprintln!("{e}"),
                }
            }
        }
        CoachAction::Ask { message } => {
            let client = GeminiClient::from_config(&Config::load_or_default().coach)?;
            let rt = runtime()?;
            let mut chat = Conversation::default();
            let reply = rt.block_on(chat.send(&client, &message))?;
            println!("{}", reply.text);
        }
        CoachAction::SetKey { key } => {
            let key = match key {
                Some(k) => k,
                None => read_line("Gemini API key: ")?.unwrap_or_default(),
            };
            if key.trim().is_empty() {
                return Err("API key is empty".into());
            }
            credentials::store_api_key(&key)?;
            eprintln!("API key stored in the OS keyring");
        }
        CoachAction::ClearKey => {
            credentials::clear_api_key()?;
            eprintln!("API key removed");
        }
    }
    Ok(())
}
