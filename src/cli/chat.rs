use std::env;
use std::path::Path;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{ChatSession, SubmitOutcome};

const SAMPLE_PROMPTS: &[&str] = &[
    "Tell me a fun fact about space.",
    "Describe the photo I just uploaded.",
    "Write a short story about a brave knight.",
    "What are the ingredients in this dish?",
];

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let api_url = env::var("QUIP_CHAT_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:2222/api/chat".to_string());
    let mut session = ChatSession::new(&api_url);

    println!("Start a new conversation. Try one of these:");
    for prompt in SAMPLE_PROMPTS {
        println!("  {}", prompt);
    }
    println!("Use /attach <path> to include a file, /detach to remove it.");

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if let Some(path) = line.strip_prefix("/attach ") {
                    let attachment = session.attach(Path::new(path.trim()));
                    println!(
                        "Attached {} ({})",
                        attachment.path.display(),
                        attachment.mime_type
                    );
                    continue;
                }
                if line.trim() == "/detach" {
                    session.clear_attachment();
                    println!("Attachment removed");
                    continue;
                }

                match session.submit(&line).await {
                    SubmitOutcome::Completed => {
                        if let Some(reply) = session.last_reply() {
                            println!("{}", reply);
                        }
                    }
                    SubmitOutcome::Ignored => {}
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
