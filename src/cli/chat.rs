use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::ValueEnum;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::analyze::read_upload;
use crate::assistant::{Language, Submission, submit};
use crate::core::{AppConfig, AssistError};
use crate::openai::OpenAiChat;
use crate::session::{ApiKey, Session, Speaker};

const HELP: &str = "Commands:
  /upload <path>    attach a file (replaces the current one)
  /code <language>  paste a code snippet, finish with /end
  /key <api key>    set the OpenAI API key
  /clear            clear the conversation and the uploaded file
  /history          print the conversation
  /help             show this message
Anything else is sent as a question.";

#[derive(Debug, PartialEq)]
pub enum ReplCommand {
    Upload(PathBuf),
    Code(Language),
    Key(String),
    Clear,
    History,
    Help,
    Ask(String),
    Empty,
}

pub fn parse_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(ReplCommand::Ask(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let cmd = match (name, arg) {
        ("upload", "") => bail!("Usage: /upload <path>"),
        ("upload", path) => ReplCommand::Upload(PathBuf::from(path)),
        ("code", "") => ReplCommand::Code(Language::default()),
        ("code", lang) => match Language::from_str(lang, true) {
            Ok(lang) => ReplCommand::Code(lang),
            Err(_) => bail!("Unknown language: {}", lang),
        },
        ("key", key) => ReplCommand::Key(key.to_string()),
        ("clear", _) => ReplCommand::Clear,
        ("history", _) => ReplCommand::History,
        ("help", _) => ReplCommand::Help,
        _ => bail!("Unknown command: /{}. Try /help", name),
    };
    Ok(cmd)
}

/// Ctrl-C or Ctrl-D at a secondary prompt cancels the pending input
/// instead of ending the REPL.
fn cancellable(readline: Result<String, ReadlineError>) -> Result<Option<String>> {
    match readline {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Read lines until `/end` and return them joined, or `None` if cancelled.
fn read_snippet(rl: &mut DefaultEditor) -> Result<Option<String>> {
    let mut lines = Vec::new();
    loop {
        let Some(line) = cancellable(rl.readline("... "))? else {
            return Ok(None);
        };
        if line.trim() == "/end" {
            break;
        }
        lines.push(line);
    }
    Ok(Some(lines.join("\n")))
}

pub async fn run(config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let model = OpenAiChat::from_config(&config);
    let mut session = Session::new(config.openai_api_key.as_deref().and_then(ApiKey::new));

    println!("{}", HELP);

    loop {
        let readline = rl.readline(">>> ");
        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };
        let _ = rl.add_history_entry(line.as_str());

        let submission = match parse_command(&line) {
            Ok(ReplCommand::Empty) => continue,
            Ok(ReplCommand::Help) => {
                println!("{}", HELP);
                continue;
            }
            Ok(ReplCommand::Upload(path)) => {
                match read_upload(&path)
                    .and_then(|(name, bytes)| Ok(session.upload(&name, &bytes)?.kind()))
                {
                    Ok(kind) => println!("Uploaded {} ({})", path.display(), kind),
                    Err(e) => println!("{}", e),
                }
                continue;
            }
            Ok(ReplCommand::Key(key)) => {
                session.set_api_key(ApiKey::new(&key));
                continue;
            }
            Ok(ReplCommand::Clear) => {
                session.clear();
                println!("Conversation cleared.");
                continue;
            }
            Ok(ReplCommand::History) => {
                for msg in session.messages() {
                    let who = match msg.role {
                        Speaker::User => "you",
                        Speaker::Assistant => "assistant",
                    };
                    println!("[{}]\n{}\n", who, msg.content);
                }
                continue;
            }
            Ok(ReplCommand::Code(language)) => {
                let Some(code) = read_snippet(&mut rl)? else {
                    println!("Snippet cancelled.");
                    continue;
                };
                let Some(question) =
                    cancellable(rl.readline("Question (enter for default): "))?
                else {
                    println!("Snippet cancelled.");
                    continue;
                };
                Submission {
                    question: Some(question),
                    code: Some(code),
                    language,
                }
            }
            Ok(ReplCommand::Ask(question)) => Submission {
                question: Some(question),
                ..Default::default()
            },
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match submit(&mut session, &submission, &model, config.history_window).await {
            Ok(reply) => println!("{}", reply.content),
            Err(e) if e.is::<AssistError>() => println!("{}", e),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question() {
        assert_eq!(
            parse_command("  How do I find ORFs?  ").unwrap(),
            ReplCommand::Ask("How do I find ORFs?".to_string())
        );
        assert_eq!(parse_command("   ").unwrap(), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("/upload data/reads.fa").unwrap(),
            ReplCommand::Upload(PathBuf::from("data/reads.fa"))
        );
        assert_eq!(
            parse_command("/code R").unwrap(),
            ReplCommand::Code(Language::R)
        );
        assert_eq!(
            parse_command("/code c++").unwrap(),
            ReplCommand::Code(Language::Cpp)
        );
        assert_eq!(
            parse_command("/code").unwrap(),
            ReplCommand::Code(Language::Python)
        );
        assert_eq!(
            parse_command("/key sk-123").unwrap(),
            ReplCommand::Key("sk-123".to_string())
        );
        assert_eq!(parse_command("/clear").unwrap(), ReplCommand::Clear);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("/upload").is_err());
        assert!(parse_command("/code cobol").is_err());
        assert!(parse_command("/nope").is_err());
    }

    #[test]
    fn test_interrupt_cancels_pending_input() {
        assert_eq!(cancellable(Err(ReadlineError::Interrupted)).unwrap(), None);
        assert_eq!(cancellable(Err(ReadlineError::Eof)).unwrap(), None);
        assert_eq!(
            cancellable(Ok("print(1)".to_string())).unwrap(),
            Some("print(1)".to_string())
        );
        assert!(cancellable(Err(ReadlineError::Io(std::io::Error::other("tty gone")))).is_err());
    }
}
