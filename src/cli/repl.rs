use log::info;
use std::error::Error;
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader };

use super::ChatArgs;
use crate::llm::{ Provider, ZhipuModel };
use crate::widget::{ ChatWidget, HttpRelayTransport, RelayTransport, EMPTY_PLACEHOLDER, MAX_CHARS };

const HELP: &str = "Commands: /provider <openai|zhipu>, /model <name>, /quit";

pub async fn run(args: ChatArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut widget = ChatWidget::new();
    widget.set_provider(args.provider.parse::<Provider>()?);
    widget.set_zhipu_model(args.model.parse::<ZhipuModel>()?);

    let transport = HttpRelayTransport::new(&args.relay_url);
    info!("Chatting with relay at {}", transport.endpoint());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    run_session(&mut widget, &transport, stdin, &mut stdout).await
}

/// Drives `widget` from `input` lines, writing replies to `out`.
pub async fn run_session<T, R, W>(
    widget: &mut ChatWidget,
    transport: &T,
    input: R,
    out: &mut W
) -> Result<(), Box<dyn Error + Send + Sync>>
    where T: RelayTransport + ?Sized, R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin
{
    out.write_all(format!("{}\n{}\n", EMPTY_PLACEHOLDER, HELP).as_bytes()).await?;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let reply = match command(&line) {
            Some(("/quit", _)) => {
                break;
            }
            Some(("/provider", name)) => {
                match name.parse::<Provider>() {
                    Ok(p) => {
                        widget.set_provider(p);
                        format!("Provider: {}", p.label())
                    }
                    Err(e) => e.to_string(),
                }
            }
            Some(("/model", name)) => {
                match name.parse::<ZhipuModel>() {
                    Ok(m) => {
                        widget.set_zhipu_model(m);
                        format!("Zhipu model: {}", m.label())
                    }
                    Err(e) => e.to_string(),
                }
            }
            _ => {
                widget.set_input(line.clone());
                if widget.is_over_limit() {
                    format!("Message too long ({}), limit is {} characters", widget.counter(), MAX_CHARS)
                } else if widget.submit(transport).await {
                    widget.take_scroll_request();
                    match widget.bubbles().last() {
                        Some(bubble) => format!("{}: {}", bubble.label, bubble.content),
                        None => continue,
                    }
                } else {
                    continue;
                }
            }
        };
        out.write_all(format!("{}\n", reply).as_bytes()).await?;
        out.flush().await?;
    }

    Ok(())
}

/// Splits a `/command argument` line. Anything whose first word is not a
/// known command is a chat message.
fn command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match word {
        "/quit" | "/provider" | "/model" => Some((word, rest.trim())),
        _ => None,
    }
}
