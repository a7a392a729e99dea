use futures::StreamExt;
use log::{ error, info };
use std::error::Error;
use std::sync::Arc;
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader };
use tokio_stream::wrappers::LinesStream;

use crate::cli::Args;
use crate::client::HttpChatClient;
use crate::ids::UuidV4Ids;
use crate::models::ui::{ PartialText, UiMessage, UiUser };
use crate::participants::ParticipantRegistry;
use crate::view::{ ChatView, ChatViewConfig };

const QUIT_COMMAND: &str = "/quit";

pub fn render_header(title: &str) -> String {
    let rule = "─".repeat(title.chars().count().max(24));
    format!("{}\n{}\n{}\n", rule, title, rule)
}

/// Widget order is newest first; the terminal prints oldest at the top.
pub fn render_transcript(messages: &[UiMessage], me: &UiUser) -> String {
    let mut out = String::new();
    for message in messages.iter().rev() {
        let author = message.author();
        if author.id == me.id {
            out.push_str(&format!("  > {}: {}\n", author.first_name, message.text()));
        } else {
            out.push_str(&format!("{}: {}\n", author.first_name, message.text()));
        }
    }
    out
}

fn render_view(view: &ChatView) -> String {
    render_transcript(&view.messages(), &view.registry().me().to_ui_user())
}

/// Reads one message per line until EOF or `/quit`. Sync failures are logged and the loop keeps going.
pub async fn run_loop<R, W>(
    view: &mut ChatView,
    input: R,
    output: &mut W
) -> Result<(), Box<dyn Error + Send + Sync>>
    where R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin
{
    output.write_all(render_header(view.persona_title()).as_bytes()).await?;
    output.write_all(render_view(view).as_bytes()).await?;
    output.flush().await?;

    let mut lines = LinesStream::new(input.lines());
    while let Some(line) = lines.next().await {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == QUIT_COMMAND {
            break;
        }

        if let Err(e) = view.handle_send_press(PartialText::from(text)).await {
            match e.source() {
                Some(cause) => error!("{} {}", e, cause),
                None => error!("{}", e),
            }
        }
        output.write_all(b"\n").await?;
        output.write_all(render_view(view).as_bytes()).await?;
        output.flush().await?;
    }

    info!("Chat screen closed");
    Ok(())
}

pub async fn run_chat(args: &Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let client = HttpChatClient::from_args(args)?;
    info!("Chat API endpoint: {}", client.endpoint());

    let ids = Arc::new(UuidV4Ids);
    let registry = ParticipantRegistry::new(
        args.user_name.clone(),
        args.therapist_name.clone(),
        ids.as_ref()
    );
    let mut view = ChatView::mount(ChatViewConfig::from(args), registry, Arc::new(client), ids);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    run_loop(&mut view, stdin, &mut stdout).await
}
