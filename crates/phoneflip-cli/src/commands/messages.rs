use phoneflip_core::models::NewMessage;

use crate::cli::MessagesCommands;
use crate::commands::common::{
    finish, format_conversation_lines, format_message_lines, print_json, print_lines, CliContext,
};
use crate::error::CliError;

pub async fn run_messages(command: MessagesCommands, context: &CliContext) -> Result<(), CliError> {
    let mut app = context.open().await?;
    match command {
        MessagesCommands::List { json } => {
            let succeeded = app.load_conversations().await;
            finish(&mut app, succeeded)?;
            let conversations = &app.state().stores.conversations;
            if json {
                return print_json(conversations.conversations());
            }
            print_lines(
                &format_conversation_lines(conversations.conversations()),
                "No conversations yet.",
            );
            if conversations.total_unread() > 0 {
                println!("{} unread", conversations.total_unread());
            }
            Ok(())
        }
        MessagesCommands::Show {
            conversation_id,
            json,
        } => {
            let conversation_id = conversation_id.trim();
            let succeeded = app.load_conversations().await
                && app.open_conversation(conversation_id).await;
            finish(&mut app, succeeded)?;

            let conversations = &app.state().stores.conversations;
            if json {
                return print_json(conversations.messages());
            }
            if let Some(active) = conversations.active() {
                println!("{} - {}", active.other_user_name, active.listing_title);
            }
            print_lines(
                &format_message_lines(conversations.messages()),
                "No messages yet.",
            );
            Ok(())
        }
        MessagesCommands::Send {
            to,
            listing,
            offer,
            content,
        } => {
            let message = new_message(to, listing, &content, offer);
            let succeeded = app.send_message(message).await;
            finish(&mut app, succeeded)
        }
    }
}

pub fn new_message(
    receiver_id: String,
    listing_id: String,
    content: &[String],
    offer: Option<i64>,
) -> NewMessage {
    let content = content.join(" ");
    match offer {
        Some(amount) => NewMessage::offer(receiver_id, listing_id, content, amount),
        None => NewMessage::text(receiver_id, listing_id, content),
    }
}
