use bazaar_app::{
    context::AppContext,
    domain::{accounts::records::UserUuid, notifications::records::NotificationUuid},
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct NotificationsCommand {
    /// Notification recipient
    #[arg(long, global = true)]
    user: Option<UserUuid>,

    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Debug, Subcommand)]
enum NotificationsSubcommand {
    /// List notifications, newest first
    List(ListArgs),
    /// Mark one notification as read
    Read(NotificationArgs),
    /// Mark every notification as read
    ReadAll,
    /// Delete a notification
    Delete(NotificationArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only list unread notifications
    #[arg(long)]
    unread: bool,
}

#[derive(Debug, Args)]
struct NotificationArgs {
    #[arg(long)]
    notification: NotificationUuid,
}

pub(crate) async fn run(ctx: &AppContext, command: NotificationsCommand) -> Result<(), String> {
    let user = command
        .user
        .ok_or_else(|| "--user is required".to_string())?;

    match command.command {
        NotificationsSubcommand::List(args) => {
            let notifications = ctx
                .notifications
                .list_for_user(user, args.unread)
                .await
                .map_err(|error| format!("failed to list notifications: {error}"))?;

            let unread = ctx
                .notifications
                .unread_count(user)
                .await
                .map_err(|error| format!("failed to count notifications: {error}"))?;

            println!("unread: {unread}");
            println!();

            for notification in notifications {
                println!("notification_uuid: {}", notification.uuid);
                println!("type: {}", notification.kind);
                println!("title: {}", notification.title);
                println!("message: {}", notification.message);
                println!("is_read: {}", notification.is_read);
                println!("created_at: {}", notification.created_at);
                println!();
            }
        }
        NotificationsSubcommand::Read(args) => {
            let updated = ctx
                .notifications
                .mark_read(user, args.notification)
                .await
                .map_err(|error| format!("failed to mark notification read: {error}"))?;

            println!("updated: {updated}");
        }
        NotificationsSubcommand::ReadAll => {
            let updated = ctx
                .notifications
                .mark_all_read(user)
                .await
                .map_err(|error| format!("failed to mark notifications read: {error}"))?;

            println!("updated: {updated}");
        }
        NotificationsSubcommand::Delete(args) => {
            let deleted = ctx
                .notifications
                .delete(user, args.notification)
                .await
                .map_err(|error| format!("failed to delete notification: {error}"))?;

            println!("deleted: {deleted}");
        }
    }

    Ok(())
}
