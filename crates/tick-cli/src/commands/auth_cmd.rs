use tick_core::route::{public_route, PublicDecision};

use crate::auth::{backend_config, session_manager, CliSessionManager};
use crate::cli::AuthCommands;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands) -> Result<(), CliError> {
    let config = backend_config()?;
    let manager = session_manager(&config)?;
    manager.initialize().await;

    match command {
        AuthCommands::Signup {
            email,
            password,
            name,
        } => {
            if already_signed_in(&manager) {
                return Ok(());
            }

            let sign_up = manager.sign_up(&email, &password, &name).await?;
            if sign_up.confirmation_required() {
                println!(
                    "Account created for {}. Confirm the address from your inbox, then run `tick auth login`.",
                    email.trim()
                );
            } else {
                println!("Account created; signed in as {}", email_label(&manager));
            }
            Ok(())
        }
        AuthCommands::Login { email, password } => {
            if already_signed_in(&manager) {
                return Ok(());
            }

            manager.sign_in(&email, &password).await?;
            println!("Signed in as {}", email_label(&manager));
            Ok(())
        }
        AuthCommands::Status => {
            match manager.state().session {
                Some(session) => {
                    let email = session.user.email.as_deref().unwrap_or("(no email)");
                    println!("Signed in as {email} (session expires at {})", session.expires_at);
                }
                None => println!("Not signed in."),
            }
            Ok(())
        }
        AuthCommands::Logout => {
            manager.sign_out().await?;
            println!("Signed out");
            Ok(())
        }
    }
}

/// The CLI's rendition of the public-screen gate: a signed-in user is sent
/// back to the list instead of through login/signup again.
fn already_signed_in(manager: &CliSessionManager) -> bool {
    if matches!(public_route(&manager.state()), PublicDecision::RedirectHome) {
        println!(
            "Already signed in as {}. Run `tick auth logout` to switch accounts.",
            email_label(manager)
        );
        return true;
    }
    false
}

fn email_label(manager: &CliSessionManager) -> String {
    manager
        .state()
        .user
        .and_then(|user| user.email)
        .unwrap_or_else(|| "(no email)".to_string())
}
