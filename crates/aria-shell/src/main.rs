//! The Aria interactive shell.
//!
//! A rustyline REPL over the two core components: the session gate decides
//! whether the auth prompt or the chat prompt is shown, and the command
//! channel carries everything that is not a slash command to the backend.

mod helper;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use tokio::sync::RwLock;

use aria_client::{BackendClient, RestAuthProvider, TomlPreferenceRepository};
use aria_core::auth::{AuthProvider, FederatedIntent};
use aria_core::command::{CommandChannel, SystemMonitor};
use aria_core::config::{PreferenceRepository, Theme};
use aria_core::session::{GateEvent, GateState, SessionGate};
use aria_core::transcript::{Message, MessageKind, Sender, Transcript};

use helper::CliHelper;

#[derive(Parser)]
#[command(name = "aria")]
#[command(about = "Aria - session-gated assistant chat shell", long_about = None)]
struct Cli {
    /// Host name the shell considers itself served from; loopback hosts
    /// select the local backend, anything else the deployed one
    #[arg(long, default_value = "localhost")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ===== Backend & provider wiring =====
    let backend = Arc::new(BackendClient::from_host(&cli.host));
    let provider = Arc::new(RestAuthProvider::new_default());

    let preferences = TomlPreferenceRepository::new_default()?;
    let mut theme = match preferences.load_theme().await {
        Ok(saved) => saved.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to load preferences");
            Theme::default()
        }
    };

    let (gate, mut gate_events) = SessionGate::new(provider.clone());
    let gate = Arc::new(gate);

    // Recover a session from a prior redirect-fallback attempt, if any.
    match gate.resolve_redirect_result().await {
        Ok(Some(session)) => {
            let email = session
                .identity
                .map(|identity| identity.email)
                .unwrap_or_default();
            println!("{}", format!("Signed in via redirect: {}", email).green());
        }
        Ok(None) => {}
        Err(err) => eprintln!("{}", format!("Redirect sign-in failed: {}", err).red()),
    }

    // The gate consumes the provider notification stream for the process
    // lifetime.
    let notifications = provider.subscribe();
    {
        let gate = gate.clone();
        tokio::spawn(async move { gate.run(notifications).await });
    }

    let transcript = Arc::new(RwLock::new(Transcript::new()));
    let channel = CommandChannel::new(backend.clone(), transcript.clone());

    // Background system-info poll; shares nothing with the command channel.
    let monitor = Arc::new(SystemMonitor::new(backend.clone()));
    {
        let monitor = monitor.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(2));
            loop {
                interval.tick().await;
                monitor.refresh().await;
            }
        });
    }

    match backend.health().await {
        Ok(status) => println!("{}", status.bright_black()),
        Err(err) => println!(
            "{}",
            format!("Warning: {} (commands will fail until it is up)", err).yellow()
        ),
    }

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Aria ===".bright_magenta().bold());
    println!(
        "{}",
        "Sign in with /login, /signup, or /google. /help lists commands.".bright_black()
    );
    println!();

    let mut rendered = 0usize;
    let mut voice_active = false;

    // ===== Main REPL Loop =====
    loop {
        while let Ok(event) = gate_events.try_recv() {
            render_gate_event(&event);
        }

        let prompt = match gate.state().await {
            GateState::Authenticated => "aria> ",
            GateState::Unknown | GateState::Unauthenticated => "auth> ",
        };

        let readline = rl.readline(prompt);
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/quit" | "/exit" => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    "/help" => print_help(),
                    "/clear" => {
                        transcript.write().await.clear();
                        rendered = 0;
                        print_welcome();
                    }
                    "/status" => {
                        let panel = monitor.snapshot().await;
                        println!(
                            "CPU: {}  RAM: {}",
                            format_percent(panel.cpu),
                            format_percent(panel.ram)
                        );
                    }
                    "/theme" => {
                        theme = theme.toggle();
                        if let Err(err) = preferences.save_theme(theme).await {
                            tracing::warn!(error = %err, "failed to save theme");
                        }
                        println!("Theme: {}", theme.as_str());
                    }
                    "/voice" => {
                        voice_active = !voice_active;
                        let notice = if voice_active {
                            "Voice mode activated - listening for commands"
                        } else {
                            "Voice mode deactivated"
                        };
                        transcript.write().await.push(Message::system(notice));
                        render_new_messages(&transcript, &mut rendered).await;
                    }
                    "/logout" => {
                        // Best-effort; the gate transitions regardless.
                        let _ = gate.sign_out().await;
                    }
                    "/login" => {
                        let Some(email) = prompt_line(&mut rl, "email: ") else {
                            continue;
                        };
                        let Some(password) = prompt_line(&mut rl, "password: ") else {
                            continue;
                        };
                        match gate.sign_in_with_password(&email, &password).await {
                            Ok(session) => report_signed_in(&session.identity),
                            Err(err) => println!("{}", err.to_string().red()),
                        }
                    }
                    "/signup" => {
                        let Some(email) = prompt_line(&mut rl, "email: ") else {
                            continue;
                        };
                        let Some(password) = prompt_line(&mut rl, "password: ") else {
                            continue;
                        };
                        let Some(confirm) = prompt_line(&mut rl, "confirm password: ") else {
                            continue;
                        };
                        match gate
                            .sign_up_with_password(&email, &password, &confirm)
                            .await
                        {
                            Ok(session) => report_signed_in(&session.identity),
                            Err(err) => println!("{}", err.to_string().red()),
                        }
                    }
                    "/google" => {
                        match gate.sign_in_with_federated(FederatedIntent::Login).await {
                            Ok(Some(session)) => report_signed_in(&session.identity),
                            Ok(None) => println!(
                                "{}",
                                "Continuing via redirect; the result is picked up on the next start."
                                    .yellow()
                            ),
                            Err(err) => println!("{}", err.to_string().red()),
                        }
                    }
                    _ => {
                        if gate.state().await != GateState::Authenticated {
                            println!(
                                "{}",
                                "Please sign in first: /login, /signup, or /google".yellow()
                            );
                            continue;
                        }
                        channel.submit(trimmed).await;
                        render_new_messages(&transcript, &mut rendered).await;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

/// Reads one extra line for multi-step commands; `None` aborts the command.
fn prompt_line<H: rustyline::Helper, I: rustyline::history::History>(
    rl: &mut Editor<H, I>,
    prompt: &str,
) -> Option<String> {
    match rl.readline(prompt) {
        Ok(line) if !line.trim().is_empty() => Some(line.trim().to_string()),
        _ => None,
    }
}

fn report_signed_in(identity: &Option<aria_core::auth::Identity>) {
    let email = identity
        .as_ref()
        .map(|identity| identity.email.as_str())
        .unwrap_or("unknown");
    println!("{}", format!("Signed in as {}", email).green());
}

fn render_gate_event(event: &GateEvent) {
    match event {
        GateEvent::ShowMainApp { session } => {
            let email = session
                .identity
                .as_ref()
                .map(|identity| identity.email.as_str())
                .unwrap_or("unknown");
            println!("{}", format!("Authenticated: {}", email).bright_green());
        }
        GateEvent::ShowAuthPanel { clear_credentials } => {
            if *clear_credentials {
                println!("{}", "Signed out.".yellow());
            } else {
                println!("{}", "Not authenticated.".bright_black());
            }
        }
    }
}

async fn render_new_messages(transcript: &RwLock<Transcript>, rendered: &mut usize) {
    let transcript = transcript.read().await;
    let messages: Vec<&Message> = transcript.messages().collect();
    for message in &messages[*rendered..] {
        print_message(message);
    }
    *rendered = messages.len();
}

fn print_message(message: &Message) {
    match message.sender {
        Sender::User => println!("{}", format!("> {}", message.text).green()),
        Sender::Ai => {
            for line in message.text.lines() {
                let styled = match &message.kind {
                    MessageKind::Error => line.red(),
                    MessageKind::System => line.yellow(),
                    _ => line.bright_blue(),
                };
                println!("{}", styled);
            }
        }
    }
}

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.0}%", value),
        None => "--".to_string(),
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  /login    sign in with email and password");
    println!("  /signup   create an account");
    println!("  /google   federated sign-in");
    println!("  /logout   sign out");
    println!("  /clear    clear the chat transcript");
    println!("  /status   show the latest CPU/RAM readings");
    println!("  /theme    toggle between dark and light");
    println!("  /voice    toggle voice mode");
    println!("  /quit     exit the shell");
    println!("Anything else is sent to the assistant.");
}

fn print_welcome() {
    println!("{}", "Welcome to Aria".bold());
    println!("{}", "Your assistant is ready. Try one of these:".bright_black());
    println!("  system stats      system diagnostics   network status");
    println!("  tell me a joke    what time is it      process memory");
}
