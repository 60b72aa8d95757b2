use anyhow::bail;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_client::{Config, HttpIdentityBackend, SessionController, SessionState};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load()?;
    info!(endpoint = %config.endpoint, "auth-client starting");

    let backend = HttpIdentityBackend::new(config)?;
    let controller = SessionController::new(backend);
    controller.reconcile().await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["status"] => {}
        ["signup", email, password, name] => {
            if let Err(e) = controller.sign_up(email, password, name).await {
                eprintln!("sign-up failed: {e}");
            }
        }
        ["signin", email, password] => {
            if let Err(e) = controller.sign_in(email, password).await {
                eprintln!("sign-in failed: {e}");
            }
        }
        ["signout"] => {
            controller.sign_out().await;
        }
        _ => bail!(
            "usage: auth-client [status | signup EMAIL PASSWORD NAME | signin EMAIL PASSWORD | signout]"
        ),
    }

    print_state(&controller.state());
    Ok(())
}

fn print_state(state: &SessionState) {
    match &state.identity {
        Some(identity) => println!("signed in as {} <{}>", identity.name, identity.email),
        None => println!("not signed in"),
    }
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_span_list(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
