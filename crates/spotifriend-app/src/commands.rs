//! Subcommand implementations.

use std::sync::Arc;
use std::time::Duration;

use spotifriend_api::timestamp::format_since_now;
use spotifriend_common::SpotifriendError;
use spotifriend_config::config_to_json;
use spotifriend_config::schema::WidgetFamily;
use spotifriend_engine::{
    forward_reachability, handle_play_link, spawn_poll_scheduler, EngineStopped, LoginOutcome,
    Opened, ProbeMonitor, Snapshot, State, TimelineProvider, EMPTY_MESSAGE,
};
use spotifriend_platform::{CookieSource, NetscapeCookieJar, StaticCookieSource, SystemOpener};
use tracing::{info, warn};

use crate::cli::{Command, LoginArgs};
use crate::wiring::AppContext;

fn stopped(e: EngineStopped) -> SpotifriendError {
    SpotifriendError::Engine(e.to_string())
}

pub async fn dispatch(command: Command, ctx: AppContext) -> Result<(), SpotifriendError> {
    match command {
        Command::Run => run(&ctx).await,
        Command::Login(args) => login(&ctx, args).await,
        Command::Logout => logout(&ctx).await,
        Command::Fetch => fetch(&ctx).await,
        Command::Widget { family, once } => widget(&ctx, family.map(Into::into), once).await,
        Command::Open { link } => open(&ctx, &link),
        Command::Config => {
            println!("{}", config_to_json(&ctx.config));
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

async fn run(ctx: &AppContext) -> Result<(), SpotifriendError> {
    let engine = ctx.spawn_engine(None);

    if ctx.session.cookie()?.is_some() {
        engine.refresh().await.map_err(stopped)?;
    } else {
        warn!("Not logged in; waiting for `spotifriend login`");
    }

    if ctx.config.reachability.enabled {
        let monitor = ProbeMonitor::from_config(&ctx.config.reachability);
        forward_reachability(monitor.start(), engine.clone());
    }
    let period = Duration::from_secs(u64::from(ctx.config.polling.interval_secs));
    let scheduler = spawn_poll_scheduler(engine.clone(), period);
    info!("Polling every {}s, press Ctrl-C to stop", period.as_secs());

    let mut snapshots = engine.subscribe();
    log_snapshot(&snapshots.borrow_and_update());
    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                log_snapshot(&snapshots.borrow_and_update());
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }
    scheduler.abort();
    Ok(())
}

fn log_snapshot(snapshot: &Snapshot) {
    info!(
        state = %snapshot.state,
        friends = snapshot.friends.len(),
        notification = snapshot.notification.as_ref().map(|n| n.message.as_str()),
        "snapshot"
    );
}

// ---------------------------------------------------------------------------
// login / logout
// ---------------------------------------------------------------------------

async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), SpotifriendError> {
    let source: Arc<dyn CookieSource> = match (args.cookie, args.cookie_jar) {
        (Some(value), _) => Arc::new(StaticCookieSource::session(value)),
        (None, Some(path)) => Arc::new(NetscapeCookieJar::new(path)),
        (None, None) => {
            return Err(SpotifriendError::Other(
                "login needs --cookie or --cookie-jar".into(),
            ))
        }
    };

    let engine = ctx.spawn_engine(Some(source));
    match engine.check_login_status().await.map_err(stopped)? {
        LoginOutcome::LoggedIn => {
            let snapshot = engine.settled().await.map_err(stopped)?;
            println!("Logged in.");
            report(&snapshot)
        }
        LoginOutcome::NoSessionCookie => Err(SpotifriendError::Other(
            "no sp_dc session cookie found".into(),
        )),
        LoginOutcome::Failed(reason) => Err(SpotifriendError::Other(reason)),
    }
}

async fn logout(ctx: &AppContext) -> Result<(), SpotifriendError> {
    let engine = ctx.spawn_engine(None);
    engine.logout().await.map_err(stopped)?;
    if let Some(notification) = engine.snapshot().notification {
        println!("{}", notification.message);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// fetch
// ---------------------------------------------------------------------------

async fn fetch(ctx: &AppContext) -> Result<(), SpotifriendError> {
    let engine = ctx.spawn_engine(None);
    engine.refresh().await.map_err(stopped)?;
    report(&engine.snapshot())
}

/// Print the friend list, or turn a failed state into an error.
fn report(snapshot: &Snapshot) -> Result<(), SpotifriendError> {
    match &snapshot.state {
        State::Loaded => {
            if snapshot.friends.is_empty() {
                println!("{EMPTY_MESSAGE}");
            }
            for friend in snapshot.friends.iter() {
                let since = format_since_now(friend.timestamp);
                println!(
                    "{:>5}  {}  {} • {}",
                    since.display, friend.user.name, friend.track.name, friend.track.artist.name
                );
            }
            Ok(())
        }
        State::Error(message) => Err(SpotifriendError::Other(message.clone())),
        State::LoggedOut => Err(SpotifriendError::Other(
            "Logged out. Run `spotifriend login`.".into(),
        )),
        other => Err(SpotifriendError::Engine(format!("unexpected state {other}"))),
    }
}

// ---------------------------------------------------------------------------
// widget / open
// ---------------------------------------------------------------------------

async fn widget(
    ctx: &AppContext,
    family: Option<WidgetFamily>,
    once: bool,
) -> Result<(), SpotifriendError> {
    let mut provider = TimelineProvider::new(
        ctx.client.clone(),
        ctx.session.clone(),
        &ctx.config.widget,
    );
    if let Some(family) = family {
        provider = provider.with_family(family);
    }

    loop {
        let timeline = provider.timeline().await;
        let json = serde_json::to_string_pretty(&timeline.entry)
            .map_err(|e| SpotifriendError::Other(format!("failed to encode entry: {e}")))?;
        println!("{json}");
        if once {
            return Ok(());
        }

        info!("Next widget refresh at {}", timeline.next_refresh_at());
        tokio::select! {
            _ = tokio::time::sleep(timeline.next_refresh) => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn open(ctx: &AppContext, link: &str) -> Result<(), SpotifriendError> {
    match handle_play_link(link, &SystemOpener, ctx.client.urls()) {
        Ok(Opened::Native(target)) | Ok(Opened::Web(target)) => {
            println!("Opened {target}");
            Ok(())
        }
        Err(e) => Err(SpotifriendError::Other(e.to_string())),
    }
}
