//! Provision command - run one credential-entry session
//!
//! Terminal rendition of the device-driven flow: the device announces which
//! field it wants, we print the directions and prompt for that field on
//! stdin, and every submission is written back over the link. Ctrl-C (or
//! stdin EOF) plays the role of the Exit button.

use anyhow::Result;
use pumplink_core::{AttributeCode, CredentialDraft};
use pumplink_host::config::{SerialConfig, TransportConfig};
use pumplink_host::{CredentialSession, SessionError, SessionEvent};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::OutputContext;

pub async fn provision(port: &str, baud: u32, ctx: &OutputContext) -> Result<()> {
    let config = TransportConfig::Serial(SerialConfig::new(port, baud));
    let (session, mut events) = CredentialSession::open(&config)
        .map_err(|e| anyhow::Error::new(e).context(format!("Failed to open port {port}")))?;

    ctx.success(&format!("Port {port} open at {baud} baud"));

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut active: Option<AttributeCode> = None;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(SessionEvent::Gate(gate)) => {
                    active = gate.active();
                    ctx.info("");
                    ctx.info(gate.instructions());
                    if let Some(field) = gate.active() {
                        prompt(field, ctx);
                    }
                }
                Some(SessionEvent::Failed(err)) => {
                    return Err(anyhow::Error::new(err).context("Session failed"));
                }
                Some(SessionEvent::Closed) | None => break,
            },

            line = stdin.next_line(), if active.is_some() => {
                match line? {
                    Some(line) => {
                        let field = active.take().expect("guarded by active.is_some()");
                        submit(&session, field, line.trim_end(), ctx).await?;
                    }
                    // stdin closed: treat like Exit
                    None => session.close(),
                }
            }

            _ = tokio::signal::ctrl_c() => {
                ctx.info("");
                session.close();
            }
        }
    }

    summary(&session.draft(), ctx);
    Ok(())
}

async fn submit(
    session: &CredentialSession,
    field: AttributeCode,
    value: &str,
    ctx: &OutputContext,
) -> Result<()> {
    match session.submit(field, value).await {
        Ok(()) => {
            if session.draft().is_complete() {
                ctx.info("");
                ctx.success(
                    "All fields sent. Long click on the PasswordPump to finish, \
                     then press Ctrl-C to exit.",
                );
            }
            Ok(())
        }
        // The device moved on while the operator was typing; the latest
        // gate's directions are already on screen.
        Err(err @ SessionError::FieldNotActive { .. }) => {
            ctx.warn(&format!("{err}; follow the latest directions"));
            Ok(())
        }
        Err(err) => Err(anyhow::Error::new(err).context("Submission failed")),
    }
}

fn prompt(field: AttributeCode, ctx: &OutputContext) {
    let hint = match field {
        AttributeCode::Style => " (0 = carriage return, 1 = tab)",
        _ => "",
    };
    ctx.info(&format!("Enter {}{hint}:", field.label()));
}

fn summary(draft: &CredentialDraft, ctx: &OutputContext) {
    let sent = |value: Option<&str>| value.unwrap_or("(not sent)").to_string();

    ctx.info("");
    ctx.print_kv(&[
        ("Account", sent(draft.account())),
        ("Username", sent(draft.username())),
        // Never echo the password back
        (
            "Password",
            if draft.password().is_some() {
                "(sent)".to_string()
            } else {
                "(not sent)".to_string()
            },
        ),
        ("Style", sent(draft.style())),
    ]);
}
