//! Chat session and turn log.
//!
//! A [`ChatSession`] holds the append-only transcript of one chat view.
//! Each exchange is a strict two-step lifecycle:
//!
//! 1. [`ChatSession::begin`] appends the user turn and sets the pending
//!    marker (with a fresh request id) before any network call.
//! 2. [`ChatSession::settle`] removes the pending marker unconditionally,
//!    then appends exactly one assistant turn — the answer on success, a
//!    fixed apologetic message on failure.
//!
//! The pending marker is interim state, never part of the durable history.
//! Overlapping sends are serialized: `begin` rejects a second exchange
//! while one is outstanding, and the `&mut self` receiver makes overlap
//! structurally impossible from a single session anyway.
//!
//! Rendering is a pure projection ([`render_turn`], [`render_references`])
//! so the session logic is testable without a terminal.

use anyhow::{bail, Result};
use std::io::Write;
use uuid::Uuid;

use crate::api::{BackendClient, ChatReply};
use crate::config::Config;
use crate::handoff;
use crate::models::{ChatRole, ChatTurn, ReferenceDoc};

/// Fixed user-facing message appended when a chat request fails.
/// The underlying error goes to stderr, never into the transcript.
pub const FAILURE_MESSAGE: &str =
    "Sorry - I couldn't reach the assistant just now. Please try again in a moment.";

/// Interim marker for the one outstanding request.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub request_id: Uuid,
    pub query: String,
}

/// One chat view's state: the durable turn log, the interim pending
/// marker, and the reference card from the most recent grounded answer.
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    pending: Option<PendingRequest>,
    references: Vec<ReferenceDoc>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The durable transcript, in send order. Never contains the pending
    /// indicator.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The in-flight request, if one is outstanding.
    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    /// Reference card from the most recent answer that carried context.
    pub fn references(&self) -> &[ReferenceDoc] {
        &self.references
    }

    /// Start an exchange: validate the query, append the user turn, and
    /// set the pending marker. Called before any network activity.
    pub fn begin(&mut self, query: &str) -> Result<Uuid> {
        let query = query.trim();
        if query.is_empty() {
            bail!("message must not be empty");
        }
        if self.pending.is_some() {
            bail!("a chat request is already in flight");
        }

        self.turns.push(ChatTurn::user(query));
        let request_id = Uuid::new_v4();
        self.pending = Some(PendingRequest {
            request_id,
            query: query.to_string(),
        });
        Ok(request_id)
    }

    /// Finish an exchange. The pending marker is removed first, whether
    /// the request succeeded or failed; then exactly one assistant turn is
    /// appended. Returns the references derived for this exchange.
    pub fn settle(&mut self, outcome: Result<ChatReply>) -> Vec<ReferenceDoc> {
        let pending = self.pending.take();

        match outcome {
            Ok(reply) => {
                let refs = derive_references(&reply);
                self.turns.push(ChatTurn::assistant(reply.answer));
                if !refs.is_empty() {
                    self.references = refs.clone();
                }
                refs
            }
            Err(e) => {
                match pending {
                    Some(p) => {
                        eprintln!("warning: chat request {} failed: {e:#}", p.request_id)
                    }
                    None => eprintln!("warning: chat request failed: {e:#}"),
                }
                self.turns.push(ChatTurn::assistant(FAILURE_MESSAGE));
                Vec::new()
            }
        }
    }

    /// One full exchange against the backend: begin, ask, settle.
    pub async fn send(&mut self, client: &BackendClient, query: &str) -> Result<Vec<ReferenceDoc>> {
        self.begin(query)?;
        let outcome = client.ask(query.trim()).await;
        Ok(self.settle(outcome))
    }
}

/// Derive the reference card for one reply. The backend returns at most
/// one undifferentiated context block, so a grounded answer yields exactly
/// one synthetic [`ReferenceDoc`].
pub fn derive_references(reply: &ChatReply) -> Vec<ReferenceDoc> {
    match reply.context.as_deref().map(str::trim) {
        Some(ctx) if !ctx.is_empty() => vec![ReferenceDoc {
            title: context_title(ctx),
            vendor: "Knowledge base".to_string(),
            doc_type: "ref".to_string(),
        }],
        _ => Vec::new(),
    }
}

/// Display title for a context block: its first non-empty line, truncated.
fn context_title(ctx: &str) -> String {
    let line = ctx
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("Retrieved context");

    let mut title: String = line.chars().take(60).collect();
    if line.chars().count() > 60 {
        title.push_str("...");
    }
    title
}

// ============ Rendering ============

/// Project one turn to its transcript line.
pub fn render_turn(turn: &ChatTurn) -> String {
    match turn.role {
        ChatRole::User => format!("you> {}", turn.text),
        ChatRole::Assistant => format!("assistant> {}", turn.text),
    }
}

/// Project a reference list to its display block.
pub fn render_references(refs: &[ReferenceDoc]) -> String {
    let mut out = String::from("References:");
    for r in refs {
        out.push_str(&format!(
            "\n  - [{}] {} ({})",
            r.doc_type.to_uppercase(),
            r.title,
            r.vendor
        ));
    }
    out
}

// ============ Pending indicator ============

/// Interim "thinking" line on stderr while a request is outstanding.
/// Shown only on interactive terminals; cleared when the request settles,
/// success or failure, so stdout transcripts stay clean.
struct PendingIndicator {
    visible: bool,
}

const INDICATOR_TEXT: &str = "assistant is thinking...";

impl PendingIndicator {
    fn start() -> Self {
        let visible = atty::is(atty::Stream::Stderr);
        if visible {
            eprint!("{}", INDICATOR_TEXT);
            let _ = std::io::stderr().flush();
        }
        Self { visible }
    }

    fn finish(self) {
        if self.visible {
            eprint!("\r{}\r", " ".repeat(INDICATOR_TEXT.len()));
            let _ = std::io::stderr().flush();
        }
    }
}

// ============ CLI entry point ============

/// CLI entry point for `dsh chat`.
///
/// Loads the chat view: first consumes the one-shot handoff query from a
/// previous zero-hit search (if any), then sends the message argument, then
/// on interactive terminals reads further messages line by line.
pub async fn run_chat(config: &Config, message: Option<String>) -> Result<()> {
    let client = BackendClient::new(&config.backend)?;
    let mut session = ChatSession::new();

    if let Some(queued) = handoff::consume(&config.handoff.path) {
        run_exchange(&mut session, &client, &queued).await?;
    }

    if let Some(ref msg) = message {
        run_exchange(&mut session, &client, msg).await?;
    }

    if message.is_none() && atty::is(atty::Stream::Stdin) {
        interactive_loop(&mut session, &client).await?;
    } else if session.turns().is_empty() {
        println!("Nothing to send. Pass a message: dsh chat \"how do I renew the VPN cert?\"");
    }

    Ok(())
}

/// One exchange with incremental transcript output.
async fn run_exchange(
    session: &mut ChatSession,
    client: &BackendClient,
    query: &str,
) -> Result<()> {
    let before = session.turns().len();
    session.begin(query)?;
    println!("{}", render_turn(&session.turns()[before]));

    let indicator = PendingIndicator::start();
    let outcome = client.ask(query.trim()).await;
    indicator.finish();

    let refs = session.settle(outcome);
    if let Some(turn) = session.turns().last() {
        println!("{}", render_turn(turn));
    }
    if !refs.is_empty() {
        println!();
        println!("{}", render_references(&refs));
    }
    println!();

    Ok(())
}

/// Read messages line by line until EOF. Empty input gets an inline prompt
/// and never reaches the network.
async fn interactive_loop(session: &mut ChatSession, client: &BackendClient) -> Result<()> {
    println!(
        "Connected to {}. Type a message and press Enter (Ctrl-D to quit).",
        client.base_url()
    );
    println!();

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let read = {
            use std::io::BufRead;
            stdin.lock().read_line(&mut line)?
        };
        if read == 0 {
            break; // EOF
        }

        let msg = line.trim();
        if msg.is_empty() {
            println!("Please type a message first.");
            continue;
        }

        run_exchange(session, client, msg).await?;
    }

    Ok(())
}
