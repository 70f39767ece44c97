//! # docshelf
//!
//! A terminal client for a document search and retrieval-augmented chat
//! service.
//!
//! docshelf renders document listings, a detail view, and a chat transcript,
//! and delegates all real work (search indexing, storage, AI inference) to a
//! backend reached over plain HTTP. The client owns three pieces of state:
//! a snapshot cache of the document collection, an append-only chat turn
//! log, and a one-shot handoff query persisted between invocations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌─────────────┐
//! │   CLI    │──▶│ Store/Search/ │──▶│   Backend   │
//! │  (dsh)   │   │ Chat/Drawer   │   │  HTTP API   │
//! └──────────┘   └──────┬────────┘   └─────────────┘
//!                       │
//!                       ▼
//!                ┌──────────────┐
//!                │ Handoff file │
//!                └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! dsh docs                      # list the latest indexed documents
//! dsh search "openshift"        # filter the cached snapshot
//! dsh chat "what is IRSA?"      # ask the assistant
//! dsh show 2                    # open the detail view for one document
//! dsh upload ./runbook.txt      # push a file to the indexer
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`api`] | Backend HTTP client |
//! | [`store`] | Document snapshot cache |
//! | [`search`] | Client-side substring search |
//! | [`chat`] | Chat session and turn log |
//! | [`drawer`] | Document detail view |
//! | [`handoff`] | One-shot cross-invocation query handoff |
//! | [`upload`] | Upload flow |

pub mod api;
pub mod chat;
pub mod config;
pub mod drawer;
pub mod handoff;
pub mod models;
pub mod search;
pub mod store;
pub mod upload;
