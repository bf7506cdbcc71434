//! # repofeed
//!
//! Feed a source tree into a persistent chat context for LLM-assisted
//! code review.
//!
//! repofeed scans a repository, detects changed files via content
//! fingerprints, splits or summarizes their text, and injects the result
//! into an in-memory conversation that an interactive chat loop relays to
//! an OpenAI-compatible model on every turn.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Scanner  │──▶│  Feed Loop    │──▶│   Session    │
//! │ walk+hash │   │ chunk/summar. │   │ store+table  │
//! └───────────┘   └──────────────┘   └──────┬───────┘
//!                                           │
//!                                           ▼
//!                                    ┌──────────────┐
//!                                    │  Chat Loop   │──▶ model API
//!                                    │    (REPL)    │
//!                                    └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! rfeed init                    # write an example config
//! rfeed scan                    # preview what would be fed (offline)
//! rfeed chat                    # feed the repo, then chat over it
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`fingerprint`] | Content fingerprinting |
//! | [`scanner`] | Repository traversal and filtering |
//! | [`chunk`] | Chunking and the summarizer seam |
//! | [`client`] | Chat-completions HTTP client |
//! | [`session`] | Conversation store and fingerprint table |
//! | [`feed`] | Feed loop and scan preview |
//! | [`chat`] | Interactive chat loop |

pub mod chat;
pub mod chunk;
pub mod client;
pub mod config;
pub mod feed;
pub mod fingerprint;
pub mod models;
pub mod scanner;
pub mod session;
