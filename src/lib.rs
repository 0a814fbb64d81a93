//! Kanban Client Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - store: Data access abstractions and implementations (REST backend,
//!   in-memory)
//! - service: Workflow operations over stores, cache and permissions
//! - cache, config, voice: supporting modules
//!
//! The embedding front-end loads a [`config::ServerConfig`], calls
//! [`KanbanClient::connect`], and drives the board through the
//! resulting services. Voice transcripts go through
//! [`voice::VoiceParser`] and come back as typed commands.

use std::path::PathBuf;
use std::sync::Arc;

pub mod cache;
pub mod config;
pub mod domain;
pub mod service;
pub mod store;
pub mod voice;

use cache::ListCache;
use config::ServerConfig;
use domain::{DomainResult, Member};
use service::{CardService, ListService};
use store::http::{
    ApiClient, HttpCardStore, HttpChecklistStore, HttpCommentStore, HttpLabelStore, HttpListStore,
    HttpMemberStore,
};
use store::MemberDirectory;
use voice::VoiceParser;

/// A connected client: the acting member plus the services wired to
/// the REST backend with that member's role.
pub struct KanbanClient {
    pub member: Member,
    pub lists: ListService,
    pub cards: CardService,
    pub voice: VoiceParser,
    directory: Arc<dyn MemberDirectory>,
}

impl KanbanClient {
    /// Connect to the backend: fetch the acting member, then wire the
    /// services with that member's role.
    pub async fn connect(config: &ServerConfig) -> DomainResult<Self> {
        let api = ApiClient::from_config(config);

        let directory: Arc<dyn MemberDirectory> = Arc::new(HttpMemberStore::new(api.clone()));
        let member = directory.current().await?;
        log::info!("Connected as {} ({})", member.name, member.role.as_str());

        let cache = Arc::new(ListCache::new());
        let list_store = Arc::new(HttpListStore::new(api.clone()));
        let card_store = Arc::new(HttpCardStore::new(api.clone()));

        let lists = ListService::new(list_store, card_store.clone(), cache, member.role);
        let cards = CardService::new(
            card_store,
            Arc::new(HttpLabelStore::new(api.clone())),
            Arc::new(HttpCommentStore::new(api.clone())),
            Arc::new(HttpChecklistStore::new(api)),
            member.role,
        );

        Ok(Self {
            member,
            lists,
            cards,
            voice: VoiceParser::new()?,
            directory,
        })
    }

    /// All board members
    pub async fn members(&self) -> DomainResult<Vec<Member>> {
        self.directory.list().await
    }
}

/// Initialize file logging for the embedding app. Log lines from this
/// crate go through the `log` facade into the same rolling files.
pub fn init_logging(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    rolling_logger::init_logger(log_dir, app_name)
}
