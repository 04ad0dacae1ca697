//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use awaydesk_core::{
    AssistantService, CalendarQueryService, Clock, CooldownState, DecisionEngine, EventAggregator,
    GrammarDateParser, PresenceService, ReplySink, ResponseFormatter, SystemClock,
    TimeExpressionResolver, TranslationService,
};
use awaydesk_domain::{Config, Result};
use awaydesk_infra::{
    GoogleCalendarProvider, GoogleTranslateClient, HttpClient, HttpPresenceClient,
    PassthroughTranslator, UnknownPresence,
};
use tracing::{info, warn};

/// Outbound collaborators the assistant depends on.
pub struct Ports {
    pub calendar: Arc<dyn CalendarQueryService>,
    pub translator: Arc<dyn TranslationService>,
    pub presence: Arc<dyn PresenceService>,
    pub clock: Arc<dyn Clock>,
}

impl Ports {
    /// Production adapters built from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let calendar_http =
            HttpClient::builder().timeout(config.assistant.source_timeout()).build()?;
        let calendar: Arc<dyn CalendarQueryService> =
            Arc::new(GoogleCalendarProvider::new(calendar_http, &config.calendar)?);
        if config.calendar.access_token.is_empty() {
            warn!("no calendar access token configured, requests will be unauthenticated");
        }

        let translator: Arc<dyn TranslationService> = if config.translation.enabled {
            let http = HttpClient::builder()
                .timeout(Duration::from_secs(config.translation.timeout_seconds))
                .build()?;
            Arc::new(GoogleTranslateClient::new(http, &config.translation))
        } else {
            info!("translation disabled, messages are parsed as written");
            Arc::new(PassthroughTranslator)
        };

        let presence_http = HttpClient::builder()
            .timeout(Duration::from_secs(config.presence.timeout_seconds))
            .build()?;
        let presence: Arc<dyn PresenceService> =
            match HttpPresenceClient::from_config(presence_http, &config.presence)? {
                Some(client) => Arc::new(client),
                None => {
                    info!("no presence source configured, owner presence is always unknown");
                    Arc::new(UnknownPresence)
                }
            };

        Ok(Self { calendar, translator, presence, clock: Arc::new(SystemClock) })
    }
}

/// Application context - holds the assistant and its configuration
pub struct AppContext {
    pub config: Config,
    pub assistant: Arc<AssistantService>,
    /// Busy-notice record shared with the decision engine.
    pub cooldown: Arc<CooldownState>,
}

impl AppContext {
    /// Create a new application context with production adapters
    pub fn new(config: Config, sink: Arc<dyn ReplySink>) -> Result<Self> {
        config.validate()?;
        let ports = Ports::from_config(&config)?;
        Self::with_ports(config, ports, sink)
    }

    /// Create a new application context around the given ports
    ///
    /// Tests use this to substitute in-memory collaborators.
    pub fn with_ports(config: Config, ports: Ports, sink: Arc<dyn ReplySink>) -> Result<Self> {
        config.validate()?;
        let assistant_config = &config.assistant;

        let resolver = TimeExpressionResolver::new(
            ports.translator,
            Arc::new(GrammarDateParser),
            assistant_config.now_window_minutes,
        );
        let aggregator = EventAggregator::new(ports.calendar, assistant_config.max_results)
            .with_source_timeout(assistant_config.source_timeout())
            .with_max_concurrency(assistant_config.max_concurrent_sources);
        let cooldown = Arc::new(CooldownState::new());
        let engine =
            DecisionEngine::new(assistant_config, resolver, aggregator, ports.presence, ports.clock)
                .with_cooldown_state(cooldown.clone());
        let formatter = ResponseFormatter::new(
            assistant_config.owner_display_name.clone(),
            assistant_config.timezone()?,
        );

        info!(
            sources = assistant_config.calendar_source_ids.len(),
            max_results = assistant_config.max_results,
            cooldown_seconds = assistant_config.cooldown_seconds,
            display_timezone = %assistant_config.display_timezone,
            "assistant initialised"
        );

        let assistant = Arc::new(AssistantService::new(engine, formatter, sink));
        Ok(Self { config, assistant, cooldown })
    }
}
