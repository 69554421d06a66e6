//! # Application Orchestrator
//!
//! [`App`] wires the service gate, the deferred action executor and the primary-wallet
//! flow behind one façade that the UI layer drives.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  UI layer                                                │
//! │  - perform(label, action)   - on_wallet_change()         │
//! │  - handle_auth_success()    - accept/dismiss prompt      │
//! └────────────┬─────────────────────────────────────────────┘
//!              │
//! ┌────────────▼─────────────────────────────────────────────┐
//! │  App                                                     │
//! │   ServiceGate ──allowed──> ActionExecutor                │
//! │        │                     └─ anonymous: PendingAction │
//! │        └─denied─> Notifier                               │
//! │   PrimaryWalletFlow ──> WalletAdapter / WalletLinkService│
//! │                     └─> DismissalStore (ClientStorage)   │
//! └────────────┬─────────────────────────────────────────────┘
//!              │ async_channel (unbounded)
//! ┌────────────▼─────────────────────────────────────────────┐
//! │  Notification receiver drained by the UI                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Construction
//!
//! ```rust,ignore
//! let app = AppBuilder::new(ClientConfig::from_env())
//!     .session(session)
//!     .wallet(wallet)
//!     .notifier(Arc::new(notifier))
//!     .build()
//!     .await?;
//!
//! app.perform("like", Action::future(move || like(nft_id))).await?;
//! ```
//!
//! Settings and wallet-link collaborators default to an [`ApiClient`] for
//! `config.api_base_url`; storage defaults to a [`FileStorage`] at `config.storage_path`.

use std::sync::Arc;

use crate::actions::{Action, ActionExecutor, CapturedEvent, ClickCapture, Execution, ExecutorOptions};
use crate::core::config::ClientConfig;
use crate::core::error::{ClientError, Result, ServiceError};
use crate::core::service::{
    Notifier, SessionProvider, SettingsSource, WalletAdapter, WalletLinkService,
};
use crate::gate::ServiceGate;
use crate::primary_wallet::{LinkOutcome, PrimaryWalletFlow, PromptState};
use crate::services::api::ApiClient;
use crate::services::notifications::LogNotifier;
use crate::storage::{ClientStorage, DismissalStore, FileStorage};

/// Client orchestrator
pub struct App {
    pub gate: Arc<ServiceGate>,
    pub executor: Arc<ActionExecutor>,
    pub flow: Arc<PrimaryWalletFlow>,
    settings: Arc<dyn SettingsSource>,
}

impl App {
    pub fn builder(config: ClientConfig) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// Gate check, then run or defer `action`.
    ///
    /// A gate denial notifies the user and returns [`Execution::Denied`] without
    /// touching the action. Deferred actions face the gate again when replayed.
    #[tracing::instrument(skip(self, action))]
    pub async fn perform(&self, label: &str, action: Action) -> Result<Execution> {
        let execution = self.executor.execute_labeled(label, action).await?;
        tracing::debug!(?execution, "Action dispatched");
        Ok(execution)
    }

    /// Suppress `event`, then gate and run or defer `action` like [`perform`](Self::perform).
    pub async fn on_click<E>(&self, label: &str, event: &mut E, action: Action) -> Result<Execution>
    where
        E: CapturedEvent + ?Sized,
    {
        self.click_capture().on_labeled_click(label, event, action).await
    }

    /// Click interceptor sharing this app's gated executor and pending slot
    pub fn click_capture(&self) -> ClickCapture {
        ClickCapture::wrap(self.executor.clone())
    }

    pub async fn handle_auth_success(&self) -> Result<Execution> {
        self.executor.handle_auth_success().await
    }

    pub fn handle_auth_cancelled(&self) {
        self.executor.handle_auth_cancelled();
    }

    pub fn close_auth_prompt(&self) {
        self.executor.close_auth_prompt();
    }

    /// Re-evaluate the primary-wallet prompt after a wallet or session change.
    pub async fn on_wallet_change(&self) -> PromptState {
        self.flow.on_connection_change().await
    }

    pub async fn accept_primary_prompt(&self) -> LinkOutcome {
        self.flow.handle_set_as_primary().await
    }

    pub fn dismiss_primary_prompt(&self) {
        self.flow.handle_dismiss();
    }

    /// Re-fetch the service flags from the configured source.
    pub async fn refresh_flags(&self) -> std::result::Result<(), ServiceError> {
        self.gate.refresh(self.settings.as_ref()).await
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("flags", &self.gate.flags())
            .field("auth_prompt_visible", &self.executor.auth_prompt_visible())
            .field("flow", &self.flow)
            .finish()
    }
}

/// Assembles an [`App`] from collaborators and a [`ClientConfig`].
pub struct AppBuilder {
    config: ClientConfig,
    session: Option<Arc<dyn SessionProvider>>,
    wallet: Option<Arc<dyn WalletAdapter>>,
    settings: Option<Arc<dyn SettingsSource>>,
    links: Option<Arc<dyn WalletLinkService>>,
    storage: Option<Arc<dyn ClientStorage>>,
    notifier: Option<Arc<dyn Notifier>>,
    on_success: Option<Box<dyn Fn() + Send + Sync>>,
}

impl AppBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: None,
            wallet: None,
            settings: None,
            links: None,
            storage: None,
            notifier: None,
            on_success: None,
        }
    }

    pub fn session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn wallet(mut self, wallet: Arc<dyn WalletAdapter>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn settings(mut self, settings: Arc<dyn SettingsSource>) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn links(mut self, links: Arc<dyn WalletLinkService>) -> Self {
        self.links = Some(links);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn ClientStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Callback fired after each completed action
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Validate the config, fetch the service flags once and wire everything together.
    pub async fn build(self) -> Result<App> {
        self.config.validate()?;

        let session = self
            .session
            .ok_or_else(|| ClientError::Config("session provider not set".into()))?;
        let wallet = self
            .wallet
            .ok_or_else(|| ClientError::Config("wallet adapter not set".into()))?;

        let api = (self.settings.is_none() || self.links.is_none())
            .then(|| Arc::new(ApiClient::new(&self.config)));
        let settings: Arc<dyn SettingsSource> = match (self.settings, &api) {
            (Some(settings), _) => settings,
            (None, Some(api)) => api.clone(),
            (None, None) => return Err(ClientError::Config("settings source not set".into())),
        };
        let links: Arc<dyn WalletLinkService> = match (self.links, &api) {
            (Some(links), _) => links,
            (None, Some(api)) => api.clone(),
            (None, None) => return Err(ClientError::Config("wallet link service not set".into())),
        };

        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(FileStorage::new(self.config.storage_path.clone())));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));

        let gate = Arc::new(ServiceGate::load(settings.as_ref(), session.clone(), notifier.clone()).await);

        let mut executor = ActionExecutor::new(session.clone(), ExecutorOptions::from_config(&self.config))
            .with_gate(gate.clone());
        if let Some(callback) = self.on_success {
            executor = executor.with_on_success(callback);
        }

        let flow = PrimaryWalletFlow::new(
            session,
            wallet,
            links,
            DismissalStore::new(storage),
            notifier,
        );

        tracing::info!(
            api_base_url = %self.config.api_base_url,
            require_auth = self.config.require_auth,
            "Marketplace client initialized"
        );

        Ok(App {
            gate,
            executor: Arc::new(executor),
            flow: Arc::new(flow),
            settings,
        })
    }
}
