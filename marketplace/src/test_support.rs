//! Hand-written collaborator doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared::{LinkWalletRequest, ServiceFlags, Session, WalletConnection};

use crate::core::error::{ServiceError, WalletError};
use crate::core::service::{SessionProvider, SettingsSource, WalletAdapter, WalletLinkService};

/// Session whose state the test flips directly
#[derive(Default)]
pub struct TestSession {
    session: RwLock<Session>,
}

impl TestSession {
    pub fn new(session: Session) -> Arc<Self> {
        Arc::new(Self {
            session: RwLock::new(session),
        })
    }

    pub fn set(&self, session: Session) {
        *self.session.write() = session;
    }
}

impl SessionProvider for TestSession {
    fn session(&self) -> Session {
        self.session.read().clone()
    }
}

/// Wallet with a scripted queue of signing results
pub struct TestWallet {
    connection: RwLock<WalletConnection>,
    sign_results: Mutex<VecDeque<Result<Option<Vec<u8>>, WalletError>>>,
    pub sign_calls: AtomicUsize,
    pub last_message: Mutex<Option<Vec<u8>>>,
}

impl TestWallet {
    pub fn new(connection: WalletConnection) -> Arc<Self> {
        Arc::new(Self {
            connection: RwLock::new(connection),
            sign_results: Mutex::new(VecDeque::new()),
            sign_calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
        })
    }

    pub fn set_connection(&self, connection: WalletConnection) {
        *self.connection.write() = connection;
    }

    pub fn push_sign_result(&self, result: Result<Option<Vec<u8>>, WalletError>) {
        self.sign_results.lock().push_back(result);
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletAdapter for TestWallet {
    fn connection(&self) -> WalletConnection {
        self.connection.read().clone()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Option<Vec<u8>>, WalletError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock() = Some(message.to_vec());
        self.sign_results
            .lock()
            .pop_front()
            .unwrap_or(Ok(Some(vec![7u8; 64])))
    }
}

/// Link service with configurable answers and a request log
pub struct TestLinks {
    pub has_primary: RwLock<Result<bool, ServiceError>>,
    pub link_result: RwLock<Result<bool, ServiceError>>,
    pub requests: Mutex<Vec<LinkWalletRequest>>,
    pub lookups: AtomicUsize,
}

impl TestLinks {
    pub fn new(has_primary: bool) -> Arc<Self> {
        Arc::new(Self {
            has_primary: RwLock::new(Ok(has_primary)),
            link_result: RwLock::new(Ok(true)),
            requests: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn set_link_result(&self, result: Result<bool, ServiceError>) {
        *self.link_result.write() = result;
    }

    pub fn set_has_primary(&self, result: Result<bool, ServiceError>) {
        *self.has_primary.write() = result;
    }

    pub fn link_requests(&self) -> Vec<LinkWalletRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl WalletLinkService for TestLinks {
    async fn has_primary_wallet(&self, _user_id: &str) -> Result<bool, ServiceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.has_primary.read().clone()
    }

    async fn link_wallet(&self, request: &LinkWalletRequest) -> Result<bool, ServiceError> {
        self.requests.lock().push(request.clone());
        self.link_result.read().clone()
    }
}

/// Settings source returning a fixed answer
pub struct TestSettings(pub Result<ServiceFlags, ServiceError>);

#[async_trait]
impl SettingsSource for TestSettings {
    async fn fetch_service_flags(&self) -> Result<ServiceFlags, ServiceError> {
        self.0.clone()
    }
}
