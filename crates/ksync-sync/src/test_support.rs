//! In-memory store and authenticator used by engine and runner tests

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use ksync_core::config::UserCredentials;
use ksync_core::domain::{
    AccountSession, CollectionId, RemoteCollection, RemoteError, RemoteRoute, RouteId, UserId,
};
use ksync_core::ports::{IAuthenticator, IRouteStore};

/// One recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListCollections(String),
    CreateCollection(String),
    DeleteCollection(String),
    ListRoutes(String),
    DeleteRoute(String),
    /// Collection id and file name
    Import(String, String),
}

#[derive(Default)]
struct State {
    collections: Vec<RemoteCollection>,
    routes: HashMap<String, Vec<String>>,
    calls: Vec<Call>,
    next_id: u32,
    failing_creates: HashSet<String>,
    failing_imports: HashSet<String>,
    failing_route_deletes: HashSet<String>,
    failing_route_lists: HashSet<String>,
    failing_collection_lists: HashSet<String>,
}

/// Route store keeping collections and routes in memory
#[derive(Default)]
pub struct MockRouteStore {
    state: Mutex<State>,
}

impl MockRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(self, id: &str, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .collections
            .push(RemoteCollection::new(CollectionId::new(id).unwrap(), name));
        self
    }

    pub fn with_routes(self, collection_id: &str, route_ids: &[&str]) -> Self {
        self.state.lock().unwrap().routes.insert(
            collection_id.to_string(),
            route_ids.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    pub fn failing_create(self, name: &str) -> Self {
        self.state.lock().unwrap().failing_creates.insert(name.to_string());
        self
    }

    pub fn failing_import(self, file_name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_imports
            .insert(file_name.to_string());
        self
    }

    pub fn failing_route_delete(self, route_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_route_deletes
            .insert(route_id.to_string());
        self
    }

    pub fn failing_route_list(self, collection_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_route_lists
            .insert(collection_id.to_string());
        self
    }

    pub fn failing_collection_list(self, username: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_collection_lists
            .insert(username.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn collections(&self) -> Vec<RemoteCollection> {
        self.state.lock().unwrap().collections.clone()
    }

    fn rejected() -> RemoteError {
        RemoteError::Rejected {
            status: 400,
            message: "rejected by mock".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl IRouteStore for MockRouteStore {
    async fn list_collections(
        &self,
        session: &AccountSession,
    ) -> Result<Vec<RemoteCollection>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::ListCollections(session.username.clone()));
        if state.failing_collection_lists.contains(&session.username) {
            return Err(RemoteError::Transport("connection reset".to_string()));
        }
        Ok(state.collections.clone())
    }

    async fn create_collection(
        &self,
        _session: &AccountSession,
        name: &str,
        _description: &str,
    ) -> Result<RemoteCollection, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateCollection(name.to_string()));
        if state.failing_creates.contains(name) {
            return Err(Self::rejected());
        }
        state.next_id += 1;
        let created = RemoteCollection::new(
            CollectionId::new(format!("new-{}", state.next_id)).unwrap(),
            name,
        );
        state.collections.push(created.clone());
        Ok(created)
    }

    async fn delete_collection(
        &self,
        _session: &AccountSession,
        collection_id: &CollectionId,
    ) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::DeleteCollection(collection_id.to_string()));
        state.collections.retain(|c| &c.id != collection_id);
        Ok(())
    }

    async fn list_routes(
        &self,
        _session: &AccountSession,
        collection_id: &CollectionId,
    ) -> Result<Vec<RemoteRoute>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListRoutes(collection_id.to_string()));
        if state.failing_route_lists.contains(collection_id.as_str()) {
            return Err(RemoteError::Transport("timeout".to_string()));
        }
        Ok(state
            .routes
            .get(collection_id.as_str())
            .into_iter()
            .flatten()
            .map(|id| RemoteRoute {
                id: RouteId::new(id.clone()).unwrap(),
                collection_id: collection_id.clone(),
            })
            .collect())
    }

    async fn delete_route(
        &self,
        _session: &AccountSession,
        route_id: &RouteId,
    ) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DeleteRoute(route_id.to_string()));
        if state.failing_route_deletes.contains(route_id.as_str()) {
            return Err(Self::rejected());
        }
        for routes in state.routes.values_mut() {
            routes.retain(|r| r != route_id.as_str());
        }
        Ok(())
    }

    async fn import_route_file(
        &self,
        _session: &AccountSession,
        collection_id: &CollectionId,
        file_path: &Path,
    ) -> Result<(), RemoteError> {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::Import(collection_id.to_string(), file_name.clone()));
        if state.failing_imports.contains(&file_name) {
            return Err(Self::rejected());
        }
        Ok(())
    }
}

/// Authenticator accepting every user except those marked as rejected
#[derive(Default)]
pub struct MockAuthenticator {
    rejected: HashSet<String>,
    attempts: Mutex<Vec<String>>,
}

impl MockAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, username: &str) -> Self {
        self.rejected.insert(username.to_string());
        self
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IAuthenticator for MockAuthenticator {
    async fn authenticate(
        &self,
        credentials: &UserCredentials,
    ) -> Result<AccountSession, RemoteError> {
        self.attempts
            .lock()
            .unwrap()
            .push(credentials.username.clone());
        if self.rejected.contains(&credentials.username) {
            return Err(RemoteError::Auth("401 Unauthorized: invalid_grant".to_string()));
        }
        Ok(session(&credentials.username))
    }
}

/// Session for `username` with a user id derived from it
pub fn session(username: &str) -> AccountSession {
    let user_id = format!("id-{}", username.replace(['@', '.'], "-"));
    AccountSession::new(username, "token", UserId::new(user_id).unwrap())
}
