//! Institution registry
//!
//! Maps institution codes to quote providers. The first provider registered is
//! the adapter's own institution and serves requests that name none.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use core_kernel::Clock;

use crate::error::QuoteError;
use crate::profile::InstitutionProfile;
use crate::provider::{QuoteProvider, WeightedQuoteService};

/// Lookup of quote providers by upper-cased institution code
pub struct InstitutionRegistry {
    clock: Arc<dyn Clock>,
    providers: BTreeMap<String, Arc<dyn QuoteProvider>>,
    primary: Option<String>,
}

impl InstitutionRegistry {
    /// Creates an empty registry whose weighted providers share `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            providers: BTreeMap::new(),
            primary: None,
        }
    }

    /// Registry holding only the DAVIVIENDA profile
    pub fn davivienda(clock: Arc<dyn Clock>) -> Self {
        let mut registry = Self::new(clock);
        let service = WeightedQuoteService::davivienda(registry.clock.clone());
        registry.insert(Arc::new(service));
        registry
    }

    /// Registers a weighted provider for a validated profile
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::DuplicateInstitution` if the code is taken
    pub fn register(&mut self, profile: InstitutionProfile) -> Result<(), QuoteError> {
        let service = WeightedQuoteService::new(profile, self.clock.clone());
        self.register_provider(Arc::new(service))
    }

    /// Registers an arbitrary provider
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::DuplicateInstitution` if the code is taken
    pub fn register_provider(&mut self, provider: Arc<dyn QuoteProvider>) -> Result<(), QuoteError> {
        let code = normalize(provider.code());
        if self.providers.contains_key(&code) {
            return Err(QuoteError::DuplicateInstitution(code));
        }
        self.insert(provider);
        Ok(())
    }

    fn insert(&mut self, provider: Arc<dyn QuoteProvider>) {
        let code = normalize(provider.code());
        if self.primary.is_none() {
            self.primary = Some(code.clone());
        }
        self.providers.insert(code, provider);
    }

    /// Looks up a provider, ignoring case and surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::UnknownInstitution` when nothing is registered under the code
    pub fn get(&self, code: &str) -> Result<Arc<dyn QuoteProvider>, QuoteError> {
        let code = normalize(code);
        self.providers
            .get(&code)
            .cloned()
            .ok_or(QuoteError::UnknownInstitution(code))
    }

    /// Provider of the first registered institution
    pub fn default_provider(&self) -> Option<Arc<dyn QuoteProvider>> {
        self.primary
            .as_ref()
            .and_then(|code| self.providers.get(code))
            .cloned()
    }

    /// Registered codes in ascending order
    pub fn codes(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for InstitutionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstitutionRegistry")
            .field("codes", &self.codes())
            .field("primary", &self.primary)
            .finish()
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
