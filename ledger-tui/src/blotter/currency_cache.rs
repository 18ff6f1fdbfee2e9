use ledger_db::entities::{currencies::Currency, CurrencyId};
use ledger_db::CurrencyRepository;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Memoizes currency lookups for the lifetime of a screen
pub struct CurrencyCache<R: ?Sized> {
    repository: Rc<R>,
    currencies: RefCell<HashMap<CurrencyId, Currency>>,
}

impl<R: CurrencyRepository + ?Sized> CurrencyCache<R> {
    pub fn new(repository: Rc<R>) -> Self {
        Self {
            repository,
            currencies: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve a currency. Unknown ids resolve to [`Currency::empty`] and
    /// are cached as such.
    pub fn get(&self, id: CurrencyId) -> Currency {
        if let Some(currency) = self.currencies.borrow().get(&id) {
            return currency.clone();
        }

        let currency = self.repository.currency_by_id(id).unwrap_or_else(|| {
            tracing::warn!("Currency {} not found, formatting without symbol", id);
            Currency::empty()
        });
        self.currencies.borrow_mut().insert(id, currency.clone());
        currency
    }

    pub fn clear(&self) {
        self.currencies.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.currencies.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.borrow().is_empty()
    }
}

impl<R: ?Sized> fmt::Debug for CurrencyCache<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrencyCache")
            .field("currencies", &self.currencies.borrow().len())
            .finish_non_exhaustive()
    }
}
