use crate::adapters::JsonStore;
use crate::domain::ids::CustomerId;
use crate::domain::model::{Customer, CustomerUpdate};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::sync::Arc;

pub struct CustomerService<S: Storage> {
    store: Arc<JsonStore<S>>,
}

impl<S: Storage> Clone for CustomerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Storage> CustomerService<S> {
    pub fn new(store: Arc<JsonStore<S>>) -> Self {
        Self { store }
    }

    pub fn create(&self, name: &str, email: &str) -> Result<Customer> {
        let customer = Customer::new(name, email)?;

        let mut customers: Vec<Customer> = self.store.load();
        customers.push(customer.clone());
        self.store.save(&customers)?;

        tracing::info!("Created customer {} '{}'", customer.id(), customer.name());
        Ok(customer)
    }

    pub fn get(&self, id: &CustomerId) -> Option<Customer> {
        self.store
            .load::<Customer>()
            .into_iter()
            .find(|customer| customer.id() == id)
    }

    pub fn list(&self) -> Vec<Customer> {
        self.store.load()
    }

    pub fn update(&self, id: &CustomerId, update: &CustomerUpdate) -> Result<Option<Customer>> {
        let mut customers: Vec<Customer> = self.store.load();
        let Some(slot) = customers.iter_mut().find(|customer| customer.id() == id) else {
            return Ok(None);
        };

        let updated = slot.apply(update)?;
        *slot = updated.clone();
        self.store.save(&customers)?;

        tracing::info!("Updated customer {}", id);
        Ok(Some(updated))
    }

    pub fn delete(&self, id: &CustomerId) -> Result<bool> {
        let mut customers: Vec<Customer> = self.store.load();
        let before = customers.len();
        customers.retain(|customer| customer.id() != id);
        if customers.len() == before {
            return Ok(false);
        }

        self.store.save(&customers)?;
        tracing::info!("Deleted customer {}", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;

    fn service() -> CustomerService<MemoryStorage> {
        CustomerService::new(Arc::new(JsonStore::new(MemoryStorage::new())))
    }

    #[test]
    fn test_customer_crud() {
        let customers = service();

        let customer = customers.create("Alice", "alice@example.com").unwrap();
        assert!(customers.get(customer.id()).is_some());

        let updated = customers
            .update(
                customer.id(),
                &CustomerUpdate {
                    name: Some("Alicia".to_string()),
                    email: None,
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name(), "Alicia");
        assert_eq!(updated.email(), "alice@example.com");

        assert!(customers.delete(customer.id()).unwrap());
        assert!(customers.get(customer.id()).is_none());
        assert!(!customers.delete(customer.id()).unwrap());
    }

    #[test]
    fn test_update_with_invalid_email_fails() {
        let customers = service();
        let customer = customers.create("Bob", "bob@example.com").unwrap();

        let result = customers.update(
            customer.id(),
            &CustomerUpdate {
                name: None,
                email: Some("bob-at-example".to_string()),
            },
        );

        assert!(result.is_err());
        assert_eq!(
            customers.get(customer.id()).unwrap().email(),
            "bob@example.com"
        );
    }

    #[test]
    fn test_update_unknown_returns_none() {
        let customers = service();
        let result = customers
            .update(&CustomerId::generate(), &CustomerUpdate::default())
            .unwrap();
        assert!(result.is_none());
    }
}
