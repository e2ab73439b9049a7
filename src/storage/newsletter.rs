//! Newsletter flag: subscribe and read back the subscription.

use tracing::info;

use crate::model::Subscription;
use crate::store::KvStore;

use super::{NEWSLETTER_EMAIL_KEY, NEWSLETTER_SUBSCRIBED_KEY, Result, Storage};

impl<S: KvStore> Storage<S> {
    /// Records a subscription for `email`.
    pub fn subscribe(&self, email: &str) -> Result<Subscription> {
        let subscription = Subscription::for_email(email)?;
        if let Subscription::Subscribed { email: Some(email) } = &subscription {
            self.store.save(NEWSLETTER_EMAIL_KEY, email)?;
        }
        self.store.save(NEWSLETTER_SUBSCRIBED_KEY, "true")?;
        info!("newsletter subscription recorded");
        Ok(subscription)
    }

    /// The stored subscription state.
    pub fn subscription(&self) -> Result<Subscription> {
        let subscribed = self.store.load(NEWSLETTER_SUBSCRIBED_KEY)?;
        if subscribed.as_deref() != Some("true") {
            return Ok(Subscription::NotSubscribed);
        }
        let email = self.store.load(NEWSLETTER_EMAIL_KEY)?;
        Ok(Subscription::Subscribed { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::NewsletterError;
    use crate::storage::StorageError;
    use crate::store::MemoryStore;

    #[test]
    fn not_subscribed_by_default() {
        let storage = Storage::new(MemoryStore::new());
        assert_eq!(storage.subscription().unwrap(), Subscription::NotSubscribed);
    }

    #[test]
    fn subscribe_then_read_back() {
        let storage = Storage::new(MemoryStore::new());
        storage.subscribe("me@example.com").unwrap();

        assert_eq!(
            storage.subscription().unwrap(),
            Subscription::Subscribed {
                email: Some("me@example.com".into())
            }
        );
    }

    #[test]
    fn blank_email_leaves_state_untouched() {
        let storage = Storage::new(MemoryStore::new());

        let err = storage.subscribe("   ").unwrap_err();

        assert!(matches!(
            err,
            StorageError::Newsletter(NewsletterError::MissingEmail)
        ));
        assert!(!storage.subscription().unwrap().is_subscribed());
    }

    #[test]
    fn flag_without_email_still_counts() {
        let store = MemoryStore::new();
        store.save(NEWSLETTER_SUBSCRIBED_KEY, "true").unwrap();
        let storage = Storage::new(store);

        assert_eq!(
            storage.subscription().unwrap(),
            Subscription::Subscribed { email: None }
        );
    }
}
