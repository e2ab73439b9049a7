//! Newsletter subscription state.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NewsletterError {
    #[error("an email address is required to subscribe")]
    MissingEmail,
}

/// The stored subscription, if the user has signed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscription {
    NotSubscribed,

    /// Subscribed. Older stores may carry the flag without an address.
    Subscribed { email: Option<String> },
}

impl Subscription {
    /// A new subscription for `email`, which must not be blank.
    pub fn for_email(email: &str) -> Result<Self, NewsletterError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(NewsletterError::MissingEmail);
        }
        Ok(Self::Subscribed {
            email: Some(email.to_string()),
        })
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self, Self::Subscribed { .. })
    }
}

/// A curated reading suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub read_minutes: u8,
}

/// The built-in reading list, in display order.
pub const RESOURCES: [Resource; 6] = [
    Resource {
        title: "Understanding Emotional Patterns",
        description: "Learn to recognize and work with your emotional cycles for better mental health.",
        category: "Psychology",
        read_minutes: 5,
    },
    Resource {
        title: "The Science of Gratitude",
        description: "Research-backed benefits of gratitude practice and how to implement it daily.",
        category: "Wellness",
        read_minutes: 7,
    },
    Resource {
        title: "Mindful Self-Reflection Techniques",
        description: "Practical methods for deeper self-awareness and personal growth.",
        category: "Mindfulness",
        read_minutes: 6,
    },
    Resource {
        title: "Building Emotional Resilience",
        description: "Strategies to bounce back from challenges and maintain mental wellness.",
        category: "Psychology",
        read_minutes: 8,
    },
    Resource {
        title: "The Power of Monthly Check-ins",
        description: "Why regular self-assessment is crucial for long-term mental health.",
        category: "Wellness",
        read_minutes: 4,
    },
    Resource {
        title: "Creating Healthy Boundaries",
        description: "Learn to protect your mental energy and maintain healthy relationships.",
        category: "Relationships",
        read_minutes: 6,
    },
];

/// Resources in `category` (case-insensitive), or all of them.
pub fn resources(category: Option<&str>) -> Vec<&'static Resource> {
    RESOURCES
        .iter()
        .filter(|r| category.is_none_or(|c| r.category.eq_ignore_ascii_case(c.trim())))
        .collect()
}
