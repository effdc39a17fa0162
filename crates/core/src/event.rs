//! Traits and macros for working with typed vault events.

use crate::type_id_from_url;

/// Canonical domain event trait implemented by typed payloads.
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Trait providing static metadata for events.
pub trait StaticEvent: Event {
    const URL: &'static str;
    const TYPE_ID: u64 = type_id_from_url(Self::URL);
    fn to_envelope(self, meta: crate::EventMetadata) -> crate::Envelope;
}

/// Helper macro to implement [`Event`] and [`StaticEvent`] for a struct with
/// the provided type URL.
#[macro_export]
macro_rules! impl_event {
    ($t:ty, $url:expr) => {
        impl $crate::StaticEvent for $t {
            const URL: &'static str = $url;
            fn to_envelope(self, meta: $crate::EventMetadata) -> $crate::Envelope {
                $crate::Envelope {
                    type_id: Self::TYPE_ID,
                    meta,
                    body: std::sync::Arc::new(self) as std::sync::Arc<dyn $crate::Event>,
                }
            }
        }

        impl $crate::Event for $t {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}
