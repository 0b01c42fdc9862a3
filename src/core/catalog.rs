//! Built-in list of well-known services offered during onboarding.

use crate::core::subscription::Category;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredefinedService {
    pub id: &'static str,
    pub name: &'static str,
    pub icon_name: &'static str,
    /// Category pre-selected when configuring this service.
    pub category: Category,
    pub is_custom: bool,
}

impl PredefinedService {
    const fn known(
        id: &'static str,
        name: &'static str,
        icon_name: &'static str,
        category: Category,
    ) -> Self {
        Self {
            id,
            name,
            icon_name,
            category,
            is_custom: false,
        }
    }
}

/// Id of the template entry for user-defined subscriptions.
pub const CUSTOM_SERVICE_ID: &str = "custom";

static POPULAR_SERVICES: [PredefinedService; 13] = [
    PredefinedService::known(
        "netflix",
        "Netflix",
        "play.tv.fill",
        Category::Entertainment,
    ),
    PredefinedService::known("spotify", "Spotify", "music.note", Category::Music),
    PredefinedService::known(
        "disney-plus",
        "Disney+",
        "sparkles.tv.fill",
        Category::Entertainment,
    ),
    PredefinedService::known(
        "prime-video",
        "Prime Video",
        "play.rectangle.fill",
        Category::Entertainment,
    ),
    PredefinedService::known(
        "youtube-premium",
        "YouTube Premium",
        "play.rectangle.on.rectangle.fill",
        Category::Entertainment,
    ),
    PredefinedService::known(
        "apple-music",
        "Apple Music",
        "music.note.list",
        Category::Music,
    ),
    PredefinedService::known("icloud", "iCloud+", "icloud.fill", Category::Productivity),
    PredefinedService::known(
        "microsoft-365",
        "Microsoft 365",
        "doc.text.fill",
        Category::Productivity,
    ),
    PredefinedService::known(
        "adobe-cc",
        "Adobe Creative Cloud",
        "paintbrush.fill",
        Category::Productivity,
    ),
    PredefinedService::known(
        "nyt",
        "The New York Times",
        "newspaper.fill",
        Category::News,
    ),
    PredefinedService::known(
        "xbox-game-pass",
        "Xbox Game Pass",
        "gamecontroller.fill",
        Category::Gaming,
    ),
    PredefinedService::known("strava", "Strava", "figure.run", Category::Fitness),
    PredefinedService {
        id: CUSTOM_SERVICE_ID,
        name: "Custom",
        icon_name: "plus.circle.fill",
        category: Category::Other,
        is_custom: true,
    },
];

/// The process-wide catalog, in display order.
pub fn popular_services() -> &'static [PredefinedService] {
    &POPULAR_SERVICES
}

/// The template entry used for subscriptions the user enters by hand.
pub fn custom_service() -> &'static PredefinedService {
    // The custom entry is always the last one
    &POPULAR_SERVICES[POPULAR_SERVICES.len() - 1]
}
