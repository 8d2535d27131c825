//! Route guard inspection.

use buy01_storefront::StorefrontClient;
use buy01_storefront::guard::route;

/// Print the guard decision for `url`.
pub async fn check(client: &StorefrontClient, url: &str) {
    match route(url) {
        Some(route) if !route.guarded => {
            tracing::info!("{url}: not guarded");
            return;
        }
        Some(_) => {}
        None => tracing::warn!("{url} is not a known route"),
    }

    let decision = client.can_activate(url).await;
    tracing::info!("{url}: {decision}");

    if let Some(message) = client.notifier().latest().and_then(|m| m.error) {
        tracing::warn!("{message}");
    }
}
